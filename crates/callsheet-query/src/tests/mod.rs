mod cursor_tests;
mod utils;
