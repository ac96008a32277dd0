//! Tests for the scan cursor primitives.

use crate::cursor::Cursor;
use crate::cursor::is_name_continue;
use crate::cursor::is_name_start;

// =============================================================================
// Peek / advance
// =============================================================================

/// Peeking never consumes; advancing consumes exactly one character.
#[test]
fn peek_then_advance() {
    let mut cursor = Cursor::new("ab");

    assert_eq!(cursor.peek(), Some('a'));
    assert_eq!(cursor.peek(), Some('a'));
    assert_eq!(cursor.advance(), Some('a'));
    assert_eq!(cursor.peek(), Some('b'));
    assert_eq!(cursor.advance(), Some('b'));
    assert_eq!(cursor.peek(), None);
    assert!(cursor.is_at_end());
}

/// End of input is a sentinel, not an out-of-bounds access: advancing
/// past the end keeps returning `None`.
#[test]
fn advance_past_end() {
    let mut cursor = Cursor::new("");

    assert_eq!(cursor.advance(), None);
    assert_eq!(cursor.advance(), None);
    assert!(cursor.is_at_end());
}

/// Multi-byte characters advance the column by one and the byte offset
/// by their UTF-8 length.
#[test]
fn advance_multibyte() {
    let mut cursor = Cursor::new("é!");

    cursor.advance();
    let pos = cursor.position();
    assert_eq!(pos.column(), 1);
    assert_eq!(pos.byte_offset(), 2);
    assert_eq!(cursor.peek(), Some('!'));
}

// =============================================================================
// Position tracking
// =============================================================================

/// `\n` starts a new line and resets the column.
#[test]
fn newline_tracking() {
    let mut cursor = Cursor::new("a\nb");

    cursor.advance();
    cursor.advance();
    let pos = cursor.position();
    assert_eq!(pos.line(), 1);
    assert_eq!(pos.column(), 0);

    cursor.advance();
    assert_eq!(cursor.position().column(), 1);
}

/// `\r\n` counts as a single line terminator.
#[test]
fn crlf_counts_one_line() {
    let mut cursor = Cursor::new("a\r\nb");

    cursor.advance(); // a
    cursor.advance(); // \r
    cursor.advance(); // \n
    assert_eq!(cursor.position().line(), 1);

    cursor.advance(); // b
    assert_eq!(cursor.position().line(), 1);
    assert_eq!(cursor.position().column(), 1);
}

/// A lone `\r` is also a line terminator.
#[test]
fn lone_cr_counts_one_line() {
    let mut cursor = Cursor::new("a\rb");

    cursor.advance();
    cursor.advance();
    assert_eq!(cursor.position().line(), 1);
    assert_eq!(cursor.peek(), Some('b'));
}

/// `text_since` slices between a saved offset and the current one.
#[test]
fn text_since_slices() {
    let mut cursor = Cursor::new("hello world");

    let start = cursor.byte_offset();
    for _ in 0..5 {
        cursor.advance();
    }
    assert_eq!(cursor.text_since(start), "hello");
}

// =============================================================================
// Expect
// =============================================================================

/// `expect` consumes a matching character.
#[test]
fn expect_matching() {
    let mut cursor = Cursor::new("{x");

    assert!(cursor.expect('{').is_ok());
    assert_eq!(cursor.peek(), Some('x'));
}

/// `expect` fails without consuming on a mismatch, and at end of input.
#[test]
fn expect_mismatch() {
    let mut cursor = Cursor::new("x");

    let err = cursor.expect('{').unwrap_err();
    assert_eq!(err.message(), "Expected `{`");
    assert_eq!(cursor.peek(), Some('x'));

    let mut empty = Cursor::new("");
    assert!(empty.expect('}').is_err());
}

// =============================================================================
// Ignored tokens
// =============================================================================

/// Whitespace and commas are skipped as one undifferentiated run.
#[test]
fn skip_ignored_whitespace_and_commas() {
    let mut cursor = Cursor::new("  ,\t,\n , x");

    cursor.skip_ignored();
    assert_eq!(cursor.peek(), Some('x'));
}

/// A `#` comment is skipped through the end of the line; scanning
/// resumes on the next line.
#[test]
fn skip_ignored_comment() {
    let mut cursor = Cursor::new("# a comment with } and \" inside\nx");

    cursor.skip_ignored();
    assert_eq!(cursor.peek(), Some('x'));
    assert_eq!(cursor.position().line(), 1);
}

/// A comment with no trailing newline runs to the end of input.
#[test]
fn skip_ignored_comment_at_eof() {
    let mut cursor = Cursor::new("# trailing");

    cursor.skip_ignored();
    assert!(cursor.is_at_end());
}

/// A BOM is ignored like whitespace.
#[test]
fn skip_ignored_bom() {
    let mut cursor = Cursor::new("\u{FEFF}x");

    cursor.skip_ignored();
    assert_eq!(cursor.peek(), Some('x'));
}

/// `skip_ignored` is a no-op on significant characters.
#[test]
fn skip_ignored_stops_at_token() {
    let mut cursor = Cursor::new("name");

    cursor.skip_ignored();
    assert_eq!(cursor.byte_offset(), 0);
}

// =============================================================================
// Character classification
// =============================================================================

/// Identifiers start with a letter or underscore and continue with
/// letters, digits, and underscores.
#[test]
fn name_classification() {
    assert!(is_name_start('a'));
    assert!(is_name_start('Z'));
    assert!(is_name_start('_'));
    assert!(!is_name_start('1'));
    assert!(!is_name_start('-'));

    assert!(is_name_continue('a'));
    assert!(is_name_continue('9'));
    assert!(is_name_continue('_'));
    assert!(!is_name_continue('-'));
    assert!(!is_name_continue(' '));
}
