//! Shared helpers for the parser test modules.

use crate::FieldDescriptor;
use crate::QueryParseError;
use crate::parse_query;

/// Parses a document that the test expects to succeed.
pub fn parse(source: &str) -> FieldDescriptor {
    parse_query(source)
        .unwrap_or_else(|err| panic!("expected `{source}` to parse, got error: {err}"))
}

/// Parses a document that the test expects to fail.
pub fn parse_err(source: &str) -> QueryParseError {
    match parse_query(source) {
        Ok(descriptor) => {
            panic!("expected `{source}` to fail, got descriptor: {descriptor:?}")
        }
        Err(err) => err,
    }
}
