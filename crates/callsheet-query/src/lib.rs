//! Query-document parsing for the Callsheet metadata API.
//!
//! Callsheet's query endpoint accepts a GraphQL-shaped document and
//! dispatches it to exactly one resolver. This crate owns the language
//! work behind that endpoint: a hand-written, character-level,
//! recursive-descent parser that reduces a query document to a single
//! canonical field invocation — the field name, its response alias, and
//! its argument tree.
//!
//! The grammar is a deliberate subset of the general query language:
//! one operation, one root field, no fragments, no directives, no
//! variables. Nested selection sets are accepted for compatibility with
//! client tooling, syntactically validated, and discarded. The parser
//! never executes anything; it only produces a [`FieldDescriptor`] (or
//! fails with a [`QueryParseError`]).
//!
//! # Usage
//!
//! ```rust
//! use callsheet_query::parse_query;
//!
//! let descriptor = parse_query(r#"{ findActor(name: "Tester") }"#).unwrap();
//! assert_eq!(descriptor.field(), "findActor");
//! assert_eq!(descriptor.alias(), "findActor");
//! assert_eq!(descriptor.args().len(), 1);
//! ```

mod cursor;
mod field_descriptor;
mod query_parse_error;
mod query_parser;
mod source_position;
mod value;

pub use field_descriptor::FieldDescriptor;
pub use query_parse_error::QueryParseError;
pub use query_parser::QueryParser;
pub use query_parser::parse_query;
pub use source_position::SourcePosition;
pub use value::Value;

#[cfg(test)]
mod tests;
