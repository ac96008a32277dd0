//! Recursive descent parser for Callsheet query documents.
//!
//! The grammar is the single-root-field subset served by the query
//! endpoint: an optional operation keyword and name (recognized and
//! discarded), one selection set containing exactly one field, an
//! optional alias, an optional argument list, and an optional nested
//! selection set that is syntactically validated and then dropped.
//!
//! Every grammar rule is a `parse_*` method threading the scan cursor
//! by `&mut self` and returning `Result<_, QueryParseError>`; errors
//! propagate with `?` straight to the boundary. Parsing is synchronous,
//! allocation is proportional to the input, and recursion depth is
//! bounded by the nesting depth of the literal text.

use crate::FieldDescriptor;
use crate::QueryParseError;
use crate::SourcePosition;
use crate::Value;
use crate::cursor::Cursor;
use crate::cursor::is_name_continue;
use crate::cursor::is_name_start;
use indexmap::IndexMap;

/// Parses a query document into its single root-field invocation.
///
/// The document must already be a complete string; surrounding
/// whitespace is the caller's concern, though internal separator runs
/// (whitespace, commas, `#` comments) are handled everywhere the
/// grammar allows them.
///
/// # Example
///
/// ```rust
/// use callsheet_query::parse_query;
///
/// let descriptor = parse_query("{ seasons: listSeasons(showId: 7) }").unwrap();
/// assert_eq!(descriptor.field(), "listSeasons");
/// assert_eq!(descriptor.alias(), "seasons");
/// ```
pub fn parse_query(source: &str) -> Result<FieldDescriptor, QueryParseError> {
    QueryParser::new(source).parse()
}

/// A recursive descent parser over one query document.
///
/// Each parser owns its cursor exclusively; nothing is shared between
/// invocations, so any number of request handlers may parse
/// concurrently without locking.
pub struct QueryParser<'src> {
    cursor: Cursor<'src>,
}

impl<'src> QueryParser<'src> {
    /// Creates a parser for the given document.
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Parses the document, consuming the parser.
    ///
    /// On success the whole input has been consumed and exactly one
    /// [`FieldDescriptor`] is returned; there is no partial result on
    /// failure.
    pub fn parse(mut self) -> Result<FieldDescriptor, QueryParseError> {
        self.cursor.skip_ignored();
        self.parse_operation_prefix()?;

        // The one selection set: `{` field `}`
        if self.cursor.peek() != Some('{') {
            return Err(self.error_here("Expected selection set"));
        }
        self.cursor.advance();
        self.cursor.skip_ignored();

        let descriptor = self.parse_field()?;

        self.cursor.skip_ignored();
        match self.cursor.peek() {
            Some('}') => {
                self.cursor.advance();
            }
            Some(ch) if is_name_start(ch) => {
                return Err(self.error_here("Only a single root field is supported"));
            }
            Some(_) => {
                return Err(self.error_here("Expected `}`"));
            }
            None => {
                return Err(self.error_here("Unclosed selection set"));
            }
        }

        // The document must be exhausted after the closing brace.
        self.cursor.skip_ignored();
        if !self.cursor.is_at_end() {
            return Err(self.error_here("Unexpected token after selection"));
        }

        Ok(descriptor)
    }

    // =========================================================================
    // Operation grammar
    // =========================================================================

    /// Consumes an optional operation keyword and operation name.
    ///
    /// `query`, `mutation`, and `subscription` are recognized and
    /// discarded; they carry no weight in the descriptor. Any other
    /// leading word is a syntax error, since the selection set is the
    /// only other legal document form.
    fn parse_operation_prefix(&mut self) -> Result<(), QueryParseError> {
        let Some(ch) = self.cursor.peek() else {
            return Err(self.error_here("Expected selection set"));
        };
        if !is_name_start(ch) {
            return Ok(());
        }

        let keyword_position = self.cursor.position();
        let keyword = self.parse_name("operation keyword")?;
        if !matches!(keyword.as_str(), "query" | "mutation" | "subscription") {
            return Err(QueryParseError::new(
                "Expected selection set",
                keyword_position,
            ));
        }

        self.cursor.skip_ignored();
        if let Some(ch) = self.cursor.peek()
            && is_name_start(ch)
        {
            // Operation name: recognized, then discarded
            self.parse_name("operation name")?;
            self.cursor.skip_ignored();
        }

        Ok(())
    }

    // =========================================================================
    // Field grammar
    // =========================================================================

    /// Parses the single root field: `alias: field (args) { ... }` with
    /// everything after the first identifier optional.
    fn parse_field(&mut self) -> Result<FieldDescriptor, QueryParseError> {
        let name = self.parse_name("field name")?;
        self.cursor.skip_ignored();

        // `alias: field` — the first identifier was the alias
        let (alias, field) = if self.cursor.peek() == Some(':') {
            self.cursor.advance();
            self.cursor.skip_ignored();
            let field = self.parse_name("field name")?;
            self.cursor.skip_ignored();
            (name, field)
        } else {
            (name.clone(), name)
        };

        let args = if self.cursor.peek() == Some('(') {
            let args = self.parse_arguments()?;
            self.cursor.skip_ignored();
            args
        } else {
            IndexMap::new()
        };

        // A nested selection set is validated and dropped: the resolver
        // behind this parser is a single flat dispatch target, and sub-
        // selections exist only for compatibility with client tooling.
        if self.cursor.peek() == Some('{') {
            self.skip_nested_selection()?;
        }

        Ok(FieldDescriptor::new(field, alias, args))
    }

    /// Parses a parenthesized argument list into a name→value map.
    ///
    /// Zero pairs are allowed; duplicate names keep their first position
    /// and the last written value.
    fn parse_arguments(&mut self) -> Result<IndexMap<String, Value>, QueryParseError> {
        debug_assert_eq!(self.cursor.peek(), Some('('));
        self.cursor.advance();

        let mut args = IndexMap::new();
        loop {
            self.cursor.skip_ignored();
            match self.cursor.peek() {
                Some(')') => {
                    self.cursor.advance();
                    break;
                }
                Some(_) => {
                    let name = self.parse_name("argument name")?;
                    self.cursor.skip_ignored();
                    if self.cursor.peek() != Some(':') {
                        return Err(self.error_here("Expected `:` after argument name"));
                    }
                    self.cursor.advance();
                    self.cursor.skip_ignored();
                    let value = self.parse_value()?;
                    args.insert(name, value);
                }
                None => {
                    return Err(self.error_here("Unclosed argument list"));
                }
            }
        }

        Ok(args)
    }

    /// Validates a nested selection set without keeping its contents.
    ///
    /// Braces are counted raw, except that `"`-quoted strings (with
    /// backslash escapes) and `"""` block strings are skipped whole so a
    /// brace inside a string literal is never mis-counted.
    fn skip_nested_selection(&mut self) -> Result<(), QueryParseError> {
        debug_assert_eq!(self.cursor.peek(), Some('{'));
        let open_position = self.cursor.position();
        self.cursor.advance();
        let mut depth: usize = 1;

        while depth > 0 {
            match self.cursor.peek() {
                Some('{') => {
                    self.cursor.advance();
                    depth += 1;
                }
                Some('}') => {
                    self.cursor.advance();
                    depth -= 1;
                }
                Some('"') => {
                    if self.cursor.remaining().starts_with("\"\"\"") {
                        self.skip_block_string()?;
                    } else {
                        self.skip_string()?;
                    }
                }
                Some(_) => {
                    self.cursor.advance();
                }
                None => {
                    return Err(QueryParseError::new("Unclosed selection set", open_position));
                }
            }
        }

        Ok(())
    }

    // =========================================================================
    // Value grammar
    // =========================================================================

    /// Parses a value, dispatching on one character of lookahead.
    fn parse_value(&mut self) -> Result<Value, QueryParseError> {
        match self.cursor.peek() {
            Some('"') => {
                if self.cursor.remaining().starts_with("\"\"\"") {
                    self.parse_block_string()
                } else {
                    self.parse_string()
                }
            }
            Some('[') => self.parse_list(),
            Some('{') => self.parse_object(),
            Some('$') => Err(self.error_here("Variables are not supported")),
            Some(ch) if ch == '-' || ch.is_ascii_digit() => self.parse_number(),
            Some(ch) if is_name_start(ch) => self.parse_word(),
            Some(_) | None => Err(self.error_here("Expected value")),
        }
    }

    /// Parses a bracketed list of values.
    fn parse_list(&mut self) -> Result<Value, QueryParseError> {
        debug_assert_eq!(self.cursor.peek(), Some('['));
        self.cursor.advance();

        let mut items = Vec::new();
        loop {
            self.cursor.skip_ignored();
            match self.cursor.peek() {
                Some(']') => {
                    self.cursor.advance();
                    break;
                }
                Some(_) => items.push(self.parse_value()?),
                None => return Err(self.error_here("Unclosed list value")),
            }
        }

        Ok(Value::List(items))
    }

    /// Parses a braced object of `name: value` fields.
    fn parse_object(&mut self) -> Result<Value, QueryParseError> {
        debug_assert_eq!(self.cursor.peek(), Some('{'));
        self.cursor.advance();

        let mut fields = IndexMap::new();
        loop {
            self.cursor.skip_ignored();
            match self.cursor.peek() {
                Some('}') => {
                    self.cursor.advance();
                    break;
                }
                Some(_) => {
                    let name = self.parse_name("object field name")?;
                    self.cursor.skip_ignored();
                    if self.cursor.peek() != Some(':') {
                        return Err(self.error_here("Expected `:` after object field name"));
                    }
                    self.cursor.advance();
                    self.cursor.skip_ignored();
                    let value = self.parse_value()?;
                    fields.insert(name, value);
                }
                None => return Err(self.error_here("Unclosed object value")),
            }
        }

        Ok(Value::Object(fields))
    }

    /// Parses a bare word: `true`, `false`, `null`, or an enum-style
    /// token carried through verbatim.
    fn parse_word(&mut self) -> Result<Value, QueryParseError> {
        let word = self.parse_name("value")?;
        Ok(match word.as_str() {
            "true" => Value::Boolean(true),
            "false" => Value::Boolean(false),
            "null" => Value::Null,
            _ => Value::String(word),
        })
    }

    // =========================================================================
    // String literals
    // =========================================================================

    /// Parses a `"`-quoted string literal, resolving escape sequences.
    fn parse_string(&mut self) -> Result<Value, QueryParseError> {
        debug_assert_eq!(self.cursor.peek(), Some('"'));
        let open_position = self.cursor.position();
        self.cursor.advance();

        let mut result = String::new();
        loop {
            match self.cursor.advance() {
                Some('"') => break,
                Some('\\') => result.push(self.parse_escape_sequence()?),
                Some(ch) => result.push(ch),
                None => {
                    return Err(QueryParseError::new(
                        "Unterminated string literal",
                        open_position,
                    ));
                }
            }
        }

        Ok(Value::String(result))
    }

    /// Resolves one escape sequence; the `\` has already been consumed.
    fn parse_escape_sequence(&mut self) -> Result<char, QueryParseError> {
        let escape_position = self.cursor.position();
        match self.cursor.advance() {
            Some('"') => Ok('"'),
            Some('\\') => Ok('\\'),
            Some('/') => Ok('/'),
            Some('b') => Ok('\u{0008}'),
            Some('f') => Ok('\u{000C}'),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('t') => Ok('\t'),
            Some('u') => self.parse_unicode_escape(escape_position),
            Some(other) => Err(QueryParseError::new(
                format!("Invalid escape sequence: `\\{other}`"),
                escape_position,
            )),
            None => Err(QueryParseError::new(
                "Invalid escape sequence: `\\`",
                escape_position,
            )),
        }
    }

    /// Decodes `\uXXXX`: exactly four hex digits naming one UTF-16 code
    /// unit. A truncated sequence, a non-hex digit, or a code unit that
    /// is an unpaired surrogate is an error.
    fn parse_unicode_escape(
        &mut self,
        escape_position: SourcePosition,
    ) -> Result<char, QueryParseError> {
        let mut hex = String::with_capacity(4);
        for _ in 0..4 {
            match self.cursor.advance() {
                Some(ch) if ch.is_ascii_hexdigit() => hex.push(ch),
                Some(ch) => {
                    return Err(QueryParseError::new(
                        format!("Invalid unicode escape: `\\u{hex}{ch}`"),
                        escape_position,
                    ));
                }
                None => {
                    return Err(QueryParseError::new(
                        format!("Invalid unicode escape: `\\u{hex}`"),
                        escape_position,
                    ));
                }
            }
        }

        // The grammar guarantees four hex digits, so only values outside
        // the range of `char` (surrogate code units) can fail here.
        let code_unit = u32::from_str_radix(&hex, 16).map_err(|_| {
            QueryParseError::new(format!("Invalid unicode escape: `\\u{hex}`"), escape_position)
        })?;
        char::from_u32(code_unit).ok_or_else(|| {
            QueryParseError::new(format!("Invalid unicode escape: `\\u{hex}`"), escape_position)
        })
    }

    /// Parses a `"""` block string: everything through the closing
    /// `"""` is preserved verbatim, newlines included, with no escape
    /// processing.
    fn parse_block_string(&mut self) -> Result<Value, QueryParseError> {
        let open_position = self.cursor.position();
        let content = self.scan_block_string(open_position)?;
        Ok(Value::String(content.to_string()))
    }

    /// Consumes a block string and returns its raw content.
    fn scan_block_string(
        &mut self,
        open_position: SourcePosition,
    ) -> Result<&'src str, QueryParseError> {
        debug_assert!(self.cursor.remaining().starts_with("\"\"\""));
        self.cursor.advance_to(self.cursor.byte_offset() + 3);

        let rest = self.cursor.remaining();
        match memchr::memmem::find(rest.as_bytes(), b"\"\"\"") {
            Some(index) => {
                let content = &rest[..index];
                self.cursor
                    .advance_to(self.cursor.byte_offset() + index + 3);
                Ok(content)
            }
            None => Err(QueryParseError::new(
                "Unterminated block string",
                open_position,
            )),
        }
    }

    /// Skips a quoted string inside a discarded nested selection.
    ///
    /// Escapes are consumed blindly (`\x` never terminates the string);
    /// only termination is validated here.
    fn skip_string(&mut self) -> Result<(), QueryParseError> {
        debug_assert_eq!(self.cursor.peek(), Some('"'));
        let open_position = self.cursor.position();
        self.cursor.advance();

        loop {
            match self.cursor.advance() {
                Some('"') => return Ok(()),
                Some('\\') => {
                    self.cursor.advance();
                }
                Some(_) => {}
                None => {
                    return Err(QueryParseError::new(
                        "Unterminated string literal",
                        open_position,
                    ));
                }
            }
        }
    }

    /// Skips a block string inside a discarded nested selection.
    fn skip_block_string(&mut self) -> Result<(), QueryParseError> {
        let open_position = self.cursor.position();
        self.scan_block_string(open_position)?;
        Ok(())
    }

    // =========================================================================
    // Number literals
    // =========================================================================

    /// Parses a number literal: optional `-`, an integer part with no
    /// leading zeros, an optional fraction, an optional exponent. The
    /// matched text is converted to `f64` and must be finite.
    fn parse_number(&mut self) -> Result<Value, QueryParseError> {
        let start_position = self.cursor.position();
        let start_offset = self.cursor.byte_offset();

        if self.cursor.peek() == Some('-') {
            self.cursor.advance();
        }

        // Integer part: `0` alone, or a non-zero digit followed by more
        match self.cursor.peek() {
            Some('0') => {
                self.cursor.advance();
                if let Some(ch) = self.cursor.peek()
                    && ch.is_ascii_digit()
                {
                    return Err(QueryParseError::new(
                        "Invalid number: leading zeros are not allowed",
                        start_position,
                    ));
                }
            }
            Some(ch) if ch.is_ascii_digit() => {
                self.cursor.advance();
                self.consume_digits();
            }
            _ => {
                return Err(QueryParseError::new(
                    "Invalid number: expected a digit",
                    start_position,
                ));
            }
        }

        // Fraction: `.` must be followed by at least one digit
        if self.cursor.peek() == Some('.') {
            self.cursor.advance();
            if !matches!(self.cursor.peek(), Some(ch) if ch.is_ascii_digit()) {
                return Err(QueryParseError::new(
                    "Invalid number: expected a digit after the decimal point",
                    start_position,
                ));
            }
            self.consume_digits();
        }

        // Exponent: `e`/`E`, optional sign, at least one digit
        if matches!(self.cursor.peek(), Some('e' | 'E')) {
            self.cursor.advance();
            if matches!(self.cursor.peek(), Some('+' | '-')) {
                self.cursor.advance();
            }
            if !matches!(self.cursor.peek(), Some(ch) if ch.is_ascii_digit()) {
                return Err(QueryParseError::new(
                    "Invalid number: exponent must have at least one digit",
                    start_position,
                ));
            }
            self.consume_digits();
        }

        let text = self.cursor.text_since(start_offset);
        let number: f64 = text.parse().map_err(|_| {
            QueryParseError::new(format!("Invalid number: `{text}`"), start_position)
        })?;

        // The grammar cannot normally produce these, but the conversion
        // is checked anyway: no NaN or infinity ever leaves the parser.
        if !number.is_finite() {
            return Err(QueryParseError::new(
                format!("Invalid number: `{text}` is not finite"),
                start_position,
            ));
        }

        Ok(Value::Number(number))
    }

    /// Consumes a run of ASCII digits.
    fn consume_digits(&mut self) {
        while matches!(self.cursor.peek(), Some(ch) if ch.is_ascii_digit()) {
            self.cursor.advance();
        }
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    /// Parses an identifier, or fails with `Expected <expected>`.
    fn parse_name(&mut self, expected: &str) -> Result<String, QueryParseError> {
        match self.cursor.peek() {
            Some(ch) if is_name_start(ch) => {
                let start_offset = self.cursor.byte_offset();
                self.cursor.advance();
                while matches!(self.cursor.peek(), Some(ch) if is_name_continue(ch)) {
                    self.cursor.advance();
                }
                Ok(self.cursor.text_since(start_offset).to_string())
            }
            _ => Err(self.error_here(format!("Expected {expected}"))),
        }
    }

    /// Builds an error at the current cursor position.
    fn error_here(&self, message: impl Into<String>) -> QueryParseError {
        QueryParseError::new(message, self.cursor.position())
    }
}
