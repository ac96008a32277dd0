//! The scan cursor that the grammar functions thread their state through.
//!
//! One [`Cursor`] is constructed per parse invocation and owned by it
//! exclusively; the byte offset only ever moves forward. The cursor
//! provides character-level primitives (peek, advance, assert-and-consume)
//! plus a single `skip_ignored` that consumes every run of insignificant
//! separators: whitespace, commas, and `#`-to-end-of-line comments.

use crate::QueryParseError;
use crate::SourcePosition;

/// A scan cursor over an immutable query document.
///
/// Position tracking mirrors what text editors display: `line`/`column`
/// count characters, while `byte_offset` indexes the underlying UTF-8
/// text. End of input is represented by `peek()` returning `None`, never
/// by an out-of-bounds access.
pub(crate) struct Cursor<'src> {
    /// The full source text being scanned.
    source: &'src str,

    /// Current byte offset from the start of `source`.
    ///
    /// The remaining text is `&source[byte_offset..]`.
    byte_offset: usize,

    /// Current 0-based line number.
    line: usize,

    /// Current 0-based character column.
    column: usize,

    /// Whether the previous character was `\r`.
    ///
    /// Used to handle `\r\n` as a single newline: when we see `\r`, we
    /// set this flag; if the next character is `\n`, we skip it without
    /// incrementing the line number again.
    last_char_was_cr: bool,
}

impl<'src> Cursor<'src> {
    /// Creates a cursor positioned at the start of `source`.
    pub(crate) fn new(source: &'src str) -> Self {
        Self {
            source,
            byte_offset: 0,
            line: 0,
            column: 0,
            last_char_was_cr: false,
        }
    }

    /// Returns the remaining source text to be scanned.
    pub(crate) fn remaining(&self) -> &'src str {
        &self.source[self.byte_offset..]
    }

    /// Returns the current byte offset from the start of the document.
    pub(crate) fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Returns the source text between `start` (a byte offset previously
    /// obtained from [`Cursor::byte_offset`]) and the current position.
    pub(crate) fn text_since(&self, start: usize) -> &'src str {
        &self.source[start..self.byte_offset]
    }

    /// Returns the current source position.
    pub(crate) fn position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column, self.byte_offset)
    }

    /// Returns `true` once the whole document has been consumed.
    pub(crate) fn is_at_end(&self) -> bool {
        self.byte_offset >= self.source.len()
    }

    /// Peeks at the next character without consuming it.
    ///
    /// Returns `None` at end of input.
    pub(crate) fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Consumes the next character and updates position tracking.
    ///
    /// Returns `None` at end of input.
    pub(crate) fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;

        if ch == '\n' {
            if self.last_char_was_cr {
                // The \n of a \r\n pair - the line was already counted
                // when we saw \r. Just reset the flag.
                self.last_char_was_cr = false;
            } else {
                self.line += 1;
                self.column = 0;
            }
        } else if ch == '\r' {
            self.line += 1;
            self.column = 0;
            self.last_char_was_cr = true;
        } else {
            self.column += 1;
            self.last_char_was_cr = false;
        }

        self.byte_offset += ch.len_utf8();
        Some(ch)
    }

    /// Consumes characters until the byte offset reaches `target`.
    ///
    /// `target` must lie on a character boundary at or after the current
    /// offset (callers derive it from a byte search over `remaining()`).
    pub(crate) fn advance_to(&mut self, target: usize) {
        while self.byte_offset < target && self.advance().is_some() {}
    }

    /// Asserts that the next character is `expected` and consumes it.
    ///
    /// Fails with `Expected \`<expected>\`` otherwise; end of input fails
    /// the same way.
    pub(crate) fn expect(&mut self, expected: char) -> Result<(), QueryParseError> {
        match self.peek() {
            Some(ch) if ch == expected => {
                self.advance();
                Ok(())
            }
            _ => Err(QueryParseError::new(
                format!("Expected `{expected}`"),
                self.position(),
            )),
        }
    }

    /// Skips a run of ignored tokens: whitespace (including the BOM),
    /// commas, and `#` comments running to the end of the line.
    ///
    /// The grammar treats all of these identically wherever separators
    /// are allowed, so every grammar function calls this between tokens.
    pub(crate) fn skip_ignored(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\n' | '\r' | '\u{FEFF}' | ',') => {
                    self.advance();
                }
                Some('#') => {
                    self.skip_comment();
                }
                _ => break,
            }
        }
    }

    /// Skips a `#` comment through the end of the current line.
    ///
    /// The line terminator itself is left for `skip_ignored` to consume.
    fn skip_comment(&mut self) {
        debug_assert_eq!(self.peek(), Some('#'));
        let rest = self.remaining();
        match memchr::memchr2(b'\n', b'\r', rest.as_bytes()) {
            Some(index) => {
                let skipped = &rest[..index];
                self.column += skipped.chars().count();
                self.byte_offset += index;
            }
            None => {
                // Comment runs to end of input
                self.column += rest.chars().count();
                self.byte_offset = self.source.len();
            }
        }
    }
}

// =============================================================================
// Character classification
// =============================================================================

/// Returns `true` if `ch` can start an identifier.
///
/// Identifiers match `/[_A-Za-z][_0-9A-Za-z]*/`.
pub(crate) fn is_name_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

/// Returns `true` if `ch` can continue an identifier.
pub(crate) fn is_name_continue(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}
