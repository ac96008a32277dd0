use crate::SourcePosition;

/// A syntax error produced while parsing a query document.
///
/// This is the only failure the parser produces. There is no
/// recoverable-vs-fatal distinction and no partial result: a failing
/// parse yields no descriptor at all, and re-parsing identical input
/// fails identically.
///
/// The message always describes the client's own document ("Expected
/// field name", "Unterminated string literal", ...), so the HTTP layer
/// may surface it directly in a 400-class response body whenever
/// [`is_client_safe`](QueryParseError::is_client_safe) is set.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{position}: {message}")]
pub struct QueryParseError {
    /// Human-readable primary error message.
    message: String,

    /// Where in the document the error was detected.
    position: SourcePosition,
}

impl QueryParseError {
    /// Creates a new parse error.
    pub fn new(message: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    /// Returns the human-readable error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the position where the error was detected.
    pub fn position(&self) -> &SourcePosition {
        &self.position
    }

    /// Whether the message may be surfaced verbatim to the caller that
    /// submitted the document.
    ///
    /// Syntax errors describe the client-supplied query text, never
    /// server internals, so this is `true` for every error this
    /// component produces. The flag exists because the query endpoint
    /// distinguishes exposable failures from internal ones when it
    /// builds a response.
    pub fn is_client_safe(&self) -> bool {
        true
    }
}
