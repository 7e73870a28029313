//! Error type produced by the document reader.

/// An error raised while reading a document.
///
/// Positions are 1-based and refer to the input text handed to the reader,
/// with columns counted in characters from the start of the line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at line {line}, column {column}")]
pub struct ParseError {
    /// What went wrong.
    pub message: String,
    /// Line holding the offending position.
    pub line: usize,
    /// Column of the offending position within that line.
    pub column: usize,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}
