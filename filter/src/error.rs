//! Error types for filter parsing and search construction.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The expression does not match the filter grammar.
    ///
    /// `line`, `column` and `offset` refer to the normalized expression
    /// (trimmed, newlines removed); `expression` is the text as supplied.
    #[error("Unable to parse filter expression at line {line}, column {column}: {message}\n\n{expression}")]
    Grammar {
        expression: String,
        line: usize,
        column: usize,
        offset: usize,
        message: String,
    },

    #[error("'{0}' is not a recognised Spectrum attribute name or valid ID")]
    UnknownAttribute(String),
}

pub type Result<T> = std::result::Result<T, Error>;
