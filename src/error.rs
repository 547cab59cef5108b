use thiserror::Error;

/// Fatal conditions raised while analysing a single Dockerfile.
///
/// There is no partial-result mode: any of these aborts the analysis of the
/// file it was raised for, and callers should treat the run as inconclusive.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DetectorError {
    /// A `--build-arg` flag was not followed by a `KEY=VALUE` pair
    #[error("Invalid build arguments: {0}")]
    MalformedBuildArgs(String),

    #[error("argument name is empty")]
    EmptyArgumentName,

    #[error("argument contains invalid character: \"{name}\"")]
    InvalidArgumentName { name: String },

    /// A placeholder referenced an argument missing from the table
    #[error("unresolved build argument reference: \"{name}\"")]
    UnresolvedPlaceholder { name: String },

    #[error("malformed placeholder in \"{input}\"")]
    MalformedPlaceholder { input: String },

    /// Raised by the Dockerfile reader, never by the engine itself
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, DetectorError>;
