use tablequery_parser::ParseError;
use thiserror::Error;

/// Everything that can go wrong while rewriting a table query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A SQL fragment did not conform to the grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The caller passed input which violates a precondition, e.g. a facet request for the wrong
    /// kind of column.
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Invalid schema: {0}")]
    Schema(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Error {
        Error::InvalidArgument(message.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
