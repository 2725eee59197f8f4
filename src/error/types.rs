use thiserror::Error;

use crate::logging::LoggingError;

/// Unified result type for the block renderer crate.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors surfaced by renderer setup. Measuring and drawing are total and
/// never return these.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("renderer `{0}` is not registered")]
    UnknownRenderer(String),
    #[error("invalid renderer options: {0}")]
    InvalidOptions(String),
    #[error("invalid constant overrides: {0}")]
    InvalidOverrides(#[from] serde_json::Error),
    #[error("logging failure: {0}")]
    Logging(#[from] LoggingError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
