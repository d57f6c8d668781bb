use thiserror::Error;

/// Raised when a chain builder is finalized with required pieces missing, or
/// with an inner piece that fails its own construction.
#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Failed to build {0}: {1}")]
    Inner(&'static str, Box<BuilderError>),

    #[error("Other error: {0}")]
    Other(String),
}
