use thiserror::Error;

use crate::{chain::ChainError, schemas::BuilderError};

#[derive(Error, Debug)]
pub enum ComponentError {
    /// The one locally raised error: the prompt override is missing the
    /// required `{question}` placeholder or variable.
    #[error("{0}")]
    InvalidPrompt(String),

    #[error(transparent)]
    Builder(#[from] BuilderError),

    #[error(transparent)]
    Chain(#[from] ChainError),
}
