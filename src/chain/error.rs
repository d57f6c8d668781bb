use thiserror::Error;

use crate::{llm::LLMError, output_parser::OutputParseError, template::TemplateError};

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("LLM error: {0}")]
    LLMError(#[from] LLMError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Output parse error: {0}")]
    OutputParseError(#[from] OutputParseError),

    #[error("Prompt error: {0}")]
    PromptError(#[from] TemplateError),

    #[error("Missing input variable: {0}")]
    MissingInputVariable(String),

    #[error("Error: {0}")]
    OtherError(String),
}
