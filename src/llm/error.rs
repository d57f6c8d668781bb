use thiserror::Error;

#[derive(Error, Debug)]
pub enum LLMError {
    #[error("OpenAI error: {0}")]
    OpenAIError(#[from] async_openai::error::OpenAIError),

    #[error("Network request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Missing content in response: {0}")]
    ContentNotFound(String),

    #[error("Error: {0}")]
    OtherError(String),
}
