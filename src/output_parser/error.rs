use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputParseError {
    #[error("Deserialization error: {0}\nOriginal: {1}")]
    Deserialize(serde_json::Error, String),

    #[error("Other error: {0}")]
    Other(String),
}
