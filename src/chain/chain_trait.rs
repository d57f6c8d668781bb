use async_trait::async_trait;

use crate::schemas::{GenerateResult, TextReplacements};

use super::ChainError;

#[async_trait]
pub trait Chain: Sync + Send {
    /// Call the `Chain` and receive the result of the generation process along
    /// with additional information like token consumption. The input is a set
    /// of named text replacements bound to the chain's declared variables.
    async fn call(&self, input: &TextReplacements<'_>) -> Result<GenerateResult, ChainError>;

    /// Call the `Chain` and keep only the generated text.
    async fn invoke(&self, input: &TextReplacements<'_>) -> Result<String, ChainError> {
        let result = self.call(input).await?;
        Ok(result.content)
    }
}
