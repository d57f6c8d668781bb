use async_trait::async_trait;

use crate::schemas::{GenerateResult, Message};

use super::{options::CallOptions, LLMError};

#[async_trait]
pub trait LLM: Sync + Send {
    async fn generate(&self, messages: Vec<Message>) -> Result<GenerateResult, LLMError>;

    async fn invoke(&self, prompt: &str) -> Result<String, LLMError> {
        let result = self
            .generate(vec![Message::new_human_message(prompt)])
            .await?;
        Ok(result.content)
    }

    /// This is useful when you want to create a chain and override
    /// LLM options
    fn add_call_options(&mut self, call_options: CallOptions);

    //This is usefull when using non chat models
    fn messages_to_string(&self, messages: &[Message]) -> String {
        messages
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<String>>()
            .join("\n")
    }
}

impl<L> From<L> for Box<dyn LLM>
where
    L: 'static + LLM,
{
    fn from(llm: L) -> Self {
        Box::new(llm)
    }
}
