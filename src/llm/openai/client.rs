pub use async_openai::config::{AzureConfig, Config, OpenAIConfig};

use async_openai::Client;
use async_trait::async_trait;

use crate::{
    llm::{options::CallOptions, LLMError, LLM},
    schemas::{GenerateResult, Message},
};

use super::{request, OpenAIBuilder};

#[derive(Clone)]
pub struct OpenAI<C: Config> {
    client: Client<C>,
    model: String,
    options: CallOptions,
}

impl<C: Config> OpenAI<C> {
    pub(crate) fn new(client: Client<C>, model: String, options: CallOptions) -> Self {
        Self {
            client,
            model,
            options,
        }
    }

    pub fn builder() -> OpenAIBuilder<C>
    where
        C: Default,
    {
        OpenAIBuilder::default()
    }
}

impl Default for OpenAI<OpenAIConfig> {
    fn default() -> Self {
        OpenAIBuilder::default().build()
    }
}

#[async_trait]
impl<C: Config + Send + Sync + 'static> LLM for OpenAI<C> {
    async fn generate(&self, messages: Vec<Message>) -> Result<GenerateResult, LLMError> {
        let request = request::build_request(&self.model, messages, &self.options)?;

        let response = self.client.chat().create(request).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::ContentNotFound("No choices".into()))?;
        let content = choice
            .message
            .content
            .ok_or_else(|| LLMError::ContentNotFound("/choices/0/message/content".into()))?;

        log::trace!("\nLLM output:\n{content}");

        Ok(GenerateResult::new(
            content,
            response.usage.map(Into::into),
        ))
    }

    fn add_call_options(&mut self, call_options: CallOptions) {
        self.options.merge_options(call_options)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::llm::OpenAIModel;

    use super::*;

    #[tokio::test]
    async fn test_generate_against_mock_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "id": "chatcmpl-test",
                    "object": "chat.completion",
                    "created": 1700000000,
                    "model": "gpt-4o-mini",
                    "choices": [{
                        "index": 0,
                        "message": {
                            "role": "assistant",
                            "content": "SQLQuery: SELECT COUNT(*) FROM users"
                        },
                        "finish_reason": "stop",
                        "logprobs": null
                    }],
                    "usage": {
                        "prompt_tokens": 42,
                        "completion_tokens": 9,
                        "total_tokens": 51
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let config = OpenAIConfig::new()
            .with_api_base(server.url())
            .with_api_key("test-key");
        let llm = OpenAI::builder()
            .with_api_config(config)
            .with_model(OpenAIModel::Gpt4oMini)
            .build();

        let result = llm
            .generate(vec![Message::new_human_message(
                "How many users are there?",
            )])
            .await
            .unwrap();

        assert_eq!(result.content, "SQLQuery: SELECT COUNT(*) FROM users");
        assert_eq!(result.usage.unwrap().total_tokens, 51);
        mock.assert_async().await;
    }

    #[tokio::test]
    #[ignore]
    async fn test_invoke() {
        let llm = OpenAI::default();

        let response = llm.invoke("Say hello").await.unwrap();
        println!("{response}");
    }
}
