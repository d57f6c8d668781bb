use async_openai::{config::Config, Client as OpenAIClient};

use crate::llm::options::CallOptions;

use super::{OpenAI, OpenAIModel};

/// Assembles an [`OpenAI`] LLM. Only the API config and model are usually
/// worth setting; call options can also be injected later through the chain.
pub struct OpenAIBuilder<C: Config> {
    api_config: C,
    model: String,
    call_options: CallOptions,
    http_client: Option<reqwest::Client>,
}

impl<C: Config + Default> Default for OpenAIBuilder<C> {
    fn default() -> Self {
        OpenAIBuilder {
            api_config: C::default(),
            model: OpenAIModel::Gpt4oMini.to_string(),
            call_options: CallOptions::default(),
            http_client: None,
        }
    }
}

impl<C: Config> OpenAIBuilder<C> {
    pub fn with_api_config(mut self, api_config: C) -> Self {
        self.api_config = api_config;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_call_options(mut self, call_options: CallOptions) -> Self {
        self.call_options = call_options;
        self
    }

    /// Routes API traffic through a caller-supplied HTTP client, e.g. one
    /// configured with a proxy or custom timeouts.
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn build(self) -> OpenAI<C> {
        let mut client = OpenAIClient::with_config(self.api_config);
        if let Some(http_client) = self.http_client {
            client = client.with_http_client(http_client);
        }

        OpenAI::new(client, self.model, self.call_options)
    }
}
