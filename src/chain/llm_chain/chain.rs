use async_trait::async_trait;

use crate::{
    chain::{Chain, ChainError},
    llm::LLM,
    output_parser::OutputParser,
    schemas::{GenerateResult, TextReplacements},
    template::PromptTemplate,
};

use super::LLMChainBuilder;

pub struct LLMChain {
    pub(super) prompt: PromptTemplate,
    pub(super) llm: Box<dyn LLM>,
    pub(super) output_parser: Box<dyn OutputParser>,
}

impl LLMChain {
    pub fn builder() -> LLMChainBuilder {
        LLMChainBuilder::new()
    }
}

#[async_trait]
impl Chain for LLMChain {
    async fn call(&self, input: &TextReplacements<'_>) -> Result<GenerateResult, ChainError> {
        let prompt = self.prompt.format(input)?;
        let result = self.llm.generate(prompt.to_messages()).await?;

        log::trace!("\nLLM output:\n{}", result.content);
        if let Some(usage) = &result.usage {
            log::trace!("\n{usage}");
        }

        let content = self.output_parser.parse(result.content)?;

        Ok(GenerateResult::new(content, result.usage))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        llm::openai::{OpenAI, OpenAIConfig, OpenAIModel},
        prompt_template,
        schemas::MessageType,
        template::MessageTemplate,
        text_replacements,
    };

    use super::*;

    #[tokio::test]
    #[ignore]
    async fn test_invoke_chain() {
        let prompt = prompt_template!(MessageTemplate::from_fstring(
            MessageType::Human,
            "My name is: {name}"
        ));

        let llm: OpenAI<OpenAIConfig> =
            OpenAI::builder().with_model(OpenAIModel::Gpt4oMini).build();
        let chain = LLMChain::builder()
            .prompt(prompt)
            .llm(llm)
            .build()
            .expect("Failed to build LLMChain");

        let result = chain.invoke(&text_replacements! { "name" => "Juan" }).await;
        assert!(result.is_ok(), "Error invoking LLMChain: {:?}", result.err());
    }
}
