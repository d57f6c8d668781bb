use crate::{
    llm::LLM,
    output_parser::{OutputParser, SimpleParser},
    schemas::BuilderError,
    template::PromptTemplate,
};

use super::LLMChain;

pub struct LLMChainBuilder {
    prompt: Option<PromptTemplate>,
    llm: Option<Box<dyn LLM>>,
    output_parser: Option<Box<dyn OutputParser>>,
}

impl LLMChainBuilder {
    pub(super) fn new() -> Self {
        Self {
            prompt: None,
            llm: None,
            output_parser: None,
        }
    }

    pub fn prompt(mut self, prompt: impl Into<PromptTemplate>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn llm(mut self, llm: impl Into<Box<dyn LLM>>) -> Self {
        self.llm = Some(llm.into());
        self
    }

    pub fn output_parser(mut self, output_parser: impl Into<Box<dyn OutputParser>>) -> Self {
        self.output_parser = Some(output_parser.into());
        self
    }

    pub fn build(self) -> Result<LLMChain, BuilderError> {
        let prompt = self.prompt.ok_or(BuilderError::MissingField("prompt"))?;
        let llm = self.llm.ok_or(BuilderError::MissingField("llm"))?;

        Ok(LLMChain {
            prompt,
            llm,
            output_parser: self
                .output_parser
                .unwrap_or_else(|| Box::new(SimpleParser)),
        })
    }
}
