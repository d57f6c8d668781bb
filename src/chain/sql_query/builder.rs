use crate::{
    chain::LLMChain,
    llm::{options::CallOptions, LLM},
    schemas::BuilderError,
    template::PromptTemplate,
    tools::SQLDatabase,
};

use super::{chain::SqlQueryChain, prompt::default_prompt, STOP_WORD};

pub struct SqlQueryChainBuilder {
    llm: Option<Box<dyn LLM>>,
    database: Option<SQLDatabase>,
    top_k: Option<usize>,
    prompt: Option<PromptTemplate>,
}

impl SqlQueryChainBuilder {
    pub(super) fn new() -> Self {
        Self {
            llm: None,
            database: None,
            top_k: None,
            prompt: None,
        }
    }

    pub fn llm(mut self, llm: impl Into<Box<dyn LLM>>) -> Self {
        self.llm = Some(llm.into());
        self
    }

    pub fn database(mut self, database: SQLDatabase) -> Self {
        self.database = Some(database);
        self
    }

    /// Caps the number of result rows per generated select. Leaving this unset
    /// means no limit is mentioned in the prompt.
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Overrides the stock prompt. The template must declare the `question`
    /// input variable.
    pub fn prompt(mut self, prompt: impl Into<PromptTemplate>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn build(self) -> Result<SqlQueryChain, BuilderError> {
        let mut llm = self.llm.ok_or(BuilderError::MissingField("llm"))?;
        let database = self
            .database
            .ok_or(BuilderError::MissingField("database"))?;

        let prompt = match self.prompt {
            Some(prompt) => {
                if !prompt.variables().contains("question") {
                    return Err(BuilderError::Other(
                        "prompt must declare the `question` input variable".into(),
                    ));
                }
                prompt
            }
            None => default_prompt(self.top_k.is_some()),
        };

        llm.add_call_options(CallOptions::new().with_stop_words(vec![STOP_WORD.to_string()]));

        let llm_chain = LLMChain::builder()
            .prompt(prompt)
            .llm(llm)
            .build()
            .map_err(|e| BuilderError::Inner("llm_chain", Box::new(e)))?;

        Ok(SqlQueryChain {
            llm_chain,
            database,
            top_k: self.top_k,
        })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use crate::{
        llm::{LLMError, LLM},
        prompt_template,
        schemas::{GenerateResult, Message, MessageType},
        template::MessageTemplate,
        tools::{Dialect, Engine, SQLDatabaseBuilder},
    };

    use super::*;

    #[derive(Clone)]
    struct NoopLLM;

    #[async_trait]
    impl LLM for NoopLLM {
        async fn generate(&self, _messages: Vec<Message>) -> Result<GenerateResult, LLMError> {
            Ok(GenerateResult::default())
        }

        fn add_call_options(&mut self, _call_options: CallOptions) {}
    }

    struct EmptyEngine;

    #[async_trait]
    impl Engine for EmptyEngine {
        async fn query(
            &self,
            _query: &str,
        ) -> Result<(Vec<String>, Vec<Vec<String>>), crate::tools::DatabaseError> {
            Ok((vec![], vec![]))
        }

        async fn table_names(&self) -> Result<Vec<String>, crate::tools::DatabaseError> {
            Ok(vec!["users".into()])
        }

        async fn table_info(&self, table: &str) -> Result<String, crate::tools::DatabaseError> {
            Ok(format!("CREATE TABLE {table} ()"))
        }

        fn dialect(&self) -> Dialect {
            Dialect::PostgreSQL
        }
    }

    async fn database() -> SQLDatabase {
        SQLDatabaseBuilder::new(EmptyEngine)
            .with_sample_rows_number(0)
            .build()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_llm() {
        let result = SqlQueryChain::builder().database(database().await).build();
        assert!(matches!(result, Err(BuilderError::MissingField("llm"))));
    }

    #[tokio::test]
    async fn test_missing_database() {
        let result = SqlQueryChain::builder().llm(NoopLLM).build();
        assert!(matches!(
            result,
            Err(BuilderError::MissingField("database"))
        ));
    }

    #[tokio::test]
    async fn test_top_k_recorded() {
        let chain = SqlQueryChain::builder()
            .llm(NoopLLM)
            .database(database().await)
            .top_k(5)
            .build()
            .unwrap();
        assert_eq!(chain.top_k(), Some(5));

        let chain = SqlQueryChain::builder()
            .llm(NoopLLM)
            .database(database().await)
            .build()
            .unwrap();
        assert_eq!(chain.top_k(), None);
    }

    #[tokio::test]
    async fn test_custom_prompt_must_declare_question() {
        let prompt = prompt_template!(MessageTemplate::from_fstring(
            MessageType::Human,
            "Tell me about {topic}"
        ));

        let result = SqlQueryChain::builder()
            .llm(NoopLLM)
            .database(database().await)
            .prompt(prompt)
            .build();

        assert!(matches!(result, Err(BuilderError::Other(_))));
    }
}
