use std::collections::BTreeMap;

use crate::{
    chain::{sql_query::QUERY_PREFIX, Chain, SqlQueryChain},
    llm::LLM,
    schemas::MessageType,
    template::MessageTemplate,
    text_replacements,
    tools::SQLDatabase,
};

use super::{config, ComponentError, FieldConfig};

pub const DISPLAY_NAME: &str = "Natural Language to SQL";
pub const DESCRIPTION: &str = "Generate SQL from natural language.";

/// Row limit a host should use when the user leaves `top_k` untouched.
pub const DEFAULT_TOP_K: i32 = 5;

/// Prompt override supplied by the host, either as plain text or as an
/// already-parsed template with declared variables.
pub enum PromptSpec {
    Text(String),
    Template(MessageTemplate),
}

impl PromptSpec {
    fn into_template(self) -> MessageTemplate {
        match self {
            PromptSpec::Text(text) => MessageTemplate::from_fstring(MessageType::Human, text),
            PromptSpec::Template(template) => template,
        }
    }
}

impl From<String> for PromptSpec {
    fn from(text: String) -> Self {
        PromptSpec::Text(text)
    }
}

impl From<&str> for PromptSpec {
    fn from(text: &str) -> Self {
        PromptSpec::Text(text.to_string())
    }
}

impl From<MessageTemplate> for PromptSpec {
    fn from(template: MessageTemplate) -> Self {
        PromptSpec::Template(template)
    }
}

/// Turns a natural-language question into a SQL query by delegating to a
/// [`SqlQueryChain`] and cleaning up the generated text. The last generated
/// query is kept in `status` for host display.
#[derive(Default)]
pub struct SqlGenerator {
    status: Option<String>,
}

impl SqlGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently generated query, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn build_config() -> BTreeMap<&'static str, FieldConfig> {
        config::build_config()
    }

    /// Generates a SQL query answering `question` against `database`.
    ///
    /// A `top_k` greater than zero caps the rows per select statement; zero or
    /// negative means no limit is forwarded to the chain. A prompt override
    /// must contain the `{question}` placeholder and declare `question` as an
    /// input variable, otherwise the call fails before any chain is built.
    pub async fn generate(
        &mut self,
        question: &str,
        database: SQLDatabase,
        llm: impl Into<Box<dyn LLM>>,
        top_k: i32,
        prompt: Option<PromptSpec>,
    ) -> Result<String, ComponentError> {
        let prompt = prompt.map(PromptSpec::into_template);
        if let Some(template) = &prompt {
            if !template.template().contains("{question}")
                || !template.variables().contains("question")
            {
                return Err(ComponentError::InvalidPrompt(format!(
                    "Prompt must contain `{{question}}` to be used with {DISPLAY_NAME}."
                )));
            }
        }

        let mut builder = SqlQueryChain::builder().llm(llm).database(database);
        if top_k > 0 {
            builder = builder.top_k(top_k as usize);
        }
        if let Some(template) = prompt {
            builder = builder.prompt(template);
        }
        let chain = builder.build()?;

        let response = chain
            .invoke(&text_replacements! { "question" => question })
            .await?;
        let query = clean_sql_query(&response);

        log::debug!("Generated query: {query}");
        self.status = Some(query.clone());

        Ok(query)
    }
}

/// Strips every `SQLQuery:` marker from a raw generation and trims the
/// surrounding whitespace. Applying this twice is the same as applying it once.
pub fn clean_sql_query(raw: &str) -> String {
    raw.replace(QUERY_PREFIX, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    };

    use async_trait::async_trait;

    use crate::{
        llm::{options::CallOptions, LLMError},
        schemas::{GenerateResult, Message},
        tools::{DatabaseError, Dialect, Engine, SQLDatabaseBuilder},
    };

    use super::*;

    /// Test double recording every prompt it is asked to complete.
    #[derive(Clone)]
    struct FakeLLM {
        response: String,
        calls: Arc<AtomicUsize>,
        last_prompt: Arc<Mutex<Option<String>>>,
    }

    impl FakeLLM {
        fn new(response: impl Into<String>) -> Self {
            Self {
                response: response.into(),
                calls: Arc::new(AtomicUsize::new(0)),
                last_prompt: Arc::new(Mutex::new(None)),
            }
        }
    }

    #[async_trait]
    impl LLM for FakeLLM {
        async fn generate(&self, messages: Vec<Message>) -> Result<GenerateResult, LLMError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let prompt = messages
                .iter()
                .map(|m| m.content.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            *self.last_prompt.lock().unwrap() = Some(prompt);

            Ok(GenerateResult::new(self.response.clone(), None))
        }

        fn add_call_options(&mut self, _call_options: CallOptions) {}
    }

    struct StubEngine;

    #[async_trait]
    impl Engine for StubEngine {
        async fn query(
            &self,
            _query: &str,
        ) -> Result<(Vec<String>, Vec<Vec<String>>), DatabaseError> {
            Ok((vec![], vec![]))
        }

        async fn table_names(&self) -> Result<Vec<String>, DatabaseError> {
            Ok(vec!["users".into()])
        }

        async fn table_info(&self, table: &str) -> Result<String, DatabaseError> {
            Ok(format!(
                "CREATE TABLE {table} (\n\tid integer NOT NULL,\n\tname text\n)"
            ))
        }

        fn dialect(&self) -> Dialect {
            Dialect::PostgreSQL
        }
    }

    async fn database() -> SQLDatabase {
        SQLDatabaseBuilder::new(StubEngine)
            .with_sample_rows_number(0)
            .build()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_generates_and_cleans_query() {
        let llm = FakeLLM::new("SQLQuery: SELECT COUNT(*) FROM users");
        let mut component = SqlGenerator::new();

        let query = component
            .generate(
                "How many users are there?",
                database().await,
                llm.clone(),
                DEFAULT_TOP_K,
                None,
            )
            .await
            .unwrap();

        assert_eq!(query, "SELECT COUNT(*) FROM users");
        assert_eq!(component.status(), Some("SELECT COUNT(*) FROM users"));
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_default_prompt_carries_question_and_limit() {
        let llm = FakeLLM::new("SELECT 1");
        let mut component = SqlGenerator::new();

        component
            .generate(
                "How many users are there?",
                database().await,
                llm.clone(),
                5,
                None,
            )
            .await
            .unwrap();

        let prompt = llm.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Question: How many users are there?"));
        assert!(prompt.contains("at most 5 results"));
        assert!(prompt.contains("CREATE TABLE users"));
        assert!(prompt.contains("postgresql"));
    }

    #[tokio::test]
    async fn test_top_k_zero_omits_limit() {
        let llm = FakeLLM::new("SELECT 1");
        let mut component = SqlGenerator::new();

        component
            .generate(
                "How many users are there?",
                database().await,
                llm.clone(),
                0,
                None,
            )
            .await
            .unwrap();

        let prompt = llm.last_prompt.lock().unwrap().clone().unwrap();
        assert!(!prompt.contains("at most"));
        assert!(!prompt.contains("LIMIT clause"));
    }

    #[tokio::test]
    async fn test_negative_top_k_omits_limit() {
        let llm = FakeLLM::new("SELECT 1");
        let mut component = SqlGenerator::new();

        component
            .generate(
                "How many users are there?",
                database().await,
                llm.clone(),
                -1,
                None,
            )
            .await
            .unwrap();

        let prompt = llm.last_prompt.lock().unwrap().clone().unwrap();
        assert!(!prompt.contains("at most"));
        assert!(!prompt.contains("LIMIT clause"));
    }

    #[tokio::test]
    async fn test_rejects_prompt_without_question() {
        let llm = FakeLLM::new("SELECT 1");
        let mut component = SqlGenerator::new();

        let result = component
            .generate(
                "How many users are there?",
                database().await,
                llm.clone(),
                DEFAULT_TOP_K,
                Some("Tell me about {topic}".into()),
            )
            .await;

        assert!(matches!(result, Err(ComponentError::InvalidPrompt(_))));
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
        assert_eq!(component.status(), None);
    }

    #[tokio::test]
    async fn test_accepts_prompt_with_question() {
        let llm = FakeLLM::new("SELECT COUNT(*) FROM users");
        let mut component = SqlGenerator::new();

        let query = component
            .generate(
                "How many users are there?",
                database().await,
                llm.clone(),
                DEFAULT_TOP_K,
                Some("Answer: {question}".into()),
            )
            .await
            .unwrap();

        assert_eq!(query, "SELECT COUNT(*) FROM users");
        let prompt = llm.last_prompt.lock().unwrap().clone().unwrap();
        assert_eq!(prompt, "Answer: How many users are there?");
    }

    #[tokio::test]
    async fn test_rejects_structured_template_without_question_variable() {
        let llm = FakeLLM::new("SELECT 1");
        let mut component = SqlGenerator::new();

        let template = MessageTemplate::new(
            MessageType::Human,
            "Answer: {question}",
            ["topic".to_string()].into(),
            crate::template::TemplateFormat::FString,
        );

        let result = component
            .generate(
                "How many users are there?",
                database().await,
                llm.clone(),
                DEFAULT_TOP_K,
                Some(template.into()),
            )
            .await;

        assert!(matches!(result, Err(ComponentError::InvalidPrompt(_))));
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_question_passes_through() {
        let llm = FakeLLM::new("SELECT 1");
        let mut component = SqlGenerator::new();

        let query = component
            .generate("", database().await, llm.clone(), DEFAULT_TOP_K, None)
            .await
            .unwrap();

        assert_eq!(query, "SELECT 1");
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clean_sql_query() {
        assert_eq!(
            clean_sql_query("SQLQuery: SELECT COUNT(*) FROM users"),
            "SELECT COUNT(*) FROM users"
        );
        assert_eq!(
            clean_sql_query("  SQLQuery: SELECT 1 SQLQuery:  "),
            "SELECT 1"
        );
        assert_eq!(clean_sql_query("SELECT 1"), "SELECT 1");
        assert_eq!(clean_sql_query(""), "");
    }

    #[test]
    fn test_clean_sql_query_is_idempotent() {
        let raw = "\n  SQLQuery: SELECT name FROM users LIMIT 5\n";
        let once = clean_sql_query(raw);
        let twice = clean_sql_query(&once);
        assert_eq!(once, twice);
    }
}
