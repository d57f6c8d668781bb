use async_trait::async_trait;

use crate::{
    chain::{Chain, ChainError, LLMChain},
    schemas::{GenerateResult, TextReplacements},
    text_replacements,
    tools::SQLDatabase,
};

use super::SqlQueryChainBuilder;

/// Writes a SQL query answering a natural-language question against the
/// configured database. The input variable name is `question`; the output is
/// the raw generation, which may still carry a leading `SQLQuery:` marker.
///
/// Example
/// ```rust,ignore
/// # async {
/// let llm = OpenAI::default();
///
/// let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
/// let engine = PostgreSQLEngine::new(&url).await.unwrap();
/// let database = SQLDatabaseBuilder::new(engine).build().await.unwrap();
///
/// let chain = SqlQueryChain::builder()
///     .llm(llm)
///     .database(database)
///     .top_k(5)
///     .build()
///     .expect("Failed to build SqlQueryChain");
///
/// let query = chain
///     .invoke(&text_replacements! { "question" => "How many users are there?" })
///     .await
///     .unwrap();
/// println!("{query}");
/// # };
/// ```
pub struct SqlQueryChain {
    pub(super) llm_chain: LLMChain,
    pub(super) database: SQLDatabase,
    pub(super) top_k: Option<usize>,
}

impl SqlQueryChain {
    pub fn builder() -> SqlQueryChainBuilder {
        SqlQueryChainBuilder::new()
    }

    pub fn top_k(&self) -> Option<usize> {
        self.top_k
    }
}

#[async_trait]
impl Chain for SqlQueryChain {
    async fn call(&self, input: &TextReplacements<'_>) -> Result<GenerateResult, ChainError> {
        let question = input
            .get("question")
            .ok_or_else(|| ChainError::MissingInputVariable("question".to_string()))?;

        let table_info = self
            .database
            .table_info(&[])
            .await
            .map_err(|e| ChainError::DatabaseError(e.to_string()))?;

        let mut replacements = text_replacements! {
            "question" => question.clone(),
            "dialect" => self.database.dialect().to_string(),
            "table_info" => table_info,
        };
        if let Some(top_k) = self.top_k {
            replacements.insert("top_k", top_k.to_string().into());
        }

        log::debug!("Writing SQL query for question: {question}");

        self.llm_chain.call(&replacements).await
    }
}
