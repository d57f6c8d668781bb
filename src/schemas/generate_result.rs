use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct GenerateResult {
    pub content: String,
    pub usage: Option<TokenUsage>,
}

impl GenerateResult {
    pub fn new(content: impl Into<String>, usage: Option<TokenUsage>) -> Self {
        Self {
            content: content.into(),
            usage,
        }
    }
}

impl Display for GenerateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content)?;

        if let Some(usage) = &self.usage {
            write!(f, "\n\n{usage}")?
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }

    pub fn sum(&self, other: &TokenUsage) -> TokenUsage {
        TokenUsage::new(
            self.prompt_tokens + other.prompt_tokens,
            self.completion_tokens + other.completion_tokens,
        )
    }

    pub fn merge_options<'a>(
        usages: impl IntoIterator<Item = &'a Option<TokenUsage>>,
    ) -> Option<TokenUsage> {
        usages
            .into_iter()
            .flatten()
            .fold(None, |acc: Option<TokenUsage>, usage| match acc {
                Some(acc) => Some(acc.sum(usage)),
                None => Some(*usage),
            })
    }
}

impl From<async_openai::types::CompletionUsage> for TokenUsage {
    fn from(usage: async_openai::types::CompletionUsage) -> Self {
        Self {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

impl Display for TokenUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token usage: {} prompt + {} completion = {} total",
            self.prompt_tokens, self.completion_tokens, self.total_tokens
        )
    }
}
