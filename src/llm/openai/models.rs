use std::fmt::{self, Display};

/// Chat models the crate is commonly pointed at. Anything else can be passed
/// to the builder as a plain model string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpenAIModel {
    Gpt4o,
    Gpt4oMini,
}

impl OpenAIModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpenAIModel::Gpt4o => "gpt-4o",
            OpenAIModel::Gpt4oMini => "gpt-4o-mini",
        }
    }
}

impl Display for OpenAIModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<OpenAIModel> for String {
    fn from(model: OpenAIModel) -> Self {
        model.as_str().to_string()
    }
}
