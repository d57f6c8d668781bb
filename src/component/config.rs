use std::collections::BTreeMap;

use serde::Serialize;

/// One host-facing input field of the component.
#[derive(Debug, Clone, Serialize)]
pub struct FieldConfig {
    pub display_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<&'static str>,
}

/// The four fields a host platform collects before invoking the component.
pub fn build_config() -> BTreeMap<&'static str, FieldConfig> {
    BTreeMap::from([
        (
            "db",
            FieldConfig {
                display_name: "Database",
                info: None,
            },
        ),
        (
            "llm",
            FieldConfig {
                display_name: "LLM",
                info: None,
            },
        ),
        (
            "prompt",
            FieldConfig {
                display_name: "Prompt",
                info: Some("The prompt must contain `{question}`."),
            },
        ),
        (
            "top_k",
            FieldConfig {
                display_name: "Top K",
                info: Some("The number of results per select statement to return. If 0, no limit."),
            },
        ),
    ])
}
