use indoc::indoc;

use crate::{
    prompt_template,
    schemas::MessageType,
    template::{MessageTemplate, PromptTemplate},
};

pub(super) const DEFAULT_TEMPLATE_PREFIX: &str = indoc! {"
    You are a {dialect} expert. Given an input question, create a syntactically correct {dialect} query to run.
    Never query for all columns from a table; only select the columns needed to answer the question.
    Pay attention to use only the column names you can see in the table descriptions below, and be careful about which column is in which table.
"};

pub(super) const DEFAULT_LIMIT_CLAUSE: &str = indoc! {"
    Unless the question asks for a specific number of rows, limit the query to at most {top_k} results using the LIMIT clause.
"};

pub(super) const DEFAULT_TEMPLATE_SUFFIX: &str = indoc! {"

    Only use the following tables:
    {table_info}

    Use the following format:

    Question: Question here
    SQLQuery: SQL query to run
    SQLResult: Result of the SQLQuery
    Answer: Final answer here

    Question: {question}
    SQLQuery:"};

/// The stock prompt, with the row-limit sentence present only when a limit is
/// configured.
pub(super) fn default_prompt(limited: bool) -> PromptTemplate {
    let limit_clause = if limited { DEFAULT_LIMIT_CLAUSE } else { "" };

    prompt_template![MessageTemplate::from_fstring(
        MessageType::Human,
        format!("{DEFAULT_TEMPLATE_PREFIX}{limit_clause}{DEFAULT_TEMPLATE_SUFFIX}"),
    )]
}
