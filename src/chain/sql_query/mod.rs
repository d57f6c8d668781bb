mod builder;
pub use builder::*;

#[allow(clippy::module_inception)]
mod chain;
pub use chain::*;

mod prompt;

/// Generation is stopped here so the model never invents query results.
pub const STOP_WORD: &str = "\nSQLResult:";
/// Marker the model is prompted to continue from; consumers strip it.
pub const QUERY_PREFIX: &str = "SQLQuery:";
