mod chain_trait;
pub use chain_trait::*;

mod error;
pub use error::*;

mod llm_chain;
pub use llm_chain::*;

pub mod sql_query;
pub use sql_query::*;
