mod sql;
pub use sql::*;
