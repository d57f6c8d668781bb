mod config;
pub use config::*;

mod error;
pub use error::*;

mod sql_generator;
pub use sql_generator::*;
