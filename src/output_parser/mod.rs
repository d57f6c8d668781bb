#[allow(clippy::module_inception)]
mod output_parser;
pub use output_parser::*;

mod error;
pub use error::*;

mod simple_parser;
pub use simple_parser::*;
