mod builder;
pub use builder::*;

#[allow(clippy::module_inception)]
mod chain;
pub use chain::*;
