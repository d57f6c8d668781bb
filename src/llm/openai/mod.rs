mod builder;
pub use builder::*;

mod client;
pub use client::*;

mod models;
pub use models::*;

mod request;
