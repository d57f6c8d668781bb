pub mod chain;
pub mod component;
pub mod llm;
pub mod output_parser;
pub mod schemas;
pub mod template;
pub mod tools;
