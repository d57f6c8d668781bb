use super::{OutputParseError, OutputParser};

/// Passes the generation through, trimming surrounding whitespace.
#[derive(Debug, Clone, Default)]
pub struct SimpleParser;

impl OutputParser for SimpleParser {
    fn parse(&self, output: String) -> Result<String, OutputParseError> {
        Ok(output.trim().to_string())
    }
}
