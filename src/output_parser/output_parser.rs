use super::OutputParseError;

pub trait OutputParser: Send + Sync {
    fn parse(&self, output: String) -> Result<String, OutputParseError>;
}

impl<P> From<P> for Box<dyn OutputParser>
where
    P: 'static + OutputParser,
{
    fn from(parser: P) -> Self {
        Box::new(parser)
    }
}
