use std::fmt;

use super::Message;

/// A fully rendered prompt, ready to be sent to a language model.
#[derive(Debug, Clone, Default)]
pub struct Prompt {
    messages: Vec<Message>,
}

impl Prompt {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn to_messages(self) -> Vec<Message> {
        self.messages
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, message) in self.messages.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{message}")?;
        }
        Ok(())
    }
}
