use std::collections::HashSet;

use super::MessageTemplate;
use crate::schemas::{Message, Prompt, TextReplacements};
use crate::template::TemplateError;

#[derive(Clone)]
pub enum MessageOrTemplate {
    Message(Message),
    Template(MessageTemplate),
}

impl From<Message> for MessageOrTemplate {
    fn from(message: Message) -> Self {
        MessageOrTemplate::Message(message)
    }
}

impl From<MessageTemplate> for MessageOrTemplate {
    fn from(template: MessageTemplate) -> Self {
        MessageOrTemplate::Template(template)
    }
}

pub struct PromptTemplate {
    pub(crate) messages: Vec<MessageOrTemplate>,
}

impl PromptTemplate {
    pub fn new(messages: impl IntoIterator<Item = MessageOrTemplate>) -> Self {
        Self {
            messages: messages.into_iter().collect(),
        }
    }

    /// Insert variables into a prompt template to create a full-fledged prompt.
    pub fn format(&self, input: &TextReplacements<'_>) -> Result<Prompt, TemplateError> {
        let messages = self
            .messages
            .iter()
            .map(|m| match m {
                MessageOrTemplate::Message(m) => Ok(m.clone()),
                MessageOrTemplate::Template(t) => t.format(input),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Prompt::new(messages))
    }

    /// Returns a list of required input variable names for the template.
    pub fn variables(&self) -> HashSet<&str> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                MessageOrTemplate::Template(t) => Some(t.variables()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

impl From<MessageTemplate> for PromptTemplate {
    fn from(template: MessageTemplate) -> Self {
        Self::new(vec![MessageOrTemplate::Template(template)])
    }
}

#[macro_export]
macro_rules! prompt_template {
    ( $($message:expr),* $(,)? ) => {
        $crate::template::PromptTemplate::new(vec![ $( $message.into() ),* ])
    };
}

#[cfg(test)]
mod tests {
    use crate::{schemas::MessageType, text_replacements};

    use super::*;

    #[test]
    fn test_format_mixed_messages() {
        let prompt_template = prompt_template![
            Message::new_system_message("You answer questions about a database."),
            MessageTemplate::from_fstring(MessageType::Human, "Question: {question}"),
        ];

        let prompt = prompt_template
            .format(&text_replacements! { "question" => "How many users are there?" })
            .unwrap();

        let messages = prompt.to_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, "Question: How many users are there?");
    }

    #[test]
    fn test_variables_collected_across_messages() {
        let prompt_template = prompt_template![
            MessageTemplate::from_fstring(MessageType::System, "Dialect: {dialect}"),
            MessageTemplate::from_fstring(MessageType::Human, "Question: {question}"),
        ];

        let variables = prompt_template.variables();
        assert!(variables.contains("dialect"));
        assert!(variables.contains("question"));
    }
}
