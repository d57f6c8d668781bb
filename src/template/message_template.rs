use std::collections::HashSet;

use crate::{
    schemas::{Message, MessageType, TextReplacements},
    template::TemplateError,
};

#[derive(Debug, Clone)]
pub enum TemplateFormat {
    FString,
    Jinja2,
}

#[derive(Debug, Clone)]
pub struct MessageTemplate {
    message_type: MessageType,
    template: String,
    variables: HashSet<String>,
    format: TemplateFormat,
}

impl MessageTemplate {
    pub fn new(
        message_type: MessageType,
        template: impl Into<String>,
        variables: HashSet<String>,
        format: TemplateFormat,
    ) -> Self {
        Self {
            message_type,
            template: template.into(),
            variables,
            format,
        }
    }

    pub fn from_fstring(message_type: MessageType, content: impl Into<String>) -> Self {
        let content = content.into();

        let re = regex::Regex::new(r"\{(\w+)\}").unwrap();
        let variables = re
            .captures_iter(&content)
            .map(|cap| cap[1].to_string())
            .collect();

        Self::new(message_type, content, variables, TemplateFormat::FString)
    }

    pub fn from_jinja2(message_type: MessageType, content: impl Into<String>) -> Self {
        let content = content.into();

        let re = regex::Regex::new(r"\{\{(\w+)\}\}").unwrap();
        let variables = re
            .captures_iter(&content)
            .map(|cap| cap[1].to_string())
            .collect();

        Self::new(message_type, content, variables, TemplateFormat::Jinja2)
    }

    pub fn format(&self, input: &TextReplacements<'_>) -> Result<Message, TemplateError> {
        self.validate_input(input)?;

        let mut content = self.template.clone();

        for (key, value) in input {
            let key = match self.format {
                TemplateFormat::FString => format!("{{{key}}}"),
                TemplateFormat::Jinja2 => format!("{{{{{key}}}}}"),
            };
            content = content.replace(&key, value);
        }

        Ok(Message::new(self.message_type.clone(), content))
    }

    /// The raw template text, with placeholders left in place.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns a list of required input variable names for the template.
    pub fn variables(&self) -> HashSet<&str> {
        self.variables.iter().map(String::as_str).collect()
    }

    pub fn validate_input(&self, input: &TextReplacements<'_>) -> Result<(), TemplateError> {
        let provided: HashSet<&str> = input.keys().copied().collect();
        let missing_variables = self
            .variables()
            .difference(&provided)
            .copied()
            .collect::<Vec<_>>();

        if !missing_variables.is_empty() {
            return Err(TemplateError::MissingVariable(missing_variables.join(", ")));
        }

        Ok(())
    }
}
