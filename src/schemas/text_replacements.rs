use std::{borrow::Cow, collections::HashMap};

/// Named text substitutions fed into a prompt template or a chain.
pub type TextReplacements<'a> = HashMap<&'a str, Cow<'a, str>>;

#[macro_export]
macro_rules! text_replacements {
    ( $($key:expr => $value:expr),* $(,)? ) => {{
        #[allow(unused_mut)]
        let mut replacements: $crate::schemas::TextReplacements = std::collections::HashMap::new();
        $( replacements.insert($key, std::borrow::Cow::from($value)); )*
        replacements
    }};
}
