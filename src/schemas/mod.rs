mod message_type;
pub use message_type::*;

pub mod messages;
pub use messages::*;

pub mod prompt;
pub use prompt::*;

mod generate_result;
pub use generate_result::*;

mod text_replacements;
pub use text_replacements::*;

mod builder_error;
pub use builder_error::*;
