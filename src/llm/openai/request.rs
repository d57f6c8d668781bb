use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs, Stop,
};

use crate::{
    llm::{options::CallOptions, LLMError},
    schemas::{Message, MessageType},
};

/// Assembles the request payload sent to an OpenAI-compatible API.
pub(super) fn build_request(
    model: &str,
    messages: Vec<Message>,
    options: &CallOptions,
) -> Result<CreateChatCompletionRequest, LLMError> {
    let messages = messages
        .into_iter()
        .map(to_request_message)
        .collect::<Result<Vec<_>, _>>()?;

    let mut request = CreateChatCompletionRequestArgs::default();
    request.model(model).messages(messages);

    if let Some(max_tokens) = options.max_tokens {
        request.max_completion_tokens(max_tokens);
    }
    if let Some(temperature) = options.temperature {
        request.temperature(temperature);
    }
    if let Some(top_p) = options.top_p {
        request.top_p(top_p);
    }
    if let Some(seed) = options.seed {
        request.seed(seed);
    }
    if let Some(stop_words) = &options.stop_words {
        request.stop(Stop::StringArray(stop_words.clone()));
    }

    Ok(request.build()?)
}

fn to_request_message(message: Message) -> Result<ChatCompletionRequestMessage, LLMError> {
    let message = match message.message_type {
        MessageType::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(message.content)
            .build()?
            .into(),
        MessageType::Ai => ChatCompletionRequestAssistantMessageArgs::default()
            .content(message.content)
            .build()?
            .into(),
        MessageType::Human => ChatCompletionRequestUserMessageArgs::default()
            .content(message.content)
            .build()?
            .into(),
    };

    Ok(message)
}
