use serde::{Deserialize, Serialize};

use crate::plugins::history::ChatMessage;

/// One request against the completion service.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub api_key: String,
    pub model: String,
    pub stream: bool,
}

/// One fragment of a completion, tagged so the caller can tell model
/// output from a failed call. A `Failed` fragment is always terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionDelta {
    Content(String),
    Failed(String),
}

/// Streaming payload handed to the presentation layer. `done` fires once,
/// with an empty delta, after the last content fragment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatStreamPayload {
    pub delta: String,
    pub done: bool,
}

/// BYOT stream chunk shape; tolerates the extra delta fields
/// OpenAI-compatible vendors add.
#[derive(Debug, Deserialize)]
pub(super) struct ByotChatCompletionStreamResponse {
    pub(super) choices: Vec<ByotChatChoiceStream>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ByotChatChoiceStream {
    pub(super) delta: ByotChatCompletionStreamDelta,
}

#[derive(Debug, Deserialize)]
pub(super) struct ByotChatCompletionStreamDelta {
    pub(super) content: Option<String>,
}
