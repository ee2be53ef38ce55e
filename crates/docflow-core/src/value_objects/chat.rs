//! Chat Conversation Value Objects

use serde::{Deserialize, Serialize};

/// Value Object: Chat Message
///
/// One turn of a conversation sent to a [`crate::ports::ChatModel`].
/// System messages carry standing instructions; human and assistant
/// messages alternate through the conversation history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ChatMessage {
    /// Standing instructions for the model
    System(String),
    /// A message authored by the user
    Human(String),
    /// A prior reply authored by the model
    Assistant(String),
}

impl ChatMessage {
    /// Create a system message
    pub fn system(text: impl Into<String>) -> Self {
        Self::System(text.into())
    }

    /// Create a human message
    pub fn human(text: impl Into<String>) -> Self {
        Self::Human(text.into())
    }

    /// Create an assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::Assistant(text.into())
    }

    /// The text content of the message, regardless of role
    pub fn content(&self) -> &str {
        match self {
            Self::System(text) | Self::Human(text) | Self::Assistant(text) => text,
        }
    }
}

/// Token accounting reported by the backend for a single exchange
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TokenUsage {
    /// Tokens consumed by the request
    pub input_tokens: u32,
    /// Tokens produced in the response
    pub output_tokens: u32,
}

impl TokenUsage {
    /// Total tokens across request and response
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Value Object: Chat Response
///
/// The model's reply to a conversation, with whatever accounting the
/// backend reports alongside it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ChatResponse {
    /// Assistant text produced by the model
    pub content: String,
    /// Backend stop reason (e.g. "end_turn", "max_tokens"), when reported
    pub stop_reason: Option<String>,
    /// Token usage, when reported
    pub usage: Option<TokenUsage>,
}
