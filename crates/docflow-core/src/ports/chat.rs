use crate::error::Result;
use crate::value_objects::{ChatMessage, ChatResponse};
use async_trait::async_trait;

/// Chat Model Interface
///
/// Contract for hosted conversational models. The adapter maps framework
/// messages onto the backend's native conversation API and maps the reply
/// back; sampling, truncation and safety behavior are owned by the backend.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send a conversation and return the model's reply
    async fn generate(&self, messages: &[ChatMessage]) -> Result<ChatResponse>;

    /// Backend model identifier this adapter targets
    fn model_id(&self) -> &str;

    /// Name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}
