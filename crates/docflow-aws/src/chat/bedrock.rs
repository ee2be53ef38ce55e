//! Amazon Bedrock chat model
//!
//! Implements the `ChatModel` port over Bedrock's `Converse` API, which
//! normalizes the conversation format across hosted model families.
//! Sampling, truncation and safety behavior are owned by the service.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message, SystemContentBlock,
};

use docflow_core::error::{Error, Result};
use docflow_core::ports::ChatModel;
use docflow_core::value_objects::{ChatMessage, ChatResponse, TokenUsage};

/// Amazon Bedrock chat model
///
/// ## Example
///
/// ```ignore
/// use docflow_aws::chat::BedrockChatModel;
/// use docflow_core::value_objects::ChatMessage;
///
/// let model = BedrockChatModel::from_env("anthropic.claude-3-haiku-20240307-v1:0")
///     .await?
///     .with_max_tokens(512);
/// let reply = model
///     .generate(&[ChatMessage::human("Name one use of a vector index.")])
///     .await?;
/// println!("{}", reply.content);
/// ```
pub struct BedrockChatModel {
    client: Client,
    model_id: String,
    max_tokens: Option<i32>,
    temperature: Option<f32>,
    top_p: Option<f32>,
}

impl BedrockChatModel {
    /// Create a model over an existing Bedrock runtime client
    pub fn new(client: Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
            max_tokens: None,
            temperature: None,
            top_p: None,
        }
    }

    /// Create a model from the default AWS credential chain
    pub async fn from_env(model_id: impl Into<String>) -> Result<Self> {
        Self::from_env_with_region(model_id, None).await
    }

    /// Create a model from the default credential chain with a region override
    pub async fn from_env_with_region(
        model_id: impl Into<String>,
        region: Option<String>,
    ) -> Result<Self> {
        let mut loader = aws_config::from_env();
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        let config = loader.load().await;
        Ok(Self::new(Client::new(&config), model_id))
    }

    /// Cap the response length in tokens
    pub fn with_max_tokens(mut self, max_tokens: i32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the nucleus sampling threshold
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    fn inference_configuration(&self) -> Option<InferenceConfiguration> {
        if self.max_tokens.is_none() && self.temperature.is_none() && self.top_p.is_none() {
            return None;
        }
        Some(
            InferenceConfiguration::builder()
                .set_max_tokens(self.max_tokens)
                .set_temperature(self.temperature)
                .set_top_p(self.top_p)
                .build(),
        )
    }
}

#[async_trait]
impl ChatModel for BedrockChatModel {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<ChatResponse> {
        let mut system_blocks = Vec::new();
        let mut conversation = Vec::new();

        for message in messages {
            match message {
                ChatMessage::System(text) => {
                    system_blocks.push(SystemContentBlock::Text(text.clone()));
                }
                ChatMessage::Human(text) => {
                    conversation.push(converse_message(ConversationRole::User, text)?);
                }
                ChatMessage::Assistant(text) => {
                    conversation.push(converse_message(ConversationRole::Assistant, text)?);
                }
            }
        }

        if conversation.is_empty() {
            return Err(Error::invalid_argument(
                "At least one human or assistant message is required.",
            ));
        }

        let mut request = self
            .client
            .converse()
            .model_id(&self.model_id)
            .set_messages(Some(conversation));
        if !system_blocks.is_empty() {
            request = request.set_system(Some(system_blocks));
        }
        if let Some(inference) = self.inference_configuration() {
            request = request.inference_config(inference);
        }

        let output = request
            .send()
            .await
            .map_err(|e| Error::chat(format!("Bedrock converse failed for {}: {e}", self.model_id)))?;

        let reply = output
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| Error::chat("Bedrock returned no message output"))?;
        let content: String = reply
            .content()
            .iter()
            .filter_map(|block| block.as_text().ok())
            .cloned()
            .collect::<Vec<String>>()
            .join("");

        let usage = output.usage().map(|usage| TokenUsage {
            input_tokens: usage.input_tokens().max(0) as u32,
            output_tokens: usage.output_tokens().max(0) as u32,
        });

        Ok(ChatResponse {
            content,
            stop_reason: Some(output.stop_reason().as_str().to_string()),
            usage,
        })
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn provider_name(&self) -> &str {
        "bedrock"
    }
}

fn converse_message(role: ConversationRole, text: &str) -> Result<Message> {
    Message::builder()
        .role(role)
        .content(ContentBlock::Text(text.to_string()))
        .build()
        .map_err(|e| Error::chat(format!("Invalid conversation message: {e}")))
}
