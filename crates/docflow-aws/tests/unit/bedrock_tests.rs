//! Bedrock adapter unit tests
//!
//! Clients are built offline from explicit configuration; nothing here
//! reaches the service. Request/response payload handling is covered by
//! the inline tests next to the provider.

use aws_sdk_bedrockruntime::config::{BehaviorVersion, Region};
use docflow_aws::embedding::BedrockEmbeddingProvider;
use docflow_core::error::Error;
use docflow_core::ports::EmbeddingProvider;

fn offline_client() -> aws_sdk_bedrockruntime::Client {
    let config = aws_sdk_bedrockruntime::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .build();
    aws_sdk_bedrockruntime::Client::from_conf(config)
}

#[test]
fn dimensions_follow_the_model_family() {
    let titan_v1 = BedrockEmbeddingProvider::new(offline_client(), "amazon.titan-embed-text-v1");
    assert_eq!(titan_v1.dimensions(), 1536);

    let titan_v2 = BedrockEmbeddingProvider::new(offline_client(), "amazon.titan-embed-text-v2:0");
    assert_eq!(titan_v2.dimensions(), 1024);

    let cohere = BedrockEmbeddingProvider::new(offline_client(), "cohere.embed-english-v3");
    assert_eq!(cohere.dimensions(), 1024);
}

#[test]
fn dimensions_can_be_overridden() {
    let provider = BedrockEmbeddingProvider::new(offline_client(), "amazon.titan-embed-text-v1")
        .with_dimensions(256);
    assert_eq!(provider.dimensions(), 256);
    assert_eq!(provider.provider_name(), "bedrock");
    assert_eq!(provider.model_id(), "amazon.titan-embed-text-v1");
}

#[cfg(feature = "chat-bedrock")]
mod chat {
    use super::offline_client;
    use docflow_aws::chat::BedrockChatModel;
    use docflow_core::ports::ChatModel;
    use docflow_core::value_objects::ChatMessage;

    use super::Error;

    #[test]
    fn model_identifiers_are_reported() {
        let model = BedrockChatModel::new(offline_client(), "anthropic.claude-3-haiku-20240307-v1:0")
            .with_max_tokens(256)
            .with_temperature(0.2);
        assert_eq!(model.model_id(), "anthropic.claude-3-haiku-20240307-v1:0");
        assert_eq!(model.provider_name(), "bedrock");
    }

    #[tokio::test]
    async fn a_conversation_needs_at_least_one_turn() {
        let model = BedrockChatModel::new(offline_client(), "anthropic.claude-3-haiku-20240307-v1:0");

        let err = model.generate(&[]).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));

        let err = model
            .generate(&[ChatMessage::system("be brief")])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }
}
