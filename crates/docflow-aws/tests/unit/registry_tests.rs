//! Registry resolution tests
//!
//! The adapters register themselves through linkme distributed slices;
//! these tests resolve them by name the way configuration-driven
//! applications do.

use docflow_core::error::Error;
use docflow_core::registry::{
    EmbeddingConfig, VectorStoreConfig, list_embedding_providers, list_retrievers,
    list_vector_stores, resolve_embedding_provider, resolve_vector_store,
};

use crate::test_utils::sample_embedder;

#[test]
fn registered_providers_are_listed() {
    let embeddings: Vec<&str> = list_embedding_providers().iter().map(|(n, _)| *n).collect();
    assert!(embeddings.contains(&"deterministic"));
    #[cfg(feature = "embedding-bedrock")]
    assert!(embeddings.contains(&"bedrock"));

    let stores: Vec<&str> = list_vector_stores().iter().map(|(n, _)| *n).collect();
    #[cfg(feature = "vectorstore-memory")]
    assert!(stores.contains(&"memory"));
    #[cfg(feature = "vectorstore-documentdb")]
    assert!(stores.contains(&"documentdb"));

    let retrievers: Vec<&str> = list_retrievers().iter().map(|(n, _)| *n).collect();
    #[cfg(feature = "retriever-kendra")]
    assert!(retrievers.contains(&"kendra"));
    #[cfg(feature = "retriever-knowledge-bases")]
    assert!(retrievers.contains(&"knowledge_bases"));
    #[cfg(not(any(feature = "retriever-kendra", feature = "retriever-knowledge-bases")))]
    assert!(retrievers.is_empty());
}

#[tokio::test]
async fn deterministic_embedding_resolves_and_embeds() {
    let config = EmbeddingConfig::new("deterministic").with_dimensions(16);
    let provider = resolve_embedding_provider(&config).await.unwrap();
    assert_eq!(provider.dimensions(), 16);

    let embedding = provider.embed_query("hello").await.unwrap();
    assert_eq!(embedding.vector.len(), 16);
}

#[tokio::test]
async fn unknown_embedding_provider_reports_the_alternatives() {
    let err = resolve_embedding_provider(&EmbeddingConfig::new("no-such"))
        .await
        .err()
        .unwrap();
    match err {
        Error::Config { message } => assert!(message.contains("deterministic")),
        other => panic!("expected Config error, got {other}"),
    }
}

#[cfg(feature = "vectorstore-memory")]
#[tokio::test]
async fn memory_store_resolves_and_serves_the_contract() {
    let store = resolve_vector_store(&VectorStoreConfig::new("memory"), sample_embedder())
        .await
        .unwrap();
    assert_eq!(store.provider_name(), "memory");

    let texts = vec!["What is a sandwich?".to_string()];
    let ids = store.add_texts(&texts, None).await.unwrap();
    assert_eq!(ids.len(), 1);

    let results = store.similarity_search("Sandwich", 1).await.unwrap();
    assert_eq!(results[0].page_content, "What is a sandwich?");
}

#[cfg(feature = "vectorstore-documentdb")]
#[tokio::test]
async fn documentdb_store_requires_connection_configuration() {
    let err = resolve_vector_store(&VectorStoreConfig::new("documentdb"), sample_embedder())
        .await
        .err()
        .unwrap();
    match err {
        Error::Config { message } => assert!(message.contains("connection_string")),
        other => panic!("expected Config error, got {other}"),
    }
}
