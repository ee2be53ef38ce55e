//! In-memory vector store unit tests
//!
//! Exercises the full `VectorStore` contract offline: insertion, ranked
//! search, scored search, deletion semantics and the retriever bridge.

use std::sync::Arc;

use docflow_aws::vector_store::InMemoryVectorStore;
use docflow_core::error::Error;
use docflow_core::ports::{Retriever, VectorStore, VectorStoreRetriever};

use crate::test_utils::{sample_embedder, sample_metadatas, sample_texts};

fn seeded_store() -> InMemoryVectorStore {
    InMemoryVectorStore::new(sample_embedder())
}

#[tokio::test]
async fn add_texts_returns_one_id_per_text() {
    let store = seeded_store();
    let ids = store.add_texts(&sample_texts(), None).await.unwrap();
    assert_eq!(ids.len(), 4);
    assert_eq!(store.len(), 4);
}

#[tokio::test]
async fn search_returns_k_results_ranked_by_similarity() {
    let store = seeded_store();
    store
        .add_texts(&sample_texts(), Some(&sample_metadatas()))
        .await
        .unwrap();

    let results = store.similarity_search("Sandwich", 3).await.unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].page_content, "What is a sandwich?");
    assert_eq!(results[0].metadata["c"], serde_json::json!(1));
    assert!(results[0].metadata.contains_key("_id"));
}

#[tokio::test]
async fn scored_search_is_ordered_by_decreasing_score() {
    let store = seeded_store();
    store.add_texts(&sample_texts(), None).await.unwrap();

    let scored = store
        .similarity_search_with_score("Sandwich", 4)
        .await
        .unwrap();
    assert_eq!(scored.len(), 4);
    assert_eq!(scored[0].0.page_content, "What is a sandwich?");
    for pair in scored.windows(2) {
        assert!(pair[0].1 >= pair[1].1);
    }
}

#[tokio::test]
async fn delete_without_ids_fails_with_the_documented_message() {
    let store = seeded_store();
    let err = store.delete(&[]).await.unwrap_err();
    match err {
        Error::InvalidArgument { message } => {
            assert_eq!(message, "No document ids provided to delete.");
        }
        other => panic!("expected InvalidArgument, got {other}"),
    }
}

#[tokio::test]
async fn deleting_a_result_removes_exactly_that_document() {
    let store = seeded_store();
    store
        .add_texts(&sample_texts(), Some(&sample_metadatas()))
        .await
        .unwrap();

    let top = store.similarity_search("Sandwich", 1).await.unwrap();
    let top_id = top[0].metadata["_id"].as_str().unwrap().to_string();

    store.delete(&[top_id]).await.unwrap();
    assert_eq!(store.len(), 3);

    let results = store.similarity_search("Sandwich", 4).await.unwrap();
    assert_eq!(results.len(), 3);
    assert!(
        results
            .iter()
            .all(|doc| doc.page_content != "What is a sandwich?")
    );
}

#[tokio::test]
async fn metadata_length_mismatch_is_rejected() {
    let store = seeded_store();
    let err = store
        .add_texts(&sample_texts(), Some(&sample_metadatas()[..2]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[tokio::test]
async fn any_store_works_behind_the_retriever_bridge() {
    let store = seeded_store();
    store.add_texts(&sample_texts(), None).await.unwrap();

    let retriever = VectorStoreRetriever::new(Arc::new(store));
    let results = retriever.retrieve("Sandwich", 1).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document.page_content, "What is a sandwich?");
    assert_eq!(results[0].score, None);
}
