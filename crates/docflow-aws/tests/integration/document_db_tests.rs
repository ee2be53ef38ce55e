//! DocumentDB end-to-end tests
//!
//! Each test seeds a collection, creates the HNSW index, waits for the
//! backend to build it, and asserts on search results. Index builds are
//! eventually consistent, hence the fixed delays between writes and reads.

use std::time::Duration;

use docflow_aws::vector_store::{DocumentDbSimilarity, DocumentDbVectorSearch, blocking};
use docflow_core::ports::VectorStore;
use mongodb::bson::doc;

use crate::test_utils::{SAMPLE_DIMENSIONS, sample_embedder, sample_metadatas, sample_texts};

const DB_NAME: &str = "docflow_test";
const COLLECTION_NAME: &str = "documents";
const NAMESPACE: &str = "docflow_test.documents";
const INDEX_NAME: &str = "docflow-test-index";

fn connection_string() -> String {
    std::env::var("DOCUMENTDB_URI").expect("DOCUMENTDB_URI must be set for integration tests")
}

/// Empty the test collection and drop indexes left over from prior runs
async fn reset_collection() {
    crate::init_tracing();
    let client = mongodb::Client::with_uri_str(&connection_string())
        .await
        .expect("connect for cleanup");
    let collection = client
        .database(DB_NAME)
        .collection::<mongodb::bson::Document>(COLLECTION_NAME);
    collection.delete_many(doc! {}).await.expect("clear collection");
    collection.drop_indexes().await.ok();
}

async fn seeded_store(similarity: DocumentDbSimilarity) -> DocumentDbVectorSearch {
    reset_collection().await;
    let store = DocumentDbVectorSearch::from_connection_string(
        &connection_string(),
        NAMESPACE,
        sample_embedder(),
    )
    .await
    .expect("store")
    .with_index_name(INDEX_NAME)
    .with_similarity(similarity);

    store
        .add_texts(&sample_texts(), Some(&sample_metadatas()))
        .await
        .expect("insert");
    store.create_index(SAMPLE_DIMENSIONS).await.expect("create index");
    // waits for DocumentDB to finish building the index
    tokio::time::sleep(Duration::from_secs(2)).await;
    store
}

#[tokio::test]
#[ignore] // Requires a live DocumentDB cluster
async fn cosine_search_returns_the_expected_document() {
    let store = seeded_store(DocumentDbSimilarity::Cosine).await;

    let output = store.similarity_search("Sandwich", 1).await.unwrap();
    assert_eq!(output.len(), 1);
    assert_eq!(output[0].page_content, "What is a sandwich?");
    assert_eq!(output[0].metadata["c"], serde_json::json!(1));

    store.delete_index().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires a live DocumentDB cluster
async fn dot_product_search_returns_the_expected_document() {
    let store = seeded_store(DocumentDbSimilarity::DotProduct).await;

    let output = store
        .similarity_search_with_ef("Sandwich", 1, 100)
        .await
        .unwrap();
    assert_eq!(output[0].page_content, "What is a sandwich?");

    store.delete_index().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires a live DocumentDB cluster
async fn euclidean_search_returns_the_expected_document() {
    let store = seeded_store(DocumentDbSimilarity::Euclidean).await;

    let output = store.similarity_search("Sandwich", 1).await.unwrap();
    assert_eq!(output[0].page_content, "What is a sandwich?");

    store.delete_index().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires a live DocumentDB cluster
async fn search_returns_exactly_k_results() {
    let store = seeded_store(DocumentDbSimilarity::Cosine).await;

    let output = store.similarity_search("Sandwich", 3).await.unwrap();
    assert_eq!(output.len(), 3);
    assert_eq!(output[0].page_content, "What is a sandwich?");

    store.delete_index().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires a live DocumentDB cluster
async fn index_lifecycle_round_trips() {
    let store = seeded_store(DocumentDbSimilarity::Cosine).await;

    assert!(store.index_exists().await.unwrap());
    store.delete_index().await.unwrap();
    assert!(!store.index_exists().await.unwrap());
}

#[tokio::test]
#[ignore] // Requires a live DocumentDB cluster
async fn deleting_one_result_removes_it() {
    let store = seeded_store(DocumentDbSimilarity::Cosine).await;

    let output = store.similarity_search("Sandwich", 1).await.unwrap();
    let first_id = output[0].metadata["_id"].as_str().unwrap().to_string();

    store.delete_document_by_id(&first_id).await.unwrap();
    // waits for the index to observe the deletion
    tokio::time::sleep(Duration::from_secs(2)).await;

    let output = store
        .similarity_search_with_ef("Sandwich", 1, 10)
        .await
        .unwrap();
    assert!(!output.is_empty());
    assert_ne!(output[0].page_content, "What is a sandwich?");

    store.delete_index().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires a live DocumentDB cluster
async fn deleting_multiple_results_leaves_the_rest() {
    let store = seeded_store(DocumentDbSimilarity::Cosine).await;

    let output = store.similarity_search("Sandwich", 5).await.unwrap();
    assert_eq!(output.len(), 4);

    let ids: Vec<String> = output[..3]
        .iter()
        .map(|doc| doc.metadata["_id"].as_str().unwrap().to_string())
        .collect();
    store.delete(&ids).await.unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;

    let remaining = store.similarity_search("Sandwich", 5).await.unwrap();
    assert_eq!(remaining.len(), 1);

    store.delete_index().await.unwrap();
}

#[test]
#[ignore] // Requires a live DocumentDB cluster
fn blocking_mode_produces_the_same_results() {
    tokio::runtime::Runtime::new()
        .expect("cleanup runtime")
        .block_on(reset_collection());

    let store = blocking::DocumentDbVectorSearch::from_connection_string(
        &connection_string(),
        NAMESPACE,
        sample_embedder(),
    )
    .expect("blocking store")
    .with_index_name(INDEX_NAME)
    .with_similarity(DocumentDbSimilarity::Cosine);

    store
        .add_texts(&sample_texts(), Some(&sample_metadatas()))
        .expect("insert");
    store.create_index(SAMPLE_DIMENSIONS).expect("create index");
    std::thread::sleep(Duration::from_secs(2));

    let output = store.similarity_search("Sandwich", 1).expect("search");
    assert_eq!(output[0].page_content, "What is a sandwich?");
    assert_eq!(output[0].metadata["c"], serde_json::json!(1));

    store.delete_index().expect("drop index");
}
