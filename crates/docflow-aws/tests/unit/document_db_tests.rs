//! DocumentDB adapter unit tests
//!
//! The driver connects lazily, so construction and argument validation
//! are exercised without a running database. Validation always fires
//! before any driver call.

use docflow_aws::vector_store::{DocumentDbSimilarity, DocumentDbVectorSearch, blocking};
use docflow_core::error::Error;
use docflow_core::ports::VectorStore;
use mongodb::options::{ClientOptions, ServerAddress};

use crate::test_utils::sample_embedder;

fn lazy_database() -> mongodb::Database {
    let options = ClientOptions::builder()
        .hosts(vec![ServerAddress::Tcp {
            host: "localhost".to_string(),
            port: Some(27017),
        }])
        .build();
    mongodb::Client::with_options(options)
        .expect("lazy client")
        .database("docflow_test")
}

fn lazy_store() -> DocumentDbVectorSearch {
    DocumentDbVectorSearch::new(lazy_database(), "documents", sample_embedder())
}

#[tokio::test]
async fn delete_without_ids_fails_with_the_documented_message() {
    let store = lazy_store();
    let err = store.delete(&[]).await.unwrap_err();
    match err {
        Error::InvalidArgument { message } => {
            assert_eq!(message, "No document ids provided to delete.");
        }
        other => panic!("expected InvalidArgument, got {other}"),
    }
}

#[tokio::test]
async fn delete_by_id_without_id_fails_with_the_documented_message() {
    let store = lazy_store();
    let err = store.delete_document_by_id("").await.unwrap_err();
    match err {
        Error::InvalidArgument { message } => {
            assert_eq!(message, "No document id provided to delete.");
        }
        other => panic!("expected InvalidArgument, got {other}"),
    }
}

#[tokio::test]
async fn delete_rejects_malformed_identifiers() {
    let store = lazy_store();
    let err = store
        .delete(&["not-an-object-id".to_string()])
        .await
        .unwrap_err();
    match err {
        Error::InvalidArgument { message } => assert!(message.contains("Invalid document id")),
        other => panic!("expected InvalidArgument, got {other}"),
    }
}

#[tokio::test]
async fn construction_requires_a_connection_string() {
    let err =
        DocumentDbVectorSearch::from_connection_string("", "app.documents", sample_embedder())
            .await
            .err()
            .unwrap();
    match err {
        Error::InvalidArgument { message } => {
            assert_eq!(message, "A DocumentDB connection string is required.");
        }
        other => panic!("expected InvalidArgument, got {other}"),
    }
}

#[tokio::test]
async fn construction_rejects_malformed_namespaces() {
    let err = DocumentDbVectorSearch::from_connection_string(
        "mongodb://localhost:27017",
        "no-collection",
        sample_embedder(),
    )
    .await
    .err()
    .unwrap();
    match err {
        Error::InvalidArgument { message } => {
            assert!(message.contains("database.collection"));
        }
        other => panic!("expected InvalidArgument, got {other}"),
    }
}

#[tokio::test]
async fn builder_overrides_index_name_and_similarity() {
    let store = lazy_store()
        .with_index_name("custom-index")
        .with_similarity(DocumentDbSimilarity::Euclidean);
    assert_eq!(store.index_name(), "custom-index");
    assert_eq!(store.similarity(), DocumentDbSimilarity::Euclidean);
}

// Blocking facade: same validation, synchronous call path.

#[test]
fn blocking_delete_without_ids_fails_with_the_documented_message() {
    let store = blocking::DocumentDbVectorSearch::from_connection_string(
        "mongodb://localhost:27017",
        "docflow_test.documents",
        sample_embedder(),
    )
    .expect("blocking store");
    let err = store.delete(&[]).unwrap_err();
    match err {
        Error::InvalidArgument { message } => {
            assert_eq!(message, "No document ids provided to delete.");
        }
        other => panic!("expected InvalidArgument, got {other}"),
    }
}

#[test]
fn blocking_delete_by_id_without_id_fails_with_the_documented_message() {
    let store = blocking::DocumentDbVectorSearch::from_connection_string(
        "mongodb://localhost:27017",
        "docflow_test.documents",
        sample_embedder(),
    )
    .expect("blocking store");
    let err = store.delete_document_by_id("").unwrap_err();
    match err {
        Error::InvalidArgument { message } => {
            assert_eq!(message, "No document id provided to delete.");
        }
        other => panic!("expected InvalidArgument, got {other}"),
    }
}
