//! # docflow-aws
//!
//! AWS backend adapters for the docflow contracts. Each adapter implements
//! a port defined in `docflow-core` and translates it onto one managed
//! service; similarity computation, index construction, persistence and
//! generation are owned by the backends.
//!
//! ## Adapters
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Vector Store | `VectorStore` | DocumentDB (async + blocking facade), InMemory |
//! | Embedding | `EmbeddingProvider` | Bedrock (Titan, Cohere), Deterministic |
//! | Chat | `ChatModel` | Bedrock Converse |
//! | Retriever | `Retriever` | Kendra, Knowledge Bases |
//! | Graph | `GraphStore` | Neptune Database, Neptune Analytics |
//!
//! ## Feature Flags
//!
//! Each adapter can be enabled or disabled for minimal builds:
//!
//! ```toml
//! [dependencies]
//! docflow-aws = { version = "0.1", default-features = false, features = ["vectorstore-documentdb", "embedding-bedrock"] }
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use docflow_aws::embedding::BedrockEmbeddingProvider;
//! use docflow_aws::vector_store::DocumentDbVectorSearch;
//! use std::sync::Arc;
//!
//! let embedding = Arc::new(BedrockEmbeddingProvider::from_env("amazon.titan-embed-text-v1").await?);
//! let store = DocumentDbVectorSearch::from_connection_string(
//!     &connection_string,
//!     "app.documents",
//!     embedding,
//! )
//! .await?;
//! ```

// Re-export docflow-core types commonly used with the adapters
pub use docflow_core::error::{Error, Result};
pub use docflow_core::ports::{ChatModel, EmbeddingProvider, GraphStore, Retriever, VectorStore};
pub use docflow_core::value_objects::{ChatMessage, ChatResponse, Document, Embedding, RelevantDocument};

/// Adapter-specific constants
pub mod constants;

/// Shared conversion utilities
pub mod utils;

/// Configuration loading
pub mod config;

/// Chat model implementations
pub mod chat;

/// Embedding provider implementations
pub mod embedding;

/// Graph store implementations
pub mod graph;

/// Retriever implementations
pub mod retriever;

/// Vector store implementations
pub mod vector_store;
