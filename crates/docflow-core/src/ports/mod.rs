//! Ports
//!
//! The contracts implemented by backend packages. Each port is an
//! async trait; implementations live behind `Arc<dyn ...>` and are
//! interchangeable wherever the contract is accepted.

/// Chat model port
pub mod chat;
/// Embedding provider port
pub mod embedding;
/// Graph store port
pub mod graph;
/// Retriever port and the vector-store bridge
pub mod retriever;
/// Vector store port
pub mod vector_store;

pub use chat::ChatModel;
pub use embedding::EmbeddingProvider;
pub use graph::GraphStore;
pub use retriever::{Retriever, VectorStoreRetriever};
pub use vector_store::VectorStore;
