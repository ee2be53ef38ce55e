//! # docflow-core
//!
//! Contract layer for the docflow connector workspace. Application code is
//! written against the ports defined here; backend packages such as
//! `docflow-aws` supply the implementations.
//!
//! ## Ports
//!
//! | Port | Contract |
//! |------|----------|
//! | [`EmbeddingProvider`] | text → fixed-dimension vector |
//! | [`VectorStore`] | store texts, search by similarity, delete by id |
//! | [`Retriever`] | query → ranked relevant documents |
//! | [`ChatModel`] | conversation messages → model response |
//! | [`GraphStore`] | openCypher query + schema introspection |
//!
//! ## Registry
//!
//! Provider implementations register themselves in `linkme` distributed
//! slices so they can be resolved by name from configuration:
//!
//! ```ignore
//! use docflow_core::registry::{resolve_vector_store, VectorStoreConfig};
//!
//! let config = VectorStoreConfig::new("documentdb")
//!     .with_connection_string("mongodb://localhost:27017")
//!     .with_namespace("app.documents");
//! let store = resolve_vector_store(&config, embedding).await?;
//! ```

pub mod error;
pub mod ports;
pub mod registry;
pub mod value_objects;

// Re-export the types nearly every consumer needs
pub use error::{Error, Result};
pub use ports::{
    ChatModel, EmbeddingProvider, GraphStore, Retriever, VectorStore, VectorStoreRetriever,
};
pub use value_objects::{ChatMessage, ChatResponse, Document, Embedding, RelevantDocument};
