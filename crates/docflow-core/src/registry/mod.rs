//! Provider Registry
//!
//! Auto-registration infrastructure for backend providers. Uses the
//! `linkme` crate for compile-time registration of providers that are
//! discovered and instantiated by name at runtime.
//!
//! Factories are asynchronous because backend handles (SDK clients,
//! database connections) are created asynchronously.
//!
//! ## Registering a provider (in a backend crate)
//!
//! ```ignore
//! use docflow_core::registry::{VectorStoreEntry, VECTOR_STORES};
//!
//! #[linkme::distributed_slice(VECTOR_STORES)]
//! static DOCUMENTDB_STORE: VectorStoreEntry = VectorStoreEntry {
//!     name: "documentdb",
//!     description: "Amazon DocumentDB vector search",
//!     factory: |config, embedding| Box::pin(documentdb_factory(config, embedding)),
//! };
//! ```
//!
//! ## Resolving a provider
//!
//! ```ignore
//! let store = resolve_vector_store(&config, embedding).await?;
//! ```

pub mod embedding;
pub mod retriever;
pub mod vector_store;

pub use embedding::{
    EMBEDDING_PROVIDERS, EmbeddingConfig, EmbeddingProviderEntry, list_embedding_providers,
    resolve_embedding_provider,
};
pub use retriever::{RETRIEVERS, RetrieverConfig, RetrieverEntry, list_retrievers, resolve_retriever};
pub use vector_store::{
    VECTOR_STORES, VectorStoreConfig, VectorStoreEntry, list_vector_stores, resolve_vector_store,
};
