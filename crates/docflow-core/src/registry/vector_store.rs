//! Vector Store Registry

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ports::{EmbeddingProvider, VectorStore};

/// Configuration for vector store creation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VectorStoreConfig {
    /// Provider name (e.g. "documentdb", "memory")
    pub provider: String,
    /// Backend connection string
    pub connection_string: Option<String>,
    /// Target namespace in `"database.collection"` form
    pub namespace: Option<String>,
    /// Native vector index name
    pub index_name: Option<String>,
    /// Similarity metric name ("cosine", "dotProduct", "euclidean")
    pub similarity: Option<String>,
    /// Additional provider-specific configuration
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

impl VectorStoreConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the connection string
    pub fn with_connection_string(mut self, connection_string: impl Into<String>) -> Self {
        self.connection_string = Some(connection_string.into());
        self
    }

    /// Set the namespace ("database.collection")
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the index name
    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = Some(index_name.into());
        self
    }

    /// Set the similarity metric name
    pub fn with_similarity(mut self, similarity: impl Into<String>) -> Self {
        self.similarity = Some(similarity.into());
        self
    }

    /// Add extra configuration
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Factory signature for vector stores.
///
/// Stores embed on insert and query, so every factory receives the
/// embedding provider alongside its configuration.
pub type VectorStoreFactory = for<'a> fn(
    &'a VectorStoreConfig,
    Arc<dyn EmbeddingProvider>,
) -> BoxFuture<'a, std::result::Result<Arc<dyn VectorStore>, String>>;

/// Registry entry for vector stores
pub struct VectorStoreEntry {
    /// Unique provider name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create store instances
    pub factory: VectorStoreFactory,
}

/// Distributed slice collecting vector store registrations
#[linkme::distributed_slice]
pub static VECTOR_STORES: [VectorStoreEntry];

/// Resolve a vector store by the configured name
pub async fn resolve_vector_store(
    config: &VectorStoreConfig,
    embedding: Arc<dyn EmbeddingProvider>,
) -> Result<Arc<dyn VectorStore>> {
    for entry in VECTOR_STORES.iter() {
        if entry.name == config.provider {
            return (entry.factory)(config, embedding).await.map_err(Error::config);
        }
    }

    let available: Vec<&str> = VECTOR_STORES.iter().map(|e| e.name).collect();
    Err(Error::config(format!(
        "Unknown vector store '{}'. Available stores: {:?}",
        config.provider, available
    )))
}

/// List all registered vector stores as (name, description) pairs
pub fn list_vector_stores() -> Vec<(&'static str, &'static str)> {
    VECTOR_STORES.iter().map(|e| (e.name, e.description)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = VectorStoreConfig::new("documentdb")
            .with_connection_string("mongodb://localhost:27017")
            .with_namespace("app.documents")
            .with_index_name("vectorSearchIndex")
            .with_similarity("cosine")
            .with_extra("tls", "true");

        assert_eq!(config.provider, "documentdb");
        assert_eq!(
            config.connection_string.as_deref(),
            Some("mongodb://localhost:27017")
        );
        assert_eq!(config.namespace.as_deref(), Some("app.documents"));
        assert_eq!(config.index_name.as_deref(), Some("vectorSearchIndex"));
        assert_eq!(config.similarity.as_deref(), Some("cosine"));
        assert_eq!(config.extra.get("tls").map(String::as_str), Some("true"));
    }
}
