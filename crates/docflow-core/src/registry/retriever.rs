//! Retriever Registry

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ports::Retriever;

/// Configuration for retriever creation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrieverConfig {
    /// Provider name (e.g. "kendra", "knowledge_bases")
    pub provider: String,
    /// Retrieval index identifier (service-specific)
    pub index_id: Option<String>,
    /// Knowledge base identifier (service-specific)
    pub knowledge_base_id: Option<String>,
    /// Service region override
    pub region: Option<String>,
    /// Default number of results to request
    pub top_k: Option<usize>,
    /// Additional provider-specific configuration
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

impl RetrieverConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the retrieval index identifier
    pub fn with_index_id(mut self, index_id: impl Into<String>) -> Self {
        self.index_id = Some(index_id.into());
        self
    }

    /// Set the knowledge base identifier
    pub fn with_knowledge_base_id(mut self, knowledge_base_id: impl Into<String>) -> Self {
        self.knowledge_base_id = Some(knowledge_base_id.into());
        self
    }

    /// Set the region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the default result count
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }
}

/// Factory signature for retrievers
pub type RetrieverFactory =
    for<'a> fn(
        &'a RetrieverConfig,
    ) -> BoxFuture<'a, std::result::Result<Arc<dyn Retriever>, String>>;

/// Registry entry for retrievers
pub struct RetrieverEntry {
    /// Unique provider name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create retriever instances
    pub factory: RetrieverFactory,
}

/// Distributed slice collecting retriever registrations
#[linkme::distributed_slice]
pub static RETRIEVERS: [RetrieverEntry];

/// Resolve a retriever by the configured name
pub async fn resolve_retriever(config: &RetrieverConfig) -> Result<Arc<dyn Retriever>> {
    for entry in RETRIEVERS.iter() {
        if entry.name == config.provider {
            return (entry.factory)(config).await.map_err(Error::config);
        }
    }

    let available: Vec<&str> = RETRIEVERS.iter().map(|e| e.name).collect();
    Err(Error::config(format!(
        "Unknown retriever '{}'. Available retrievers: {:?}",
        config.provider, available
    )))
}

/// List all registered retrievers as (name, description) pairs
pub fn list_retrievers() -> Vec<(&'static str, &'static str)> {
    RETRIEVERS.iter().map(|e| (e.name, e.description)).collect()
}
