//! Embedding Provider Registry

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ports::EmbeddingProvider;

/// Configuration for embedding provider creation
///
/// Carries everything an embedding provider might need; providers use what
/// applies to them and ignore the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Provider name (e.g. "bedrock", "deterministic")
    pub provider: String,
    /// Backend model identifier
    pub model: Option<String>,
    /// Service region override
    pub region: Option<String>,
    /// Embedding dimensions override
    pub dimensions: Option<usize>,
    /// L2-normalize returned vectors
    #[serde(default)]
    pub normalize: bool,
    /// Additional provider-specific configuration
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

impl EmbeddingConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the dimensions override
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Enable L2 normalization of returned vectors
    pub fn with_normalization(mut self) -> Self {
        self.normalize = true;
        self
    }
}

/// Factory signature for embedding providers
pub type EmbeddingFactory =
    for<'a> fn(
        &'a EmbeddingConfig,
    ) -> BoxFuture<'a, std::result::Result<Arc<dyn EmbeddingProvider>, String>>;

/// Registry entry for embedding providers
pub struct EmbeddingProviderEntry {
    /// Unique provider name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create provider instances
    pub factory: EmbeddingFactory,
}

/// Distributed slice collecting embedding provider registrations
#[linkme::distributed_slice]
pub static EMBEDDING_PROVIDERS: [EmbeddingProviderEntry];

/// Resolve an embedding provider by the configured name
pub async fn resolve_embedding_provider(
    config: &EmbeddingConfig,
) -> Result<Arc<dyn EmbeddingProvider>> {
    for entry in EMBEDDING_PROVIDERS.iter() {
        if entry.name == config.provider {
            return (entry.factory)(config).await.map_err(Error::config);
        }
    }

    let available: Vec<&str> = EMBEDDING_PROVIDERS.iter().map(|e| e.name).collect();
    Err(Error::config(format!(
        "Unknown embedding provider '{}'. Available providers: {:?}",
        config.provider, available
    )))
}

/// List all registered embedding providers as (name, description) pairs
pub fn list_embedding_providers() -> Vec<(&'static str, &'static str)> {
    EMBEDDING_PROVIDERS.iter().map(|e| (e.name, e.description)).collect()
}
