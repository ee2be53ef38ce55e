//! Deterministic embedding provider for testing and development
//!
//! Hash-based embeddings with no external dependencies - always works
//! offline. The same text always maps to the same vector.

use std::sync::Arc;

use async_trait::async_trait;

use docflow_core::error::Result;
use docflow_core::ports::EmbeddingProvider;
use docflow_core::value_objects::Embedding;

use crate::constants::EMBEDDING_DIMENSION_DETERMINISTIC;

/// Deterministic embedding provider
///
/// Returns fixed-size vectors derived from the input text's character sum.
/// Useful for unit tests and development without an embedding service.
///
/// # Example
///
/// ```rust
/// use docflow_aws::embedding::DeterministicEmbeddingProvider;
/// use docflow_core::ports::EmbeddingProvider;
///
/// let provider = DeterministicEmbeddingProvider::new();
/// assert_eq!(provider.dimensions(), 384);
/// assert_eq!(provider.provider_name(), "deterministic");
/// ```
pub struct DeterministicEmbeddingProvider {
    dimensions: usize,
}

impl DeterministicEmbeddingProvider {
    /// Create a provider with the default dimensionality
    pub fn new() -> Self {
        Self {
            dimensions: EMBEDDING_DIMENSION_DETERMINISTIC,
        }
    }

    /// Create a provider with explicit dimensionality
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

impl Default for DeterministicEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for DeterministicEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let embeddings = texts
            .iter()
            .map(|text| {
                let hash = text.chars().map(|c| c as u32).sum::<u32>();
                let base_value = (hash % 1000) as f32 / 1000.0;

                let vector = (0..self.dimensions)
                    .map(|position| {
                        let variation = ((hash as f32 * 0.001) + position as f32 * 0.01).sin();
                        (base_value + variation * 0.1).clamp(0.0, 1.0)
                    })
                    .collect();

                Embedding {
                    vector,
                    model: "deterministic".to_string(),
                    dimensions: self.dimensions,
                }
            })
            .collect();

        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn provider_name(&self) -> &str {
        "deterministic"
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use docflow_core::registry::{EMBEDDING_PROVIDERS, EmbeddingConfig, EmbeddingProviderEntry};
use futures::future::BoxFuture;

fn deterministic_factory(
    config: &EmbeddingConfig,
) -> BoxFuture<'_, std::result::Result<Arc<dyn EmbeddingProvider>, String>> {
    Box::pin(async move {
        let provider = match config.dimensions {
            Some(dimensions) => DeterministicEmbeddingProvider::with_dimensions(dimensions),
            None => DeterministicEmbeddingProvider::new(),
        };
        Ok(Arc::new(provider) as Arc<dyn EmbeddingProvider>)
    })
}

#[linkme::distributed_slice(EMBEDDING_PROVIDERS)]
static DETERMINISTIC_PROVIDER: EmbeddingProviderEntry = EmbeddingProviderEntry {
    name: "deterministic",
    description: "Hash-based offline embeddings (testing and development)",
    factory: deterministic_factory,
};
