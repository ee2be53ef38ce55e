use crate::error::{Error, Result};
use crate::value_objects::Embedding;
use async_trait::async_trait;

/// Embedding Provider Interface
///
/// Contract for services that transform text into semantic embeddings.
/// The `embed_query` method has a default implementation that delegates to
/// `embed_batch` with a single item; providers only override it when the
/// backend distinguishes query embeddings from document embeddings.
///
/// # Example
///
/// ```ignore
/// use docflow_core::ports::EmbeddingProvider;
///
/// let embedding = provider.embed_query("what is a sandwich?").await?;
/// assert_eq!(embedding.dimensions, provider.dimensions());
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get embeddings for multiple texts (must be implemented by provider)
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>>;

    /// Get the embedding for a single query string
    async fn embed_query(&self, text: &str) -> Result<Embedding> {
        let embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| Error::embedding("No embedding returned"))
    }

    /// Dimensionality of embeddings produced by this provider
    fn dimensions(&self) -> usize;

    /// Name/identifier of this provider implementation
    fn provider_name(&self) -> &str;

    /// Health check for the provider (default implementation provided)
    async fn health_check(&self) -> Result<()> {
        self.embed_query("health check").await?;
        Ok(())
    }
}
