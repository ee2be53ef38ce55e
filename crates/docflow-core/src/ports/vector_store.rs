use crate::error::{Error, Result};
use crate::value_objects::Document;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// Vector Store Interface
///
/// Contract for stores that persist texts with their embeddings and answer
/// similarity queries. Similarity computation, index construction and
/// persistence are owned entirely by the backing engine; implementations
/// translate these calls onto the backend's native primitives.
///
/// Deletion always requires explicit identifiers. An empty identifier list
/// is a validation error, never an implicit "delete all".
///
/// # Example
///
/// ```ignore
/// use docflow_core::ports::VectorStore;
///
/// let ids = store.add_texts(&texts, None).await?;
/// let hits = store.similarity_search("what is a sandwich?", 4).await?;
/// store.delete(&ids[..1]).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Embed `texts` and insert them with their optional metadata.
    ///
    /// Returns the backend-assigned identifiers in input order. When
    /// `metadatas` is present it must be the same length as `texts`.
    async fn add_texts(
        &self,
        texts: &[String],
        metadatas: Option<&[HashMap<String, Value>]>,
    ) -> Result<Vec<String>>;

    /// Insert documents, splitting them into texts and metadata
    async fn add_documents(&self, documents: &[Document]) -> Result<Vec<String>> {
        let texts: Vec<String> = documents.iter().map(|d| d.page_content.clone()).collect();
        let metadatas: Vec<HashMap<String, Value>> =
            documents.iter().map(|d| d.metadata.clone()).collect();
        self.add_texts(&texts, Some(&metadatas)).await
    }

    /// Embed `query` and return the `k` most similar documents,
    /// ordered by decreasing similarity
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<Document>>;

    /// Return the `k` documents most similar to an already-computed vector
    async fn similarity_search_by_vector(&self, vector: &[f32], k: usize)
    -> Result<Vec<Document>>;

    /// Scored variant of [`VectorStore::similarity_search`].
    ///
    /// Not every backend exposes raw scores; the default implementation
    /// reports that as a vector store error.
    async fn similarity_search_with_score(
        &self,
        _query: &str,
        _k: usize,
    ) -> Result<Vec<(Document, f64)>> {
        Err(Error::vector_store(format!(
            "Scored similarity search is not supported by the '{}' store",
            self.provider_name()
        )))
    }

    /// Delete documents by their backend-assigned identifiers.
    ///
    /// Fails with a validation error when `ids` is empty.
    async fn delete(&self, ids: &[String]) -> Result<bool>;

    /// Name/identifier of this store implementation
    fn provider_name(&self) -> &str;
}
