use crate::error::Result;
use crate::ports::VectorStore;
use crate::value_objects::RelevantDocument;
use async_trait::async_trait;
use std::sync::Arc;

/// Retriever Interface
///
/// Contract for services that answer a natural-language query with ranked
/// documents. Implementations range from managed retrieval services to the
/// [`VectorStoreRetriever`] bridge over any [`VectorStore`].
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Return up to `top_k` documents relevant to `query`,
    /// most relevant first
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<RelevantDocument>>;

    /// Name/identifier of this retriever implementation
    fn retriever_name(&self) -> &str;
}

/// Bridge making any [`VectorStore`] usable wherever a [`Retriever`] is
/// expected. Queries are answered by the store's similarity search.
pub struct VectorStoreRetriever {
    store: Arc<dyn VectorStore>,
}

impl VectorStoreRetriever {
    /// Wrap a vector store as a retriever
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self { store }
    }

    /// The wrapped store
    pub fn store(&self) -> &Arc<dyn VectorStore> {
        &self.store
    }
}

#[async_trait]
impl Retriever for VectorStoreRetriever {
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<RelevantDocument>> {
        let documents = self.store.similarity_search(query, top_k).await?;
        Ok(documents
            .into_iter()
            .map(RelevantDocument::unscored)
            .collect())
    }

    fn retriever_name(&self) -> &str {
        "vector_store"
    }
}
