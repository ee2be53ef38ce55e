//! Blocking facade over the DocumentDB vector store
//!
//! There is one logical implementation of the adapter - the async
//! [`AsyncDocumentDbVectorSearch`] - and this facade drives it from
//! synchronous code through a dedicated current-thread runtime. Both
//! execution modes therefore produce identical results for identical
//! inputs.
//!
//! Must not be used from within an async runtime; call the async adapter
//! directly there.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::runtime::Runtime;

use docflow_core::error::{Error, Result};
use docflow_core::ports::{EmbeddingProvider, VectorStore as _};
use docflow_core::value_objects::Document;

use super::document_db::{
    DocumentDbSimilarity, DocumentDbVectorSearch as AsyncDocumentDbVectorSearch, HnswIndexOptions,
};

/// Synchronous handle over a DocumentDB collection.
///
/// # Example
///
/// ```ignore
/// use docflow_aws::vector_store::blocking;
///
/// let store = blocking::DocumentDbVectorSearch::from_connection_string(
///     &connection_string,
///     "app.documents",
///     embedding,
/// )?;
/// store.add_texts(&texts, None)?;
/// store.create_index(dimensions)?;
/// std::thread::sleep(std::time::Duration::from_secs(2));
/// let hits = store.similarity_search("What is a sandwich?", 1)?;
/// ```
pub struct DocumentDbVectorSearch {
    inner: AsyncDocumentDbVectorSearch,
    runtime: Runtime,
}

impl DocumentDbVectorSearch {
    /// Wrap an existing async handle
    pub fn from_async(inner: AsyncDocumentDbVectorSearch) -> Result<Self> {
        Ok(Self {
            inner,
            runtime: blocking_runtime()?,
        })
    }

    /// Connect to DocumentDB and create a handle for `namespace`
    pub fn from_connection_string(
        connection_string: &str,
        namespace: &str,
        embedding: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self> {
        let runtime = blocking_runtime()?;
        let inner = runtime.block_on(AsyncDocumentDbVectorSearch::from_connection_string(
            connection_string,
            namespace,
            embedding,
        ))?;
        Ok(Self { inner, runtime })
    }

    /// Embed `texts`, insert them, and return a ready handle
    pub fn from_texts(
        texts: &[String],
        metadatas: Option<&[HashMap<String, Value>]>,
        embedding: Arc<dyn EmbeddingProvider>,
        database: mongodb::Database,
        collection_name: &str,
    ) -> Result<Self> {
        let runtime = blocking_runtime()?;
        let inner = runtime.block_on(AsyncDocumentDbVectorSearch::from_texts(
            texts,
            metadatas,
            embedding,
            database,
            collection_name,
        ))?;
        Ok(Self { inner, runtime })
    }

    /// Embed `documents`, insert them, and return a ready handle
    pub fn from_documents(
        documents: &[Document],
        embedding: Arc<dyn EmbeddingProvider>,
        database: mongodb::Database,
        collection_name: &str,
    ) -> Result<Self> {
        let runtime = blocking_runtime()?;
        let inner = runtime.block_on(AsyncDocumentDbVectorSearch::from_documents(
            documents,
            embedding,
            database,
            collection_name,
        ))?;
        Ok(Self { inner, runtime })
    }

    /// Override the native index name
    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.inner = self.inner.with_index_name(index_name);
        self
    }

    /// Set the similarity metric used for index creation and search
    pub fn with_similarity(mut self, similarity: DocumentDbSimilarity) -> Self {
        self.inner = self.inner.with_similarity(similarity);
        self
    }

    /// The wrapped async handle
    pub fn inner(&self) -> &AsyncDocumentDbVectorSearch {
        &self.inner
    }

    /// Embed and insert texts, returning backend-assigned ids in input order
    pub fn add_texts(
        &self,
        texts: &[String],
        metadatas: Option<&[HashMap<String, Value>]>,
    ) -> Result<Vec<String>> {
        self.runtime.block_on(self.inner.add_texts(texts, metadatas))
    }

    /// Insert documents, splitting them into texts and metadata
    pub fn add_documents(&self, documents: &[Document]) -> Result<Vec<String>> {
        self.runtime.block_on(self.inner.add_documents(documents))
    }

    /// Create the native HNSW vector index with default build parameters
    pub fn create_index(&self, dimensions: usize) -> Result<()> {
        self.runtime.block_on(self.inner.create_index(dimensions))
    }

    /// Create the native HNSW vector index with explicit build parameters
    pub fn create_index_with_options(
        &self,
        dimensions: usize,
        options: &HnswIndexOptions,
    ) -> Result<()> {
        self.runtime
            .block_on(self.inner.create_index_with_options(dimensions, options))
    }

    /// Whether the configured index exists on the collection
    pub fn index_exists(&self) -> Result<bool> {
        self.runtime.block_on(self.inner.index_exists())
    }

    /// Drop the configured index if present
    pub fn delete_index(&self) -> Result<()> {
        self.runtime.block_on(self.inner.delete_index())
    }

    /// Embed the query and return the `k` most similar documents
    pub fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<Document>> {
        self.runtime.block_on(self.inner.similarity_search(query, k))
    }

    /// Embed the query and search with an explicit `efSearch` breadth
    pub fn similarity_search_with_ef(
        &self,
        query: &str,
        k: usize,
        ef_search: u32,
    ) -> Result<Vec<Document>> {
        self.runtime
            .block_on(self.inner.similarity_search_with_ef(query, k, ef_search))
    }

    /// Search with an already-computed vector
    pub fn similarity_search_by_vector(&self, vector: &[f32], k: usize) -> Result<Vec<Document>> {
        self.runtime
            .block_on(self.inner.similarity_search_by_vector(vector, k))
    }

    /// Delete documents by their backend-assigned identifiers.
    ///
    /// Fails with a validation error when `ids` is empty.
    pub fn delete(&self, ids: &[String]) -> Result<bool> {
        self.runtime.block_on(self.inner.delete(ids))
    }

    /// Delete one document by its backend-assigned identifier
    pub fn delete_document_by_id(&self, document_id: &str) -> Result<()> {
        self.runtime
            .block_on(self.inner.delete_document_by_id(document_id))
    }
}

fn blocking_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::internal(format!("Failed to start blocking runtime: {e}")))
}
