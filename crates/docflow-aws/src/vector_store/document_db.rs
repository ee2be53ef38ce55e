//! Amazon DocumentDB vector store
//!
//! Maps the framework's store/search/delete contract onto DocumentDB's
//! native HNSW vector indexes and `$search` aggregation stage, reached
//! through the MongoDB wire-compatible driver. Similarity computation,
//! index construction and persistence are owned by the database engine;
//! this adapter translates calls and bookkeeps identifiers.
//!
//! Index builds are eventually consistent on the backend. There is no
//! blocking "wait until ready" primitive; callers insert a short delay
//! between [`DocumentDbVectorSearch::create_index`] and the first search.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{Bson, Document as BsonDocument, doc, oid::ObjectId};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use docflow_core::error::{Error, Result};
use docflow_core::ports::{EmbeddingProvider, VectorStore};
use docflow_core::value_objects::Document;

use crate::constants::{
    DEFAULT_EF_SEARCH, DEFAULT_EMBEDDING_KEY, DEFAULT_HNSW_EF_CONSTRUCTION, DEFAULT_HNSW_M,
    DEFAULT_INDEX_NAME, DEFAULT_TEXT_KEY, NO_DOCUMENT_ID_MESSAGE, NO_DOCUMENT_IDS_MESSAGE,
};
use crate::utils::{bson_to_json, json_to_bson};

/// Similarity metric of a DocumentDB vector index.
///
/// Passed through unmodified to the backend's index configuration and to
/// the `$search` stage, so index and query always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentDbSimilarity {
    /// Cosine similarity
    Cosine,
    /// Inner product
    DotProduct,
    /// Euclidean distance
    Euclidean,
}

impl DocumentDbSimilarity {
    /// The metric name on the DocumentDB wire
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cosine => "cosine",
            Self::DotProduct => "dotProduct",
            Self::Euclidean => "euclidean",
        }
    }
}

impl fmt::Display for DocumentDbSimilarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentDbSimilarity {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "cosine" => Ok(Self::Cosine),
            "dotProduct" => Ok(Self::DotProduct),
            "euclidean" => Ok(Self::Euclidean),
            other => Err(Error::invalid_argument(format!(
                "Unknown similarity metric '{other}'; expected one of cosine, dotProduct, euclidean"
            ))),
        }
    }
}

/// HNSW build parameters for [`DocumentDbVectorSearch::create_index_with_options`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HnswIndexOptions {
    /// Maximum connections per graph node
    pub m: u32,
    /// Candidate list size during index construction
    pub ef_construction: u32,
}

impl Default for HnswIndexOptions {
    fn default() -> Self {
        Self {
            m: DEFAULT_HNSW_M,
            ef_construction: DEFAULT_HNSW_EF_CONSTRUCTION,
        }
    }
}

/// Vector search handle over one DocumentDB collection.
///
/// Wraps a collection, an embedding provider, an index name and a
/// similarity metric. The handle has no lifecycle of its own beyond the
/// underlying connection.
///
/// # Example
///
/// ```ignore
/// use docflow_aws::vector_store::DocumentDbVectorSearch;
///
/// let store = DocumentDbVectorSearch::from_connection_string(
///     &connection_string,
///     "app.documents",
///     embedding,
/// )
/// .await?;
/// store.add_texts(&texts, None).await?;
/// store.create_index(embedding_dimensions).await?;
/// // DocumentDB builds the index asynchronously; give it a moment
/// tokio::time::sleep(std::time::Duration::from_secs(2)).await;
/// let hits = store.similarity_search_with_ef("What is a sandwich?", 1, 40).await?;
/// ```
pub struct DocumentDbVectorSearch {
    database: Database,
    collection: Collection<BsonDocument>,
    embedding: Arc<dyn EmbeddingProvider>,
    index_name: String,
    text_key: String,
    embedding_key: String,
    similarity: DocumentDbSimilarity,
}

impl DocumentDbVectorSearch {
    /// Create a handle over an existing database connection
    pub fn new(
        database: Database,
        collection_name: &str,
        embedding: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        let collection = database.collection::<BsonDocument>(collection_name);
        Self {
            database,
            collection,
            embedding,
            index_name: DEFAULT_INDEX_NAME.to_string(),
            text_key: DEFAULT_TEXT_KEY.to_string(),
            embedding_key: DEFAULT_EMBEDDING_KEY.to_string(),
            similarity: DocumentDbSimilarity::Cosine,
        }
    }

    /// Connect to DocumentDB and create a handle for `namespace`
    /// (`"database.collection"`).
    ///
    /// Fails with a validation error when the connection string is empty
    /// or the namespace is malformed. The driver connects lazily; no I/O
    /// happens until the first operation.
    pub async fn from_connection_string(
        connection_string: &str,
        namespace: &str,
        embedding: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self> {
        if connection_string.is_empty() {
            return Err(Error::invalid_argument(
                "A DocumentDB connection string is required.",
            ));
        }
        let (database_name, collection_name) = parse_namespace(namespace)?;

        let options = ClientOptions::parse(connection_string).await.map_err(|e| {
            Error::database_with_source("Failed to parse DocumentDB connection string", e)
        })?;
        let client = Client::with_options(options)
            .map_err(|e| Error::database_with_source("Failed to create DocumentDB client", e))?;

        Ok(Self::new(
            client.database(&database_name),
            &collection_name,
            embedding,
        ))
    }

    /// Embed `texts`, insert them, and return a ready handle
    pub async fn from_texts(
        texts: &[String],
        metadatas: Option<&[HashMap<String, Value>]>,
        embedding: Arc<dyn EmbeddingProvider>,
        database: Database,
        collection_name: &str,
    ) -> Result<Self> {
        let store = Self::new(database, collection_name, embedding);
        store.add_texts(texts, metadatas).await?;
        Ok(store)
    }

    /// Embed `documents`, insert them, and return a ready handle
    pub async fn from_documents(
        documents: &[Document],
        embedding: Arc<dyn EmbeddingProvider>,
        database: Database,
        collection_name: &str,
    ) -> Result<Self> {
        let texts: Vec<String> = documents.iter().map(|d| d.page_content.clone()).collect();
        let metadatas: Vec<HashMap<String, Value>> =
            documents.iter().map(|d| d.metadata.clone()).collect();
        Self::from_texts(&texts, Some(&metadatas), embedding, database, collection_name).await
    }

    /// Override the native index name
    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = index_name.into();
        self
    }

    /// Override the field holding document text
    pub fn with_text_key(mut self, text_key: impl Into<String>) -> Self {
        self.text_key = text_key.into();
        self
    }

    /// Override the field holding embedding vectors
    pub fn with_embedding_key(mut self, embedding_key: impl Into<String>) -> Self {
        self.embedding_key = embedding_key.into();
        self
    }

    /// Set the similarity metric used for index creation and search
    pub fn with_similarity(mut self, similarity: DocumentDbSimilarity) -> Self {
        self.similarity = similarity;
        self
    }

    /// The configured index name
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// The configured similarity metric
    pub fn similarity(&self) -> DocumentDbSimilarity {
        self.similarity
    }

    /// Embed and insert texts, returning backend-assigned ids in input order
    pub async fn add_texts(
        &self,
        texts: &[String],
        metadatas: Option<&[HashMap<String, Value>]>,
    ) -> Result<Vec<String>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(metadatas) = metadatas {
            if metadatas.len() != texts.len() {
                return Err(Error::invalid_argument(format!(
                    "Texts ({}) and metadatas ({}) must have the same length",
                    texts.len(),
                    metadatas.len()
                )));
            }
        }

        let embeddings = self.embedding.embed_batch(texts).await?;
        if embeddings.len() != texts.len() {
            return Err(Error::embedding(format!(
                "Embedding count mismatch: expected {}, got {}",
                texts.len(),
                embeddings.len()
            )));
        }

        let mut batch = Vec::with_capacity(texts.len());
        for (i, (text, embedding)) in texts.iter().zip(&embeddings).enumerate() {
            let mut record = BsonDocument::new();
            record.insert(&self.text_key, text.as_str());
            record.insert(&self.embedding_key, vector_to_bson(&embedding.vector));
            if let Some(metadatas) = metadatas {
                for (key, value) in &metadatas[i] {
                    record.insert(key, json_to_bson(value)?);
                }
            }
            batch.push(record);
        }

        tracing::debug!(
            count = batch.len(),
            collection = self.collection.name(),
            "inserting embedded documents"
        );
        let result = self
            .collection
            .insert_many(batch)
            .await
            .map_err(|e| Error::database_with_source("Failed to insert documents", e))?;

        let mut ids = Vec::with_capacity(texts.len());
        for i in 0..texts.len() {
            if let Some(id) = result.inserted_ids.get(&i) {
                ids.push(inserted_id_to_string(id));
            }
        }
        Ok(ids)
    }

    /// Create the native HNSW vector index with default build parameters.
    ///
    /// `dimensions` must match the embedding provider. The backend builds
    /// the index asynchronously; insert a delay before searching.
    pub async fn create_index(&self, dimensions: usize) -> Result<()> {
        self.create_index_with_options(dimensions, &HnswIndexOptions::default())
            .await
    }

    /// Create the native HNSW vector index with explicit build parameters
    pub async fn create_index_with_options(
        &self,
        dimensions: usize,
        options: &HnswIndexOptions,
    ) -> Result<()> {
        let command = build_create_index_command(
            self.collection.name(),
            &self.index_name,
            &self.embedding_key,
            dimensions,
            self.similarity,
            options,
        );
        tracing::debug!(
            index = %self.index_name,
            dimensions,
            similarity = %self.similarity,
            "creating vector index"
        );
        self.database
            .run_command(command)
            .await
            .map_err(|e| Error::database_with_source("Failed to create vector index", e))?;
        Ok(())
    }

    /// Whether the configured index exists on the collection
    pub async fn index_exists(&self) -> Result<bool> {
        let mut cursor = self
            .collection
            .list_indexes()
            .await
            .map_err(|e| Error::database_with_source("Failed to list indexes", e))?;
        while let Some(index) = cursor
            .try_next()
            .await
            .map_err(|e| Error::database_with_source("Failed to read index listing", e))?
        {
            let name = index.options.as_ref().and_then(|o| o.name.as_deref());
            if name == Some(self.index_name.as_str()) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Drop the configured index if present
    pub async fn delete_index(&self) -> Result<()> {
        if self.index_exists().await? {
            tracing::debug!(index = %self.index_name, "dropping vector index");
            self.collection
                .drop_index(&self.index_name)
                .await
                .map_err(|e| Error::database_with_source("Failed to drop vector index", e))?;
        }
        Ok(())
    }

    /// Embed the query and search with an explicit `efSearch` breadth
    pub async fn similarity_search_with_ef(
        &self,
        query: &str,
        k: usize,
        ef_search: u32,
    ) -> Result<Vec<Document>> {
        let embedding = self.embedding.embed_query(query).await?;
        self.similarity_search_by_vector_with_ef(&embedding.vector, k, ef_search)
            .await
    }

    /// Search with an already-computed vector and explicit `efSearch`
    pub async fn similarity_search_by_vector_with_ef(
        &self,
        vector: &[f32],
        k: usize,
        ef_search: u32,
    ) -> Result<Vec<Document>> {
        let pipeline =
            build_search_pipeline(&self.embedding_key, vector, self.similarity, k, ef_search);
        tracing::debug!(
            k,
            ef_search,
            similarity = %self.similarity,
            collection = self.collection.name(),
            "running vector search"
        );
        let mut cursor = self
            .collection
            .aggregate(pipeline)
            .await
            .map_err(|e| Error::database_with_source("Vector search aggregation failed", e))?;

        let mut documents = Vec::new();
        while let Some(raw) = cursor
            .try_next()
            .await
            .map_err(|e| Error::database_with_source("Failed to read search results", e))?
        {
            documents.push(map_result_document(raw, &self.text_key));
        }
        Ok(documents)
    }

    /// Delete one document by its backend-assigned identifier.
    ///
    /// Fails with a validation error when `document_id` is empty.
    pub async fn delete_document_by_id(&self, document_id: &str) -> Result<()> {
        if document_id.is_empty() {
            return Err(Error::invalid_argument(NO_DOCUMENT_ID_MESSAGE));
        }
        let object_id = ObjectId::parse_str(document_id).map_err(|e| {
            Error::invalid_argument(format!("Invalid document id '{document_id}': {e}"))
        })?;
        self.collection
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(|e| Error::database_with_source("Failed to delete document", e))?;
        Ok(())
    }
}

#[async_trait]
impl VectorStore for DocumentDbVectorSearch {
    async fn add_texts(
        &self,
        texts: &[String],
        metadatas: Option<&[HashMap<String, Value>]>,
    ) -> Result<Vec<String>> {
        DocumentDbVectorSearch::add_texts(self, texts, metadatas).await
    }

    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<Document>> {
        self.similarity_search_with_ef(query, k, DEFAULT_EF_SEARCH)
            .await
    }

    async fn similarity_search_by_vector(
        &self,
        vector: &[f32],
        k: usize,
    ) -> Result<Vec<Document>> {
        self.similarity_search_by_vector_with_ef(vector, k, DEFAULT_EF_SEARCH)
            .await
    }

    async fn delete(&self, ids: &[String]) -> Result<bool> {
        if ids.is_empty() {
            return Err(Error::invalid_argument(NO_DOCUMENT_IDS_MESSAGE));
        }
        for id in ids {
            self.delete_document_by_id(id).await?;
        }
        Ok(true)
    }

    fn provider_name(&self) -> &str {
        "documentdb"
    }
}

/// Split a `"database.collection"` namespace
fn parse_namespace(namespace: &str) -> Result<(String, String)> {
    match namespace.split_once('.') {
        Some((database, collection)) if !database.is_empty() && !collection.is_empty() => {
            Ok((database.to_string(), collection.to_string()))
        }
        _ => Err(Error::invalid_argument(format!(
            "Expected a namespace of the form 'database.collection', got '{namespace}'"
        ))),
    }
}

fn vector_to_bson(vector: &[f32]) -> Bson {
    Bson::Array(
        vector
            .iter()
            .map(|value| Bson::Double(f64::from(*value)))
            .collect(),
    )
}

fn inserted_id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Native `createIndexes` command for an HNSW vector index
fn build_create_index_command(
    collection_name: &str,
    index_name: &str,
    embedding_key: &str,
    dimensions: usize,
    similarity: DocumentDbSimilarity,
    options: &HnswIndexOptions,
) -> BsonDocument {
    let mut key_spec = BsonDocument::new();
    key_spec.insert(embedding_key, "vector");
    doc! {
        "createIndexes": collection_name,
        "indexes": [
            {
                "name": index_name,
                "key": key_spec,
                "vectorOptions": {
                    "type": "hnsw",
                    "similarity": similarity.as_str(),
                    "dimensions": dimensions as i64,
                    "m": i64::from(options.m),
                    "efConstruction": i64::from(options.ef_construction),
                },
            }
        ],
    }
}

/// `$search` aggregation pipeline for a vector query
fn build_search_pipeline(
    embedding_key: &str,
    vector: &[f32],
    similarity: DocumentDbSimilarity,
    k: usize,
    ef_search: u32,
) -> Vec<BsonDocument> {
    vec![doc! {
        "$search": {
            "vectorSearch": {
                "vector": vector_to_bson(vector),
                "path": embedding_key,
                "similarity": similarity.as_str(),
                "k": k as i64,
                "efSearch": i64::from(ef_search),
            }
        }
    }]
}

/// Map one raw search result into the framework document model.
///
/// The text field becomes `page_content`; every remaining field, the
/// backend-assigned `_id` included, lands in metadata.
fn map_result_document(mut raw: BsonDocument, text_key: &str) -> Document {
    let page_content = match raw.remove(text_key) {
        Some(Bson::String(text)) => text,
        Some(other) => other.to_string(),
        None => String::new(),
    };
    let mut metadata = HashMap::with_capacity(raw.len());
    for (key, value) in raw {
        metadata.insert(key, bson_to_json(value));
    }
    Document {
        page_content,
        metadata,
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use docflow_core::registry::{VECTOR_STORES, VectorStoreConfig, VectorStoreEntry};
use futures::future::BoxFuture;

fn documentdb_factory<'a>(
    config: &'a VectorStoreConfig,
    embedding: Arc<dyn EmbeddingProvider>,
) -> BoxFuture<'a, std::result::Result<Arc<dyn VectorStore>, String>> {
    Box::pin(async move {
        let connection_string = config
            .connection_string
            .as_deref()
            .ok_or_else(|| "DocumentDB requires connection_string".to_string())?;
        let namespace = config
            .namespace
            .as_deref()
            .ok_or_else(|| "DocumentDB requires namespace".to_string())?;

        let mut store =
            DocumentDbVectorSearch::from_connection_string(connection_string, namespace, embedding)
                .await
                .map_err(|e| format!("Failed to create DocumentDB store: {e}"))?;
        if let Some(index_name) = &config.index_name {
            store = store.with_index_name(index_name);
        }
        if let Some(similarity) = &config.similarity {
            store = store.with_similarity(similarity.parse().map_err(|e: Error| e.to_string())?);
        }
        Ok(Arc::new(store) as Arc<dyn VectorStore>)
    })
}

#[linkme::distributed_slice(VECTOR_STORES)]
static DOCUMENTDB_STORE: VectorStoreEntry = VectorStoreEntry {
    name: "documentdb",
    description: "Amazon DocumentDB vector search (HNSW over the MongoDB wire protocol)",
    factory: documentdb_factory,
};
