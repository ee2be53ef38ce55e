//! In-memory vector store
//!
//! Non-persistent store for development and testing. Data is lost when the
//! process exits. Scoring is cosine similarity computed locally; ids are
//! generated uuids surfaced under the `"_id"` metadata key like every
//! other store.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

use docflow_core::error::{Error, Result};
use docflow_core::ports::{EmbeddingProvider, VectorStore};
use docflow_core::value_objects::Document;

use crate::constants::NO_DOCUMENT_IDS_MESSAGE;

struct StoredEntry {
    vector: Vec<f32>,
    text: String,
    metadata: HashMap<String, Value>,
}

/// In-memory vector store backed by a concurrent hash map
pub struct InMemoryVectorStore {
    embedding: Arc<dyn EmbeddingProvider>,
    entries: DashMap<String, StoredEntry>,
}

impl InMemoryVectorStore {
    /// Create an empty store over the given embedding provider
    pub fn new(embedding: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedding,
            entries: DashMap::new(),
        }
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no documents
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn top_k(&self, query_vector: &[f32], k: usize) -> Vec<(Document, f64)> {
        let query_norm = compute_norm(query_vector);

        // Min-heap top-k: O(n log k) over the full scan
        let mut heap: BinaryHeap<ScoredId> = BinaryHeap::with_capacity(k + 1);
        for entry in self.entries.iter() {
            let score = cosine_similarity_with_norm(query_vector, &entry.vector, query_norm);
            if heap.len() < k {
                heap.push(ScoredId {
                    score,
                    id: entry.key().clone(),
                });
            } else if let Some(minimum) = heap.peek() {
                if score > minimum.score {
                    heap.pop();
                    heap.push(ScoredId {
                        score,
                        id: entry.key().clone(),
                    });
                }
            }
        }

        let mut items: Vec<ScoredId> = heap.into_iter().collect();
        items.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        items
            .into_iter()
            .filter_map(|item| {
                self.entries.get(&item.id).map(|entry| {
                    let mut metadata = entry.metadata.clone();
                    metadata.insert("_id".to_string(), Value::String(item.id.clone()));
                    (
                        Document {
                            page_content: entry.text.clone(),
                            metadata,
                        },
                        f64::from(item.score),
                    )
                })
            })
            .collect()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add_texts(
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
        let mut ids = Vec::with_capacity(texts.len());
        for (i, (text, embedding)) in texts.iter().zip(embeddings).enumerate() {
            let id = Uuid::new_v4().to_string();
            let metadata = metadatas.map(|m| m[i].clone()).unwrap_or_default();
            self.entries.insert(
                id.clone(),
                StoredEntry {
                    vector: embedding.vector,
                    text: text.clone(),
                    metadata,
                },
            );
            ids.push(id);
        }
        Ok(ids)
    }

    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<Document>> {
        let embedding = self.embedding.embed_query(query).await?;
        self.similarity_search_by_vector(&embedding.vector, k).await
    }

    async fn similarity_search_by_vector(
        &self,
        vector: &[f32],
        k: usize,
    ) -> Result<Vec<Document>> {
        Ok(self
            .top_k(vector, k)
            .into_iter()
            .map(|(document, _score)| document)
            .collect())
    }

    async fn similarity_search_with_score(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<(Document, f64)>> {
        let embedding = self.embedding.embed_query(query).await?;
        Ok(self.top_k(&embedding.vector, k))
    }

    async fn delete(&self, ids: &[String]) -> Result<bool> {
        if ids.is_empty() {
            return Err(Error::invalid_argument(NO_DOCUMENT_IDS_MESSAGE));
        }
        for id in ids {
            self.entries.remove(id);
        }
        Ok(true)
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

/// Scored id for heap-based top-k selection.
///
/// Ordering is reversed so `BinaryHeap` acts as a min-heap.
struct ScoredId {
    score: f32,
    id: String,
}

impl PartialEq for ScoredId {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score
    }
}

impl Eq for ScoredId {}

impl Ord for ScoredId {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for ScoredId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn compute_norm(vector: &[f32]) -> f32 {
    vector.iter().map(|x| x * x).sum::<f32>().sqrt()
}

fn cosine_similarity_with_norm(a: &[f32], b: &[f32], norm_a: f32) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use docflow_core::registry::{VECTOR_STORES, VectorStoreConfig, VectorStoreEntry};
use futures::future::BoxFuture;

fn memory_factory<'a>(
    _config: &'a VectorStoreConfig,
    embedding: Arc<dyn EmbeddingProvider>,
) -> BoxFuture<'a, std::result::Result<Arc<dyn VectorStore>, String>> {
    Box::pin(async move { Ok(Arc::new(InMemoryVectorStore::new(embedding)) as Arc<dyn VectorStore>) })
}

#[linkme::distributed_slice(VECTOR_STORES)]
static MEMORY_STORE: VectorStoreEntry = VectorStoreEntry {
    name: "memory",
    description: "In-memory vector store (fast, non-persistent)",
    factory: memory_factory,
};
