//! Semantic Embedding Value Objects

use serde::{Deserialize, Serialize};

/// Value Object: Semantic Text Embedding
///
/// A vector embedding of text content that captures semantic meaning.
/// Similarity computation over embeddings is always delegated to the
/// backing store; this type only carries the vector and its provenance.
///
/// ## Example
///
/// ```rust
/// use docflow_core::value_objects::Embedding;
///
/// let embedding = Embedding::new(vec![0.1, 0.2, 0.3], "amazon.titan-embed-text-v1");
/// assert_eq!(embedding.dimensions, 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Embedding {
    /// The embedding vector values
    pub vector: Vec<f32>,
    /// Name of the model that generated this embedding
    pub model: String,
    /// Dimensionality of the embedding vector
    pub dimensions: usize,
}

impl Embedding {
    /// Create an embedding, deriving `dimensions` from the vector length
    pub fn new(vector: Vec<f32>, model: impl Into<String>) -> Self {
        let dimensions = vector.len();
        Self {
            vector,
            model: model.into(),
            dimensions,
        }
    }
}
