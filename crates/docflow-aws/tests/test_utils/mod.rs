//! Shared fixtures for the docflow-aws test suites

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use docflow_core::error::Result;
use docflow_core::ports::EmbeddingProvider;
use docflow_core::value_objects::Embedding;

/// Embedding provider with a fixed text → vector vocabulary.
///
/// Unknown texts embed to the zero vector, so tests stay fully
/// deterministic and control similarity ordering exactly.
pub struct FixedEmbedder {
    vocabulary: HashMap<String, Vec<f32>>,
    dimensions: usize,
}

impl FixedEmbedder {
    pub fn new(entries: Vec<(&str, Vec<f32>)>, dimensions: usize) -> Self {
        let vocabulary = entries
            .into_iter()
            .map(|(text, vector)| (text.to_string(), vector))
            .collect();
        Self {
            vocabulary,
            dimensions,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for FixedEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        Ok(texts
            .iter()
            .map(|text| {
                let vector = self
                    .vocabulary
                    .get(text)
                    .cloned()
                    .unwrap_or_else(|| vec![0.0; self.dimensions]);
                Embedding {
                    vector,
                    model: "fixed".to_string(),
                    dimensions: self.dimensions,
                }
            })
            .collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn provider_name(&self) -> &str {
        "fixed"
    }
}

/// The four sample texts used across the store tests
pub fn sample_texts() -> Vec<String> {
    vec![
        "Dogs are tough.".to_string(),
        "Cats have fluff.".to_string(),
        "What is a sandwich?".to_string(),
        "The fence is purple.".to_string(),
    ]
}

/// Metadata rows matching [`sample_texts`]
pub fn sample_metadatas() -> Vec<HashMap<String, serde_json::Value>> {
    let rows = [
        serde_json::json!({"a": 1}),
        serde_json::json!({"b": 1}),
        serde_json::json!({"c": 1}),
        serde_json::json!({"d": 1, "e": 2}),
    ];
    rows.iter()
        .map(|row| {
            row.as_object()
                .unwrap()
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .collect()
}

/// One-hot embedder over the sample texts.
///
/// The "Sandwich" query vector leans heavily toward the sandwich text so
/// it ranks first under cosine, dot product and euclidean alike.
pub fn sample_embedder() -> Arc<FixedEmbedder> {
    Arc::new(FixedEmbedder::new(
        vec![
            ("Dogs are tough.", vec![1.0, 0.0, 0.0, 0.0]),
            ("Cats have fluff.", vec![0.0, 1.0, 0.0, 0.0]),
            ("What is a sandwich?", vec![0.0, 0.0, 1.0, 0.0]),
            ("The fence is purple.", vec![0.0, 0.0, 0.0, 1.0]),
            ("Sandwich", vec![0.05, 0.05, 0.9, 0.05]),
        ],
        4,
    ))
}

/// Dimensionality of [`sample_embedder`] vectors
pub const SAMPLE_DIMENSIONS: usize = 4;
