//! Amazon Bedrock embedding provider
//!
//! Implements the `EmbeddingProvider` port over Bedrock's `InvokeModel`
//! API. Supports the Titan text family (one request per text) and the
//! Cohere family (batched requests with document/query input types).
//!
//! Credentials come from the standard AWS SDK credential chain:
//! environment variables, web identity tokens, instance profiles, or the
//! shared credentials file.

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::primitives::Blob;
use serde_json::{Value, json};

use docflow_core::error::{Error, Result};
use docflow_core::ports::EmbeddingProvider;
use docflow_core::value_objects::Embedding;

use crate::constants::{
    DEFAULT_BEDROCK_EMBEDDING_MODEL, EMBEDDING_DIMENSION_COHERE, EMBEDDING_DIMENSION_TITAN_V1,
    EMBEDDING_DIMENSION_TITAN_V2,
};

/// Amazon Bedrock embedding provider
///
/// ## Example
///
/// ```ignore
/// use docflow_aws::embedding::BedrockEmbeddingProvider;
///
/// let provider = BedrockEmbeddingProvider::from_env("amazon.titan-embed-text-v1").await?;
/// let embedding = provider.embed_query("what is a sandwich?").await?;
/// assert_eq!(embedding.dimensions, 1536);
/// ```
pub struct BedrockEmbeddingProvider {
    client: Client,
    model_id: String,
    dimensions: usize,
    normalize: bool,
}

impl BedrockEmbeddingProvider {
    /// Create a provider over an existing Bedrock runtime client
    pub fn new(client: Client, model_id: impl Into<String>) -> Self {
        let model_id = model_id.into();
        let dimensions = default_dimensions_for_model(&model_id);
        Self {
            client,
            model_id,
            dimensions,
            normalize: false,
        }
    }

    /// Create a provider from the default AWS credential chain
    pub async fn from_env(model_id: impl Into<String>) -> Result<Self> {
        Self::from_env_with_region(model_id, None).await
    }

    /// Create a provider from the default credential chain with a region override
    pub async fn from_env_with_region(
        model_id: impl Into<String>,
        region: Option<String>,
    ) -> Result<Self> {
        let mut loader = aws_config::from_env();
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        let config = loader.load().await;
        Ok(Self::new(Client::new(&config), model_id))
    }

    /// Override the reported embedding dimensions
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// L2-normalize returned vectors
    pub fn with_normalization(mut self) -> Self {
        self.normalize = true;
        self
    }

    /// The targeted model identifier
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    fn is_cohere_model(&self) -> bool {
        self.model_id.starts_with("cohere.")
    }

    async fn invoke(&self, payload: &Value) -> Result<Value> {
        let body = serde_json::to_vec(payload)?;
        let output = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| {
                Error::embedding(format!("Bedrock invoke_model failed for {}: {e}", self.model_id))
            })?;

        serde_json::from_slice(output.body().as_ref())
            .map_err(|e| Error::embedding(format!("Bedrock response parse failed: {e}")))
    }

    async fn embed_with_cohere(&self, texts: &[String], input_type: &str) -> Result<Vec<Embedding>> {
        let payload = json!({
            "texts": texts,
            "input_type": input_type,
            "truncate": "END",
        });
        let response = self.invoke(&payload).await?;
        let mut vectors = parse_cohere_response(&response)?;
        if vectors.len() != texts.len() {
            return Err(Error::embedding(format!(
                "Response embedding count mismatch: expected {}, got {}",
                texts.len(),
                vectors.len()
            )));
        }
        if self.normalize {
            for vector in &mut vectors {
                l2_normalize(vector);
            }
        }
        Ok(vectors
            .into_iter()
            .map(|vector| self.to_embedding(vector))
            .collect())
    }

    async fn embed_with_titan(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            let response = self.invoke(&json!({ "inputText": text })).await?;
            let mut vector = parse_titan_response(&response)?;
            if self.normalize {
                l2_normalize(&mut vector);
            }
            embeddings.push(self.to_embedding(vector));
        }
        Ok(embeddings)
    }

    fn to_embedding(&self, vector: Vec<f32>) -> Embedding {
        Embedding {
            dimensions: vector.len(),
            vector,
            model: self.model_id.clone(),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for BedrockEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        if self.is_cohere_model() {
            self.embed_with_cohere(texts, "search_document").await
        } else {
            self.embed_with_titan(texts).await
        }
    }

    async fn embed_query(&self, text: &str) -> Result<Embedding> {
        let embeddings = if self.is_cohere_model() {
            self.embed_with_cohere(&[text.to_string()], "search_query")
                .await?
        } else {
            self.embed_with_titan(&[text.to_string()]).await?
        };
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| Error::embedding("No embedding returned"))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn provider_name(&self) -> &str {
        "bedrock"
    }
}

/// Default dimensionality of the known Bedrock embedding families
fn default_dimensions_for_model(model_id: &str) -> usize {
    if model_id.starts_with("amazon.titan-embed-text-v2") {
        EMBEDDING_DIMENSION_TITAN_V2
    } else if model_id.starts_with("cohere.") {
        EMBEDDING_DIMENSION_COHERE
    } else {
        EMBEDDING_DIMENSION_TITAN_V1
    }
}

/// Extract the vector from a Titan `{"embedding": [...]}` response
fn parse_titan_response(response: &Value) -> Result<Vec<f32>> {
    let values = response["embedding"]
        .as_array()
        .ok_or_else(|| Error::embedding("Invalid response format: missing embedding array"))?;
    Ok(values
        .iter()
        .map(|v| v.as_f64().unwrap_or(0.0) as f32)
        .collect())
}

/// Extract the vectors from a Cohere `{"embeddings": [[...]]}` response
fn parse_cohere_response(response: &Value) -> Result<Vec<Vec<f32>>> {
    let rows = response["embeddings"]
        .as_array()
        .ok_or_else(|| Error::embedding("Invalid response format: missing embeddings array"))?;
    rows.iter()
        .map(|row| {
            row.as_array()
                .map(|values| {
                    values
                        .iter()
                        .map(|v| v.as_f64().unwrap_or(0.0) as f32)
                        .collect()
                })
                .ok_or_else(|| Error::embedding("Invalid response format: embedding is not an array"))
        })
        .collect()
}

fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use docflow_core::registry::{EMBEDDING_PROVIDERS, EmbeddingConfig, EmbeddingProviderEntry};
use futures::future::BoxFuture;

fn bedrock_embedding_factory(
    config: &EmbeddingConfig,
) -> BoxFuture<'_, std::result::Result<Arc<dyn EmbeddingProvider>, String>> {
    Box::pin(async move {
        let model_id = config
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_BEDROCK_EMBEDDING_MODEL.to_string());
        let mut provider =
            BedrockEmbeddingProvider::from_env_with_region(model_id, config.region.clone())
                .await
                .map_err(|e| format!("Failed to create Bedrock embedding provider: {e}"))?;
        if let Some(dimensions) = config.dimensions {
            provider = provider.with_dimensions(dimensions);
        }
        if config.normalize {
            provider = provider.with_normalization();
        }
        Ok(Arc::new(provider) as Arc<dyn EmbeddingProvider>)
    })
}

#[linkme::distributed_slice(EMBEDDING_PROVIDERS)]
static BEDROCK_PROVIDER: EmbeddingProviderEntry = EmbeddingProviderEntry {
    name: "bedrock",
    description: "Amazon Bedrock embeddings (Titan and Cohere model families)",
    factory: bedrock_embedding_factory,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titan_response_parses_to_f32() {
        let response = json!({ "embedding": [0.25, -0.5, 1.0] });
        assert_eq!(parse_titan_response(&response).unwrap(), vec![0.25, -0.5, 1.0]);
    }

    #[test]
    fn titan_response_without_embedding_is_an_error() {
        assert!(parse_titan_response(&json!({ "message": "throttled" })).is_err());
    }

    #[test]
    fn cohere_response_parses_row_per_text() {
        let response = json!({ "embeddings": [[0.1, 0.2], [0.3, 0.4]] });
        let vectors = parse_cohere_response(&response).unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[1], vec![0.3, 0.4]);
    }

    #[test]
    fn normalization_produces_unit_vectors() {
        let mut vector = vec![3.0_f32, 4.0];
        l2_normalize(&mut vector);
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
        assert!((vector[0] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn zero_vectors_survive_normalization() {
        let mut vector = vec![0.0_f32, 0.0];
        l2_normalize(&mut vector);
        assert_eq!(vector, vec![0.0, 0.0]);
    }

    #[test]
    fn dimensions_follow_the_model_family() {
        assert_eq!(default_dimensions_for_model("amazon.titan-embed-text-v1"), 1536);
        assert_eq!(default_dimensions_for_model("amazon.titan-embed-text-v2:0"), 1024);
        assert_eq!(default_dimensions_for_model("cohere.embed-english-v3"), 1024);
    }
}
