//! Amazon Kendra retriever
//!
//! Implements the `Retriever` port over Kendra's `Retrieve` API, which
//! returns semantically relevant passages rather than whole documents.
//! Kendra reports relevance as a confidence bucket, not a numeric score;
//! the bucket is surfaced in document metadata.

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_kendra::Client;
use aws_sdk_kendra::types::RetrieveResultItem;
use serde_json::Value;

use docflow_core::error::{Error, Result};
use docflow_core::ports::Retriever;
use docflow_core::value_objects::{Document, RelevantDocument};

/// Amazon Kendra retriever
///
/// ## Example
///
/// ```ignore
/// use docflow_aws::retriever::KendraRetriever;
///
/// let retriever = KendraRetriever::from_env(index_id).await?;
/// let passages = retriever.retrieve("how do I rotate credentials?", 3).await?;
/// ```
pub struct KendraRetriever {
    client: Client,
    index_id: String,
}

impl KendraRetriever {
    /// Create a retriever over an existing Kendra client.
    ///
    /// Fails with a validation error when `index_id` is empty.
    pub fn new(client: Client, index_id: impl Into<String>) -> Result<Self> {
        let index_id = index_id.into();
        if index_id.is_empty() {
            return Err(Error::invalid_argument("A Kendra index id is required."));
        }
        Ok(Self { client, index_id })
    }

    /// Create a retriever from the default AWS credential chain
    pub async fn from_env(index_id: impl Into<String>) -> Result<Self> {
        Self::from_env_with_region(index_id, None).await
    }

    /// Create a retriever from the default credential chain with a region override
    pub async fn from_env_with_region(
        index_id: impl Into<String>,
        region: Option<String>,
    ) -> Result<Self> {
        let mut loader = aws_config::from_env();
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        let config = loader.load().await;
        Self::new(Client::new(&config), index_id)
    }

    /// The targeted index id
    pub fn index_id(&self) -> &str {
        &self.index_id
    }
}

#[async_trait]
impl Retriever for KendraRetriever {
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<RelevantDocument>> {
        let output = self
            .client
            .retrieve()
            .index_id(&self.index_id)
            .query_text(query)
            .page_size(top_k as i32)
            .send()
            .await
            .map_err(|e| Error::retriever(format!("Kendra retrieve failed: {e}")))?;

        Ok(output
            .result_items()
            .iter()
            .take(top_k)
            .map(passage_to_document)
            .collect())
    }

    fn retriever_name(&self) -> &str {
        "kendra"
    }
}

fn passage_to_document(item: &RetrieveResultItem) -> RelevantDocument {
    let mut document = Document::new(item.content().unwrap_or_default());
    if let Some(result_id) = item.id() {
        document
            .metadata
            .insert("result_id".to_string(), Value::String(result_id.to_string()));
    }
    if let Some(document_id) = item.document_id() {
        document.metadata.insert(
            "document_id".to_string(),
            Value::String(document_id.to_string()),
        );
    }
    if let Some(title) = item.document_title() {
        document
            .metadata
            .insert("title".to_string(), Value::String(title.to_string()));
    }
    if let Some(uri) = item.document_uri() {
        document
            .metadata
            .insert("source".to_string(), Value::String(uri.to_string()));
    }
    if let Some(confidence) = item
        .score_attributes()
        .and_then(|attributes| attributes.score_confidence())
    {
        document.metadata.insert(
            "score_confidence".to_string(),
            Value::String(confidence.as_str().to_string()),
        );
    }
    RelevantDocument::unscored(document)
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use docflow_core::registry::{RETRIEVERS, RetrieverConfig, RetrieverEntry};
use futures::future::BoxFuture;

fn kendra_factory(
    config: &RetrieverConfig,
) -> BoxFuture<'_, std::result::Result<Arc<dyn Retriever>, String>> {
    Box::pin(async move {
        let index_id = config
            .index_id
            .clone()
            .ok_or_else(|| "Kendra requires index_id".to_string())?;
        let retriever = KendraRetriever::from_env_with_region(index_id, config.region.clone())
            .await
            .map_err(|e| format!("Failed to create Kendra retriever: {e}"))?;
        Ok(Arc::new(retriever) as Arc<dyn Retriever>)
    })
}

#[linkme::distributed_slice(RETRIEVERS)]
static KENDRA_RETRIEVER: RetrieverEntry = RetrieverEntry {
    name: "kendra",
    description: "Amazon Kendra passage retrieval",
    factory: kendra_factory,
};
