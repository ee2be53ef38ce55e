//! Amazon Bedrock Knowledge Bases retriever
//!
//! Implements the `Retriever` port over the Knowledge Bases `Retrieve`
//! API. Chunking, embedding and vector search happen inside the managed
//! service; this adapter maps results back into the document model with
//! score and source-location metadata.

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_bedrockagentruntime::Client;
use aws_sdk_bedrockagentruntime::types::{
    KnowledgeBaseQuery, KnowledgeBaseRetrievalConfiguration, KnowledgeBaseRetrievalResult,
    KnowledgeBaseVectorSearchConfiguration,
};
use serde_json::Value;

use docflow_core::error::{Error, Result};
use docflow_core::ports::Retriever;
use docflow_core::value_objects::{Document, RelevantDocument};

use crate::utils::smithy_to_json;

/// Amazon Bedrock Knowledge Bases retriever
///
/// ## Example
///
/// ```ignore
/// use docflow_aws::retriever::KnowledgeBasesRetriever;
///
/// let retriever = KnowledgeBasesRetriever::from_env(knowledge_base_id).await?;
/// let chunks = retriever.retrieve("how do I rotate credentials?", 4).await?;
/// ```
pub struct KnowledgeBasesRetriever {
    client: Client,
    knowledge_base_id: String,
}

impl KnowledgeBasesRetriever {
    /// Create a retriever over an existing Bedrock agent runtime client.
    ///
    /// Fails with a validation error when `knowledge_base_id` is empty.
    pub fn new(client: Client, knowledge_base_id: impl Into<String>) -> Result<Self> {
        let knowledge_base_id = knowledge_base_id.into();
        if knowledge_base_id.is_empty() {
            return Err(Error::invalid_argument(
                "A knowledge base id is required.",
            ));
        }
        Ok(Self {
            client,
            knowledge_base_id,
        })
    }

    /// Create a retriever from the default AWS credential chain
    pub async fn from_env(knowledge_base_id: impl Into<String>) -> Result<Self> {
        Self::from_env_with_region(knowledge_base_id, None).await
    }

    /// Create a retriever from the default credential chain with a region override
    pub async fn from_env_with_region(
        knowledge_base_id: impl Into<String>,
        region: Option<String>,
    ) -> Result<Self> {
        let mut loader = aws_config::from_env();
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        let config = loader.load().await;
        Self::new(Client::new(&config), knowledge_base_id)
    }

    /// The targeted knowledge base id
    pub fn knowledge_base_id(&self) -> &str {
        &self.knowledge_base_id
    }
}

#[async_trait]
impl Retriever for KnowledgeBasesRetriever {
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<RelevantDocument>> {
        let retrieval_query = KnowledgeBaseQuery::builder()
            .text(query)
            .build();
        let configuration = KnowledgeBaseRetrievalConfiguration::builder()
            .vector_search_configuration(
                KnowledgeBaseVectorSearchConfiguration::builder()
                    .number_of_results(top_k as i32)
                    .build(),
            )
            .build();

        let output = self
            .client
            .retrieve()
            .knowledge_base_id(&self.knowledge_base_id)
            .retrieval_query(retrieval_query)
            .retrieval_configuration(configuration)
            .send()
            .await
            .map_err(|e| Error::retriever(format!("Knowledge base retrieve failed: {e}")))?;

        Ok(output
            .retrieval_results()
            .iter()
            .map(chunk_to_document)
            .collect())
    }

    fn retriever_name(&self) -> &str {
        "knowledge_bases"
    }
}

fn chunk_to_document(result: &KnowledgeBaseRetrievalResult) -> RelevantDocument {
    let text = result
        .content()
        .map(|content| content.text())
        .unwrap_or_default();
    let mut document = Document::new(text);

    if let Some(uri) = result
        .location()
        .and_then(|location| location.s3_location())
        .and_then(|s3| s3.uri())
    {
        document
            .metadata
            .insert("source".to_string(), Value::String(uri.to_string()));
    }
    if let Some(metadata) = result.metadata() {
        for (key, value) in metadata {
            document.metadata.insert(key.clone(), smithy_to_json(value));
        }
    }

    match result.score() {
        Some(score) => RelevantDocument::scored(document, score),
        None => RelevantDocument::unscored(document),
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use docflow_core::registry::{RETRIEVERS, RetrieverConfig, RetrieverEntry};
use futures::future::BoxFuture;

fn knowledge_bases_factory(
    config: &RetrieverConfig,
) -> BoxFuture<'_, std::result::Result<Arc<dyn Retriever>, String>> {
    Box::pin(async move {
        let knowledge_base_id = config
            .knowledge_base_id
            .clone()
            .ok_or_else(|| "Knowledge Bases requires knowledge_base_id".to_string())?;
        let retriever =
            KnowledgeBasesRetriever::from_env_with_region(knowledge_base_id, config.region.clone())
                .await
                .map_err(|e| format!("Failed to create Knowledge Bases retriever: {e}"))?;
        Ok(Arc::new(retriever) as Arc<dyn Retriever>)
    })
}

#[linkme::distributed_slice(RETRIEVERS)]
static KNOWLEDGE_BASES_RETRIEVER: RetrieverEntry = RetrieverEntry {
    name: "knowledge_bases",
    description: "Amazon Bedrock Knowledge Bases retrieval",
    factory: knowledge_bases_factory,
};
