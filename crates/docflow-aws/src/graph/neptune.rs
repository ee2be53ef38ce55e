//! Amazon Neptune Database graph store
//!
//! Implements the `GraphStore` port over the Neptune data API. Queries
//! are openCypher; the schema summary is assembled from the property
//! graph summary endpoint and cached until refreshed.

use async_trait::async_trait;
use aws_sdk_neptunedata::Client;
use serde_json::Value;
use tokio::sync::RwLock;

use docflow_core::error::{Error, Result};
use docflow_core::ports::GraphStore;

use super::format_graph_schema;
use crate::utils::smithy_to_json;

/// Amazon Neptune Database graph store
///
/// ## Example
///
/// ```ignore
/// use docflow_aws::graph::NeptuneGraph;
/// use docflow_core::ports::GraphStore;
///
/// let graph = NeptuneGraph::from_env("https://my-cluster.cluster-xyz.us-east-1.neptune.amazonaws.com:8182").await?;
/// let rows = graph.query("MATCH (n) RETURN n LIMIT 5", None).await?;
/// ```
pub struct NeptuneGraph {
    client: Client,
    schema: RwLock<Option<String>>,
}

impl NeptuneGraph {
    /// Create a graph store over an existing Neptune data client
    pub fn new(client: Client) -> Self {
        Self {
            client,
            schema: RwLock::new(None),
        }
    }

    /// Create a graph store for the given cluster endpoint URL.
    ///
    /// Fails with a validation error when `endpoint_url` is empty.
    pub async fn from_env(endpoint_url: &str) -> Result<Self> {
        if endpoint_url.is_empty() {
            return Err(Error::invalid_argument(
                "A Neptune cluster endpoint URL is required.",
            ));
        }
        let shared_config = aws_config::from_env().load().await;
        let config = aws_sdk_neptunedata::config::Builder::from(&shared_config)
            .endpoint_url(endpoint_url)
            .build();
        Ok(Self::new(Client::from_conf(config)))
    }
}

#[async_trait]
impl GraphStore for NeptuneGraph {
    async fn query(&self, query: &str, params: Option<Value>) -> Result<Value> {
        let mut request = self.client.execute_open_cypher_query().open_cypher_query(query);
        if let Some(params) = params {
            request = request.parameters(serde_json::to_string(&params)?);
        }

        tracing::debug!(query, "running openCypher query");
        let output = request
            .send()
            .await
            .map_err(|e| Error::graph(format!("openCypher query failed: {e}")))?;

        Ok(smithy_to_json(output.results()))
    }

    async fn get_schema(&self) -> Result<String> {
        if let Some(schema) = self.schema.read().await.clone() {
            return Ok(schema);
        }
        self.refresh_schema().await
    }

    async fn refresh_schema(&self) -> Result<String> {
        let output = self
            .client
            .get_propertygraph_summary()
            .send()
            .await
            .map_err(|e| Error::graph(format!("Failed to read graph summary: {e}")))?;

        let schema = match output.payload().and_then(|payload| payload.graph_summary()) {
            Some(summary) => format_graph_schema(
                summary.node_labels(),
                summary.edge_labels(),
                summary.num_nodes(),
                summary.num_edges(),
            ),
            None => String::from("Graph summary unavailable\n"),
        };

        *self.schema.write().await = Some(schema.clone());
        Ok(schema)
    }
}
