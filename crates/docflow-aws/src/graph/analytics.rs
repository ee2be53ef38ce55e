//! Amazon Neptune Analytics graph store
//!
//! Implements the `GraphStore` port over the Neptune Analytics graph API.
//! Queries are openCypher against a graph identifier; parameters travel
//! as typed documents rather than a JSON string.

use async_trait::async_trait;
use aws_sdk_neptunegraph::Client;
use aws_sdk_neptunegraph::types::QueryLanguage;
use serde_json::Value;
use tokio::sync::RwLock;

use docflow_core::error::{Error, Result};
use docflow_core::ports::GraphStore;

use super::format_graph_schema;
use crate::utils::json_to_smithy;

/// Amazon Neptune Analytics graph store
///
/// ## Example
///
/// ```ignore
/// use docflow_aws::graph::NeptuneAnalyticsGraph;
/// use docflow_core::ports::GraphStore;
///
/// let graph = NeptuneAnalyticsGraph::from_env("g-12a3bcdef4").await?;
/// let rows = graph.query("MATCH (n) RETURN count(n) AS total", None).await?;
/// ```
pub struct NeptuneAnalyticsGraph {
    client: Client,
    graph_identifier: String,
    schema: RwLock<Option<String>>,
}

impl NeptuneAnalyticsGraph {
    /// Create a graph store over an existing Neptune Analytics client.
    ///
    /// Fails with a validation error when `graph_identifier` is empty.
    pub fn new(client: Client, graph_identifier: impl Into<String>) -> Result<Self> {
        let graph_identifier = graph_identifier.into();
        if graph_identifier.is_empty() {
            return Err(Error::invalid_argument(
                "A Neptune Analytics graph identifier is required.",
            ));
        }
        Ok(Self {
            client,
            graph_identifier,
            schema: RwLock::new(None),
        })
    }

    /// Create a graph store from the default AWS credential chain
    pub async fn from_env(graph_identifier: impl Into<String>) -> Result<Self> {
        Self::from_env_with_region(graph_identifier, None).await
    }

    /// Create a graph store from the default credential chain with a region override
    pub async fn from_env_with_region(
        graph_identifier: impl Into<String>,
        region: Option<String>,
    ) -> Result<Self> {
        let mut loader = aws_config::from_env();
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        let config = loader.load().await;
        Self::new(Client::new(&config), graph_identifier)
    }

    /// The targeted graph identifier
    pub fn graph_identifier(&self) -> &str {
        &self.graph_identifier
    }
}

#[async_trait]
impl GraphStore for NeptuneAnalyticsGraph {
    async fn query(&self, query: &str, params: Option<Value>) -> Result<Value> {
        let mut request = self
            .client
            .execute_query()
            .graph_identifier(&self.graph_identifier)
            .query_string(query)
            .language(QueryLanguage::OpenCypher);

        match params {
            None => {}
            Some(Value::Object(entries)) => {
                for (key, value) in &entries {
                    request = request.parameters(key.clone(), json_to_smithy(value));
                }
            }
            Some(_) => {
                return Err(Error::invalid_argument(
                    "Query parameters must be a JSON object",
                ));
            }
        }

        tracing::debug!(query, graph = %self.graph_identifier, "running openCypher query");
        let output = request
            .send()
            .await
            .map_err(|e| Error::graph(format!("openCypher query failed: {e}")))?;

        let bytes = output
            .payload
            .collect()
            .await
            .map_err(|e| Error::graph(format!("Failed to read query payload: {e}")))?
            .into_bytes();
        let value: Value = serde_json::from_slice(&bytes)?;
        Ok(value.get("results").cloned().unwrap_or(value))
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
            .get_graph_summary()
            .graph_identifier(&self.graph_identifier)
            .send()
            .await
            .map_err(|e| Error::graph(format!("Failed to read graph summary: {e}")))?;

        let schema = match output.graph_summary() {
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
