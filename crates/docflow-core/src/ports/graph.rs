use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Graph Store Interface
///
/// Contract for graph databases queried with openCypher. The schema is a
/// human-readable summary built from the backend's introspection surface,
/// cached by implementations until [`GraphStore::refresh_schema`] is called.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Run an openCypher query with optional named parameters
    async fn query(&self, query: &str, params: Option<Value>) -> Result<Value>;

    /// Schema summary of the graph, computed on first use and cached
    async fn get_schema(&self) -> Result<String>;

    /// Recompute the schema summary from the backend
    async fn refresh_schema(&self) -> Result<String>;
}
