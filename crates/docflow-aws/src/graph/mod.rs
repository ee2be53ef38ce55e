//! Graph store implementations
//!
//! Implements the `GraphStore` port for the Neptune family.
//!
//! | Store | Backend |
//! |-------|---------|
//! | [`NeptuneGraph`] | Amazon Neptune Database (openCypher over the data API) |
//! | [`NeptuneAnalyticsGraph`] | Amazon Neptune Analytics (openCypher over the graph API) |

#[cfg(feature = "graph-neptune")]
mod analytics;
#[cfg(feature = "graph-neptune")]
mod neptune;

#[cfg(feature = "graph-neptune")]
pub use analytics::NeptuneAnalyticsGraph;
#[cfg(feature = "graph-neptune")]
pub use neptune::NeptuneGraph;

/// Render the schema summary string shared by both Neptune backends
#[cfg(feature = "graph-neptune")]
pub(crate) fn format_graph_schema(
    node_labels: &[String],
    edge_labels: &[String],
    num_nodes: Option<i64>,
    num_edges: Option<i64>,
) -> String {
    let mut schema = String::new();
    schema.push_str(&format!("Node labels: {node_labels:?}\n"));
    schema.push_str(&format!("Edge labels: {edge_labels:?}\n"));
    if let Some(nodes) = num_nodes {
        schema.push_str(&format!("Node count: {nodes}\n"));
    }
    if let Some(edges) = num_edges {
        schema.push_str(&format!("Edge count: {edges}\n"));
    }
    schema
}
