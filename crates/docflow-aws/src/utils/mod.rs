//! Provider Utilities
//!
//! Shared conversion helpers used by the adapter implementations.

#[cfg(feature = "vectorstore-documentdb")]
mod bson;
#[cfg(any(feature = "graph-neptune", feature = "retriever-knowledge-bases"))]
mod smithy;

#[cfg(feature = "vectorstore-documentdb")]
pub use bson::{bson_to_json, json_to_bson};
#[cfg(any(feature = "graph-neptune", feature = "retriever-knowledge-bases"))]
pub use smithy::{json_to_smithy, smithy_to_json};
