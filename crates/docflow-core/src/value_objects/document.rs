//! Document Value Objects
//!
//! The unit of content that flows through vector stores and retrievers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Metadata key under which a store surfaces the backend-assigned identifier.
pub const ID_METADATA_KEY: &str = "_id";

/// Value Object: Document
///
/// A unit of content with page text and an open mapping of metadata
/// key/value pairs. Once persisted by a vector store, the backend-assigned
/// identifier is surfaced under the `"_id"` metadata key.
///
/// ## Example
///
/// ```rust
/// use docflow_core::value_objects::Document;
/// use serde_json::json;
///
/// let doc = Document::new("What is a sandwich?").with_metadata_entry("c", json!(1));
/// assert_eq!(doc.metadata["c"], json!(1));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Document {
    /// The text content of the document
    pub page_content: String,
    /// Open key/value metadata attached to the document
    pub metadata: HashMap<String, Value>,
}

impl Document {
    /// Create a document with empty metadata
    pub fn new(page_content: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
            metadata: HashMap::new(),
        }
    }

    /// Replace the metadata map
    pub fn with_metadata(mut self, metadata: HashMap<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Insert a single metadata entry
    pub fn with_metadata_entry(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Backend-assigned identifier, if the document has been persisted
    pub fn id(&self) -> Option<&str> {
        self.metadata.get(ID_METADATA_KEY).and_then(Value::as_str)
    }
}

/// Value Object: Retriever Result
///
/// A document paired with an optional relevance score. Retrieval services
/// that do not expose numeric scores return `None` and surface whatever
/// ranking signal they have (e.g. a confidence bucket) in document metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelevantDocument {
    /// The retrieved document
    pub document: Document,
    /// Relevance score, higher is better, when the backend exposes one
    pub score: Option<f64>,
}

impl RelevantDocument {
    /// Create a result without a score
    pub fn unscored(document: Document) -> Self {
        Self {
            document,
            score: None,
        }
    }

    /// Create a result with a score
    pub fn scored(document: Document, score: f64) -> Self {
        Self {
            document,
            score: Some(score),
        }
    }
}
