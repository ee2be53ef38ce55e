//! Retriever implementations
//!
//! Implements the `Retriever` port for the managed retrieval services.
//!
//! | Retriever | Backend |
//! |-----------|---------|
//! | [`KendraRetriever`] | Amazon Kendra `Retrieve` API |
//! | [`KnowledgeBasesRetriever`] | Amazon Bedrock Knowledge Bases `Retrieve` API |

#[cfg(feature = "retriever-kendra")]
mod kendra;
#[cfg(feature = "retriever-knowledge-bases")]
mod knowledge_bases;

#[cfg(feature = "retriever-kendra")]
pub use kendra::KendraRetriever;
#[cfg(feature = "retriever-knowledge-bases")]
pub use knowledge_bases::KnowledgeBasesRetriever;
