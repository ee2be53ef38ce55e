//! Value Objects
//!
//! Immutable value objects shared across the ports. Value objects are
//! defined by their attributes and can be compared for equality.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`Document`] | Unit of content with text and open metadata |
//! | [`Embedding`] | Vector representation of text |
//! | [`RelevantDocument`] | Retriever result with an optional relevance score |
//! | [`ChatMessage`] | One turn of a conversation |
//! | [`ChatResponse`] | Model reply with stop reason and token usage |

/// Chat conversation value objects
pub mod chat;
/// Document value objects
pub mod document;
/// Semantic embedding value objects
pub mod embedding;

pub use chat::{ChatMessage, ChatResponse, TokenUsage};
pub use document::{Document, RelevantDocument};
pub use embedding::Embedding;
