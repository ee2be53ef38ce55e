//! Provider-specific constants

/// Default native vector index name on DocumentDB collections
pub const DEFAULT_INDEX_NAME: &str = "vectorSearchIndex";

/// Default field holding the document text
pub const DEFAULT_TEXT_KEY: &str = "textContent";

/// Default field holding the embedding vector
pub const DEFAULT_EMBEDDING_KEY: &str = "vectorContent";

/// Default number of results for similarity search
pub const DEFAULT_SEARCH_K: usize = 4;

/// Default HNSW search breadth (`efSearch`)
pub const DEFAULT_EF_SEARCH: u32 = 40;

/// Default HNSW graph connectivity (`m`)
pub const DEFAULT_HNSW_M: u32 = 16;

/// Default HNSW build breadth (`efConstruction`)
pub const DEFAULT_HNSW_EF_CONSTRUCTION: u32 = 64;

/// Validation message for a delete call without identifiers
pub const NO_DOCUMENT_IDS_MESSAGE: &str = "No document ids provided to delete.";

/// Validation message for a delete-by-id call without an identifier
pub const NO_DOCUMENT_ID_MESSAGE: &str = "No document id provided to delete.";

/// Default Bedrock embedding model
pub const DEFAULT_BEDROCK_EMBEDDING_MODEL: &str = "amazon.titan-embed-text-v1";

/// Embedding dimensions: Titan text v1
pub const EMBEDDING_DIMENSION_TITAN_V1: usize = 1536;

/// Embedding dimensions: Titan text v2
pub const EMBEDDING_DIMENSION_TITAN_V2: usize = 1024;

/// Embedding dimensions: Cohere english/multilingual
pub const EMBEDDING_DIMENSION_COHERE: usize = 1024;

/// Embedding dimensions: deterministic test provider
pub const EMBEDDING_DIMENSION_DETERMINISTIC: usize = 384;

/// Default result count for managed retrieval services
pub const DEFAULT_RETRIEVER_TOP_K: usize = 3;
