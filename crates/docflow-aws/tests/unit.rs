//! Unit test suite for docflow-aws
//!
//! Run with: `cargo test -p docflow-aws --test unit`

mod test_utils;

#[cfg(feature = "embedding-bedrock")]
#[path = "unit/bedrock_tests.rs"]
mod bedrock_tests;

#[cfg(feature = "vectorstore-documentdb")]
#[path = "unit/document_db_tests.rs"]
mod document_db_tests;

#[cfg(feature = "vectorstore-memory")]
#[path = "unit/memory_store_tests.rs"]
mod memory_store_tests;

#[path = "unit/registry_tests.rs"]
mod registry_tests;
