//! Configuration loader
//!
//! Loads connector configuration from defaults, an optional TOML file and
//! environment variables, merged in that order (later sources override
//! earlier ones). Nested keys use a double underscore in the environment:
//! `DOCFLOW_VECTOR_STORE__CONNECTION_STRING` sets
//! `vector_store.connection_string`.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use docflow_core::error::{Error, Result};
use docflow_core::registry::{EmbeddingConfig, RetrieverConfig, VectorStoreConfig};

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "DOCFLOW";

/// Top-level connector configuration
///
/// Each section feeds the matching registry resolver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectorsConfig {
    /// Embedding provider section
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    /// Vector store section
    #[serde(default)]
    pub vector_store: VectorStoreConfig,
    /// Retriever section
    #[serde(default)]
    pub retriever: RetrieverConfig,
}

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    pub fn load(&self) -> Result<ConnectorsConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(ConnectorsConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                tracing::debug!(path = %config_path.display(), "merging configuration file");
                figment = figment.merge(Toml::file(config_path));
            } else {
                tracing::debug!(path = %config_path.display(), "configuration file not found");
            }
        }

        figment = figment.merge(Env::prefixed(&format!("{}_", self.env_prefix)).split("__"));

        let config: ConnectorsConfig = figment
            .extract()
            .map_err(|e| Error::config(format!("Failed to extract configuration: {e}")))?;

        self.validate(&config)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &ConnectorsConfig, path: P) -> Result<()> {
        let rendered = toml::to_string_pretty(config)
            .map_err(|e| Error::config(format!("Failed to serialize config to TOML: {e}")))?;
        std::fs::write(path.as_ref(), rendered)
            .map_err(|e| Error::config(format!("Failed to write config file: {e}")))?;
        Ok(())
    }

    /// Check cross-field requirements before handing the config out
    fn validate(&self, config: &ConnectorsConfig) -> Result<()> {
        if config.vector_store.provider == "documentdb" {
            if config
                .vector_store
                .connection_string
                .as_deref()
                .unwrap_or_default()
                .is_empty()
            {
                return Err(Error::config(
                    "The documentdb vector store requires vector_store.connection_string",
                ));
            }
            if config
                .vector_store
                .namespace
                .as_deref()
                .unwrap_or_default()
                .is_empty()
            {
                return Err(Error::config(
                    "The documentdb vector store requires vector_store.namespace",
                ));
            }
        }
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_load_without_any_sources() {
        let config = ConfigLoader::new().load().unwrap();
        assert!(config.embedding.provider.is_empty());
        assert!(config.vector_store.provider.is_empty());
    }

    #[test]
    fn toml_file_populates_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docflow.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"
[embedding]
provider = "deterministic"
dimensions = 8

[vector_store]
provider = "documentdb"
connection_string = "mongodb://localhost:27017"
namespace = "app.documents"
similarity = "cosine"
"#
        )
        .unwrap();

        let config = ConfigLoader::new().with_config_path(&path).load().unwrap();
        assert_eq!(config.embedding.provider, "deterministic");
        assert_eq!(config.embedding.dimensions, Some(8));
        assert_eq!(config.vector_store.provider, "documentdb");
        assert_eq!(config.vector_store.similarity.as_deref(), Some("cosine"));
    }

    #[test]
    fn documentdb_without_connection_string_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docflow.toml");
        std::fs::write(&path, "[vector_store]\nprovider = \"documentdb\"\n").unwrap();

        let err = ConfigLoader::new()
            .with_config_path(&path)
            .load()
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("connection_string"));
    }
}
