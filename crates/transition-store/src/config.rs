//! Store configuration
//!
//! Configuration is optional; `Store::new` uses [`StoreConfig::default`]. A config
//! can also be loaded from a TOML file, e.g.:
//!
//! ```toml
//! name = "todos"
//! log_transitions = false
//! max_dispatch_depth = 16
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Label used in log lines and errors
    #[serde(default = "default_name")]
    pub name: String,

    /// Log every reducer round and subscriber notification
    #[serde(default = "default_log_transitions")]
    pub log_transitions: bool,

    /// Maximum number of nested dispatches; unlimited when absent
    #[serde(default)]
    pub max_dispatch_depth: Option<usize>,
}

fn default_name() -> String {
    "store".to_string()
}

fn default_log_transitions() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_transitions: default_log_transitions(),
            max_dispatch_depth: None,
        }
    }
}

impl StoreConfig {
    /// Default config with a custom name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a TOML config file
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load config from `path`, or fall back to defaults if it is missing or invalid
    pub fn load(path: impl AsRef<Path>) -> Self {
        match Self::try_load(path) {
            Ok(config) => {
                log::info!("Loaded store config '{}' from file", config.name);
                config
            }
            Err(e) => {
                log::warn!("{}", e);
                log::debug!("Using default store config");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "transition-store-{}-{}.toml",
            name,
            std::process::id()
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.name, "store");
        assert!(config.log_transitions);
        assert_eq!(config.max_dispatch_depth, None);
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            name = "todos"
            log_transitions = false
            max_dispatch_depth = 8
        "#;
        let config = StoreConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.name, "todos");
        assert!(!config.log_transitions);
        assert_eq!(config.max_dispatch_depth, Some(8));
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config = StoreConfig::from_toml_str(r#"name = "session""#).unwrap();
        assert_eq!(config, StoreConfig::named("session"));
    }

    #[test]
    fn test_config_parse_error() {
        let err = StoreConfig::from_toml_str("log_transitions = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_config("load", "name = \"from-file\"\nmax_dispatch_depth = 4\n");
        let config = StoreConfig::load(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(config.name, "from-file");
        assert_eq!(config.max_dispatch_depth, Some(4));
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let missing = std::env::temp_dir().join("transition-store-does-not-exist.toml");
        assert!(matches!(
            StoreConfig::try_load(&missing),
            Err(ConfigError::Read { .. })
        ));
        assert_eq!(StoreConfig::load(&missing), StoreConfig::default());

        let path = temp_config("invalid", "name = [");
        let config = StoreConfig::load(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(config, StoreConfig::default());
    }
}
