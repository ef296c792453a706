//! Error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by `Store::dispatch`
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A reducer failed. Reducers before it in the same dispatch stay committed.
    #[error("{store}: reducer '{reducer}' (#{index}) failed: {source}")]
    Reducer {
        store: String,
        reducer: String,
        index: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// Nested dispatches went deeper than the configured limit
    #[error("{store}: dispatch depth {depth} exceeds limit of {limit}")]
    DepthExceeded {
        store: String,
        depth: usize,
        limit: usize,
    },
}

impl DispatchError {
    /// Index of the failing reducer, if a reducer failed
    pub fn reducer_index(&self) -> Option<usize> {
        match self {
            DispatchError::Reducer { index, .. } => Some(*index),
            DispatchError::DepthExceeded { .. } => None,
        }
    }
}

/// Errors raised while loading a [`StoreConfig`](crate::StoreConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
