//! Configuration types for Waymark

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Storage backend selection
    pub backend: BackendConfig,

    /// Logging level
    pub log_level: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

/// Storage backend selection, fixed at construction time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    /// Embedded database on the local disk
    Local {
        /// Database directory
        data_dir: PathBuf,
    },

    /// REST API server
    Remote {
        /// Base URL, e.g. http://localhost:8000
        base_url: String,
    },
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::Local {
            data_dir: PathBuf::from("./data"),
        }
    }
}
