//! Error types for Waymark

use thiserror::Error;

/// Main error type for Waymark
#[derive(Error, Debug)]
pub enum WaymarkError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<std::io::Error> for WaymarkError {
    fn from(err: std::io::Error) -> Self {
        WaymarkError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for WaymarkError {
    fn from(err: serde_json::Error) -> Self {
        WaymarkError::Serialization(err.to_string())
    }
}
