//! Waymark core types
//!
//! Shared data model, errors, configuration, and the storage contract
//! consumed by the state crate and the CLI.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::*;
pub use traits::*;
pub use types::*;
