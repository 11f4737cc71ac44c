//! Core types for Waymark
//!
//! Defines the city record and identifier used across the system.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque city identifier
///
/// Generated ids concatenate a pseudo-random integer below one million
/// with the last six digits of the current Unix time in milliseconds.
/// Collision-improbable for casual use rather than globally unique.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityId(pub String);

impl CityId {
    pub fn new(id: impl Into<String>) -> Self {
        CityId(id.into())
    }

    /// Generate a fresh identifier
    pub fn generate() -> Self {
        let random_part = rand::thread_rng().gen_range(0..1_000_000u32);
        let millis = Utc::now().timestamp_millis().to_string();
        let suffix = &millis[millis.len().saturating_sub(6)..];
        CityId(format!("{}{}", random_part, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CityId({})", self.0)
    }
}

impl From<&str> for CityId {
    fn from(id: &str) -> Self {
        CityId(id.to_string())
    }
}

/// A persisted travel entry
///
/// Carries its identifier plus whatever fields the caller supplied at
/// creation time. The store attaches the id and constrains nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl City {
    /// Attach a generated id to a draft
    pub fn from_draft(draft: CityDraft, id: CityId) -> Self {
        Self {
            id,
            fields: draft.fields,
        }
    }

    /// Look up a caller-supplied field
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Display name, when the caller supplied one
    pub fn name(&self) -> Option<&str> {
        self.field("name").and_then(Value::as_str)
    }
}

/// Caller-supplied record for creation; carries no identifier yet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CityDraft {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CityDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}
