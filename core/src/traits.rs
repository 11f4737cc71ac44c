//! Backend contract for city persistence
//!
//! The durable medium is a single slot holding the JSON-encoded city
//! list. Implementations either own that slot directly or delegate to a
//! REST API that owns it server-side.

use crate::error::WaymarkError;
use crate::types::{City, CityId};
use async_trait::async_trait;

/// Result type for Waymark operations
pub type WaymarkResult<T> = Result<T, WaymarkError>;

/// Storage backend for the city list
///
/// `commit_create` and `commit_delete` receive the full post-mutation
/// list alongside the subject entity: slot-based backends replace the
/// slot with `cities` verbatim, with no re-read, while per-entity
/// backends ignore it and operate on the subject alone. Last write wins;
/// there are no transactions and no schema versioning.
#[async_trait]
pub trait CityStorage: Send + Sync {
    /// Read the full city list; `None` when the medium holds no slot yet
    async fn load(&self) -> WaymarkResult<Option<Vec<City>>>;

    /// Read a single city by id; `None` when the list has no match
    ///
    /// A missing slot is a storage error here, not a miss: the list must
    /// exist before a single entry can be looked up in it.
    async fn load_city(&self, id: &CityId) -> WaymarkResult<Option<City>>;

    /// Persist a newly created city
    async fn commit_create(&self, city: &City, cities: &[City]) -> WaymarkResult<()>;

    /// Persist a deletion
    async fn commit_delete(&self, id: &CityId, cities: &[City]) -> WaymarkResult<()>;
}
