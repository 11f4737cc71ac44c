//! In-memory city storage for tests and ephemeral sessions

use async_trait::async_trait;
use parking_lot::RwLock;
use waymark_core::{City, CityId, CityStorage, WaymarkError, WaymarkResult};

/// In-memory twin of the local backend
///
/// Holds the same JSON-encoded slot the sled backend keeps on disk, so
/// parse behavior matches the durable medium exactly.
pub struct MemoryCityStorage {
    slot: RwLock<Option<Vec<u8>>>,
}

impl MemoryCityStorage {
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Pre-seed the slot with a city list
    pub fn with_cities(cities: Vec<City>) -> Self {
        let storage = Self::new();
        *storage.slot.write() = Some(serde_json::to_vec(&cities).unwrap_or_default());
        storage
    }

    /// Raw slot bytes, for tests asserting the durable image
    pub fn raw(&self) -> Option<Vec<u8>> {
        self.slot.read().clone()
    }

    fn decode(bytes: &[u8]) -> WaymarkResult<Vec<City>> {
        serde_json::from_slice(bytes).map_err(|e| WaymarkError::Serialization(e.to_string()))
    }

    fn encode(cities: &[City]) -> WaymarkResult<Vec<u8>> {
        serde_json::to_vec(cities).map_err(|e| WaymarkError::Serialization(e.to_string()))
    }
}

impl Default for MemoryCityStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CityStorage for MemoryCityStorage {
    async fn load(&self) -> WaymarkResult<Option<Vec<City>>> {
        match self.slot.read().as_deref() {
            Some(bytes) => Ok(Some(Self::decode(bytes)?)),
            None => Ok(None),
        }
    }

    async fn load_city(&self, id: &CityId) -> WaymarkResult<Option<City>> {
        let cities = self
            .load()
            .await?
            .ok_or_else(|| WaymarkError::Storage("no persisted city list".to_string()))?;
        Ok(cities.into_iter().find(|city| &city.id == id))
    }

    async fn commit_create(&self, _city: &City, cities: &[City]) -> WaymarkResult<()> {
        *self.slot.write() = Some(Self::encode(cities)?);
        Ok(())
    }

    async fn commit_delete(&self, _id: &CityId, cities: &[City]) -> WaymarkResult<()> {
        *self.slot.write() = Some(Self::encode(cities)?);
        Ok(())
    }
}
