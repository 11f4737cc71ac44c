//! Persistent city storage using sled

use async_trait::async_trait;
use sled::{Db, Tree};
use std::path::Path;
use waymark_core::{City, CityId, CityStorage, WaymarkError, WaymarkResult};

const CITIES_TREE: &str = "cities";
const CITIES_KEY: &[u8] = b"cities";

/// City storage backed by a sled database
///
/// One tree, one fixed key, value = the JSON-encoded ordered city list.
/// Writes replace the full list and flush to disk.
pub struct LocalCityStorage {
    db: Db,
    cities: Tree,
}

impl LocalCityStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> WaymarkResult<Self> {
        let db = sled::open(path).map_err(|e| WaymarkError::Storage(e.to_string()))?;
        let cities = db
            .open_tree(CITIES_TREE)
            .map_err(|e| WaymarkError::Storage(e.to_string()))?;
        Ok(Self { db, cities })
    }

    fn read_slot(&self) -> WaymarkResult<Option<Vec<City>>> {
        let bytes = self
            .cities
            .get(CITIES_KEY)
            .map_err(|e| WaymarkError::Storage(e.to_string()))?;
        match bytes {
            Some(bytes) => {
                let cities = serde_json::from_slice(&bytes)
                    .map_err(|e| WaymarkError::Serialization(e.to_string()))?;
                Ok(Some(cities))
            }
            None => Ok(None),
        }
    }

    fn write_slot(&self, cities: &[City]) -> WaymarkResult<()> {
        let bytes = serde_json::to_vec(cities)
            .map_err(|e| WaymarkError::Serialization(e.to_string()))?;
        self.cities
            .insert(CITIES_KEY, bytes)
            .map_err(|e| WaymarkError::Storage(e.to_string()))?;
        self.db
            .flush()
            .map_err(|e| WaymarkError::Storage(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl CityStorage for LocalCityStorage {
    async fn load(&self) -> WaymarkResult<Option<Vec<City>>> {
        self.read_slot()
    }

    async fn load_city(&self, id: &CityId) -> WaymarkResult<Option<City>> {
        let cities = self
            .read_slot()?
            .ok_or_else(|| WaymarkError::Storage("no persisted city list".to_string()))?;
        Ok(cities.into_iter().find(|city| &city.id == id))
    }

    async fn commit_create(&self, _city: &City, cities: &[City]) -> WaymarkResult<()> {
        self.write_slot(cities)
    }

    async fn commit_delete(&self, _id: &CityId, cities: &[City]) -> WaymarkResult<()> {
        self.write_slot(cities)
    }
}
