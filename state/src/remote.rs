//! Remote city storage against a REST API

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use waymark_core::{City, CityId, CityStorage, WaymarkError, WaymarkResult};

/// City storage backed by a remote REST API
///
/// Routes: `GET /cities`, `GET /cities/{id}`, `POST /cities`,
/// `DELETE /cities/{id}`. The server owns the durable slot, so the
/// full-list replace never happens on this side; commits send only the
/// subject entity.
pub struct RemoteCityStorage {
    base_url: String,
    client: Client,
}

impl RemoteCityStorage {
    pub fn new(base_url: &str) -> WaymarkResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| WaymarkError::Http(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl CityStorage for RemoteCityStorage {
    async fn load(&self) -> WaymarkResult<Option<Vec<City>>> {
        let url = format!("{}/cities", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WaymarkError::Http(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(WaymarkError::Http(format!(
                "GET {} returned {}",
                url,
                resp.status()
            )));
        }

        let cities = resp
            .json::<Vec<City>>()
            .await
            .map_err(|e| WaymarkError::Http(e.to_string()))?;
        Ok(Some(cities))
    }

    async fn load_city(&self, id: &CityId) -> WaymarkResult<Option<City>> {
        let url = format!("{}/cities/{}", self.base_url, id);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WaymarkError::Http(e.to_string()))?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(WaymarkError::Http(format!(
                "GET {} returned {}",
                url,
                resp.status()
            )));
        }

        let city = resp
            .json::<City>()
            .await
            .map_err(|e| WaymarkError::Http(e.to_string()))?;
        Ok(Some(city))
    }

    async fn commit_create(&self, city: &City, _cities: &[City]) -> WaymarkResult<()> {
        let url = format!("{}/cities", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(city)
            .send()
            .await
            .map_err(|e| WaymarkError::Http(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(WaymarkError::Http(format!(
                "POST {} returned {}",
                url,
                resp.status()
            )));
        }
        Ok(())
    }

    async fn commit_delete(&self, id: &CityId, _cities: &[City]) -> WaymarkResult<()> {
        let url = format!("{}/cities/{}", self.base_url, id);
        let resp = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| WaymarkError::Http(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(WaymarkError::Http(format!(
                "DELETE {} returned {}",
                url,
                resp.status()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        routing::get,
        Json, Router,
    };
    use parking_lot::Mutex;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tokio::net::TcpListener;
    use waymark_core::CityDraft;

    type Cities = Arc<Mutex<Vec<City>>>;

    fn city(id: &str, name: &str) -> City {
        City::from_draft(
            CityDraft::new().with_field("name", name),
            CityId::new(id),
        )
    }

    async fn list(State(cities): State<Cities>) -> Json<Vec<City>> {
        Json(cities.lock().clone())
    }

    async fn fetch(
        State(cities): State<Cities>,
        Path(id): Path<String>,
    ) -> Result<Json<City>, StatusCode> {
        cities
            .lock()
            .iter()
            .find(|c| c.id.as_str() == id)
            .cloned()
            .map(Json)
            .ok_or(StatusCode::NOT_FOUND)
    }

    async fn create(
        State(cities): State<Cities>,
        Json(city): Json<City>,
    ) -> (StatusCode, Json<City>) {
        cities.lock().push(city.clone());
        (StatusCode::CREATED, Json(city))
    }

    async fn remove(State(cities): State<Cities>, Path(id): Path<String>) -> StatusCode {
        cities.lock().retain(|c| c.id.as_str() != id);
        StatusCode::NO_CONTENT
    }

    async fn spawn_server(seed: Vec<City>) -> (SocketAddr, Cities) {
        let cities: Cities = Arc::new(Mutex::new(seed));
        let router = Router::new()
            .route("/cities", get(list).post(create))
            .route("/cities/:id", get(fetch).delete(remove))
            .with_state(cities.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        (addr, cities)
    }

    #[tokio::test]
    async fn load_fetches_the_full_list() {
        let (addr, _) = spawn_server(vec![city("1", "Paris")]).await;
        let storage = RemoteCityStorage::new(&format!("http://{}/", addr)).unwrap();

        let cities = storage.load().await.unwrap().unwrap();

        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name(), Some("Paris"));
    }

    #[tokio::test]
    async fn load_city_maps_missing_to_none() {
        let (addr, _) = spawn_server(vec![city("1", "Paris")]).await;
        let storage = RemoteCityStorage::new(&format!("http://{}", addr)).unwrap();

        let found = storage.load_city(&CityId::new("1")).await.unwrap();
        assert_eq!(found.unwrap().name(), Some("Paris"));

        let missing = storage.load_city(&CityId::new("99")).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn commit_create_posts_the_city() {
        let (addr, cities) = spawn_server(vec![]).await;
        let storage = RemoteCityStorage::new(&format!("http://{}", addr)).unwrap();
        let rome = city("7", "Rome");

        storage.commit_create(&rome, &[rome.clone()]).await.unwrap();

        let server_side = cities.lock();
        assert_eq!(server_side.len(), 1);
        assert_eq!(server_side[0].id, rome.id);
    }

    #[tokio::test]
    async fn commit_delete_removes_on_the_server() {
        let (addr, cities) = spawn_server(vec![city("1", "Paris"), city("2", "Rome")]).await;
        let storage = RemoteCityStorage::new(&format!("http://{}", addr)).unwrap();

        storage.commit_delete(&CityId::new("1"), &[]).await.unwrap();

        let server_side = cities.lock();
        assert_eq!(server_side.len(), 1);
        assert_eq!(server_side[0].id, CityId::new("2"));
    }

    #[tokio::test]
    async fn unreachable_server_is_an_http_error() {
        let storage = RemoteCityStorage::new("http://127.0.0.1:1").unwrap();

        let result = storage.load().await;
        assert!(matches!(result, Err(WaymarkError::Http(_))));
    }
}
