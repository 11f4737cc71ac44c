//! City store combining state and storage

use crate::event::CityEvent;
use crate::reducer::{reduce, StoreState};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};
use waymark_core::{City, CityDraft, CityId, CityStorage};

const CITIES_LOAD_ERROR: &str = "There was an error loading cities...";
const CITY_LOAD_ERROR: &str = "There was an error loading city...";
const CITY_READ_ERROR: &str = "Error loading city from local storage";
const CITY_CREATE_ERROR: &str = "There was an error creating city...";
const CITY_DELETE_ERROR: &str = "There was an error deleting city...";

/// In-memory city list synchronized with a durable backend
///
/// One store per application session, constructed by the application
/// assembly and shared by `Arc`. The durable medium is the source of
/// truth; the in-memory list is a cache written back after every
/// mutation. Operations are serialized by the caller; the store takes
/// its lock per dispatch and makes no cross-operation exclusion promise.
pub struct CityStore {
    state: RwLock<StoreState>,
    storage: Arc<dyn CityStorage>,
}

impl CityStore {
    pub fn new(storage: Arc<dyn CityStorage>) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            storage,
        }
    }

    /// Current city list snapshot
    pub fn cities(&self) -> Vec<City> {
        self.state.read().cities.clone()
    }

    /// True while an operation is in flight
    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading
    }

    /// City selected by the most recent load-one or create
    pub fn current_city(&self) -> Option<City> {
        self.state.read().current_city.clone()
    }

    /// Last error message; empty means no error
    pub fn error(&self) -> String {
        self.state.read().error.clone()
    }

    /// Full state snapshot
    pub fn snapshot(&self) -> StoreState {
        self.state.read().clone()
    }

    fn dispatch(&self, event: CityEvent) {
        debug!(event = event.kind(), "dispatch");
        let mut state = self.state.write();
        *state = reduce(&state, event);
    }

    /// Hydrate the city list from storage; runs once at startup
    ///
    /// An empty medium leaves the initial state untouched.
    pub async fn initialize(&self) {
        match self.storage.load().await {
            Ok(Some(cities)) => {
                self.dispatch(CityEvent::Loading);
                info!(count = cities.len(), "hydrated city list from storage");
                self.dispatch(CityEvent::CitiesLoaded(cities));
            }
            Ok(None) => {
                debug!("no persisted city list, starting empty");
            }
            Err(err) => {
                warn!(error = %err, "failed to hydrate city list");
                self.dispatch(CityEvent::Rejected(CITIES_LOAD_ERROR.to_string()));
            }
        }
    }

    /// Load one city from storage and select it
    ///
    /// Requesting the already-selected id is a no-op.
    pub async fn get_city(&self, id: &CityId) {
        let already_selected = self
            .state
            .read()
            .current_city
            .as_ref()
            .map(|city| &city.id == id)
            .unwrap_or(false);
        if already_selected {
            return;
        }

        self.dispatch(CityEvent::Loading);

        match self.storage.load_city(id).await {
            Ok(Some(city)) => self.dispatch(CityEvent::CityLoaded(city)),
            Ok(None) => self.dispatch(CityEvent::Rejected(CITY_LOAD_ERROR.to_string())),
            Err(err) => {
                warn!(error = %err, city = %id, "city load failed");
                self.dispatch(CityEvent::Rejected(CITY_READ_ERROR.to_string()));
            }
        }
    }

    /// Create a city, select it, and persist the updated list
    ///
    /// The write sends the post-append in-memory list, not a re-read.
    pub async fn create_city(&self, draft: CityDraft) -> City {
        let city = City::from_draft(draft, self.fresh_id());

        self.dispatch(CityEvent::Loading);
        self.dispatch(CityEvent::CityCreated(city.clone()));

        let cities = self.cities();
        if let Err(err) = self.storage.commit_create(&city, &cities).await {
            warn!(error = %err, city = %city.id, "create write failed");
            self.dispatch(CityEvent::Rejected(CITY_CREATE_ERROR.to_string()));
        }

        city
    }

    /// Remove a city, clear the selection, and persist the updated list
    ///
    /// Deleting an absent id leaves the list unchanged but still clears
    /// the selection and still writes.
    pub async fn delete_city(&self, id: &CityId) {
        self.dispatch(CityEvent::Loading);
        self.dispatch(CityEvent::CityDeleted(id.clone()));

        let cities = self.cities();
        if let Err(err) = self.storage.commit_delete(id, &cities).await {
            warn!(error = %err, city = %id, "delete write failed");
            self.dispatch(CityEvent::Rejected(CITY_DELETE_ERROR.to_string()));
        }
    }

    /// Generate an id not already present in the in-memory list
    fn fresh_id(&self) -> CityId {
        let state = self.state.read();
        loop {
            let id = CityId::generate();
            if !state.cities.iter().any(|city| city.id == id) {
                return id;
            }
        }
    }
}
