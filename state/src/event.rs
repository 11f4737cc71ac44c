//! Store transition events
//!
//! Every state mutation goes through one of these tagged events; the
//! reducer is the only code that applies them.

use waymark_core::{City, CityId};

/// Discrete store transition event
#[derive(Debug, Clone)]
pub enum CityEvent {
    /// An operation started
    Loading,
    /// The full list was read from storage
    CitiesLoaded(Vec<City>),
    /// A single city was read and selected
    CityLoaded(City),
    /// A new city was appended and selected
    CityCreated(City),
    /// A city was removed; the selection is cleared
    CityDeleted(CityId),
    /// The operation failed; payload is the user-facing message
    Rejected(String),
}

impl CityEvent {
    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            CityEvent::Loading => "loading",
            CityEvent::CitiesLoaded(_) => "cities/loaded",
            CityEvent::CityLoaded(_) => "city/loaded",
            CityEvent::CityCreated(_) => "city/created",
            CityEvent::CityDeleted(_) => "city/deleted",
            CityEvent::Rejected(_) => "rejected",
        }
    }
}
