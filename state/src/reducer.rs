//! Pure state transition function

use crate::event::CityEvent;
use waymark_core::City;

/// The single mutable state object
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    /// Ordered city list; insertion order is preserved
    pub cities: Vec<City>,
    /// True exactly while an operation is in flight
    pub is_loading: bool,
    /// City selected by the most recent load-one or create
    pub current_city: Option<City>,
    /// Last error message; empty means no error
    pub error: String,
}

/// Apply one event to the state
///
/// Total over `CityEvent`; there is no unrecognized-event case.
pub fn reduce(state: &StoreState, event: CityEvent) -> StoreState {
    match event {
        CityEvent::Loading => StoreState {
            is_loading: true,
            ..state.clone()
        },
        CityEvent::CitiesLoaded(cities) => StoreState {
            is_loading: false,
            cities,
            ..state.clone()
        },
        CityEvent::CityLoaded(city) => StoreState {
            is_loading: false,
            current_city: Some(city),
            ..state.clone()
        },
        CityEvent::CityCreated(city) => {
            let mut cities = state.cities.clone();
            cities.push(city.clone());
            StoreState {
                is_loading: false,
                cities,
                current_city: Some(city),
                ..state.clone()
            }
        }
        CityEvent::CityDeleted(id) => {
            let cities = state
                .cities
                .iter()
                .filter(|city| city.id != id)
                .cloned()
                .collect();
            StoreState {
                is_loading: false,
                cities,
                current_city: None,
                ..state.clone()
            }
        }
        CityEvent::Rejected(message) => StoreState {
            is_loading: false,
            error: message,
            ..state.clone()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_core::{CityDraft, CityId};

    fn city(id: &str) -> City {
        City::from_draft(CityDraft::new(), CityId::new(id))
    }

    #[test]
    fn loading_sets_the_flag_and_nothing_else() {
        let state = StoreState {
            cities: vec![city("1")],
            ..StoreState::default()
        };

        let next = reduce(&state, CityEvent::Loading);

        assert!(next.is_loading);
        assert_eq!(next.cities.len(), 1);
        assert!(next.error.is_empty());
    }

    #[test]
    fn cities_loaded_replaces_the_list() {
        let state = StoreState {
            is_loading: true,
            ..StoreState::default()
        };

        let next = reduce(&state, CityEvent::CitiesLoaded(vec![city("1"), city("2")]));

        assert!(!next.is_loading);
        assert_eq!(next.cities.len(), 2);
    }

    #[test]
    fn city_loaded_selects_without_touching_the_list() {
        let state = StoreState {
            cities: vec![city("1"), city("2")],
            is_loading: true,
            ..StoreState::default()
        };

        let next = reduce(&state, CityEvent::CityLoaded(city("2")));

        assert!(!next.is_loading);
        assert_eq!(next.cities.len(), 2);
        assert_eq!(next.current_city.unwrap().id, CityId::new("2"));
    }

    #[test]
    fn city_created_appends_and_selects() {
        let state = StoreState {
            cities: vec![city("1")],
            is_loading: true,
            ..StoreState::default()
        };

        let next = reduce(&state, CityEvent::CityCreated(city("2")));

        assert_eq!(next.cities.len(), 2);
        assert_eq!(next.cities[1].id, CityId::new("2"));
        assert_eq!(next.current_city.unwrap().id, CityId::new("2"));
    }

    #[test]
    fn city_deleted_removes_and_clears_selection() {
        // the selection clears even when the deleted city was not current
        let state = StoreState {
            cities: vec![city("1"), city("2")],
            current_city: Some(city("2")),
            is_loading: true,
            ..StoreState::default()
        };

        let next = reduce(&state, CityEvent::CityDeleted(CityId::new("1")));

        assert_eq!(next.cities.len(), 1);
        assert_eq!(next.cities[0].id, CityId::new("2"));
        assert!(next.current_city.is_none());
    }

    #[test]
    fn deleting_an_absent_id_only_clears_selection() {
        let state = StoreState {
            cities: vec![city("1")],
            current_city: Some(city("1")),
            ..StoreState::default()
        };

        let next = reduce(&state, CityEvent::CityDeleted(CityId::new("99")));

        assert_eq!(next.cities.len(), 1);
        assert!(next.current_city.is_none());
    }

    #[test]
    fn rejected_overwrites_the_previous_error() {
        let state = StoreState {
            error: "old".to_string(),
            is_loading: true,
            ..StoreState::default()
        };

        let next = reduce(&state, CityEvent::Rejected("new".to_string()));

        assert!(!next.is_loading);
        assert_eq!(next.error, "new");
    }
}
