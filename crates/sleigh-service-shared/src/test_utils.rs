//! Test utilities for service handler testing.
//!
//! Provides fresh in-memory application state for tests. Unlike a read-only
//! fixture, the registry is writable, so every test gets its own state.

use sleigh_lib::{Behavior, Coordinates, Location};

use crate::state::AppState;

/// Build a fresh, empty in-memory state.
///
/// # Panics
///
/// Panics if the in-memory store cannot be created, which indicates a test
/// environment issue.
pub fn test_state() -> AppState {
    AppState::in_memory().expect("failed to create in-memory test state")
}

/// Build a state seeded with the canonical two-stop scenario: locations
/// A(0,0) and B(0,1), with one good child registered at B.
///
/// The two stops are one degree of equatorial longitude apart, roughly
/// 111.19 km.
pub fn seeded_state() -> (AppState, Location, Location) {
    let state = test_state();
    let (a, b) = {
        let mut store = state.store();
        let a = store
            .create_location("A", Coordinates { lat: 0.0, lon: 0.0 })
            .expect("seed location A");
        let b = store
            .create_location("B", Coordinates { lat: 0.0, lon: 1.0 })
            .expect("seed location B");
        store
            .register_child("Ana", Behavior::Good, &b.id)
            .expect("seed child at B");
        (a, b)
    };
    (state, a, b)
}

/// Generate a unique request ID for testing.
pub fn test_request_id() -> String {
    format!("test-{}", crate::middleware::RequestId::generate())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_empty() {
        let state = test_state();
        assert_eq!(state.store().location_count().unwrap(), 0);
        assert_eq!(state.store().child_count().unwrap(), 0);
    }

    #[test]
    fn test_states_are_independent() {
        let first = test_state();
        first
            .store()
            .create_location("Madrid", Coordinates { lat: 40.4, lon: -3.7 })
            .unwrap();

        let second = test_state();
        assert_eq!(second.store().location_count().unwrap(), 0);
    }

    #[test]
    fn test_seeded_state_shape() {
        let (state, a, b) = seeded_state();
        assert_eq!(state.store().location_count().unwrap(), 2);
        assert_eq!(state.store().child_count().unwrap(), 1);

        let a = state.store().location(&a.id).unwrap().unwrap();
        let b = state.store().location(&b.id).unwrap().unwrap();
        assert_eq!(a.good_children, 0);
        assert_eq!(b.good_children, 1);
    }

    #[test]
    fn test_request_id_unique() {
        let id1 = test_request_id();
        let id2 = test_request_id();
        assert_ne!(id1, id2);
    }
}
