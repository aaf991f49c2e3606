//! Application state for the delivery HTTP service.
//!
//! This module provides the shared state structure that axum handlers use to
//! reach the open registry store.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use sleigh_lib::Error as LibError;
use sleigh_lib::Store;

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to open the registry database.
    StoreOpen(LibError),

    /// The data path configuration was missing or empty.
    DataPathMissing,
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StoreOpen(e) => write!(f, "failed to open registry store: {}", e),
            Self::DataPathMissing => write!(f, "registry data path is not configured"),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StoreOpen(e) => Some(e),
            Self::DataPathMissing => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::StoreOpen(err)
    }
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable (`Arc` internally); share it via axum's `State`
/// extractor. The store sits behind a mutex because a rusqlite connection is
/// not `Sync`; each request holds the lock only for its one or two queries.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use sleigh_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let store = state.store();
///     // ... query the registry
/// }
///
/// let state = AppState::open("path/to/registry.db").unwrap();
/// let app = Router::new()
///     .route("/entregas", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Mutex<Store>,
}

impl AppState {
    /// Open the registry database at the given path, creating it on first
    /// run.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, AppStateError> {
        let db_path = db_path.as_ref();

        tracing::info!(path = %db_path.display(), "opening registry store");
        let store = Store::open(db_path)?;
        tracing::info!(
            locations = store.location_count().unwrap_or(0),
            children = store.child_count().unwrap_or(0),
            "registry store opened"
        );

        Ok(Self::from_store(store))
    }

    /// Build state over an in-memory store. Used by tests.
    pub fn in_memory() -> Result<Self, AppStateError> {
        Ok(Self::from_store(Store::open_in_memory()?))
    }

    fn from_store(store: Store) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store: Mutex::new(store),
            }),
        }
    }

    /// Access the registry store.
    ///
    /// A poisoned lock is recovered rather than propagated: the store has no
    /// invariants a panicked request could have broken mid-flight, since
    /// every mutation runs inside its own transaction.
    pub fn store(&self) -> MutexGuard<'_, Store> {
        self.inner
            .store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
