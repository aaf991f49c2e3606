//! Health check handlers for liveness/readiness probes.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// Number of registered locations (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations_registered: Option<i64>,

    /// Number of registered children (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children_registered: Option<i64>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            locations_registered: None,
            children_registered: None,
        }
    }

    /// Create a ready status with registry counts.
    pub fn ready(service: &str, version: &str, locations: i64, children: i64) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            locations_registered: Some(locations),
            children_registered: Some(children),
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            locations_registered: None,
            children_registered: None,
        }
    }
}

/// Liveness probe handler.
///
/// Returns 200 OK if the service is running; does not touch the store.
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Returns 200 OK when the store answers trivial count queries, 503
/// otherwise.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let counts = {
        let store = state.store();
        store
            .location_count()
            .and_then(|locations| store.child_count().map(|children| (locations, children)))
    };

    match counts {
        Ok((locations, children)) => {
            let status = HealthStatus::ready(service, version, locations, children);
            (StatusCode::OK, Json(status)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "readiness probe failed to query store");
            let status = HealthStatus::not_ready(service, version, "store unreachable");
            (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response()
        }
    }
}
