//! Shared infrastructure for the sleigh delivery HTTP service.
//!
//! This crate provides the HTTP glue used by the service binary:
//!
//! - [`AppState`]: The open registry store shared across handlers
//! - [`health`]: Liveness/readiness probe handlers
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request correlation IDs
//! - Request types with validation for the create endpoints
//!
//! # Architecture
//!
//! The service follows a thin-handler pattern where all business logic
//! resides in `sleigh-lib`. This crate provides only HTTP glue:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse request JSON                                       │
//! │  - Validate fields                                          │
//! │  - Call sleigh-lib APIs                                     │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides in-memory state builders for handler
//! testing. Enable the `test-utils` feature to access it from dependent
//! crates.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_child_registered, record_delivery_stops,
    record_registration_failed, record_route_distance_km, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, RequestId};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_DUPLICATE_NAME, PROBLEM_ENDPOINT_NOT_FOUND,
    PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST, PROBLEM_UNKNOWN_LOCATION,
};
pub use request::{
    CoordinatesBody, CreateLocationRequest, NewChild, NewLocation, RegisterChildRequest, Validate,
};
pub use state::{AppState, AppStateError};
