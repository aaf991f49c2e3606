//! Router and handlers for the delivery registry HTTP service.
//!
//! Handlers are thin: parse the body, validate it, call `sleigh-lib`, and
//! format the response. Errors surface as RFC 9457 problem documents with a
//! request ID in `instance`; successes use the Spanish wire vocabulary
//! (`nombre`, `comportamiento`, `ubicacion`, `coordenadas`, `distanciaTotal`).

#![deny(warnings)]

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use sleigh_lib::{route_distance_km, Behavior, Child, Error as LibError, Location};
use sleigh_service_shared::{
    extract_or_generate_request_id, from_lib_error, health_live, health_ready, metrics_handler,
    record_child_registered, record_delivery_stops, record_registration_failed,
    record_route_distance_km, AppState, CreateLocationRequest, ProblemDetails,
    RegisterChildRequest, Validate,
};

/// Route distance response returned by `GET /ruta`.
#[derive(Debug, Serialize)]
pub struct RouteDistanceResponse {
    /// Sum of great-circle distances along the ranked delivery order, in km.
    #[serde(rename = "distanciaTotal")]
    pub total_km: f64,
}

/// Build the service router over the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ubicacion", post(create_location))
        .route("/ninos", post(register_child))
        .route("/ninos/buenos", get(list_good_children))
        .route("/ninos/malos", get(list_bad_children))
        .route("/entregas", get(delivery_plan))
        .route("/ruta", get(route_distance))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .fallback(endpoint_not_found)
        .method_not_allowed_fallback(endpoint_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle `POST /ubicacion`.
async fn create_location(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<Location>), ProblemDetails> {
    let request_id = extract_or_generate_request_id(&headers);

    let new_location = match request.validate(request_id.as_str()) {
        Ok(valid) => valid,
        Err(problem) => {
            record_registration_failed("validation_error", "location");
            return Err(*problem);
        }
    };

    let result = state
        .store()
        .create_location(&new_location.name, new_location.coordinates);

    match result {
        Ok(location) => {
            info!(
                request_id = %request_id,
                id = %location.id,
                name = %location.name,
                "location created"
            );
            Ok((StatusCode::CREATED, Json(location)))
        }
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "location creation failed");
            record_registration_failed(failure_reason(&e), "location");
            Err(from_lib_error(&e, request_id.as_str()))
        }
    }
}

/// Handle `POST /ninos`.
async fn register_child(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RegisterChildRequest>,
) -> Result<(StatusCode, Json<Child>), ProblemDetails> {
    let request_id = extract_or_generate_request_id(&headers);

    let new_child = match request.validate(request_id.as_str()) {
        Ok(valid) => valid,
        Err(problem) => {
            record_registration_failed("validation_error", "child");
            return Err(*problem);
        }
    };

    let result = state.store().register_child(
        &new_child.name,
        new_child.behavior,
        &new_child.location_id,
    );

    match result {
        Ok(child) => {
            info!(
                request_id = %request_id,
                id = %child.id,
                name = %child.name,
                behavior = %child.behavior,
                location = %child.location_id,
                "child registered"
            );
            record_child_registered(child.behavior.as_str());
            Ok((StatusCode::CREATED, Json(child)))
        }
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "child registration failed");
            record_registration_failed(failure_reason(&e), "child");
            Err(from_lib_error(&e, request_id.as_str()))
        }
    }
}

/// Handle `GET /ninos/buenos`.
async fn list_good_children(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Child>>, ProblemDetails> {
    list_children(state, headers, Behavior::Good).await
}

/// Handle `GET /ninos/malos`.
async fn list_bad_children(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Child>>, ProblemDetails> {
    list_children(state, headers, Behavior::Bad).await
}

async fn list_children(
    state: AppState,
    headers: HeaderMap,
    behavior: Behavior,
) -> Result<Json<Vec<Child>>, ProblemDetails> {
    let request_id = extract_or_generate_request_id(&headers);

    let children = state
        .store()
        .children_with_behavior(behavior)
        .map_err(|e| {
            warn!(request_id = %request_id, error = %e, "child listing failed");
            from_lib_error(&e, request_id.as_str())
        })?;

    info!(
        request_id = %request_id,
        behavior = %behavior,
        count = children.len(),
        "children listed"
    );
    Ok(Json(children))
}

/// Handle `GET /entregas`: all locations ranked by good-count, highest first.
async fn delivery_plan(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Location>>, ProblemDetails> {
    let request_id = extract_or_generate_request_id(&headers);

    let stops = state.store().locations_by_good_count().map_err(|e| {
        warn!(request_id = %request_id, error = %e, "delivery plan query failed");
        from_lib_error(&e, request_id.as_str())
    })?;

    record_delivery_stops(stops.len());
    info!(request_id = %request_id, stops = stops.len(), "delivery plan computed");
    Ok(Json(stops))
}

/// Handle `GET /ruta`: total great-circle distance along the delivery plan
/// order. The ordering is the ranked plan, not a shortest-path computation.
async fn route_distance(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RouteDistanceResponse>, ProblemDetails> {
    let request_id = extract_or_generate_request_id(&headers);

    let stops = state.store().locations_by_good_count().map_err(|e| {
        warn!(request_id = %request_id, error = %e, "route distance query failed");
        from_lib_error(&e, request_id.as_str())
    })?;

    let total_km = route_distance_km(&stops);
    record_route_distance_km(total_km);

    info!(
        request_id = %request_id,
        stops = stops.len(),
        total_km = total_km,
        "route distance computed"
    );
    Ok(Json(RouteDistanceResponse { total_km }))
}

/// Fallback for unmatched method/path combinations.
async fn endpoint_not_found(method: Method, uri: Uri, headers: HeaderMap) -> ProblemDetails {
    let request_id = extract_or_generate_request_id(&headers);
    warn!(request_id = %request_id, method = %method, path = %uri.path(), "endpoint not found");
    ProblemDetails::endpoint_not_found(method.as_str(), uri.path(), request_id.as_str())
}

/// Metric label for a failed create operation.
fn failure_reason(error: &LibError) -> &'static str {
    match error {
        LibError::MissingField { .. } | LibError::InvalidBehavior { .. } => "validation_error",
        LibError::UnknownLocation { .. } => "unknown_location",
        LibError::DuplicateLocation { .. } | LibError::DuplicateChild { .. } => "duplicate_name",
        LibError::Sqlite(_) | LibError::Io(_) => "internal_error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_reason_labels() {
        assert_eq!(
            failure_reason(&LibError::DuplicateChild {
                name: "Ana".to_string()
            }),
            "duplicate_name"
        );
        assert_eq!(
            failure_reason(&LibError::UnknownLocation {
                id: "loc-1".to_string()
            }),
            "unknown_location"
        );
        assert_eq!(
            failure_reason(&LibError::InvalidBehavior {
                value: "regular".to_string()
            }),
            "validation_error"
        );
    }
}
