//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Provides structured error responses following the Problem Details standard.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use sleigh_lib::Error as LibError;

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for child registrations referencing an unknown location.
pub const PROBLEM_UNKNOWN_LOCATION: &str = "/problems/unknown-location";

/// Problem type URI for location or child name conflicts.
pub const PROBLEM_DUPLICATE_NAME: &str = "/problems/duplicate-name";

/// Problem type URI for requests that match no route.
pub const PROBLEM_ENDPOINT_NOT_FOUND: &str = "/problems/endpoint-not-found";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// RFC 9457 Problem Details response structure.
///
/// Provides a consistent format for error responses across all endpoints.
///
/// # Example
///
/// ```
/// use sleigh_service_shared::{ProblemDetails, PROBLEM_DUPLICATE_NAME};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_DUPLICATE_NAME,
///     "Duplicate Name",
///     StatusCode::CONFLICT,
/// )
/// .with_detail("A location named 'Madrid' already exists")
/// .with_request_id("req-12345");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// URI reference identifying the specific occurrence (e.g., request ID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    /// Create a new ProblemDetails with required fields.
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    /// Add a detailed explanation of this specific problem occurrence.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add the request identifier for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// Create a 400 Bad Request problem for invalid input.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 404 Not Found problem for an unknown location reference.
    pub fn unknown_location(id: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_UNKNOWN_LOCATION,
            "Unknown Location",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!("No location exists with id '{}'", id))
        .with_request_id(request_id)
    }

    /// Create a 409 Conflict problem for a name that is already registered.
    pub fn duplicate_name(entity: &str, name: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_DUPLICATE_NAME,
            "Duplicate Name",
            StatusCode::CONFLICT,
        )
        .with_detail(format!("A {} named '{}' already exists", entity, name))
        .with_request_id(request_id)
    }

    /// Create a 404 Not Found problem for an unmatched route.
    pub fn endpoint_not_found(method: &str, path: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_ENDPOINT_NOT_FOUND,
            "Endpoint Not Found",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!("No endpoint matches {} {}", method, path))
        .with_request_id(request_id)
    }

    /// Create a 500 Internal Server Error problem.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.title,
            self.detail.as_deref().unwrap_or("")
        )
    }
}

impl std::error::Error for ProblemDetails {}

/// Implement IntoResponse for axum to return ProblemDetails as HTTP responses.
impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Set the content-type header to application/problem+json
        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );

        *response.status_mut() = status;
        response
    }
}

/// Convert library errors to ProblemDetails.
///
/// The `request_id` must be provided separately since library errors don't
/// carry one. Storage failures surface as a generic 500 rather than crashing
/// the request task.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::MissingField { field } => ProblemDetails::bad_request(
            format!("The '{}' field is required and cannot be empty", field),
            request_id,
        ),
        LibError::InvalidBehavior { value } => ProblemDetails::bad_request(
            format!(
                "The 'comportamiento' field must be 'bueno' or 'malo', got '{}'",
                value
            ),
            request_id,
        ),
        LibError::UnknownLocation { id } => ProblemDetails::unknown_location(id, request_id),
        LibError::DuplicateLocation { name } => {
            ProblemDetails::duplicate_name("location", name, request_id)
        }
        LibError::DuplicateChild { name } => {
            ProblemDetails::duplicate_name("child", name, request_id)
        }
        _ => ProblemDetails::internal_error(error.to_string(), request_id),
    }
}
