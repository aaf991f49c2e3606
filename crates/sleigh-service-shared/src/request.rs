//! Request types and validation for HTTP endpoints.
//!
//! Every field is optional at the serde layer so that missing or empty
//! fields surface as 400 problems with a field name, rather than opaque
//! body-rejection errors. Validation produces the fully-typed form of the
//! request.

use serde::Deserialize;

use sleigh_lib::{Behavior, Coordinates};

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Implementations check all fields in a fixed order and return either the
/// typed form of the request or a `ProblemDetails` error.
pub trait Validate {
    /// Fully-typed form produced by successful validation.
    type Valid;

    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<Self::Valid, Box<ProblemDetails>>;
}

/// Body of `POST /ubicacion`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLocationRequest {
    /// Location name; must be unique.
    pub name: Option<String>,

    /// Coordinate pair.
    pub coordenadas: Option<CoordinatesBody>,
}

/// Coordinate fields as they arrive on the wire, before presence checks.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CoordinatesBody {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Validated form of a location creation request.
#[derive(Debug, Clone)]
pub struct NewLocation {
    pub name: String,
    pub coordinates: Coordinates,
}

impl Validate for CreateLocationRequest {
    type Valid = NewLocation;

    fn validate(&self, request_id: &str) -> Result<NewLocation, Box<ProblemDetails>> {
        let name = match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                return Err(Box::new(ProblemDetails::bad_request(
                    "The 'name' field is required and cannot be empty",
                    request_id,
                )))
            }
        };

        let Some(coordenadas) = self.coordenadas else {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'coordenadas' field is required",
                request_id,
            )));
        };

        let Some(lat) = coordenadas.lat else {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'coordenadas.lat' field is required",
                request_id,
            )));
        };

        let Some(lon) = coordenadas.lon else {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'coordenadas.lon' field is required",
                request_id,
            )));
        };

        Ok(NewLocation {
            name: name.to_string(),
            coordinates: Coordinates { lat, lon },
        })
    }
}

/// Body of `POST /ninos`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterChildRequest {
    /// Child name; must be unique.
    pub nombre: Option<String>,

    /// Behavior literal, exactly "bueno" or "malo".
    pub comportamiento: Option<String>,

    /// Id of the location the child belongs to.
    pub ubicacion: Option<String>,
}

/// Validated form of a child registration request.
#[derive(Debug, Clone)]
pub struct NewChild {
    pub name: String,
    pub behavior: Behavior,
    pub location_id: String,
}

impl Validate for RegisterChildRequest {
    type Valid = NewChild;

    fn validate(&self, request_id: &str) -> Result<NewChild, Box<ProblemDetails>> {
        let name = match self.nombre.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                return Err(Box::new(ProblemDetails::bad_request(
                    "The 'nombre' field is required and cannot be empty",
                    request_id,
                )))
            }
        };

        let behavior_literal = match self.comportamiento.as_deref() {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                return Err(Box::new(ProblemDetails::bad_request(
                    "The 'comportamiento' field is required and cannot be empty",
                    request_id,
                )))
            }
        };

        let location_id = match self.ubicacion.as_deref() {
            Some(id) if !id.trim().is_empty() => id,
            _ => {
                return Err(Box::new(ProblemDetails::bad_request(
                    "The 'ubicacion' field is required and cannot be empty",
                    request_id,
                )))
            }
        };

        let Some(behavior) = Behavior::parse(behavior_literal) else {
            return Err(Box::new(ProblemDetails::bad_request(
                format!(
                    "The 'comportamiento' field must be 'bueno' or 'malo', got '{}'",
                    behavior_literal
                ),
                request_id,
            )));
        };

        Ok(NewChild {
            name: name.to_string(),
            behavior,
            location_id: location_id.to_string(),
        })
    }
}
