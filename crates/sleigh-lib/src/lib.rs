//! Sleigh library entry points.
//!
//! This crate exposes the delivery registry domain: entity types, the
//! embedded store backing the two collections, and the great-circle
//! geometry used for route distance reports. Higher-level consumers (the
//! HTTP service) should only depend on the items exported here instead of
//! reimplementing behavior.

#![deny(warnings)]

pub mod error;
pub mod geo;
pub mod model;
pub mod store;

pub use error::{Error, Result};
pub use geo::{haversine_km, route_distance_km, EARTH_RADIUS_KM};
pub use model::{Behavior, Child, Coordinates, Location};
pub use store::Store;
