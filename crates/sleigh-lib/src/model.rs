//! Domain entities for the delivery registry.
//!
//! Wire names are pinned with serde renames: the HTTP surface speaks
//! Spanish (`nombre`, `comportamiento`, `ubicacion`, `coordenadas`,
//! `ninosBuenos`) while the Rust identifiers stay English.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Behavior classification for a child.
///
/// Exactly two values exist; anything else is rejected at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    #[serde(rename = "bueno")]
    Good,
    #[serde(rename = "malo")]
    Bad,
}

impl Behavior {
    /// Parse a wire literal. Returns `None` for anything other than the two
    /// exact (case-sensitive) values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bueno" => Some(Behavior::Good),
            "malo" => Some(Behavior::Bad),
            _ => None,
        }
    }

    /// The wire literal for this classification.
    pub fn as_str(&self) -> &'static str {
        match self {
            Behavior::Good => "bueno",
            Behavior::Bad => "malo",
        }
    }
}

impl std::fmt::Display for Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named delivery stop with a running count of good children linked to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(rename = "coordenadas")]
    pub coordinates: Coordinates,
    /// Incremented only when a good child is registered at this location.
    #[serde(rename = "ninosBuenos")]
    pub good_children: i64,
}

impl Location {
    /// Create a new location with a generated id and a zero good-count.
    pub fn new(name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            name: name.into(),
            coordinates,
            good_children: 0,
        }
    }
}

/// A child classified as good or bad, linked to exactly one location.
///
/// Immutable after creation; never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "comportamiento")]
    pub behavior: Behavior,
    #[serde(rename = "ubicacion")]
    pub location_id: String,
}

impl Child {
    /// Create a new child with a generated id.
    pub fn new(name: impl Into<String>, behavior: Behavior, location_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            name: name.into(),
            behavior,
            location_id: location_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn behavior_parses_exact_literals_only() {
        assert_eq!(Behavior::parse("bueno"), Some(Behavior::Good));
        assert_eq!(Behavior::parse("malo"), Some(Behavior::Bad));
        assert_eq!(Behavior::parse("Bueno"), None);
        assert_eq!(Behavior::parse("good"), None);
        assert_eq!(Behavior::parse(""), None);
    }

    #[test]
    fn location_serializes_wire_names() {
        let location = Location {
            id: "loc-1".to_string(),
            name: "Polo Norte".to_string(),
            coordinates: Coordinates { lat: 0.0, lon: 1.0 },
            good_children: 3,
        };
        let json = serde_json::to_string(&location).unwrap();

        assert!(json.contains("\"coordenadas\":{"));
        assert!(json.contains("\"ninosBuenos\":3"));
        assert!(json.contains("\"name\":\"Polo Norte\""));
    }

    #[test]
    fn child_serializes_wire_names() {
        let child = Child {
            id: "child-1".to_string(),
            name: "Ana".to_string(),
            behavior: Behavior::Good,
            location_id: "loc-1".to_string(),
        };
        let json = serde_json::to_string(&child).unwrap();

        assert!(json.contains("\"nombre\":\"Ana\""));
        assert!(json.contains("\"comportamiento\":\"bueno\""));
        assert!(json.contains("\"ubicacion\":\"loc-1\""));
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = Location::new("A", Coordinates { lat: 0.0, lon: 0.0 });
        let b = Location::new("B", Coordinates { lat: 0.0, lon: 0.0 });
        assert_ne!(a.id, b.id);
    }
}
