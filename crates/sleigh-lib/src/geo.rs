//! Great-circle geometry over latitude/longitude pairs.

use crate::model::{Coordinates, Location};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance between two points, in kilometers.
///
/// Inputs are degrees; the atan2 form is used so identical and antipodal
/// points stay numerically stable (identical points yield exactly 0).
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Total distance along a sequence of stops: the sum of great-circle
/// distances between each consecutive pair. Zero for 0 or 1 stops.
pub fn route_distance_km(stops: &[Location]) -> f64 {
    stops
        .windows(2)
        .map(|pair| haversine_km(pair[0].coordinates, pair[1].coordinates))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(name: &str, lat: f64, lon: f64) -> Location {
        Location::new(name, Coordinates { lat, lon })
    }

    #[test]
    fn identical_points_have_zero_distance() {
        let p = Coordinates {
            lat: 45.5,
            lon: -73.6,
        };
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinates {
            lat: 40.4,
            lon: -3.7,
        };
        let b = Coordinates {
            lat: 19.4,
            lon: -99.1,
        };
        let forward = haversine_km(a, b);
        let reverse = haversine_km(b, a);
        assert!((forward - reverse).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let origin = Coordinates { lat: 0.0, lon: 0.0 };
        let east = Coordinates { lat: 0.0, lon: 1.0 };
        let distance = haversine_km(origin, east);
        assert!(
            (distance - 111.19).abs() < 0.01,
            "expected ~111.19 km, got {distance}"
        );
    }

    #[test]
    fn antipodal_points_stay_finite() {
        let a = Coordinates { lat: 0.0, lon: 0.0 };
        let b = Coordinates {
            lat: 0.0,
            lon: 180.0,
        };
        let distance = haversine_km(a, b);
        assert!(distance.is_finite());
        // Half the Earth's circumference at the mean radius.
        assert!((distance - EARTH_RADIUS_KM * std::f64::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn route_distance_empty_and_single_stop() {
        assert_eq!(route_distance_km(&[]), 0.0);
        assert_eq!(route_distance_km(&[stop("A", 10.0, 20.0)]), 0.0);
    }

    #[test]
    fn route_distance_sums_consecutive_pairs() {
        let stops = vec![
            stop("A", 0.0, 0.0),
            stop("B", 0.0, 1.0),
            stop("C", 0.0, 2.0),
        ];
        let total = route_distance_km(&stops);
        let leg = haversine_km(stops[0].coordinates, stops[1].coordinates);
        assert!((total - 2.0 * leg).abs() < 1e-9);
    }
}
