//! Great-circle distance on a spherical Earth, built on the `geo` crate.
//!
//! All public helpers take degrees and return kilometres. Coordinates follow
//! the `geo` convention: `Point::new(longitude, latitude)`.

use geo::{Distance, HaversineMeasure, Point};

/// Sphere radius used for census proximity queries, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6372.8;

/// Haversine distance in kilometres between two latitude/longitude pairs.
///
/// # Examples
///
/// ```rust
/// use sylva::spatial::distance_km;
///
/// // Central Park to the Brooklyn Botanic Garden
/// let d = distance_km(40.7812, -73.9665, 40.6694, -73.9624);
/// assert!(d > 12.0 && d < 13.0);
/// assert_eq!(distance_km(40.7, -74.0, 40.7, -74.0), 0.0);
/// ```
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    distance_with_radius(lat1, lon1, lat2, lon2, EARTH_RADIUS_KM)
}

/// Haversine distance on a sphere of the given radius. The result is in the
/// same unit as `radius`.
pub fn distance_with_radius(lat1: f64, lon1: f64, lat2: f64, lon2: f64, radius: f64) -> f64 {
    distance_between(&Point::new(lon1, lat1), &Point::new(lon2, lat2), radius)
}

/// Haversine distance between two `geo` points on a sphere of the given radius.
pub fn distance_between(origin: &Point, destination: &Point, radius: f64) -> f64 {
    HaversineMeasure::new(radius).distance(*origin, *destination)
}

/// Inclusive proximity test: `true` when `point` lies at most `radius_km`
/// from `center`.
pub fn within_radius(center: &Point, point: &Point, radius_km: f64, earth_radius_km: f64) -> bool {
    distance_between(center, point, earth_radius_km) <= radius_km
}
