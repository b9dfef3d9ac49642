//! Geographic coordinate pairs.

use serde::{Deserialize, Serialize};

/// A `[lat, lon]` coordinate pair.
///
/// Serialized as a two-element array so request payloads can carry plain
/// `[[lat, lon], ...]` lists.
///
/// # Examples
///
/// ```
/// use u_mdvrp::models::Coordinate;
///
/// let c: Coordinate = serde_json::from_str("[41.0, 29.0]").unwrap();
/// assert_eq!(c.lat(), 41.0);
/// assert_eq!(c.lon(), 29.0);
/// assert!(c.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Returns `true` if both components are finite and within
    /// `[-90, 90]` / `[-180, 180]`.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Planar Euclidean distance to another coordinate, in degrees.
    pub fn planar_distance_to(&self, other: &Coordinate) -> f64 {
        let dlat = self.lat - other.lat;
        let dlon = self.lon - other.lon;
        (dlat * dlat + dlon * dlon).sqrt()
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self::new(lat, lon)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lat, c.lon]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_as_pair() {
        let c = Coordinate::new(1.5, -2.5);
        let json = serde_json::to_string(&c).expect("serialize");
        assert_eq!(json, "[1.5,-2.5]");
        let back: Coordinate = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, c);
    }

    #[test]
    fn test_rejects_wrong_arity() {
        assert!(serde_json::from_str::<Coordinate>("[1.0]").is_err());
        assert!(serde_json::from_str::<Coordinate>("[1.0, 2.0, 3.0]").is_err());
    }

    #[test]
    fn test_validity() {
        assert!(Coordinate::new(0.0, 0.0).is_valid());
        assert!(Coordinate::new(-90.0, 180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -181.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_planar_distance() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(3.0, 4.0);
        assert!((a.planar_distance_to(&b) - 5.0).abs() < 1e-10);
    }
}
