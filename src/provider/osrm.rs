//! OSRM Table and Trip API payloads.
//!
//! Deserialisation types plus the pure conversions from OSRM responses to
//! [`DistanceMatrix`] and [`TripSummary`]. The HTTP transport lives in
//! [`OsrmClient`](super::OsrmClient); everything here is usable without it.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/>

use serde::Deserialize;

use crate::distance::DistanceMatrix;
use crate::models::Coordinate;

use super::{ProviderError, TripSummary};

/// Query string appended to Trip API requests: fixed start at the first
/// coordinate, open-ended, full GeoJSON geometry.
pub const TRIP_QUERY: &str = "source=first&roundtrip=false&overview=full&geometries=geojson";

/// OSRM Table API response.
#[derive(Debug, Deserialize)]
pub struct TableResponse {
    /// Status code from OSRM; `"Ok"` on success.
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Matrix of durations in seconds. `None` entries mark unroutable pairs.
    pub durations: Option<Vec<Vec<Option<f64>>>>,
}

impl TableResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// Converts the duration table into a cost matrix for `expected`
    /// coordinates.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Service`] when `code` is not `"Ok"`
    /// - [`ProviderError::Parse`] when durations are missing
    /// - [`ProviderError::DimensionMismatch`] for a wrong row count
    /// - [`ProviderError::Unreachable`] for a `null` entry
    /// - [`ProviderError::Matrix`] for ragged rows or invalid values
    pub fn into_matrix(self, expected: usize) -> Result<DistanceMatrix, ProviderError> {
        if !self.is_ok() {
            return Err(ProviderError::Service {
                code: self.code,
                message: self.message.unwrap_or_default(),
            });
        }

        let durations = self.durations.ok_or_else(|| ProviderError::Parse {
            message: "OSRM response missing durations array".to_string(),
        })?;
        if durations.len() != expected {
            return Err(ProviderError::DimensionMismatch {
                expected,
                actual: durations.len(),
            });
        }

        let rows = durations
            .into_iter()
            .enumerate()
            .map(|(from, row)| {
                row.into_iter()
                    .enumerate()
                    .map(|(to, cell)| cell.ok_or(ProviderError::Unreachable { from, to }))
                    .collect::<Result<Vec<f64>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DistanceMatrix::from_rows(rows)?)
    }
}

/// OSRM Trip API response.
#[derive(Debug, Deserialize)]
pub struct TripResponse {
    /// Status code from OSRM; `"Ok"` on success.
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Computed trips; the first one covers all waypoints.
    #[serde(default)]
    pub trips: Vec<Trip>,
}

/// One trip within a [`TripResponse`].
#[derive(Debug, Deserialize)]
pub struct Trip {
    /// Duration in seconds.
    pub duration: f64,
    /// Distance in metres.
    pub distance: f64,
    /// GeoJSON geometry when requested with `geometries=geojson`.
    #[serde(default)]
    pub geometry: serde_json::Value,
}

impl TripResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// Extracts the first trip.
    ///
    /// # Errors
    ///
    /// [`ProviderError::Service`] when `code` is not `"Ok"`, or
    /// [`ProviderError::Parse`] when no trip was returned.
    pub fn into_summary(self) -> Result<TripSummary, ProviderError> {
        if !self.is_ok() {
            return Err(ProviderError::Service {
                code: self.code,
                message: self.message.unwrap_or_default(),
            });
        }
        let trip = self
            .trips
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Parse {
                message: "OSRM response contains no trips".to_string(),
            })?;
        Ok(TripSummary {
            duration: trip.duration,
            distance: trip.distance,
            geometry: trip.geometry,
        })
    }
}

/// Formats coordinates as OSRM expects: semicolon-separated `lon,lat`.
pub fn coordinate_path<'a>(coords: impl IntoIterator<Item = &'a Coordinate>) -> String {
    coords
        .into_iter()
        .map(|c| format!("{},{}", c.lon(), c.lat()))
        .collect::<Vec<_>>()
        .join(";")
}

/// Builds a Table API URL: `{base}/table/v1/{profile}/{lon,lat;...}`.
pub fn table_url(base_url: &str, profile: &str, coords: &[Coordinate]) -> String {
    format!(
        "{}/table/v1/{}/{}",
        base_url.trim_end_matches('/'),
        profile,
        coordinate_path(coords)
    )
}

/// Builds a Trip API URL starting at `depot` and visiting `stops` in order.
pub fn trip_url(base_url: &str, profile: &str, depot: &Coordinate, stops: &[Coordinate]) -> String {
    format!(
        "{}/trip/v1/{}/{}?{}",
        base_url.trim_end_matches('/'),
        profile,
        coordinate_path(std::iter::once(depot).chain(stops)),
        TRIP_QUERY
    )
}
