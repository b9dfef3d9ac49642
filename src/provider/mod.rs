//! External collaborators: travel matrices, trip geometry, and the
//! alternate constraint-programming backend.
//!
//! The solver only ever sees these through traits, so the optimisation core
//! stays free of I/O. Implementations:
//!
//! - [`EuclideanMatrixProvider`]: offline planar distances
//! - [`OsrmClient`]: OSRM Table/Trip APIs over HTTP (feature `osrm`)
//! - [`test_support`]: deterministic stubs

mod error;
mod euclidean;
#[cfg(feature = "osrm")]
mod http;
pub mod osrm;
pub mod test_support;

pub use error::{BackendError, ProviderError};
pub use euclidean::EuclideanMatrixProvider;
#[cfg(feature = "osrm")]
pub use http::{BuildError, OsrmClient, OsrmConfig, DEFAULT_USER_AGENT};

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::models::{Coordinate, SubProblem};

/// Fetches a travel-cost matrix for a set of coordinates.
///
/// Implementations must return a square `n×n` matrix where
/// `n == coords.len()`, and `Err(ProviderError::EmptyInput)` when `coords`
/// is empty.
///
/// # Examples
///
/// ```
/// use u_mdvrp::distance::DistanceMatrix;
/// use u_mdvrp::models::Coordinate;
/// use u_mdvrp::provider::{MatrixProvider, ProviderError};
///
/// struct UnitProvider;
///
/// impl MatrixProvider for UnitProvider {
///     fn matrix(&self, coords: &[Coordinate]) -> Result<DistanceMatrix, ProviderError> {
///         if coords.is_empty() {
///             return Err(ProviderError::EmptyInput);
///         }
///         let n = coords.len();
///         let data = (0..n * n)
///             .map(|k| if k / n == k % n { 0.0 } else { 1.0 })
///             .collect();
///         Ok(DistanceMatrix::from_data(n, data)?)
///     }
/// }
///
/// let dm = UnitProvider.matrix(&[Coordinate::new(0.0, 0.0); 2])?;
/// assert_eq!(dm.get(0, 1), 1.0);
/// # Ok::<(), ProviderError>(())
/// ```
pub trait MatrixProvider {
    /// Returns the pairwise cost matrix for `coords`.
    fn matrix(&self, coords: &[Coordinate]) -> Result<DistanceMatrix, ProviderError>;
}

/// Duration, distance, and geometry of one vehicle's real-road trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    /// Trip duration in seconds.
    pub duration: f64,
    /// Trip distance in metres.
    pub distance: f64,
    /// Route geometry, typically a GeoJSON `LineString`.
    #[serde(default)]
    pub geometry: serde_json::Value,
}

/// Computes trip metrics for an ordered visit sequence starting at a depot.
///
/// Used for reporting only; the optimiser never consults it.
pub trait TripGeometryProvider {
    /// Returns the trip from `depot` through `stops` in order, without
    /// returning to the depot.
    fn trip(&self, depot: Coordinate, stops: &[Coordinate]) -> Result<TripSummary, ProviderError>;
}

/// A black-box constraint-programming backend that orders one group's stops
/// for a single vehicle.
///
/// Implementations receive a sub-problem with exactly one depot, the demand
/// of each stop (parallel to `problem.stops()`), and the vehicle capacity.
/// The returned sequence must be a permutation of the group's stops.
pub trait ExternalCpSolver {
    /// Orders the group's stops.
    fn solve_group(
        &self,
        problem: &SubProblem<'_>,
        demands: &[f64],
        capacity: f64,
    ) -> Result<Vec<usize>, BackendError>;
}

/// A trip provider that reports nothing.
///
/// Useful when trip geometry is not needed; the orchestrator then omits
/// `makespan_real` and trip totals.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrips;

impl TripGeometryProvider for NoTrips {
    fn trip(&self, _depot: Coordinate, _stops: &[Coordinate]) -> Result<TripSummary, ProviderError> {
        Err(ProviderError::Unsupported)
    }
}
