//! Deterministic collaborator doubles.
//!
//! [`StubMatrixProvider`], [`StubTripProvider`] and [`StubCpSolver`] return
//! pre-configured responses without touching the network, so pipelines can
//! be exercised offline.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::distance::DistanceMatrix;
use crate::models::{Coordinate, SubProblem};

use super::{
    BackendError, ExternalCpSolver, MatrixProvider, ProviderError, TripGeometryProvider,
    TripSummary,
};

/// Stub [`MatrixProvider`].
///
/// # Examples
///
/// ```
/// use u_mdvrp::distance::DistanceMatrix;
/// use u_mdvrp::models::Coordinate;
/// use u_mdvrp::provider::test_support::StubMatrixProvider;
/// use u_mdvrp::provider::MatrixProvider;
///
/// let provider = StubMatrixProvider::with_matrix(DistanceMatrix::new(2));
/// let dm = provider.matrix(&[Coordinate::new(0.0, 0.0); 2]).unwrap();
/// assert_eq!(dm.size(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct StubMatrixProvider {
    response: Result<DistanceMatrix, ProviderError>,
    calls: Arc<AtomicUsize>,
}

impl StubMatrixProvider {
    /// A provider that returns `matrix` for any non-empty input.
    #[must_use]
    pub fn with_matrix(matrix: DistanceMatrix) -> Self {
        Self {
            response: Ok(matrix),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A provider that fails with `error` for any non-empty input.
    #[must_use]
    pub fn with_error(error: ProviderError) -> Self {
        Self {
            response: Err(error),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `matrix` calls made so far, across clones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MatrixProvider for StubMatrixProvider {
    fn matrix(&self, coords: &[Coordinate]) -> Result<DistanceMatrix, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if coords.is_empty() {
            return Err(ProviderError::EmptyInput);
        }
        self.response.clone()
    }
}

/// Stub [`TripGeometryProvider`].
///
/// By default reports `duration = distance = stops.len()` with a null
/// geometry, which makes trip totals easy to predict in tests.
#[derive(Debug, Clone, Default)]
pub struct StubTripProvider {
    error: Option<ProviderError>,
}

impl StubTripProvider {
    /// A provider whose trips cost one unit per stop.
    #[must_use]
    pub fn per_stop() -> Self {
        Self::default()
    }

    /// A provider that fails every trip with `error`.
    #[must_use]
    pub fn with_error(error: ProviderError) -> Self {
        Self { error: Some(error) }
    }
}

impl TripGeometryProvider for StubTripProvider {
    fn trip(&self, _depot: Coordinate, stops: &[Coordinate]) -> Result<TripSummary, ProviderError> {
        if stops.is_empty() {
            return Err(ProviderError::EmptyInput);
        }
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        let units = stops.len() as f64;
        Ok(TripSummary {
            duration: units,
            distance: units,
            geometry: serde_json::Value::Null,
        })
    }
}

/// Stub [`ExternalCpSolver`] that returns the group's stops reversed, or a
/// fixed error.
#[derive(Debug, Clone, Default)]
pub struct StubCpSolver {
    error: Option<BackendError>,
}

impl StubCpSolver {
    /// A backend that reverses the input order.
    #[must_use]
    pub fn reversing() -> Self {
        Self::default()
    }

    /// A backend that always fails with `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            error: Some(BackendError::new(message)),
        }
    }
}

impl ExternalCpSolver for StubCpSolver {
    fn solve_group(
        &self,
        problem: &SubProblem<'_>,
        _demands: &[f64],
        _capacity: f64,
    ) -> Result<Vec<usize>, BackendError> {
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(problem.stops().iter().rev().copied().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn coords(n: usize) -> Vec<Coordinate> {
        vec![Coordinate::new(0.0, 0.0); n]
    }

    #[rstest]
    fn matrix_stub_counts_calls_across_clones() {
        let provider = StubMatrixProvider::with_matrix(DistanceMatrix::new(2));
        let clone = provider.clone();

        clone.matrix(&coords(2)).expect("should succeed");
        provider.matrix(&coords(2)).expect("should succeed");

        assert_eq!(provider.calls(), 2);
    }

    #[rstest]
    fn matrix_stub_returns_configured_error() {
        let provider = StubMatrixProvider::with_error(ProviderError::Network {
            url: "http://example.com".to_string(),
            message: "connection refused".to_string(),
        });

        let err = provider.matrix(&coords(2)).expect_err("should fail");

        assert!(matches!(err, ProviderError::Network { .. }));
        assert_eq!(
            provider.matrix(&[]).expect_err("empty"),
            ProviderError::EmptyInput
        );
    }

    #[rstest]
    fn trip_stub_costs_one_per_stop() {
        let summary = StubTripProvider::per_stop()
            .trip(Coordinate::new(0.0, 0.0), &coords(3))
            .expect("should succeed");
        assert_eq!(summary.duration, 3.0);
        assert_eq!(summary.distance, 3.0);
    }

    #[rstest]
    fn cp_stub_reverses_or_fails() {
        let dm = DistanceMatrix::new(3);
        let depots = [0];
        let stops = [1, 2];
        let sub = SubProblem::new(&dm, &depots, &stops);

        let order = StubCpSolver::reversing()
            .solve_group(&sub, &[1.0, 1.0], 2.0)
            .expect("should succeed");
        assert_eq!(order, vec![2, 1]);

        let err = StubCpSolver::failing("no solution")
            .solve_group(&sub, &[1.0, 1.0], 2.0)
            .expect_err("should fail");
        assert_eq!(err.message, "no solution");
    }
}
