//! Offline matrix provider using planar distances.

use crate::distance::DistanceMatrix;
use crate::models::Coordinate;

use super::{MatrixProvider, ProviderError};

/// Builds matrices from straight-line distances between `[lat, lon]` pairs,
/// multiplied by a scale factor.
///
/// Coordinates are treated as planar points; no geodesic correction is
/// applied. With `scale = 1.0` the cost is the raw degree distance.
///
/// # Examples
///
/// ```
/// use u_mdvrp::models::Coordinate;
/// use u_mdvrp::provider::{EuclideanMatrixProvider, MatrixProvider};
///
/// let provider = EuclideanMatrixProvider::new(10.0);
/// let dm = provider
///     .matrix(&[Coordinate::new(0.0, 0.0), Coordinate::new(3.0, 4.0)])
///     .unwrap();
/// assert!((dm.get(0, 1) - 50.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EuclideanMatrixProvider {
    scale: f64,
}

impl EuclideanMatrixProvider {
    /// Creates a provider with the given cost per unit of distance.
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    /// Cost per unit of distance.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Default for EuclideanMatrixProvider {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl MatrixProvider for EuclideanMatrixProvider {
    fn matrix(&self, coords: &[Coordinate]) -> Result<DistanceMatrix, ProviderError> {
        if coords.is_empty() {
            return Err(ProviderError::EmptyInput);
        }
        Ok(DistanceMatrix::from_coordinates(coords, self.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_and_symmetric() {
        let coords = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(1.0, 1.0),
        ];
        let dm = EuclideanMatrixProvider::default()
            .matrix(&coords)
            .expect("non-empty");
        assert_eq!(dm.size(), 3);
        assert_eq!(dm.get(2, 0), dm.get(0, 2));
        assert!((dm.get(0, 2) - 2.0_f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_empty_input() {
        let err = EuclideanMatrixProvider::default()
            .matrix(&[])
            .expect_err("empty");
        assert_eq!(err, ProviderError::EmptyInput);
    }
}
