//! Dense directed cost matrix.

use std::cmp::Ordering;

use thiserror::Error;

use crate::models::Coordinate;

/// Errors raised when building a [`DistanceMatrix`] from external data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// A row has a different length than the number of rows.
    #[error("matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        /// Row index.
        row: usize,
        /// Row length.
        len: usize,
        /// Expected row length.
        expected: usize,
    },
    /// Flat data does not hold `size * size` entries.
    #[error("matrix data has {len} entries, expected {size}x{size}")]
    DataLength {
        /// Provided length.
        len: usize,
        /// Matrix dimension.
        size: usize,
    },
    /// A cost is negative or non-finite.
    #[error("cost from {from} to {to} is {value}; costs must be finite and non-negative")]
    InvalidCost {
        /// Source node.
        from: usize,
        /// Target node.
        to: usize,
        /// Offending value.
        value: f64,
    },
}

/// A dense n×n directed cost matrix stored in row-major order.
///
/// `get(i, j)` is the cost of travelling from node `i` to node `j`; the
/// matrix may be asymmetric.
///
/// # Examples
///
/// ```
/// use u_mdvrp::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 2.0, 5.0],
///     vec![3.0, 0.0, 1.0],
///     vec![5.0, 1.0, 0.0],
/// ]).unwrap();
/// assert_eq!(dm.get(0, 1), 2.0);
/// assert_eq!(dm.get(1, 0), 3.0);
/// assert_eq!(dm.path_cost(0, &[1, 2]), 3.0);
/// assert_eq!(dm.nearest_neighbor_chain(0, &[2, 1]), vec![1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a symmetric planar Euclidean matrix from coordinates,
    /// multiplied by `scale`.
    pub fn from_coordinates(coords: &[Coordinate], scale: f64) -> Self {
        let n = coords.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = coords[i].planar_distance_to(&coords[j]) * scale;
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit row-major n×n grid.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DataLength`] if the length is not
    /// `size * size`, or [`MatrixError::InvalidCost`] for a negative or
    /// non-finite entry.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self, MatrixError> {
        if data.len() != size * size {
            return Err(MatrixError::DataLength {
                len: data.len(),
                size,
            });
        }
        let dm = Self { data, size };
        dm.check_costs()?;
        Ok(dm)
    }

    /// Creates a distance matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotSquare`] for ragged input, or
    /// [`MatrixError::InvalidCost`] for a negative or non-finite entry.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(MatrixError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            data.extend(values);
        }
        Self::from_data(size, data)
    }

    fn check_costs(&self) -> Result<(), MatrixError> {
        match self
            .data
            .iter()
            .position(|c| !c.is_finite() || *c < 0.0)
        {
            Some(idx) => Err(MatrixError::InvalidCost {
                from: idx / self.size,
                to: idx % self.size,
                value: self.data[idx],
            }),
            None => Ok(()),
        }
    }

    /// Returns the cost from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the cost from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, cost: f64) {
        self.data[from * self.size + to] = cost;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cost of the open path `start → stops[0] → … → stops[n-1]`.
    ///
    /// An empty path costs zero.
    pub fn path_cost(&self, start: usize, stops: &[usize]) -> f64 {
        let Some(&first) = stops.first() else {
            return 0.0;
        };
        self.get(start, first) + stops.windows(2).map(|w| self.get(w[0], w[1])).sum::<f64>()
    }

    /// Orders `nodes` as a nearest-neighbor chain starting at `start`.
    ///
    /// Repeatedly moves to the unvisited node nearest the current one, with
    /// ties broken by the smallest index. `start` itself is not part of the
    /// output.
    pub fn nearest_neighbor_chain(&self, start: usize, nodes: &[usize]) -> Vec<usize> {
        let mut remaining = nodes.to_vec();
        let mut chain = Vec::with_capacity(remaining.len());
        let mut current = start;
        while let Some(pos) = self.nearest_position(current, &remaining) {
            current = remaining.swap_remove(pos);
            chain.push(current);
        }
        chain
    }

    fn nearest_position(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .enumerate()
            .min_by(|&(_, &a), &(_, &b)| self.compare_from(from, a, b))
            .map(|(pos, _)| pos)
    }

    fn compare_from(&self, from: usize, a: usize, b: usize) -> Ordering {
        self.get(from, a)
            .total_cmp(&self.get(from, b))
            .then(a.cmp(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_coords() -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(3.0, 4.0),
            Coordinate::new(0.0, 8.0),
        ]
    }

    #[test]
    fn test_from_coordinates() {
        let dm = DistanceMatrix::from_coordinates(&sample_coords(), 1.0);
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(0, 2) - 8.0).abs() < 1e-10);
        assert!((dm.get(0, 0)).abs() < 1e-10);
        assert_eq!(dm.get(2, 1), dm.get(1, 2));
    }

    #[test]
    fn test_from_coordinates_scaled() {
        let dm = DistanceMatrix::from_coordinates(&sample_coords(), 10.0);
        assert!((dm.get(1, 0) - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert_eq!(
            DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]),
            Err(MatrixError::DataLength { len: 3, size: 2 })
        );
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::NotSquare {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn test_rejects_negative_and_nan() {
        let err = DistanceMatrix::from_rows(vec![vec![0.0, -1.0], vec![1.0, 0.0]]).unwrap_err();
        assert!(matches!(err, MatrixError::InvalidCost { from: 0, to: 1, .. }));
        let err =
            DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![f64::NAN, 0.0]]).unwrap_err();
        assert!(matches!(err, MatrixError::InvalidCost { from: 1, to: 0, .. }));
    }

    #[test]
    fn test_empty_matrix() {
        let dm = DistanceMatrix::from_rows(vec![]).expect("empty is square");
        assert_eq!(dm.size(), 0);
    }

    #[test]
    fn test_path_cost_is_open() {
        let dm = DistanceMatrix::from_coordinates(&sample_coords(), 1.0);
        assert_eq!(dm.path_cost(0, &[]), 0.0);
        assert!((dm.path_cost(0, &[1]) - 5.0).abs() < 1e-10);
        // 0→1 (5) + 1→2 (5), no return leg
        assert!((dm.path_cost(0, &[1, 2]) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_nearest_neighbor_tie_breaks_by_index() {
        let dm = DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 1.0, 1.0],
            vec![1.0, 0.0, 1.0, 1.0],
            vec![1.0, 1.0, 0.0, 1.0],
            vec![1.0, 1.0, 1.0, 0.0],
        ])
        .expect("valid");
        assert_eq!(dm.nearest_neighbor_chain(0, &[3, 2, 1]), vec![1, 2, 3]);
    }

    #[test]
    fn test_nearest_neighbor_chain_follows_current_node() {
        // From 0 the nearest is 3; from 3 the nearest remaining is 1.
        let dm = DistanceMatrix::from_rows(vec![
            vec![0.0, 5.0, 6.0, 1.0],
            vec![5.0, 0.0, 9.0, 2.0],
            vec![6.0, 9.0, 0.0, 3.0],
            vec![1.0, 2.0, 3.0, 0.0],
        ])
        .expect("valid");
        assert_eq!(dm.nearest_neighbor_chain(0, &[1, 2, 3]), vec![3, 1, 2]);
        assert!(dm.nearest_neighbor_chain(0, &[]).is_empty());
    }

    #[test]
    fn test_asymmetric_matrix() {
        let mut dm = DistanceMatrix::new(2);
        dm.set(0, 1, 10.0);
        dm.set(1, 0, 15.0);
        assert_eq!(dm.path_cost(0, &[1]), 10.0);
        assert_eq!(dm.path_cost(1, &[0]), 15.0);
    }
}
