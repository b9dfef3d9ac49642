//! Travel cost matrices.
//!
//! Provides a dense, directed cost matrix over the combined depot/stop node
//! array, with path costing and nearest-neighbour queries.

mod matrix;

pub use matrix::{DistanceMatrix, MatrixError};
