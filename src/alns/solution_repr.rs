//! Lightweight solution representation for ALNS operators.
//!
//! Routes are stored as `Vec<Vec<usize>>` (stop sequences, one per depot)
//! with a separate list of removed stops awaiting repair. This allows cheap
//! insertion and removal without rebuilding full `Route` objects.

use crate::distance::DistanceMatrix;
use crate::models::Solution;

/// Multi-depot routing state for ALNS manipulation.
///
/// Route `v` starts at the `v`-th depot of the sub-problem being searched.
///
/// # Examples
///
/// ```
/// use u_mdvrp::alns::RoutingSolution;
///
/// let sol = RoutingSolution::new(vec![vec![2, 3], vec![]]);
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.num_assigned(), 2);
/// assert!(sol.removed().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingSolution {
    routes: Vec<Vec<usize>>,
    removed: Vec<usize>,
}

impl RoutingSolution {
    /// Creates a complete solution from route sequences.
    pub fn new(routes: Vec<Vec<usize>>) -> Self {
        Self {
            routes,
            removed: Vec::new(),
        }
    }

    /// Returns the routes as stop sequences.
    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    /// Returns mutable routes.
    pub fn routes_mut(&mut self) -> &mut Vec<Vec<usize>> {
        &mut self.routes
    }

    /// Stops removed by the last destroy step, in removal order.
    pub fn removed(&self) -> &[usize] {
        &self.removed
    }

    /// Returns the mutable removed list.
    pub fn removed_mut(&mut self) -> &mut Vec<usize> {
        &mut self.removed
    }

    /// Number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of stops currently on a route.
    pub fn num_assigned(&self) -> usize {
        self.routes.iter().map(Vec::len).sum()
    }

    /// Longest route cost, each route starting at its depot.
    pub fn makespan(&self, depots: &[usize], distances: &DistanceMatrix) -> f64 {
        depots
            .iter()
            .zip(&self.routes)
            .map(|(&d, r)| distances.path_cost(d, r))
            .fold(0.0, f64::max)
    }

    /// Converts into a costed [`Solution`].
    pub fn into_solution(self, depots: &[usize], distances: &DistanceMatrix) -> Solution {
        Solution::from_sequences(depots, self.routes, distances)
    }
}
