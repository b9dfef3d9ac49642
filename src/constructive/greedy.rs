//! Nearest-depot, nearest-neighbor greedy construction.
//!
//! Each stop goes to the depot with the cheapest `cost(depot, stop)`, then
//! every depot's stops are ordered as a nearest-neighbor chain starting at
//! the depot. Capacity is not considered here; the pipeline only hands this
//! constructor capacity-feasible groups.
//!
//! # Complexity
//!
//! O(n·d + n²) for n stops and d depots.

use rand::Rng;

use crate::models::{Solution, SubProblem};
use crate::pipeline::SolveBudget;

use super::RouteConstructor;

/// Builds routes by nearest-depot assignment and nearest-neighbor chaining.
///
/// Deterministic. Ties go to the lowest depot index and, within a chain, to
/// the lowest stop index.
///
/// # Examples
///
/// ```
/// use u_mdvrp::constructive::greedy;
/// use u_mdvrp::distance::DistanceMatrix;
/// use u_mdvrp::models::SubProblem;
///
/// let rows = (0..3)
///     .map(|i| (0..3).map(|j| (i as f64 - j as f64).abs()).collect())
///     .collect();
/// let dm = DistanceMatrix::from_rows(rows).unwrap();
/// let solution = greedy(&SubProblem::new(&dm, &[0], &[2, 1]));
///
/// assert_eq!(solution.sequences(), vec![vec![1, 2]]);
/// assert_eq!(solution.makespan(), dm.get(0, 1) + dm.get(1, 2));
/// ```
pub fn greedy(problem: &SubProblem<'_>) -> Solution {
    let matrix = problem.matrix();
    let depots = problem.depots();
    let sequences = depots
        .iter()
        .zip(&nearest_depot_buckets(problem))
        .map(|(&depot, stops)| matrix.nearest_neighbor_chain(depot, stops))
        .collect();
    Solution::from_sequences(depots, sequences, matrix)
}

/// Buckets each stop under its nearest depot, keeping input order.
///
/// Returns one bucket per entry of `problem.depots()`. Ties go to the
/// lowest depot position.
pub(crate) fn nearest_depot_buckets(problem: &SubProblem<'_>) -> Vec<Vec<usize>> {
    let matrix = problem.matrix();
    let depots = problem.depots();
    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); depots.len()];
    if depots.is_empty() {
        return buckets;
    }
    for &stop in problem.stops() {
        let mut best = 0;
        for (v, &depot) in depots.iter().enumerate().skip(1) {
            if matrix.get(depot, stop) < matrix.get(depots[best], stop) {
                best = v;
            }
        }
        buckets[best].push(stop);
    }
    buckets
}

/// [`RouteConstructor`] adapter for [`greedy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl RouteConstructor for Greedy {
    fn name(&self) -> &str {
        "greedy"
    }

    fn construct<R: Rng>(
        &self,
        problem: &SubProblem<'_>,
        _budget: &SolveBudget,
        _rng: &mut R,
    ) -> Solution {
        greedy(problem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;

    /// Depots at 0 and 10 (nodes 0, 1); stops at 1, 2, 8, 9 (nodes 2..6).
    fn two_depot_line() -> DistanceMatrix {
        let positions = [0.0, 10.0, 1.0, 2.0, 8.0, 9.0];
        let rows = positions
            .iter()
            .map(|a| positions.iter().map(|b| f64::abs(a - b)).collect())
            .collect();
        DistanceMatrix::from_rows(rows).expect("valid")
    }

    #[test]
    fn test_each_stop_goes_to_nearest_depot() {
        let dm = two_depot_line();
        let sol = greedy(&SubProblem::new(&dm, &[0, 1], &[5, 2, 4, 3]));
        assert_eq!(sol.sequences(), vec![vec![2, 3], vec![5, 4]]);
        assert_eq!(sol.route_costs(), vec![2.0, 2.0]);
        assert_eq!(sol.makespan(), 2.0);
    }

    #[test]
    fn test_single_stop_is_routed() {
        let dm = two_depot_line();
        let sol = greedy(&SubProblem::new(&dm, &[0], &[4]));
        assert_eq!(sol.sequences(), vec![vec![4]]);
        assert_eq!(sol.makespan(), 8.0);
    }

    #[test]
    fn test_depot_tie_prefers_first() {
        let dm = DistanceMatrix::from_rows(vec![
            vec![0.0, 0.0, 5.0],
            vec![0.0, 0.0, 5.0],
            vec![5.0, 5.0, 0.0],
        ])
        .expect("valid");
        let sol = greedy(&SubProblem::new(&dm, &[0, 1], &[2]));
        assert_eq!(sol.sequences(), vec![vec![2], vec![]]);
    }

    #[test]
    fn test_zero_stops() {
        let dm = two_depot_line();
        let sol = greedy(&SubProblem::new(&dm, &[0, 1], &[]));
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.num_served(), 0);
        assert_eq!(sol.makespan(), 0.0);
    }

    #[test]
    fn test_deterministic() {
        let dm = two_depot_line();
        let sub = SubProblem::new(&dm, &[0, 1], &[2, 3, 4, 5]);
        assert_eq!(greedy(&sub), greedy(&sub));
    }
}
