//! Repair operators for ALNS.

use rand::Rng;

use crate::distance::DistanceMatrix;
use crate::models::SubProblem;

use super::operator::RepairOperator;
use super::solution_repr::RoutingSolution;

/// Finds the cheapest insertion of `stop` across all routes.
///
/// Routes are open paths from their depot, so appending costs only the
/// incoming edge. An empty route costs `cost(depot, stop)`.
///
/// Returns `(route_index, position, cost_increase)`; the first candidate wins
/// ties.
fn best_insertion(
    routes: &[Vec<usize>],
    depots: &[usize],
    stop: usize,
    distances: &DistanceMatrix,
) -> Option<(usize, usize, f64)> {
    let mut best: Option<(usize, usize, f64)> = None;

    for (ri, (route, &depot)) in routes.iter().zip(depots).enumerate() {
        for pos in 0..=route.len() {
            let prev = if pos == 0 { depot } else { route[pos - 1] };
            let cost = match route.get(pos) {
                Some(&next) => {
                    distances.get(prev, stop) + distances.get(stop, next)
                        - distances.get(prev, next)
                }
                None => distances.get(prev, stop),
            };

            if best.as_ref().is_none_or(|b| cost < b.2) {
                best = Some((ri, pos, cost));
            }
        }
    }

    best
}

/// Greedy insertion: re-inserts removed stops one at a time, in removal
/// order, each at its globally cheapest position.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_mdvrp::alns::repair::GreedyInsertion;
/// use u_mdvrp::alns::{RepairOperator, RoutingSolution};
/// use u_mdvrp::distance::DistanceMatrix;
/// use u_mdvrp::models::SubProblem;
///
/// let rows = (0..4)
///     .map(|i| (0..4).map(|j| (i as f64 - j as f64).abs()).collect())
///     .collect();
/// let dm = DistanceMatrix::from_rows(rows).unwrap();
/// let mut partial = RoutingSolution::new(vec![vec![1, 3]]);
/// partial.removed_mut().push(2);
///
/// let repair = GreedyInsertion::new(SubProblem::new(&dm, &[0], &[1, 2, 3]));
/// let repaired = repair.repair(&partial, &mut StdRng::seed_from_u64(0));
/// assert_eq!(repaired.routes(), &[vec![1, 2, 3]]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GreedyInsertion<'a> {
    problem: SubProblem<'a>,
}

impl<'a> GreedyInsertion<'a> {
    /// Creates a greedy insertion operator for `problem`.
    pub fn new(problem: SubProblem<'a>) -> Self {
        Self { problem }
    }
}

impl RepairOperator<RoutingSolution> for GreedyInsertion<'_> {
    fn name(&self) -> &str {
        "greedy_insertion"
    }

    fn repair<R: Rng>(&self, solution: &RoutingSolution, _rng: &mut R) -> RoutingSolution {
        let mut sol = solution.clone();
        let removed = std::mem::take(sol.removed_mut());
        let depots = self.problem.depots();
        let distances = self.problem.matrix();

        for (i, &stop) in removed.iter().enumerate() {
            match best_insertion(sol.routes(), depots, stop, distances) {
                Some((ri, pos, _)) => sol.routes_mut()[ri].insert(pos, stop),
                None => {
                    // No route to insert into; keep the rest pending.
                    sol.removed_mut().extend_from_slice(&removed[i..]);
                    break;
                }
            }
        }

        sol
    }
}
