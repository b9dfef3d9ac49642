//! Destroy operators for ALNS.
//!
//! # Reference
//!
//! Ropke, S. & Pisinger, D. (2006). "An Adaptive Large Neighborhood Search
//! Heuristic for the Pickup and Delivery Problem with Time Windows",
//! *Transportation Science* 40(4), 455-472.

use rand::Rng;

use super::operator::DestroyOperator;
use super::solution_repr::RoutingSolution;

/// Removes random stops from the solution.
///
/// Removes `ceil(degree · assigned)` stops. Each removal first picks a
/// uniformly random non-empty route, then a uniformly random position in it,
/// so stops on short routes are more likely to be picked than under uniform
/// stop sampling. Stops once every route is empty. Empty routes are kept;
/// their depot stays available for repair.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_mdvrp::alns::destroy::RandomRemoval;
/// use u_mdvrp::alns::{DestroyOperator, RoutingSolution};
///
/// let sol = RoutingSolution::new(vec![vec![2, 3, 4, 5, 6]]);
/// let mut rng = StdRng::seed_from_u64(42);
///
/// let destroyed = RandomRemoval.destroy(&sol, 0.2, &mut rng);
/// assert_eq!(destroyed.removed().len(), 1);
/// assert_eq!(destroyed.num_assigned(), 4);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRemoval;

/// Number of stops a destroy step of `degree` removes from `assigned`.
pub(crate) fn removal_count(assigned: usize, degree: f64) -> usize {
    (assigned as f64 * degree).ceil() as usize
}

impl DestroyOperator<RoutingSolution> for RandomRemoval {
    fn name(&self) -> &str {
        "random_removal"
    }

    fn destroy<R: Rng>(
        &self,
        solution: &RoutingSolution,
        degree: f64,
        rng: &mut R,
    ) -> RoutingSolution {
        let mut sol = solution.clone();
        let num_remove = removal_count(sol.num_assigned(), degree);

        for _ in 0..num_remove {
            let non_empty: Vec<usize> = sol
                .routes()
                .iter()
                .enumerate()
                .filter(|(_, r)| !r.is_empty())
                .map(|(i, _)| i)
                .collect();
            if non_empty.is_empty() {
                break;
            }

            let route = non_empty[rng.random_range(0..non_empty.len())];
            let len = sol.routes()[route].len();
            let stop = sol.routes_mut()[route].remove(rng.random_range(0..len));
            sol.removed_mut().push(stop);
        }

        sol
    }
}
