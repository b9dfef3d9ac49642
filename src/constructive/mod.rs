//! Route constructors for one routing sub-problem.
//!
//! - [`greedy`]: nearest-depot assignment plus nearest-neighbor chaining, O(n²)
//! - [`AntColony`](crate::aco::AntColony): pheromone-guided stochastic construction
//! - [`Alns`](crate::alns::Alns): destroy/repair search with simulated-annealing acceptance
//!
//! All three implement [`RouteConstructor`], which is how the pipeline
//! drives them.

mod greedy;

pub use greedy::{greedy, Greedy};
pub(crate) use greedy::nearest_depot_buckets;

use rand::Rng;

use crate::models::{Solution, SubProblem};
use crate::pipeline::SolveBudget;

/// Builds one route per depot covering every stop of a sub-problem.
///
/// Implementations must return exactly `problem.depots().len()` routes,
/// route `v` starting at `problem.depots()[v]`, with every stop appearing in
/// exactly one route. Iterative constructors poll `budget` and return their
/// best-so-far once it is exhausted.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_mdvrp::constructive::{Greedy, RouteConstructor};
/// use u_mdvrp::distance::DistanceMatrix;
/// use u_mdvrp::models::SubProblem;
/// use u_mdvrp::pipeline::SolveBudget;
///
/// let dm = DistanceMatrix::new(3);
/// let mut rng = StdRng::seed_from_u64(7);
/// let sol = Greedy.construct(&SubProblem::new(&dm, &[0], &[1, 2]), &SolveBudget::unlimited(), &mut rng);
/// assert_eq!(sol.num_served(), 2);
/// ```
pub trait RouteConstructor {
    /// Short identifier used in logs and responses.
    fn name(&self) -> &str;

    /// Builds a solution for `problem`.
    fn construct<R: Rng>(
        &self,
        problem: &SubProblem<'_>,
        budget: &SolveBudget,
        rng: &mut R,
    ) -> Solution;
}
