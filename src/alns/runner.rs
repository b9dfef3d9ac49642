//! ALNS search loop with simulated-annealing acceptance.

use rand::Rng;

use crate::constructive::{nearest_depot_buckets, RouteConstructor};
use crate::models::{Solution, SubProblem};
use crate::pipeline::SolveBudget;

use super::config::AlnsConfig;
use super::destroy::RandomRemoval;
use super::operator::{DestroyOperator, RepairOperator};
use super::repair::GreedyInsertion;
use super::solution_repr::RoutingSolution;

/// Outcome of one ALNS run.
#[derive(Debug, Clone)]
pub struct AlnsResult {
    /// Best solution visited.
    pub best: Solution,
    /// Makespan of `best`.
    pub best_cost: f64,
    /// Best makespan after each completed iteration; non-increasing.
    pub trace: Vec<f64>,
    /// Number of accepted candidates.
    pub accepted: usize,
}

impl AlnsResult {
    /// Iterations actually run; fewer than configured when the budget ran
    /// out.
    pub fn iterations(&self) -> usize {
        self.trace.len()
    }
}

/// Adaptive large neighborhood search minimising makespan.
///
/// Starts from nearest-depot buckets with stops in input order, then
/// repeatedly applies [`RandomRemoval`] and [`GreedyInsertion`]. A candidate
/// is accepted when it improves the current makespan, or otherwise with
/// probability `exp(-(candidate - current) / T)`. `T` starts at a share of
/// the initial makespan and decays geometrically each iteration.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_mdvrp::alns::{Alns, AlnsConfig};
/// use u_mdvrp::distance::DistanceMatrix;
/// use u_mdvrp::models::SubProblem;
/// use u_mdvrp::pipeline::SolveBudget;
///
/// let rows = (0..5)
///     .map(|i| (0..5).map(|j| (i as f64 - j as f64).abs()).collect())
///     .collect();
/// let dm = DistanceMatrix::from_rows(rows).unwrap();
/// let alns = Alns::new(AlnsConfig::default().with_max_iterations(50));
/// let mut rng = StdRng::seed_from_u64(42);
///
/// let problem = SubProblem::new(&dm, &[0], &[4, 2, 3, 1]);
/// let result = alns.run(&problem, &SolveBudget::unlimited(), &mut rng);
/// assert_eq!(result.best.num_served(), 4);
/// assert!(result.best_cost <= 10.0);
/// assert_eq!(result.iterations(), 50);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Alns {
    config: AlnsConfig,
}

impl Alns {
    /// Creates a runner with the given configuration.
    pub fn new(config: AlnsConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &AlnsConfig {
        &self.config
    }

    /// Runs the search on `problem`.
    pub fn run<R: Rng>(
        &self,
        problem: &SubProblem<'_>,
        budget: &SolveBudget,
        rng: &mut R,
    ) -> AlnsResult {
        let depots = problem.depots();
        let matrix = problem.matrix();
        let destroy = RandomRemoval;
        let repair = GreedyInsertion::new(*problem);

        let mut current = RoutingSolution::new(nearest_depot_buckets(problem));
        let mut current_cost = current.makespan(depots, matrix);
        let mut best = current.clone();
        let mut best_cost = current_cost;
        let mut temperature = self.config.initial_temperature(current_cost);
        let mut trace = Vec::with_capacity(self.config.max_iterations);
        let mut accepted = 0;

        for _ in 0..self.config.max_iterations {
            if budget.is_exhausted() {
                log::warn!(
                    "alns stopped after {} of {} iterations: budget exhausted",
                    trace.len(),
                    self.config.max_iterations
                );
                break;
            }

            let destroyed = destroy.destroy(&current, self.config.destroy_fraction, rng);
            let candidate = repair.repair(&destroyed, rng);
            let cost = candidate.makespan(depots, matrix);

            if cost < current_cost
                || rng.random::<f64>() < (-(cost - current_cost) / temperature).exp()
            {
                if cost < best_cost {
                    best = candidate.clone();
                    best_cost = cost;
                }
                current = candidate;
                current_cost = cost;
                accepted += 1;
            }

            temperature *= self.config.cooling_rate;
            trace.push(best_cost);
        }

        log::debug!(
            "alns: {} iterations, {} accepted, best makespan {:.3}",
            trace.len(),
            accepted,
            best_cost
        );

        AlnsResult {
            best: best.into_solution(depots, matrix),
            best_cost,
            trace,
            accepted,
        }
    }
}

impl RouteConstructor for Alns {
    fn name(&self) -> &str {
        "alns"
    }

    fn construct<R: Rng>(
        &self,
        problem: &SubProblem<'_>,
        budget: &SolveBudget,
        rng: &mut R,
    ) -> Solution {
        self.run(problem, budget, rng).best
    }
}
