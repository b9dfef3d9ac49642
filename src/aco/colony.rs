//! Ant colony search loop.
//!
//! # Algorithm
//!
//! Each ant builds a full multi-depot solution. Vehicles take turns
//! (round-robin) extending their route by one stop until every stop is
//! visited. From node `i`, an unvisited stop `j` is chosen with probability
//! proportional to `τ(i,j)^α · (1 / (cost(i,j) + ε))^β`. After all ants of
//! an iteration finish, pheromone evaporates by `(1 - ρ)` on every edge, then
//! each ant deposits `1 / (1 + makespan)` on the edges it used, including
//! the depot's outgoing edge.
//!
//! # Reference
//!
//! Dorigo, M. & Stützle, T. (2004). *Ant Colony Optimization*, MIT Press.

use rand::Rng;

use crate::constructive::{greedy, RouteConstructor};
use crate::models::{Solution, SubProblem};
use crate::pipeline::SolveBudget;

use super::config::AcoConfig;

const COST_EPSILON: f64 = 1e-6;

/// Outcome of one colony run.
#[derive(Debug, Clone)]
pub struct AcoResult {
    /// Best solution built by any ant.
    pub best: Solution,
    /// Makespan of `best`.
    pub best_cost: f64,
    /// Iterations actually run.
    pub iterations: usize,
}

/// Pheromone over the nodes of one sub-problem, indexed locally.
///
/// Local index `k` maps to matrix node `nodes[k]`; depots come first.
struct Pheromone {
    values: Vec<f64>,
    size: usize,
}

impl Pheromone {
    fn new(size: usize, initial: f64) -> Self {
        Self {
            values: vec![initial; size * size],
            size,
        }
    }

    fn get(&self, from: usize, to: usize) -> f64 {
        self.values[from * self.size + to]
    }

    fn evaporate(&mut self, rho: f64) {
        for v in &mut self.values {
            *v *= 1.0 - rho;
        }
    }

    fn deposit(&mut self, from: usize, to: usize, amount: f64) {
        self.values[from * self.size + to] += amount;
    }
}

/// One ant's routes, in local indices.
struct Tour {
    routes: Vec<Vec<usize>>,
    makespan: f64,
}

/// Ant colony constructor minimising makespan.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_mdvrp::aco::{AcoConfig, AntColony};
/// use u_mdvrp::distance::DistanceMatrix;
/// use u_mdvrp::models::SubProblem;
/// use u_mdvrp::pipeline::SolveBudget;
///
/// let rows = (0..5)
///     .map(|i| (0..5).map(|j| (i as f64 - j as f64).abs()).collect())
///     .collect();
/// let dm = DistanceMatrix::from_rows(rows).unwrap();
/// let colony = AntColony::new(AcoConfig::default().with_iterations(10));
/// let mut rng = StdRng::seed_from_u64(42);
///
/// let problem = SubProblem::new(&dm, &[0], &[1, 2, 3, 4]);
/// let result = colony.run(&problem, &SolveBudget::unlimited(), &mut rng);
/// assert_eq!(result.best.num_served(), 4);
/// assert!(result.best_cost >= 4.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AntColony {
    config: AcoConfig,
}

impl AntColony {
    /// Creates a colony with the given configuration.
    pub fn new(config: AcoConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// Runs the colony on `problem`.
    ///
    /// If no ant completes (zero iterations, zero ants, or an exhausted
    /// budget), the result falls back to [`greedy`].
    pub fn run<R: Rng>(
        &self,
        problem: &SubProblem<'_>,
        budget: &SolveBudget,
        rng: &mut R,
    ) -> AcoResult {
        let depots = problem.depots();
        let matrix = problem.matrix();
        let nodes: Vec<usize> = depots.iter().chain(problem.stops()).copied().collect();
        let mut pheromone = Pheromone::new(nodes.len(), self.config.initial_pheromone);
        let mut best: Option<Tour> = None;
        let mut iterations = 0;

        for _ in 0..self.config.iterations {
            if budget.is_exhausted() {
                log::warn!(
                    "aco stopped after {} of {} iterations: budget exhausted",
                    iterations,
                    self.config.iterations
                );
                break;
            }

            let tours: Vec<Tour> = (0..self.config.ants)
                .map(|_| self.build_tour(&nodes, depots.len(), problem, &pheromone, rng))
                .collect();

            for tour in &tours {
                if best.as_ref().is_none_or(|b| tour.makespan < b.makespan) {
                    best = Some(Tour {
                        routes: tour.routes.clone(),
                        makespan: tour.makespan,
                    });
                }
            }

            pheromone.evaporate(self.config.rho);
            for tour in &tours {
                let amount = 1.0 / (1.0 + tour.makespan);
                for (v, route) in tour.routes.iter().enumerate() {
                    let mut prev = v;
                    for &next in route {
                        pheromone.deposit(prev, next, amount);
                        prev = next;
                    }
                }
            }
            iterations += 1;
        }

        let best = match best {
            Some(tour) => {
                let sequences = tour
                    .routes
                    .into_iter()
                    .map(|r| r.into_iter().map(|k| nodes[k]).collect())
                    .collect();
                Solution::from_sequences(depots, sequences, matrix)
            }
            None => {
                log::warn!("aco built no tour; falling back to greedy");
                greedy(problem)
            }
        };
        log::debug!(
            "aco: {} iterations, best makespan {:.3}",
            iterations,
            best.makespan()
        );

        AcoResult {
            best_cost: best.makespan(),
            best,
            iterations,
        }
    }

    fn build_tour<R: Rng>(
        &self,
        nodes: &[usize],
        depot_count: usize,
        problem: &SubProblem<'_>,
        pheromone: &Pheromone,
        rng: &mut R,
    ) -> Tour {
        let matrix = problem.matrix();
        let mut routes: Vec<Vec<usize>> = vec![Vec::new(); depot_count];
        let mut unvisited: Vec<usize> = (depot_count..nodes.len()).collect();
        let mut weights = Vec::with_capacity(unvisited.len());

        while !unvisited.is_empty() && depot_count > 0 {
            for (v, route) in routes.iter_mut().enumerate() {
                if unvisited.is_empty() {
                    break;
                }
                let current = route.last().copied().unwrap_or(v);

                weights.clear();
                weights.extend(unvisited.iter().map(|&j| {
                    let tau = pheromone.get(current, j).powf(self.config.alpha);
                    let eta = (1.0 / (matrix.get(nodes[current], nodes[j]) + COST_EPSILON))
                        .powf(self.config.beta);
                    tau * eta
                }));
                let pick = roulette(&weights, rng);
                route.push(unvisited.remove(pick));
            }
        }

        let makespan = routes
            .iter()
            .enumerate()
            .map(|(v, r)| {
                let stops: Vec<usize> = r.iter().map(|&k| nodes[k]).collect();
                matrix.path_cost(nodes[v], &stops)
            })
            .fold(0.0, f64::max);
        Tour { routes, makespan }
    }
}

/// Picks an index with probability proportional to `weights`.
///
/// Falls back to a uniform pick when the total weight is zero or not
/// finite, and to the last index if rounding leaves the cumulative sum short
/// of the draw.
fn roulette<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return rng.random_range(0..weights.len());
    }

    let r = rng.random::<f64>();
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w / total;
        if r <= cumulative {
            return i;
        }
    }
    weights.len() - 1
}

impl RouteConstructor for AntColony {
    fn name(&self) -> &str {
        "aco"
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
