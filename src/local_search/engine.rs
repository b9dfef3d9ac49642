//! Makespan-driven improvement loop.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::pipeline::SolveBudget;

/// Neighborhood explored by [`LocalSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Neighborhood {
    /// Segment reversal.
    #[serde(rename = "2opt")]
    TwoOpt,
    /// Segment exchange with optional reversal.
    #[serde(rename = "3opt")]
    ThreeOpt,
}

impl Neighborhood {
    /// Wire name: `"2opt"` or `"3opt"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TwoOpt => "2opt",
            Self::ThreeOpt => "3opt",
        }
    }

    /// Shortest route the neighborhood can change.
    pub fn min_route_len(&self) -> usize {
        match self {
            Self::TwoOpt => super::two_opt::MIN_LEN,
            Self::ThreeOpt => super::three_opt::MIN_LEN,
        }
    }

    fn best_move(
        &self,
        route: &[usize],
        depot: usize,
        distances: &DistanceMatrix,
        others: f64,
        baseline: f64,
    ) -> Option<(Vec<usize>, f64)> {
        match self {
            Self::TwoOpt => super::two_opt::best_move(route, depot, distances, others, baseline),
            Self::ThreeOpt => {
                super::three_opt::best_move(route, depot, distances, others, baseline)
            }
        }
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized neighborhood name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown neighborhood {0:?}")]
pub struct ParseNeighborhoodError(pub String);

impl FromStr for Neighborhood {
    type Err = ParseNeighborhoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2opt" => Ok(Self::TwoOpt),
            "3opt" => Ok(Self::ThreeOpt),
            other => Err(ParseNeighborhoodError(other.to_string())),
        }
    }
}

/// Pass caps for [`LocalSearch`].
///
/// # Examples
///
/// ```
/// use u_mdvrp::local_search::LocalSearchConfig;
///
/// let config = LocalSearchConfig::default().with_two_opt_passes(50);
/// assert_eq!(config.two_opt_passes, 50);
/// assert_eq!(config.three_opt_passes, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSearchConfig {
    /// Maximum 2-opt passes.
    pub two_opt_passes: usize,
    /// Maximum 3-opt passes.
    pub three_opt_passes: usize,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            two_opt_passes: 200,
            three_opt_passes: 100,
        }
    }
}

impl LocalSearchConfig {
    /// Sets the 2-opt pass cap.
    pub fn with_two_opt_passes(mut self, n: usize) -> Self {
        self.two_opt_passes = n;
        self
    }

    /// Sets the 3-opt pass cap.
    pub fn with_three_opt_passes(mut self, n: usize) -> Self {
        self.three_opt_passes = n;
        self
    }

    /// Pass cap for `neighborhood`.
    pub fn max_passes(&self, neighborhood: Neighborhood) -> usize {
        match neighborhood {
            Neighborhood::TwoOpt => self.two_opt_passes,
            Neighborhood::ThreeOpt => self.three_opt_passes,
        }
    }
}

/// Result of [`LocalSearch::improve`].
#[derive(Debug, Clone, PartialEq)]
pub struct LocalSearchOutcome {
    /// Improved routes, one per depot.
    pub routes: Vec<Vec<usize>>,
    /// Makespan before the search.
    pub initial_makespan: f64,
    /// Makespan after the search; never above `initial_makespan`.
    pub makespan: f64,
    /// Accepted moves.
    pub moves: usize,
}

impl LocalSearchOutcome {
    /// Returns `true` if any move was accepted.
    pub fn improved(&self) -> bool {
        self.moves > 0
    }
}

/// Best-improvement local search on the longest route.
///
/// Each pass finds the longest route (first among ties), searches its
/// neighborhood for the candidate with the lowest resulting makespan, and
/// applies it only if the makespan strictly drops. The search ends when a
/// pass finds nothing, the longest route is too short for the neighborhood,
/// the pass cap is reached, or the budget runs out.
///
/// # Examples
///
/// ```
/// use u_mdvrp::distance::DistanceMatrix;
/// use u_mdvrp::local_search::{LocalSearch, Neighborhood};
/// use u_mdvrp::pipeline::SolveBudget;
///
/// let rows = (0..5)
///     .map(|i| (0..5).map(|j| (i as f64 - j as f64).abs()).collect())
///     .collect();
/// let dm = DistanceMatrix::from_rows(rows).unwrap();
///
/// let outcome = LocalSearch::default().improve(
///     Neighborhood::TwoOpt,
///     &[vec![1, 3, 2, 4]],
///     &dm,
///     &[0],
///     &SolveBudget::unlimited(),
/// );
/// assert_eq!(outcome.routes, vec![vec![1, 2, 3, 4]]);
/// assert_eq!(outcome.makespan, 4.0);
/// assert!(outcome.improved());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalSearch {
    config: LocalSearchConfig,
}

impl LocalSearch {
    /// Creates an engine with the given pass caps.
    pub fn new(config: LocalSearchConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &LocalSearchConfig {
        &self.config
    }

    /// Improves a copy of `routes`; route `v` starts at `depots[v]`.
    pub fn improve(
        &self,
        neighborhood: Neighborhood,
        routes: &[Vec<usize>],
        distances: &DistanceMatrix,
        depots: &[usize],
        budget: &SolveBudget,
    ) -> LocalSearchOutcome {
        let mut current = routes.to_vec();
        let mut costs: Vec<f64> = depots
            .iter()
            .zip(&current)
            .map(|(&d, r)| distances.path_cost(d, r))
            .collect();
        let initial_makespan = costs.iter().copied().fold(0.0, f64::max);
        let mut makespan = initial_makespan;
        let mut moves = 0;

        for _ in 0..self.config.max_passes(neighborhood) {
            if budget.is_exhausted() {
                log::warn!("{neighborhood} stopped after {moves} moves: budget exhausted");
                break;
            }
            let Some(longest) = longest_route(&costs) else {
                break;
            };
            if current[longest].len() < neighborhood.min_route_len() {
                break;
            }

            let others = costs
                .iter()
                .enumerate()
                .filter(|&(v, _)| v != longest)
                .map(|(_, &c)| c)
                .fold(0.0, f64::max);
            let Some((route, new_makespan)) = neighborhood.best_move(
                &current[longest],
                depots[longest],
                distances,
                others,
                makespan,
            ) else {
                break;
            };

            costs[longest] = distances.path_cost(depots[longest], &route);
            current[longest] = route;
            makespan = new_makespan;
            moves += 1;
        }

        log::debug!("{neighborhood}: {moves} moves, makespan {initial_makespan:.3} -> {makespan:.3}");
        LocalSearchOutcome {
            routes: current,
            initial_makespan,
            makespan,
            moves,
        }
    }
}

/// Index of the costliest route; the first one among ties.
fn longest_route(costs: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (v, &c) in costs.iter().enumerate() {
        if best.is_none_or(|b| c > costs[b]) {
            best = Some(v);
        }
    }
    best
}

/// Applies 2-opt to the longest route until the makespan stops improving.
///
/// Pure: works on a copy and never increases the makespan.
///
/// # Examples
///
/// ```
/// use u_mdvrp::distance::DistanceMatrix;
/// use u_mdvrp::local_search::two_opt;
///
/// let rows = (0..5)
///     .map(|i| (0..5).map(|j| (i as f64 - j as f64).abs()).collect())
///     .collect();
/// let dm = DistanceMatrix::from_rows(rows).unwrap();
/// let improved = two_opt(&[vec![1, 3, 2, 4]], &dm, &[0]);
/// assert_eq!(improved, vec![vec![1, 2, 3, 4]]);
/// ```
pub fn two_opt(
    routes: &[Vec<usize>],
    distances: &DistanceMatrix,
    depots: &[usize],
) -> Vec<Vec<usize>> {
    LocalSearch::default()
        .improve(
            Neighborhood::TwoOpt,
            routes,
            distances,
            depots,
            &SolveBudget::unlimited(),
        )
        .routes
}

/// Applies 3-opt to the longest route until the makespan stops improving.
///
/// Pure: works on a copy and never increases the makespan.
pub fn three_opt(
    routes: &[Vec<usize>],
    distances: &DistanceMatrix,
    depots: &[usize],
) -> Vec<Vec<usize>> {
    LocalSearch::default()
        .improve(
            Neighborhood::ThreeOpt,
            routes,
            distances,
            depots,
            &SolveBudget::unlimited(),
        )
        .routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn line(n: usize) -> DistanceMatrix {
        let rows = (0..n)
            .map(|i| (0..n).map(|j| (i as f64 - j as f64).abs()).collect())
            .collect();
        DistanceMatrix::from_rows(rows).expect("valid")
    }

    #[rstest]
    #[case("2opt", Neighborhood::TwoOpt)]
    #[case("3opt", Neighborhood::ThreeOpt)]
    fn test_parse_round_trip(#[case] name: &str, #[case] expected: Neighborhood) {
        let parsed: Neighborhood = name.parse().expect("known");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.to_string(), name);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "4opt".parse::<Neighborhood>(),
            Err(ParseNeighborhoodError("4opt".to_string()))
        );
    }

    #[test]
    fn test_longest_route_first_among_ties() {
        assert_eq!(longest_route(&[1.0, 3.0, 3.0]), Some(1));
        assert_eq!(longest_route(&[]), None);
    }

    #[test]
    fn test_only_longest_route_changes() {
        let dm = line(9);
        // Depots 0 and 8. Route 0 is long and crossed; route 1 is crossed
        // too but shorter, so it is left alone.
        let routes = vec![vec![1, 3, 2, 4, 6, 5, 7], vec![7, 6]];
        let outcome = LocalSearch::default().improve(
            Neighborhood::TwoOpt,
            &routes,
            &dm,
            &[0, 8],
            &SolveBudget::unlimited(),
        );
        assert_eq!(outcome.routes[0], vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(outcome.routes[1], vec![7, 6]);
        assert_eq!(outcome.makespan, 7.0);
        assert_eq!(outcome.initial_makespan, 11.0);
    }

    #[test]
    fn test_tied_longest_routes_block_improvement() {
        let dm = line(5);
        // Two identical crossed routes from depot 0: fixing one leaves the
        // other at the same makespan.
        let routes = vec![vec![1, 3, 2, 4], vec![1, 3, 2, 4]];
        let outcome = LocalSearch::default().improve(
            Neighborhood::TwoOpt,
            &routes,
            &dm,
            &[0, 0],
            &SolveBudget::unlimited(),
        );
        assert_eq!(outcome.routes, routes);
        assert!(!outcome.improved());
    }

    #[test]
    fn test_three_opt_short_route_unchanged() {
        let dm = line(4);
        let routes = vec![vec![3, 1, 2]];
        assert_eq!(three_opt(&routes, &dm, &[0]), routes);
    }

    #[test]
    fn test_zero_pass_cap() {
        let dm = line(5);
        let engine = LocalSearch::new(LocalSearchConfig::default().with_two_opt_passes(0));
        let outcome = engine.improve(
            Neighborhood::TwoOpt,
            &[vec![1, 3, 2, 4]],
            &dm,
            &[0],
            &SolveBudget::unlimited(),
        );
        assert_eq!(outcome.routes, vec![vec![1, 3, 2, 4]]);
        assert_eq!(outcome.moves, 0);
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let dm = line(8);
        let routes = vec![vec![5, 1, 7, 3, 2, 6, 4]];
        let once = two_opt(&routes, &dm, &[0]);
        assert_eq!(two_opt(&once, &dm, &[0]), once);
        let once = three_opt(&routes, &dm, &[0]);
        assert_eq!(three_opt(&once, &dm, &[0]), once);
    }
}
