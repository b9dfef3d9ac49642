//! Solution and violation types.

use crate::distance::DistanceMatrix;

use super::Route;

/// A type of invariant violation in a solution.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// An input stop is not served by any route.
    MissingStop {
        /// Stop node index.
        stop: usize,
    },
    /// A stop is served more than once, within or across routes.
    DuplicateStop {
        /// Stop node index.
        stop: usize,
    },
    /// A route contains a node that is not a stop of the instance.
    UnknownNode {
        /// Route index in the solution.
        route_index: usize,
        /// Offending node index.
        node: usize,
    },
    /// Vehicle capacity exceeded on one trip.
    CapacityExceeded {
        /// Vehicle serving the trip.
        vehicle_id: usize,
        /// Load carried on the trip.
        load: f64,
        /// Vehicle capacity.
        capacity: f64,
    },
    /// Stops assigned to a depot demand more than its stock.
    StockExceeded {
        /// Depot node index.
        depot: usize,
        /// Total demand committed to the depot.
        committed: f64,
        /// Initial depot stock.
        stock: f64,
    },
}

/// An invariant violation in a solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A complete solution: one route per vehicle and the makespan.
///
/// # Examples
///
/// ```
/// use u_mdvrp::distance::DistanceMatrix;
/// use u_mdvrp::models::Solution;
///
/// let dm = DistanceMatrix::from_data(3, vec![
///     0.0, 4.0, 1.0,
///     4.0, 0.0, 9.0,
///     1.0, 9.0, 0.0,
/// ]).unwrap();
/// // Depots 0 and 1; stop 2 served from depot 0.
/// let sol = Solution::from_sequences(&[0, 1], vec![vec![2], vec![]], &dm);
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.makespan(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    routes: Vec<Route>,
    makespan: f64,
}

impl Solution {
    /// Builds a solution from per-vehicle stop sequences.
    ///
    /// Vehicle `v` starts at `depots[v]`; sequences beyond the number of
    /// depots are ignored.
    pub fn from_sequences(
        depots: &[usize],
        sequences: Vec<Vec<usize>>,
        matrix: &DistanceMatrix,
    ) -> Self {
        let routes: Vec<Route> = depots
            .iter()
            .zip(sequences)
            .enumerate()
            .map(|(v, (&d, stops))| Route::from_stops(v, d, stops, matrix))
            .collect();
        Self::from_routes(routes)
    }

    /// Builds a solution from already-costed routes.
    pub fn from_routes(routes: Vec<Route>) -> Self {
        let makespan = routes.iter().map(Route::cost).fold(0.0, f64::max);
        Self { routes, makespan }
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of routes (one per vehicle).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Longest single route cost.
    pub fn makespan(&self) -> f64 {
        self.makespan
    }

    /// Per-route matrix cost.
    pub fn route_costs(&self) -> Vec<f64> {
        self.routes.iter().map(Route::cost).collect()
    }

    /// Stop sequences per vehicle.
    pub fn sequences(&self) -> Vec<Vec<usize>> {
        self.routes.iter().map(|r| r.stops().to_vec()).collect()
    }

    /// Consumes the solution, returning the stop sequences per vehicle.
    pub fn into_sequences(self) -> Vec<Vec<usize>> {
        self.routes.into_iter().map(Route::into_stops).collect()
    }

    /// Total number of stops served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }
}
