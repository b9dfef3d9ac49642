//! Problem instances handed to the routing components.

use crate::distance::DistanceMatrix;

use super::{NodeLayout, Vehicle};

/// Relative slack allowed when comparing summed demand to a limit.
const LIMIT_TOLERANCE: f64 = 1e-9;

/// Returns `true` if `amount` fits within `limit`.
///
/// Demands are summed in different orders by assignment, splitting, and
/// checking, so the comparison allows a relative slack of `1e-9` (absolute
/// below `1.0`) to absorb rounding.
///
/// # Examples
///
/// ```
/// use u_mdvrp::models::within_limit;
///
/// assert!(within_limit(0.1 + 0.2 + 0.3, 0.6));
/// assert!(within_limit(2.0, 2.0));
/// assert!(!within_limit(2.001, 2.0));
/// ```
pub fn within_limit(amount: f64, limit: f64) -> bool {
    amount <= limit + LIMIT_TOLERANCE * limit.abs().max(1.0)
}

/// The immutable inputs of one multi-depot solve.
///
/// Demands are indexed by stop input position; stock and vehicles by depot.
/// Values are assumed to be validated (finite, non-negative, lengths
/// matching the layout) by the caller, typically
/// [`SolveRequest::validate`](crate::pipeline::SolveRequest::validate).
///
/// # Examples
///
/// ```
/// use u_mdvrp::models::{Instance, NodeLayout};
///
/// let instance = Instance::new(NodeLayout::new(1, 2), vec![1.0, 2.0], vec![3.0], vec![3.0]);
/// assert_eq!(instance.demand_of(2), 2.0);
/// assert_eq!(instance.total_demand(), 3.0);
/// assert_eq!(instance.vehicles()[0].capacity(), 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    layout: NodeLayout,
    demands: Vec<f64>,
    stock: Vec<f64>,
    vehicles: Vec<Vehicle>,
}

impl Instance {
    /// Creates an instance with one vehicle per depot.
    pub fn new(
        layout: NodeLayout,
        demands: Vec<f64>,
        stock: Vec<f64>,
        capacities: Vec<f64>,
    ) -> Self {
        let vehicles = capacities
            .into_iter()
            .enumerate()
            .map(|(id, cap)| Vehicle::new(id, cap))
            .collect();
        Self {
            layout,
            demands,
            stock,
            vehicles,
        }
    }

    /// Node layout (depot and stop index ranges).
    pub fn layout(&self) -> NodeLayout {
        self.layout
    }

    /// Demand per stop, by input position.
    pub fn demands(&self) -> &[f64] {
        &self.demands
    }

    /// Demand of stop node `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a stop of this instance.
    pub fn demand_of(&self, node: usize) -> f64 {
        self.demands[node - self.layout.depot_count()]
    }

    /// Initial stock per depot.
    pub fn stock(&self) -> &[f64] {
        &self.stock
    }

    /// Vehicles, one per depot.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Depot node indices.
    pub fn depot_nodes(&self) -> Vec<usize> {
        self.layout.depots().collect()
    }

    /// Stop node indices.
    pub fn stop_nodes(&self) -> Vec<usize> {
        self.layout.stops().collect()
    }

    /// Sum of all stop demands.
    pub fn total_demand(&self) -> f64 {
        self.demands.iter().sum()
    }

    /// Sum of demands over the given stop nodes.
    pub fn load_of(&self, stops: &[usize]) -> f64 {
        stops.iter().map(|&s| self.demand_of(s)).sum()
    }
}

/// A borrowed routing sub-problem: a matrix, the depots that start one
/// route each, and the stops to distribute among them.
///
/// Constructors operate on sub-problems; the pipeline hands them one
/// capacity-feasible group at a time with a single depot.
#[derive(Debug, Clone, Copy)]
pub struct SubProblem<'a> {
    matrix: &'a DistanceMatrix,
    depots: &'a [usize],
    stops: &'a [usize],
}

impl<'a> SubProblem<'a> {
    /// Creates a sub-problem over borrowed data.
    pub fn new(matrix: &'a DistanceMatrix, depots: &'a [usize], stops: &'a [usize]) -> Self {
        Self {
            matrix,
            depots,
            stops,
        }
    }

    /// The cost matrix.
    pub fn matrix(&self) -> &'a DistanceMatrix {
        self.matrix
    }

    /// Depot nodes, one per route.
    pub fn depots(&self) -> &'a [usize] {
        self.depots
    }

    /// Stop nodes to route.
    pub fn stops(&self) -> &'a [usize] {
        self.stops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_accessors() {
        let instance = Instance::new(
            NodeLayout::new(2, 3),
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0],
            vec![6.0, 7.0],
        );
        assert_eq!(instance.depot_nodes(), vec![0, 1]);
        assert_eq!(instance.stop_nodes(), vec![2, 3, 4]);
        assert_eq!(instance.demand_of(4), 3.0);
        assert_eq!(instance.load_of(&[2, 4]), 4.0);
        assert_eq!(instance.vehicles().len(), 2);
        assert_eq!(instance.vehicles()[1].depot_id(), 1);
    }

    #[test]
    fn test_within_limit_absorbs_rounding() {
        assert!(0.1 + 0.2 + 0.3 > 0.6);
        assert!(within_limit(0.1 + 0.2 + 0.3, 0.6));
        assert!(within_limit(0.0, 0.0));
        assert!(!within_limit(1e-6, 0.0));
        assert!(within_limit(1e12 + 1e2, 1e12));
        assert!(!within_limit(1e12 + 1e4, 1e12));
    }

    #[test]
    fn test_subproblem() {
        let dm = DistanceMatrix::new(3);
        let depots = [0];
        let stops = [1, 2];
        let sub = SubProblem::new(&dm, &depots, &stops);
        assert_eq!(sub.depots(), &[0]);
        assert_eq!(sub.stops(), &[1, 2]);
        assert_eq!(sub.matrix().size(), 3);
    }
}
