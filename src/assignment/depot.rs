//! Nearest-first, stock-respecting depot assignment.
//!
//! # Algorithm
//!
//! Stops are processed in input order. For each stop, depots are ranked by
//! `cost(depot, stop)` (ties by depot index) and the stop goes to the first
//! depot whose committed demand plus the stop's demand stays within its stock
//! (see [`within_limit`]). There is no backtracking
//! and no split delivery: one stop that fits nowhere fails the whole
//! assignment.

use std::collections::BTreeMap;

use crate::distance::DistanceMatrix;
use crate::error::InfeasibleError;
use crate::models::{within_limit, Instance};

/// A stop → depot mapping with the stock it commits per depot.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    depot_of: BTreeMap<usize, usize>,
    stops_by_depot: Vec<Vec<usize>>,
    committed: Vec<f64>,
}

impl Assignment {
    fn with_depots(depot_count: usize) -> Self {
        Self {
            depot_of: BTreeMap::new(),
            stops_by_depot: vec![Vec::new(); depot_count],
            committed: vec![0.0; depot_count],
        }
    }

    fn assign(&mut self, stop: usize, depot: usize, demand: f64) {
        self.depot_of.insert(stop, depot);
        self.stops_by_depot[depot].push(stop);
        self.committed[depot] += demand;
    }

    /// Depot serving `stop`, if assigned.
    pub fn depot_of(&self, stop: usize) -> Option<usize> {
        self.depot_of.get(&stop).copied()
    }

    /// Stops assigned to `depot`, in assignment order.
    pub fn stops_of(&self, depot: usize) -> &[usize] {
        self.stops_by_depot
            .get(depot)
            .map_or(&[], Vec::as_slice)
    }

    /// Total demand committed to `depot`.
    pub fn committed(&self, depot: usize) -> f64 {
        self.committed.get(depot).copied().unwrap_or(0.0)
    }

    /// Full stop → depot map, ordered by stop index.
    pub fn as_map(&self) -> &BTreeMap<usize, usize> {
        &self.depot_of
    }

    /// Number of depots covered by this assignment.
    pub fn depot_count(&self) -> usize {
        self.stops_by_depot.len()
    }
}

/// Assigns every stop of `instance` to a depot, respecting depot stock.
///
/// # Errors
///
/// Returns [`InfeasibleError::InsufficientStock`] for the first stop that no
/// depot can supply.
///
/// # Examples
///
/// ```
/// use u_mdvrp::assignment::assign_to_depots;
/// use u_mdvrp::distance::DistanceMatrix;
/// use u_mdvrp::models::{Instance, NodeLayout};
///
/// // Depots 0, 1; stops 2, 3. Both stops are closer to depot 0,
/// // but depot 0 only stocks enough for one.
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 9.0, 1.0, 1.0],
///     vec![9.0, 0.0, 5.0, 5.0],
///     vec![1.0, 5.0, 0.0, 1.0],
///     vec![1.0, 5.0, 1.0, 0.0],
/// ]).unwrap();
/// let instance = Instance::new(NodeLayout::new(2, 2), vec![1.0, 1.0], vec![1.0, 5.0], vec![5.0, 5.0]);
///
/// let assignment = assign_to_depots(&dm, &instance).unwrap();
/// assert_eq!(assignment.depot_of(2), Some(0));
/// assert_eq!(assignment.depot_of(3), Some(1));
/// ```
pub fn assign_to_depots(
    matrix: &DistanceMatrix,
    instance: &Instance,
) -> Result<Assignment, InfeasibleError> {
    let layout = instance.layout();
    let stock = instance.stock();
    let mut assignment = Assignment::with_depots(layout.depot_count());

    for stop in layout.stops() {
        let demand = instance.demand_of(stop);
        let mut ranked: Vec<usize> = layout.depots().collect();
        ranked.sort_by(|&a, &b| {
            matrix
                .get(a, stop)
                .total_cmp(&matrix.get(b, stop))
                .then(a.cmp(&b))
        });

        let depot = ranked
            .into_iter()
            .find(|&d| within_limit(assignment.committed(d) + demand, stock[d]))
            .ok_or(InfeasibleError::InsufficientStock { stop, demand })?;

        assignment.assign(stop, depot, demand);
    }

    log::debug!(
        "assigned {} stops across {} depots",
        layout.stop_count(),
        layout.depot_count()
    );
    Ok(assignment)
}
