//! Capacity splitting of one depot's stops into vehicle trips.
//!
//! # Algorithm
//!
//! The depot's stops are ordered as a nearest-neighbor chain from the
//! depot. Walking the chain, demand accumulates into the current group; when
//! the next stop would overflow the vehicle capacity, the group is closed
//! and a new one starts with that stop. First-fit, single pass, never
//! rebalanced.

use crate::distance::DistanceMatrix;
use crate::error::InfeasibleError;
use crate::models::{within_limit, Instance, Vehicle};

use super::Assignment;

/// A capacity-feasible set of stops served by one vehicle trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Vehicle performing the trip.
    pub vehicle_id: usize,
    /// Depot the trip starts from.
    pub depot: usize,
    /// Stops in nearest-neighbor chain order.
    pub stops: Vec<usize>,
    /// Total demand of the stops.
    pub load: f64,
}

/// Splits `stops` (all assigned to `vehicle`'s depot) into capacity-feasible
/// groups.
///
/// # Errors
///
/// Returns [`InfeasibleError::StopExceedsCapacity`] if a single stop's demand
/// exceeds the vehicle capacity.
///
/// # Examples
///
/// ```
/// use u_mdvrp::assignment::split_by_capacity;
/// use u_mdvrp::distance::DistanceMatrix;
/// use u_mdvrp::models::{Instance, NodeLayout};
///
/// let rows = (0..4)
///     .map(|i| (0..4).map(|j| (i as f64 - j as f64).abs()).collect())
///     .collect();
/// let dm = DistanceMatrix::from_rows(rows).unwrap();
/// let instance = Instance::new(NodeLayout::new(1, 3), vec![1.0, 1.0, 1.0], vec![3.0], vec![2.0]);
///
/// let groups = split_by_capacity(&dm, &instance, &instance.vehicles()[0], &[3, 1, 2]).unwrap();
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].stops, vec![1, 2]);
/// assert_eq!(groups[1].stops, vec![3]);
/// ```
pub fn split_by_capacity(
    matrix: &DistanceMatrix,
    instance: &Instance,
    vehicle: &Vehicle,
    stops: &[usize],
) -> Result<Vec<Group>, InfeasibleError> {
    let capacity = vehicle.capacity();
    let new_group = || Group {
        vehicle_id: vehicle.id(),
        depot: vehicle.depot_id(),
        stops: Vec::new(),
        load: 0.0,
    };

    let mut groups = Vec::new();
    let mut current = new_group();

    for stop in matrix.nearest_neighbor_chain(vehicle.depot_id(), stops) {
        let demand = instance.demand_of(stop);
        if !within_limit(demand, capacity) {
            return Err(InfeasibleError::StopExceedsCapacity {
                stop,
                demand,
                vehicle_id: vehicle.id(),
                capacity,
            });
        }
        if !current.stops.is_empty() && !within_limit(current.load + demand, capacity) {
            groups.push(std::mem::replace(&mut current, new_group()));
        }
        current.stops.push(stop);
        current.load += demand;
    }

    if !current.stops.is_empty() {
        groups.push(current);
    }
    Ok(groups)
}

/// Splits every depot's assigned stops, in vehicle order.
///
/// # Errors
///
/// Propagates the first [`InfeasibleError`] from [`split_by_capacity`].
pub fn split_assignment(
    matrix: &DistanceMatrix,
    instance: &Instance,
    assignment: &Assignment,
) -> Result<Vec<Group>, InfeasibleError> {
    let mut groups = Vec::new();
    for vehicle in instance.vehicles() {
        let stops = assignment.stops_of(vehicle.depot_id());
        groups.extend(split_by_capacity(matrix, instance, vehicle, stops)?);
    }
    log::debug!("split assignment into {} groups", groups.len());
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::assign_to_depots;
    use crate::models::NodeLayout;
    use rstest::rstest;

    fn line_matrix(n: usize) -> DistanceMatrix {
        let rows = (0..n)
            .map(|i| (0..n).map(|j| (i as f64 - j as f64).abs()).collect())
            .collect();
        DistanceMatrix::from_rows(rows).expect("valid")
    }

    fn single_depot(demands: Vec<f64>, capacity: f64) -> Instance {
        let total = demands.iter().sum();
        Instance::new(
            NodeLayout::new(1, demands.len()),
            demands,
            vec![total],
            vec![capacity],
        )
    }

    #[rstest]
    #[case(10.0, vec![vec![1, 2, 3, 4]])]
    #[case(2.0, vec![vec![1, 2], vec![3, 4]])]
    #[case(3.0, vec![vec![1, 2, 3], vec![4]])]
    #[case(1.0, vec![vec![1], vec![2], vec![3], vec![4]])]
    fn test_groups_follow_chain(#[case] capacity: f64, #[case] expected: Vec<Vec<usize>>) {
        let dm = line_matrix(5);
        let instance = single_depot(vec![1.0; 4], capacity);
        let groups =
            split_by_capacity(&dm, &instance, &instance.vehicles()[0], &[4, 2, 3, 1]).expect("ok");
        let stops: Vec<Vec<usize>> = groups.iter().map(|g| g.stops.clone()).collect();
        assert_eq!(stops, expected);
        assert!(groups.iter().all(|g| g.load <= capacity));
    }

    #[test]
    fn test_first_fit_never_revisits() {
        // Demands 2, 2, 1 with capacity 3: chain 1, 2, 3 gives [1], [2, 3].
        let dm = line_matrix(4);
        let instance = single_depot(vec![2.0, 2.0, 1.0], 3.0);
        let groups =
            split_by_capacity(&dm, &instance, &instance.vehicles()[0], &[1, 2, 3]).expect("ok");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].stops, vec![1]);
        assert_eq!(groups[1].stops, vec![2, 3]);
        assert_eq!(groups[1].load, 3.0);
    }

    #[test]
    fn test_fractional_loads_fill_capacity() {
        // 0.1 + 0.2 + 0.3 rounds above 0.6; the trip still fits.
        let dm = line_matrix(4);
        let instance = single_depot(vec![0.1, 0.2, 0.3], 0.6);
        let groups =
            split_by_capacity(&dm, &instance, &instance.vehicles()[0], &[1, 2, 3]).expect("ok");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].stops, vec![1, 2, 3]);
    }

    #[test]
    fn test_oversized_stop_is_infeasible() {
        let dm = line_matrix(3);
        let instance = single_depot(vec![1.0, 5.0], 2.0);
        let err = split_by_capacity(&dm, &instance, &instance.vehicles()[0], &[1, 2])
            .expect_err("stop 2 exceeds capacity");
        assert_eq!(
            err,
            InfeasibleError::StopExceedsCapacity {
                stop: 2,
                demand: 5.0,
                vehicle_id: 0,
                capacity: 2.0
            }
        );
    }

    #[test]
    fn test_empty_stops_yield_no_groups() {
        let dm = line_matrix(1);
        let instance = single_depot(vec![], 1.0);
        let groups = split_by_capacity(&dm, &instance, &instance.vehicles()[0], &[]).expect("ok");
        assert!(groups.is_empty());
    }

    #[test]
    fn test_split_assignment_per_vehicle() {
        // Depots at 0 and 5 (nodes 0, 1); stops at 1, 2, 4, 6 (nodes 2..6).
        let positions = [0.0, 5.0, 1.0, 2.0, 4.0, 6.0];
        let rows = positions
            .iter()
            .map(|a| positions.iter().map(|b| f64::abs(a - b)).collect())
            .collect();
        let dm = DistanceMatrix::from_rows(rows).expect("valid");
        let instance = Instance::new(
            NodeLayout::new(2, 4),
            vec![1.0; 4],
            vec![4.0, 4.0],
            vec![1.0, 2.0],
        );
        let assignment = assign_to_depots(&dm, &instance).expect("feasible");
        let groups = split_assignment(&dm, &instance, &assignment).expect("feasible");

        let vehicle0: Vec<&Group> = groups.iter().filter(|g| g.vehicle_id == 0).collect();
        let vehicle1: Vec<&Group> = groups.iter().filter(|g| g.vehicle_id == 1).collect();
        assert_eq!(vehicle0.len(), 2);
        assert_eq!(vehicle1.len(), 1);
        assert_eq!(vehicle1[0].depot, 1);
        assert_eq!(vehicle1[0].stops, vec![4, 5]);
    }
}
