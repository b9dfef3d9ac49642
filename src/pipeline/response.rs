//! Solve result reported to callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::local_search::Neighborhood;
use crate::provider::TripSummary;

use super::Method;

/// One capacity-feasible trip as routed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupReport {
    /// Vehicle (and depot position) serving the trip.
    pub vehicle: usize,
    /// Depot node.
    pub depot: usize,
    /// Stop nodes in visiting order.
    pub stops: Vec<usize>,
    /// Total demand carried.
    pub load: f64,
    /// Open-path cost from the depot over `stops`.
    pub cost: f64,
}

/// Real-road trip of one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleTrip {
    /// Vehicle index.
    pub vehicle: usize,
    /// Trip metrics and geometry.
    #[serde(flatten)]
    pub summary: TripSummary,
}

/// Sums over all reported trips.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TripTotals {
    /// Total duration in seconds.
    pub duration: f64,
    /// Total distance in metres.
    pub distance: f64,
}

/// Result of a successful solve.
///
/// `routes[v]` is the concatenation of vehicle `v`'s trips in split order.
/// Node indices follow the request layout: depots first, then stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResponse {
    /// Method used.
    pub method: Method,
    /// Improvement pass applied, if any.
    pub improve: Option<Neighborhood>,
    /// Seed driving stochastic methods.
    pub seed: u64,
    /// Stop sequence per vehicle.
    pub routes: Vec<Vec<usize>>,
    /// Trips in the order they were routed.
    pub groups: Vec<GroupReport>,
    /// Stop node to depot node.
    pub assignment: BTreeMap<usize, usize>,
    /// Open-path cost per vehicle.
    pub vehicle_costs: Vec<f64>,
    /// Largest vehicle cost; the optimization objective.
    pub makespan_matrix: f64,
    /// Longest real-road trip duration, when trips were fetched.
    pub makespan_real: Option<f64>,
    /// Real-road trips for every vehicle with stops.
    pub trips: Vec<VehicleTrip>,
    /// Sums over `trips`, when trips were fetched.
    pub totals: Option<TripTotals>,
    /// Vehicle capacities used.
    pub vehicle_caps: Vec<f64>,
    /// Whether the improvement pass changed any trip.
    pub improve_accepted: bool,
}

impl SolveResponse {
    /// Number of stops on all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Vec::len).sum()
    }

    /// Serializes to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be represented, such as a
    /// non-finite cost.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Reduces trips to the real-road makespan and totals.
pub(crate) fn trip_metrics(trips: &[VehicleTrip]) -> (f64, TripTotals) {
    trips.iter().fold((0.0, TripTotals::default()), |(max, totals), t| {
        (
            f64::max(max, t.summary.duration),
            TripTotals {
                duration: totals.duration + t.summary.duration,
                distance: totals.distance + t.summary.distance,
            },
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(vehicle: usize, duration: f64, distance: f64) -> VehicleTrip {
        VehicleTrip {
            vehicle,
            summary: TripSummary {
                duration,
                distance,
                geometry: serde_json::Value::Null,
            },
        }
    }

    #[test]
    fn test_trip_metrics() {
        let (makespan, totals) = trip_metrics(&[trip(0, 120.0, 900.0), trip(1, 300.0, 100.0)]);
        assert_eq!(makespan, 300.0);
        assert_eq!(totals.duration, 420.0);
        assert_eq!(totals.distance, 1000.0);
    }

    #[test]
    fn test_trip_metrics_empty() {
        let (makespan, totals) = trip_metrics(&[]);
        assert_eq!(makespan, 0.0);
        assert_eq!(totals, TripTotals::default());
    }

    #[test]
    fn test_vehicle_trip_flattened() {
        let json = serde_json::to_value(trip(2, 1.0, 2.0)).expect("serialize");
        assert_eq!(json["vehicle"], 2);
        assert_eq!(json["duration"], 1.0);
        assert_eq!(json["distance"], 2.0);
    }
}
