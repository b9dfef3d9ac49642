//! Route type.

use crate::distance::DistanceMatrix;

/// An ordered sequence of stops served by one vehicle.
///
/// A route starts at the vehicle's depot, which is never stored in `stops`.
/// Routes are open paths: the cost is the depot→first leg plus each
/// consecutive leg, with no return leg.
///
/// # Examples
///
/// ```
/// use u_mdvrp::distance::DistanceMatrix;
/// use u_mdvrp::models::Route;
///
/// let dm = DistanceMatrix::from_data(3, vec![
///     0.0, 1.0, 2.0,
///     1.0, 0.0, 1.0,
///     2.0, 1.0, 0.0,
/// ]).unwrap();
/// let route = Route::from_stops(0, 0, vec![1, 2], &dm);
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.cost(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    vehicle_id: usize,
    depot: usize,
    stops: Vec<usize>,
    cost: f64,
}

impl Route {
    /// Creates a route from a stop sequence, computing its cost.
    pub fn from_stops(
        vehicle_id: usize,
        depot: usize,
        stops: Vec<usize>,
        matrix: &DistanceMatrix,
    ) -> Self {
        let cost = matrix.path_cost(depot, &stops);
        Self {
            vehicle_id,
            depot,
            stops,
            cost,
        }
    }

    /// Vehicle serving this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Depot node the route starts from.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Stops in visit order.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Consumes the route, returning its stop sequence.
    pub fn into_stops(self) -> Vec<usize> {
        self.stops
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the route visits no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Matrix cost of the route.
    pub fn cost(&self) -> f64 {
        self.cost
    }
}
