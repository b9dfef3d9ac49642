//! Vehicle type with capacity and home depot.

/// A vehicle that serves the stops assigned to its home depot.
///
/// The model runs one vehicle per depot: vehicle `i` starts at depot node
/// `i` and may perform several capacity-feasible trips.
///
/// # Examples
///
/// ```
/// use u_mdvrp::models::Vehicle;
///
/// let v = Vehicle::new(1, 200.0);
/// assert_eq!(v.id(), 1);
/// assert_eq!(v.depot_id(), 1);
/// assert_eq!(v.capacity(), 200.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    id: usize,
    capacity: f64,
    depot_id: usize,
}

impl Vehicle {
    /// Creates a vehicle with the given ID and capacity, based at depot `id`.
    pub fn new(id: usize, capacity: f64) -> Self {
        Self {
            id,
            capacity,
            depot_id: id,
        }
    }

    /// Vehicle ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum load per trip.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Depot node the vehicle starts from.
    pub fn depot_id(&self) -> usize {
        self.depot_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_new() {
        let v = Vehicle::new(2, 50.0);
        assert_eq!(v.id(), 2);
        assert_eq!(v.depot_id(), 2);
        assert_eq!(v.capacity(), 50.0);
    }
}
