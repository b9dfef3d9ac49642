//! Coverage, capacity, and stock verification.

use crate::assignment::Group;
use crate::models::{within_limit, Instance, Violation, ViolationType};

/// Checks a finished solution against its instance.
///
/// `routes[v]` is vehicle `v`'s full visit sequence (all of its trips
/// concatenated) and `trips` lists the capacity groups those sequences were
/// built from.
///
/// # Examples
///
/// ```
/// use u_mdvrp::assignment::Group;
/// use u_mdvrp::evaluation::SolutionChecker;
/// use u_mdvrp::models::{Instance, NodeLayout, ViolationType};
///
/// let instance = Instance::new(NodeLayout::new(1, 2), vec![1.0, 1.0], vec![2.0], vec![2.0]);
/// let checker = SolutionChecker::new(&instance);
///
/// let trips = vec![Group { vehicle_id: 0, depot: 0, stops: vec![1, 2], load: 2.0 }];
/// assert!(checker.check(&[vec![1, 2]], &trips).is_empty());
///
/// let violations = checker.check(&[vec![1]], &[]);
/// assert_eq!(violations[0].kind, ViolationType::MissingStop { stop: 2 });
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SolutionChecker<'a> {
    instance: &'a Instance,
}

impl<'a> SolutionChecker<'a> {
    /// Creates a checker for `instance`.
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    /// Returns every violation found; empty when the solution is valid.
    pub fn check(&self, routes: &[Vec<usize>], trips: &[Group]) -> Vec<Violation> {
        let mut violations = self.check_coverage(routes);
        violations.extend(self.check_capacity(trips));
        violations.extend(self.check_stock(routes));
        violations
    }

    /// Every stop served exactly once, and nothing but stops on routes.
    pub fn check_coverage(&self, routes: &[Vec<usize>]) -> Vec<Violation> {
        let layout = self.instance.layout();
        let mut seen = vec![0usize; layout.stop_count()];
        let mut violations = Vec::new();

        for (route_index, route) in routes.iter().enumerate() {
            for &node in route {
                match layout.stop_position(node) {
                    Some(pos) => seen[pos] += 1,
                    None => violations.push(Violation::new(ViolationType::UnknownNode {
                        route_index,
                        node,
                    })),
                }
            }
        }

        for (pos, &count) in seen.iter().enumerate() {
            let stop = layout.stop_node(pos);
            if count == 0 {
                violations.push(Violation::new(ViolationType::MissingStop { stop }));
            } else if count > 1 {
                violations.push(Violation::new(ViolationType::DuplicateStop { stop }));
            }
        }
        violations
    }

    /// Every trip's demand fits its vehicle.
    pub fn check_capacity(&self, trips: &[Group]) -> Vec<Violation> {
        let vehicles = self.instance.vehicles();
        trips
            .iter()
            .filter_map(|trip| {
                let capacity = vehicles.get(trip.vehicle_id)?.capacity();
                let load = self.load_of(&trip.stops);
                (!within_limit(load, capacity)).then(|| {
                    Violation::new(ViolationType::CapacityExceeded {
                        vehicle_id: trip.vehicle_id,
                        load,
                        capacity,
                    })
                })
            })
            .collect()
    }

    /// Every depot's committed demand fits its stock.
    pub fn check_stock(&self, routes: &[Vec<usize>]) -> Vec<Violation> {
        let stock = self.instance.stock();
        routes
            .iter()
            .enumerate()
            .filter_map(|(depot, route)| {
                let stock = *stock.get(depot)?;
                let committed = self.load_of(route);
                (!within_limit(committed, stock)).then(|| {
                    Violation::new(ViolationType::StockExceeded {
                        depot,
                        committed,
                        stock,
                    })
                })
            })
            .collect()
    }

    fn load_of(&self, stops: &[usize]) -> f64 {
        let layout = self.instance.layout();
        stops
            .iter()
            .filter(|&&s| layout.is_stop(s))
            .map(|&s| self.instance.demand_of(s))
            .sum()
    }
}
