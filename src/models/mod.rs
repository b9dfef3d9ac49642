//! Domain model types for multi-depot routing.
//!
//! Provides the core abstractions: coordinates and the combined depot/stop
//! node layout, vehicles with capacity, routes as ordered stop sequences,
//! and solutions that aggregate one route per vehicle under a makespan
//! objective.

mod coordinate;
mod layout;
mod problem;
mod route;
mod solution;
mod vehicle;

pub use coordinate::Coordinate;
pub use layout::NodeLayout;
pub use problem::{within_limit, Instance, SubProblem};
pub use route::Route;
pub use solution::{Solution, Violation, ViolationType};
pub use vehicle::Vehicle;
