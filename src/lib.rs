//! # u-mdvrp
//!
//! Multi-depot vehicle routing that minimizes makespan, the cost of the
//! longest vehicle route, under per-depot stock and per-vehicle capacity.
//!
//! A solve runs as a fixed pipeline: stock-aware depot assignment, a
//! capacity split into trips, route construction per trip (greedy, ACO,
//! ALNS, or an external CP backend), an optional 2-opt/3-opt pass, and
//! real-road trip reporting.
//!
//! ## Modules
//!
//! - [`models`]: coordinates, node layout, instances, routes, solutions
//! - [`distance`]: travel-cost matrix and open-path costs
//! - [`assignment`]: depot assignment and capacity split
//! - [`constructive`]: greedy construction and the constructor trait
//! - [`aco`]: ant colony construction
//! - [`alns`]: adaptive large neighborhood search
//! - [`local_search`]: makespan-driven 2-opt and 3-opt
//! - [`evaluation`]: coverage, capacity, and stock checks
//! - [`provider`]: matrix, trip, and CP backend collaborators
//! - [`pipeline`]: requests, the orchestrator, and responses
//! - [`error`]: typed solve errors
//!
//! ## Example
//!
//! ```
//! use u_mdvrp::models::Coordinate;
//! use u_mdvrp::pipeline::{Method, Orchestrator, SolveRequest};
//! use u_mdvrp::provider::{EuclideanMatrixProvider, NoTrips};
//!
//! let request = SolveRequest::new(
//!     vec![Coordinate::new(0.0, 0.0)],
//!     vec![Coordinate::new(0.0, 1.0), Coordinate::new(0.0, 2.0)],
//! )
//! .with_method(Method::Greedy);
//!
//! let response = Orchestrator::new(EuclideanMatrixProvider::default(), NoTrips)
//!     .solve(&request)
//!     .unwrap();
//! assert_eq!(response.routes, vec![vec![1, 2]]);
//! ```

pub mod aco;
pub mod alns;
pub mod assignment;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod pipeline;
pub mod provider;
