//! The solve pipeline.
//!
//! A [`SolveRequest`] is validated into a [`SolvePlan`], then the
//! [`Orchestrator`] runs depot assignment, the capacity split, one route
//! construction per group, the optional improvement pass, and trip
//! reporting, producing a [`SolveResponse`].

mod budget;
mod orchestrator;
mod request;
mod response;

pub use budget::SolveBudget;
pub use orchestrator::{Orchestrator, OrchestratorConfig};
pub use request::{Method, SolvePlan, SolveRequest};
pub use response::{GroupReport, SolveResponse, TripTotals, VehicleTrip};
