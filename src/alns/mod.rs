//! ALNS (Adaptive Large Neighborhood Search) route construction.
//!
//! - [`Alns`]: the search loop with simulated-annealing acceptance
//! - [`AlnsConfig`]: iteration budget, destroy size, and cooling schedule
//! - [`RoutingSolution`]: lightweight state manipulated by operators
//! - [`destroy`]: destroy operators (random removal)
//! - [`repair`]: repair operators (greedy insertion)

mod config;
pub mod destroy;
mod operator;
pub mod repair;
mod runner;
mod solution_repr;

pub use config::AlnsConfig;
pub use operator::{DestroyOperator, RepairOperator};
pub use runner::{Alns, AlnsResult};
pub use solution_repr::RoutingSolution;
