//! Ant colony route construction.
//!
//! - [`AntColony`]: pheromone-guided stochastic construction under a
//!   makespan objective
//! - [`AcoConfig`]: colony size, iterations, and pheromone parameters

mod colony;
mod config;

pub use colony::{AcoResult, AntColony};
pub use config::AcoConfig;
