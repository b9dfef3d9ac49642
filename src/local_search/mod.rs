//! Makespan-focused local search.
//!
//! Every pass works on the currently longest route only, since no other
//! route can lower the makespan.
//!
//! - [`two_opt()`]: segment reversal, needs ≥ 3 stops
//! - [`three_opt()`]: segment exchange with reversal, needs ≥ 4 stops
//! - [`LocalSearch`]: the configurable engine behind both, with budget
//!   polling and move statistics

mod engine;
mod three_opt;
mod two_opt;

pub use engine::{
    three_opt, two_opt, LocalSearch, LocalSearchConfig, LocalSearchOutcome, Neighborhood,
    ParseNeighborhoodError,
};
