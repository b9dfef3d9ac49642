//! Solution invariant checks.
//!
//! [`SolutionChecker`] verifies coverage, capacity, and stock rules against
//! the [`Instance`](crate::models::Instance) a solution was built for.

mod checker;

pub use checker::SolutionChecker;
