//! Destroy and repair operator traits.

use rand::Rng;

/// Removes part of a solution.
pub trait DestroyOperator<S> {
    /// Operator name for logging.
    fn name(&self) -> &str;

    /// Returns a partially destroyed copy of `solution`. `degree` is the
    /// share of assigned elements to remove.
    fn destroy<R: Rng>(&self, solution: &S, degree: f64, rng: &mut R) -> S;
}

/// Re-inserts what a [`DestroyOperator`] removed.
pub trait RepairOperator<S> {
    /// Operator name for logging.
    fn name(&self) -> &str;

    /// Returns a complete copy of `solution`.
    fn repair<R: Rng>(&self, solution: &S, rng: &mut R) -> S;
}
