//! Deadline and cooperative cancellation for one solve.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Limits how long a solve may run.
///
/// Iterative components poll [`is_exhausted`](Self::is_exhausted) once per
/// iteration or pass and return their best-so-far when it turns true. The
/// default budget never runs out; iteration caps still bound every loop.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use u_mdvrp::pipeline::SolveBudget;
///
/// let flag = Arc::new(AtomicBool::new(false));
/// let budget = SolveBudget::unlimited().with_cancel_flag(Arc::clone(&flag));
/// assert!(!budget.is_exhausted());
///
/// flag.store(true, Ordering::Relaxed);
/// assert!(budget.is_exhausted());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolveBudget {
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
}

impl SolveBudget {
    /// A budget with no deadline and no cancellation flag.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Stops work at `deadline`.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Stops work `limit` from now.
    #[must_use]
    pub fn with_time_limit(self, limit: Duration) -> Self {
        let deadline = Instant::now() + limit;
        self.with_deadline(deadline)
    }

    /// Stops work once `flag` is set.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The configured deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` once the deadline has passed or cancellation was
    /// requested.
    pub fn is_exhausted(&self) -> bool {
        let cancelled = self
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed));
        cancelled || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_never_exhausts() {
        assert!(!SolveBudget::unlimited().is_exhausted());
    }

    #[test]
    fn test_past_deadline() {
        let budget = SolveBudget::unlimited().with_deadline(Instant::now());
        assert!(budget.is_exhausted());
    }

    #[test]
    fn test_future_deadline() {
        let budget = SolveBudget::unlimited().with_time_limit(Duration::from_secs(3600));
        assert!(!budget.is_exhausted());
        assert!(budget.deadline().is_some());
    }
}
