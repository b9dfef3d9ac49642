//! 2-opt segment reversal on one route.
//!
//! # Algorithm
//!
//! For cut positions `1 ≤ i < j < n` with `j - i > 1`, the candidate
//! reverses `route[i..j]`:
//!
//! ```text
//! r[..i] ++ reverse(r[i..j]) ++ r[j..]
//! ```
//!
//! The first and last stops never move. The matrix may be asymmetric, so
//! each candidate is re-costed in full rather than through an edge delta.
//!
//! # Complexity
//!
//! O(n³) per pass.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::DistanceMatrix;

/// Minimum route length for a 2-opt move.
pub(crate) const MIN_LEN: usize = 3;

/// Finds the 2-opt candidate of `route` with the lowest resulting makespan.
///
/// `others` is the longest cost among the other routes; a candidate's
/// makespan is `max(others, cost(candidate))`. Returns the candidate and its
/// makespan only if that makespan is strictly below `baseline`.
pub(crate) fn best_move(
    route: &[usize],
    depot: usize,
    distances: &DistanceMatrix,
    others: f64,
    baseline: f64,
) -> Option<(Vec<usize>, f64)> {
    let n = route.len();
    if n < MIN_LEN {
        return None;
    }

    let mut best: Option<(Vec<usize>, f64)> = None;
    let mut best_makespan = baseline;
    let mut candidate = Vec::with_capacity(n);

    for i in 1..n - 1 {
        for j in i + 2..n {
            candidate.clear();
            candidate.extend_from_slice(&route[..i]);
            candidate.extend(route[i..j].iter().rev());
            candidate.extend_from_slice(&route[j..]);

            let makespan = others.max(distances.path_cost(depot, &candidate));
            if makespan < best_makespan {
                best_makespan = makespan;
                best = Some((candidate.clone(), makespan));
            }
        }
    }

    best
}
