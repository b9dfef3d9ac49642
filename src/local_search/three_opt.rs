//! 3-opt segment exchange on one route.
//!
//! # Algorithm
//!
//! For cut positions `0 ≤ i < j < k < n` the route splits into
//! `A = r[..i]`, `B = r[i..j]`, `C = r[j..k]`, `D = r[k..]`. Five
//! reconnections are tried (`'` marks reversal):
//!
//! ```text
//! A B' C  D
//! A B  C' D
//! A C  B  D
//! A C' B  D
//! A B' C' D
//! ```
//!
//! Unlike 2-opt, `A` may be empty, so the first stop can change.
//!
//! # Complexity
//!
//! O(n⁴) per pass.
//!
//! # Reference
//!
//! Lin, S. (1965). "Computer Solutions of the Traveling Salesman Problem",
//! *Bell System Technical Journal* 44(10), 2245-2269.

use crate::distance::DistanceMatrix;

/// Minimum route length for a 3-opt move.
pub(crate) const MIN_LEN: usize = 4;

#[derive(Debug, Clone, Copy)]
enum Reconnection {
    ReverseB,
    ReverseC,
    Swap,
    SwapReverseC,
    ReverseBoth,
}

impl Reconnection {
    const ALL: [Reconnection; 5] = [
        Self::ReverseB,
        Self::ReverseC,
        Self::Swap,
        Self::SwapReverseC,
        Self::ReverseBoth,
    ];

    fn build(self, route: &[usize], i: usize, j: usize, k: usize, out: &mut Vec<usize>) {
        let (a, b, c, d) = (&route[..i], &route[i..j], &route[j..k], &route[k..]);
        out.clear();
        out.extend_from_slice(a);
        match self {
            Self::ReverseB => {
                out.extend(b.iter().rev());
                out.extend_from_slice(c);
            }
            Self::ReverseC => {
                out.extend_from_slice(b);
                out.extend(c.iter().rev());
            }
            Self::Swap => {
                out.extend_from_slice(c);
                out.extend_from_slice(b);
            }
            Self::SwapReverseC => {
                out.extend(c.iter().rev());
                out.extend_from_slice(b);
            }
            Self::ReverseBoth => {
                out.extend(b.iter().rev());
                out.extend(c.iter().rev());
            }
        }
        out.extend_from_slice(d);
    }
}

/// Finds the 3-opt candidate of `route` with the lowest resulting makespan.
///
/// Same contract as the 2-opt search: a candidate's makespan is
/// `max(others, cost(candidate))` and only strict improvements on
/// `baseline` are returned.
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

    for i in 0..n - 2 {
        for j in i + 1..n - 1 {
            for k in j + 1..n {
                for reconnection in Reconnection::ALL {
                    reconnection.build(route, i, j, k, &mut candidate);
                    let makespan = others.max(distances.path_cost(depot, &candidate));
                    if makespan < best_makespan {
                        best_makespan = makespan;
                        best = Some((candidate.clone(), makespan));
                    }
                }
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> DistanceMatrix {
        let rows = (0..n)
            .map(|i| (0..n).map(|j| (i as f64 - j as f64).abs()).collect())
            .collect();
        DistanceMatrix::from_rows(rows).expect("valid")
    }

    #[test]
    fn test_reconnections() {
        let route = [1, 2, 3, 4, 5];
        let mut out = Vec::new();
        // A = [1], B = [2, 3], C = [4], D = [5]
        let expected = [
            vec![1, 3, 2, 4, 5],
            vec![1, 2, 3, 4, 5],
            vec![1, 4, 2, 3, 5],
            vec![1, 4, 2, 3, 5],
            vec![1, 3, 2, 4, 5],
        ];
        for (reconnection, want) in Reconnection::ALL.iter().zip(expected) {
            reconnection.build(&route, 1, 3, 4, &mut out);
            assert_eq!(out, want, "{reconnection:?}");
        }
    }

    #[test]
    fn test_can_move_first_stop() {
        let dm = line(5);
        // 0→3→2→1→4 = 3+1+1+3 = 8; the best is 0→1→2→3→4 = 4.
        let (route, makespan) = best_move(&[3, 2, 1, 4], 0, &dm, 0.0, 8.0).expect("improves");
        assert_eq!(route, vec![1, 2, 3, 4]);
        assert!((makespan - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_short_route() {
        let dm = line(4);
        assert!(best_move(&[3, 2, 1], 0, &dm, 0.0, 5.0).is_none());
    }
}
