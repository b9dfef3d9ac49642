//! Combined depot/stop index layout.

use std::ops::Range;

/// Index layout of the combined node array.
///
/// Indices `[0, D)` are depots and `[D, D + N)` are stops, so the two ranges
/// never overlap and a single matrix covers both.
///
/// # Examples
///
/// ```
/// use u_mdvrp::models::NodeLayout;
///
/// let layout = NodeLayout::new(2, 3);
/// assert_eq!(layout.size(), 5);
/// assert_eq!(layout.stop_node(0), 2);
/// assert_eq!(layout.stop_position(4), Some(2));
/// assert!(layout.is_depot(1));
/// assert!(!layout.is_depot(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeLayout {
    depot_count: usize,
    stop_count: usize,
}

impl NodeLayout {
    /// Creates a layout for `depot_count` depots followed by `stop_count` stops.
    pub fn new(depot_count: usize, stop_count: usize) -> Self {
        Self {
            depot_count,
            stop_count,
        }
    }

    /// Number of depots.
    pub fn depot_count(&self) -> usize {
        self.depot_count
    }

    /// Number of stops.
    pub fn stop_count(&self) -> usize {
        self.stop_count
    }

    /// Total number of nodes.
    pub fn size(&self) -> usize {
        self.depot_count + self.stop_count
    }

    /// Node indices of all depots.
    pub fn depots(&self) -> Range<usize> {
        0..self.depot_count
    }

    /// Node indices of all stops.
    pub fn stops(&self) -> Range<usize> {
        self.depot_count..self.size()
    }

    /// Returns `true` if `node` is a depot index.
    pub fn is_depot(&self, node: usize) -> bool {
        node < self.depot_count
    }

    /// Returns `true` if `node` is a stop index.
    pub fn is_stop(&self, node: usize) -> bool {
        self.stops().contains(&node)
    }

    /// Node index of the stop at input position `position`.
    pub fn stop_node(&self, position: usize) -> usize {
        self.depot_count + position
    }

    /// Input position of stop `node`, or `None` if `node` is not a stop.
    pub fn stop_position(&self, node: usize) -> Option<usize> {
        self.is_stop(node).then(|| node - self.depot_count)
    }
}
