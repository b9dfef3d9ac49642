//! Stock-aware depot assignment and capacity splitting.
//!
//! - [`assign_to_depots`]: maps each stop to the nearest depot with enough
//!   residual stock
//! - [`split_by_capacity`]: cuts one depot's stops into capacity-feasible
//!   trips along a nearest-neighbor chain

mod depot;
mod split;

pub use depot::{assign_to_depots, Assignment};
pub use split::{split_assignment, split_by_capacity, Group};
