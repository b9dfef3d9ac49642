//! Error types for solve requests.
//!
//! Errors fall into three classes (see [`ErrorKind`]): malformed input
//! rejected before any computation, business-rule rejections such as
//! insufficient stock, and internal failures including collaborator errors.

use thiserror::Error;

use crate::provider::ProviderError;

/// Broad classification of a [`SolveError`], for mapping onto transport
/// status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request was malformed.
    Validation,
    /// The request was well-formed but cannot be served under the
    /// stock/capacity rules.
    BusinessRule,
    /// A collaborator or internal fault prevented the solve.
    Internal,
}

/// A malformed solve request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The payload could not be decoded.
    #[error("malformed request: {message}")]
    Malformed {
        /// Decoder error description.
        message: String,
    },
    /// No depot was supplied.
    #[error("at least one depot is required")]
    NoDepots,
    /// A coordinate is non-finite or out of range.
    #[error("{field}[{index}] must be a [lat, lon] pair within range")]
    InvalidCoordinate {
        /// Request field.
        field: &'static str,
        /// Position in the field.
        index: usize,
    },
    /// An array does not match the number of stops or depots.
    #[error("{field} has {actual} entries, expected {expected}")]
    LengthMismatch {
        /// Request field.
        field: &'static str,
        /// Expected length.
        expected: usize,
        /// Provided length.
        actual: usize,
    },
    /// A demand, stock, or capacity value is negative or non-finite.
    #[error("{field}[{index}] = {value}; values must be finite and non-negative")]
    InvalidValue {
        /// Request field.
        field: &'static str,
        /// Position in the field.
        index: usize,
        /// Offending value.
        value: f64,
    },
    /// The routing method is not recognized.
    #[error("unknown method {0:?}; expected one of alns, greedy, aco, ortools")]
    UnknownMethod(String),
    /// The improvement mode is not recognized.
    #[error("unknown improve mode {0:?}; expected 2opt or 3opt")]
    UnknownImprovement(String),
}

/// Stock or capacity rules make the request unservable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InfeasibleError {
    /// No depot has enough residual stock for a stop.
    #[error("insufficient stock: no depot can supply {demand} units for stop {stop}")]
    InsufficientStock {
        /// Stop node index.
        stop: usize,
        /// Stop demand.
        demand: f64,
    },
    /// A single stop demands more than its vehicle can carry.
    #[error(
        "stop {stop} demands {demand} units, exceeding vehicle {vehicle_id} capacity {capacity}"
    )]
    StopExceedsCapacity {
        /// Stop node index.
        stop: usize,
        /// Stop demand.
        demand: f64,
        /// Vehicle serving the stop's depot.
        vehicle_id: usize,
        /// Vehicle capacity.
        capacity: f64,
    },
}

/// Errors returned by [`Orchestrator::solve`](crate::pipeline::Orchestrator::solve).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// The request failed validation.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),
    /// Demands cannot be covered by depot stock or vehicle capacity.
    #[error("infeasible request: {0}")]
    Infeasible(#[from] InfeasibleError),
    /// The matrix or trip provider failed.
    #[error("provider failure: {0}")]
    Provider(#[from] ProviderError),
    /// A method requiring an external backend was requested, but none is
    /// configured.
    #[error("method {method} requires an external backend, but none is configured")]
    BackendUnavailable {
        /// Requested method.
        method: &'static str,
    },
    /// The external backend failed.
    #[error("external backend failed: {message}")]
    Backend {
        /// Backend error description.
        message: String,
    },
    /// The solve budget ran out before every group was routed.
    #[error("solve cancelled or deadline exceeded")]
    Cancelled,
    /// Any other internal fault.
    #[error("internal error: {message}")]
    Unexpected {
        /// Generic description.
        message: String,
    },
}

impl SolveError {
    /// Classifies this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_mdvrp::error::{ErrorKind, SolveError, ValidationError};
    ///
    /// let err = SolveError::from(ValidationError::NoDepots);
    /// assert_eq!(err.kind(), ErrorKind::Validation);
    /// assert_eq!(SolveError::Cancelled.kind(), ErrorKind::Internal);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Infeasible(_) => ErrorKind::BusinessRule,
            Self::Provider(_)
            | Self::BackendUnavailable { .. }
            | Self::Backend { .. }
            | Self::Cancelled
            | Self::Unexpected { .. } => ErrorKind::Internal,
        }
    }
}
