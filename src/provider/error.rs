use thiserror::Error;

use crate::distance::MatrixError;

/// Errors from [`MatrixProvider`](super::MatrixProvider) and
/// [`TripGeometryProvider`](super::TripGeometryProvider) calls.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// No coordinates were provided.
    #[error("at least one coordinate is required")]
    EmptyInput,

    /// The provider does not offer this service.
    #[error("operation not supported by this provider")]
    Unsupported,

    /// Failed to reach the routing service.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Underlying error description.
        message: String,
    },

    /// The routing service returned a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },

    /// The request timed out.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },

    /// The routing service answered with an error code.
    #[error("routing service error {code}: {message}")]
    Service {
        /// Service status code, e.g. `"InvalidQuery"`.
        code: String,
        /// Service message.
        message: String,
    },

    /// The response body could not be interpreted.
    #[error("failed to parse routing response: {message}")]
    Parse {
        /// Parse failure description.
        message: String,
    },

    /// The returned matrix is malformed.
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    /// The returned matrix does not match the number of coordinates.
    #[error("matrix has {actual} rows, expected {expected}")]
    DimensionMismatch {
        /// Number of coordinates sent.
        expected: usize,
        /// Number of rows received.
        actual: usize,
    },

    /// No route exists between two coordinates.
    #[error("no route from coordinate {from} to coordinate {to}")]
    Unreachable {
        /// Origin position.
        from: usize,
        /// Destination position.
        to: usize,
    },
}

/// Failure reported by an [`ExternalCpSolver`](super::ExternalCpSolver).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BackendError {
    /// Backend error description.
    pub message: String,
}

impl BackendError {
    /// Creates a backend error with the given description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ProviderError::Timeout {
            url: "http://osrm.local/table".to_string(),
            timeout_secs: 30,
        };
        assert_eq!(
            err.to_string(),
            "request to http://osrm.local/table timed out after 30s"
        );
        assert_eq!(BackendError::new("no solution").to_string(), "no solution");
    }

    #[test]
    fn test_matrix_error_is_transparent() {
        let inner = MatrixError::DataLength { len: 3, size: 2 };
        let err = ProviderError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
    }
}
