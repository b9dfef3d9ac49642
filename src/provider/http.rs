//! Blocking OSRM client over `reqwest`.
//!
//! The provider traits are synchronous so the solver core stays embeddable
//! in synchronous contexts. [`OsrmClient`] bridges the async HTTP calls by
//! blocking on a Tokio runtime it owns.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use crate::distance::DistanceMatrix;
use crate::models::Coordinate;

use super::osrm::{table_url, trip_url, TableResponse, TripResponse};
use super::{MatrixProvider, ProviderError, TripGeometryProvider, TripSummary};

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "u-mdvrp/0.1";

const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";
const DEFAULT_PROFILE: &str = "driving";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Failure to construct an [`OsrmClient`].
#[derive(Debug, Error)]
pub enum BuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Configuration for [`OsrmClient`].
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL of the OSRM service.
    pub base_url: String,
    /// Routing profile, e.g. `"driving"`.
    pub profile: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl OsrmConfig {
    /// Creates a configuration for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// OSRM-backed [`MatrixProvider`] and [`TripGeometryProvider`].
///
/// Each call issues one HTTP request; failures are never retried.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the client blocks on its own current-thread
/// runtime. Inside a multi-threaded runtime it uses that runtime's handle
/// via [`tokio::task::block_in_place`]. Inside a current-thread runtime it
/// falls back to its own runtime.
///
/// # Examples
///
/// ```no_run
/// use u_mdvrp::models::Coordinate;
/// use u_mdvrp::provider::{MatrixProvider, OsrmClient};
///
/// let client = OsrmClient::new("http://localhost:5000")?;
/// let dm = client.matrix(&[Coordinate::new(41.0, 29.0), Coordinate::new(41.1, 29.1)])?;
/// assert_eq!(dm.size(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct OsrmClient {
    client: Client,
    config: OsrmConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for OsrmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OsrmClient")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl OsrmClient {
    /// Creates a client with default configuration for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, BuildError> {
        Self::with_config(OsrmConfig::new(base_url))
    }

    /// Creates a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: OsrmConfig) -> Result<Self, BuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(BuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(BuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &OsrmConfig {
        &self.config
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ProviderError> {
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        response.json().await.map_err(|err| ProviderError::Parse {
            message: err.to_string(),
        })
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> ProviderError {
        if error.is_timeout() {
            return ProviderError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return ProviderError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        ProviderError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

impl MatrixProvider for OsrmClient {
    fn matrix(&self, coords: &[Coordinate]) -> Result<DistanceMatrix, ProviderError> {
        if coords.is_empty() {
            return Err(ProviderError::EmptyInput);
        }
        let url = table_url(&self.config.base_url, &self.config.profile, coords);
        let response: TableResponse = self.block_on(self.fetch_json(&url))?;
        response.into_matrix(coords.len())
    }
}

impl TripGeometryProvider for OsrmClient {
    fn trip(&self, depot: Coordinate, stops: &[Coordinate]) -> Result<TripSummary, ProviderError> {
        if stops.is_empty() {
            return Err(ProviderError::EmptyInput);
        }
        let url = trip_url(&self.config.base_url, &self.config.profile, &depot, stops);
        let response: TripResponse = self.block_on(self.fetch_json(&url))?;
        response.into_summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn config_builder_pattern() {
        let config = OsrmConfig::new("http://example.com")
            .with_profile("cycling")
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.profile, "cycling");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }

    #[rstest]
    fn default_config_targets_public_driving() {
        let config = OsrmConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.profile, "driving");
    }

    #[rstest]
    fn empty_input_returns_error() {
        let client = OsrmClient::new("http://localhost:5000").expect("client should build");

        assert_eq!(
            client.matrix(&[]).expect_err("should fail"),
            ProviderError::EmptyInput
        );
        assert_eq!(
            client
                .trip(Coordinate::new(0.0, 0.0), &[])
                .expect_err("should fail"),
            ProviderError::EmptyInput
        );
    }

    #[rstest]
    fn unreachable_host_is_network_error() {
        let config = OsrmConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(2));
        let client = OsrmClient::with_config(config).expect("client should build");

        let err = client
            .matrix(&[Coordinate::new(0.0, 0.0)])
            .expect_err("nothing listens on the discard port");

        assert!(matches!(
            err,
            ProviderError::Network { .. } | ProviderError::Timeout { .. }
        ));
    }
}
