//! Shared blocking HTTP plumbing for the service adapters.
//!
//! The core traits are synchronous. [`BlockingClient`] bridges them to async
//! `reqwest` calls by blocking on a Tokio runtime it owns, or on the caller's
//! runtime when that runtime is multi-threaded.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use stopline_core::TransportError;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "stopline/0.1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error type for adapter construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// The configured base URL is not an absolute `http(s)` URL.
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Connection settings shared by the HTTP adapters.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use stopline_data::HttpServiceConfig;
///
/// let config = HttpServiceConfig::new("http://localhost:5000")
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("depot-planner/2.0");
/// assert_eq!(config.timeout, Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServiceConfig {
    /// Base URL of the service, without a trailing endpoint path.
    pub base_url: String,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl HttpServiceConfig {
    /// Create a configuration for `base_url` with default timeout and agent.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// A `reqwest` client paired with the runtime used to drive it.
pub(crate) struct BlockingClient {
    client: Client,
    config: HttpServiceConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for BlockingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingClient")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl BlockingClient {
    /// Validate `config` and build the client and runtime.
    pub(crate) fn new(config: HttpServiceConfig) -> Result<Self, ProviderBuildError> {
        validate_base_url(&config.base_url)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    pub(crate) const fn config(&self) -> &HttpServiceConfig {
        &self.config
    }

    /// Join `path` onto the base URL and append `query`.
    pub(crate) fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, TransportError> {
        let raw = format!("{}/{path}", self.config.base_url.trim_end_matches('/'));
        Url::parse_with_params(&raw, query).map_err(|err| TransportError::Network {
            url: raw,
            message: format!("invalid request URL: {err}"),
        })
    }

    /// GET `url` and decode the JSON body as `T`.
    ///
    /// Inside a multi-threaded Tokio runtime the request is driven by that
    /// runtime via [`tokio::task::block_in_place`]. Inside a `current_thread`
    /// runtime, which cannot be blocked, the client's own runtime drives the
    /// request from a scoped helper thread. Outside any runtime the client's
    /// own runtime is used directly.
    pub(crate) fn get_json<T>(&self, url: Url) -> Result<T, TransportError>
    where
        T: DeserializeOwned + Send,
    {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(self.fetch_json(url)))
            }
            Ok(_) => self.block_on_helper_thread(url),
            Err(_) => self.runtime.block_on(self.fetch_json(url)),
        }
    }

    fn block_on_helper_thread<T>(&self, url: Url) -> Result<T, TransportError>
    where
        T: DeserializeOwned + Send,
    {
        let target = url.to_string();
        std::thread::scope(|scope| {
            scope
                .spawn(|| self.runtime.block_on(self.fetch_json(url)))
                .join()
                .unwrap_or_else(|_| {
                    Err(TransportError::Network {
                        url: target,
                        message: "request thread panicked".to_owned(),
                    })
                })
        })
    }

    async fn fetch_json<T>(&self, url: Url) -> Result<T, TransportError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let status = response.status();
        if status.is_client_error() {
            // Some services explain a rejected request in a regular body.
            let body = response
                .bytes()
                .await
                .map_err(|err| self.convert_reqwest_error(&err, &url))?;
            return serde_json::from_slice(&body).map_err(|_| TransportError::Http {
                url: url.to_string(),
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let response = response
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        response.json().await.map_err(|err| TransportError::Parse {
            message: err.to_string(),
        })
    }

    /// Convert a reqwest error to a `TransportError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &Url) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                url: url.to_string(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return TransportError::Http {
                url: url.to_string(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        TransportError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

fn validate_base_url(base_url: &str) -> Result<(), ProviderBuildError> {
    let invalid = |reason: String| ProviderBuildError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason,
    };
    let parsed = Url::parse(base_url).map_err(|err| invalid(err.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {other:?}"))),
    }
}
