//! Client configuration.

use std::time::Duration;

/// Server queried when no URL is configured.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = concat!("osrm-client/", env!("CARGO_PKG_VERSION"));

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// How a request path is delivered to the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestMethod {
    /// `GET {server}/{path}`.
    #[default]
    Get,
    /// `POST {server}` with the path as an `application/x-uri` body.
    ///
    /// Useful when long coordinate lists would exceed URL length limits.
    Post,
}

/// Configuration for [`Osrm`](crate::Osrm) and
/// [`BlockingOsrm`](crate::BlockingOsrm).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use osrm_client::{ClientConfig, RequestMethod};
///
/// let config = ClientConfig::new("http://osrm.internal:5000")
///     .with_timeout(Duration::from_secs(5))
///     .with_method(RequestMethod::Post);
/// assert_eq!(config.timeout, Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the OSRM server, such as `http://localhost:5000`.
    pub server_url: String,
    /// Timeout covering connection and the whole response.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Delivery method for request paths.
    pub method: RequestMethod,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            method: RequestMethod::default(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given server.
    #[must_use]
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            ..Self::default()
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

    /// Choose how request paths are delivered.
    #[must_use]
    pub const fn with_method(mut self, method: RequestMethod) -> Self {
        self.method = method;
        self
    }
}
