//! Error types for the OSRM client.

use std::time::Duration;

use osrm_core::{ApiError, ErrorCode, RequestError, ValidationError};
use thiserror::Error;

/// Boxed source error carried by transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure to exchange a request with the server.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection failed or was interrupted.
    #[error("network error calling {url}")]
    Network {
        /// Requested URL.
        url: String,
        /// Underlying error.
        #[source]
        source: BoxError,
    },
    /// The server did not answer in time.
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout.
        timeout: Duration,
    },
    /// The caller cancelled the request.
    #[error("request to {url} was cancelled")]
    Cancelled {
        /// Requested URL.
        url: String,
    },
    /// The server answered with a status that carries no OSRM body.
    #[error("unexpected HTTP status {status} from {url} with body {body:?}")]
    UnexpectedStatus {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// The response body could not be read.
    #[error("failed to read response body from {url}")]
    ReadBody {
        /// Requested URL.
        url: String,
        /// Underlying error.
        #[source]
        source: BoxError,
    },
    /// The HTTP request could not be constructed.
    #[error("failed to build request for {url}")]
    Build {
        /// Requested URL.
        url: String,
        /// Underlying error.
        #[source]
        source: BoxError,
    },
}

/// Any failure of an OSRM service call.
#[derive(Debug, Error)]
pub enum OsrmError {
    /// The request was rejected before being sent.
    #[error(transparent)]
    Request(#[from] RequestError),
    /// The request could not be exchanged with the server.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The body was not the expected JSON.
    #[error("failed to decode OSRM response body {body:?}")]
    Decode {
        /// Raw response body.
        body: String,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },
    /// The server reported an error code.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<ValidationError> for OsrmError {
    fn from(error: ValidationError) -> Self {
        Self::Request(RequestError::Validation(error))
    }
}

impl OsrmError {
    /// Whether the failure happened while talking to the server.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// OSRM error code when the server reported one.
    #[must_use]
    pub const fn api_code(&self) -> Option<&ErrorCode> {
        match self {
            Self::Api(error) => Some(&error.code),
            _ => None,
        }
    }
}

/// Error returned when constructing a client fails.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The configured server URL is not a valid absolute URL.
    #[error("invalid OSRM server URL {url:?}")]
    InvalidServerUrl {
        /// Configured URL.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unexpected_status_mentions_body() {
        let err = TransportError::UnexpectedStatus {
            url: "http://localhost:5000/route".to_owned(),
            status: 500,
            body: "upstream exploded".to_owned(),
        };
        let message = err.to_string();
        assert!(message.contains("500"), "{message}");
        assert!(message.contains("upstream exploded"), "{message}");
    }

    #[rstest]
    fn validation_errors_lift_into_request_errors() {
        let err = OsrmError::from(ValidationError::NoCoordinates);
        assert!(matches!(
            err,
            OsrmError::Request(RequestError::Validation(ValidationError::NoCoordinates))
        ));
        assert!(!err.is_transport());
        assert!(err.api_code().is_none());
    }

    #[rstest]
    fn api_errors_expose_their_code() {
        let err = OsrmError::from(ApiError {
            code: ErrorCode::NoRoute,
            message: "Impossible route between points".to_owned(),
        });
        assert_eq!(err.api_code(), Some(&ErrorCode::NoRoute));
        assert_eq!(err.to_string(), "NoRoute - Impossible route between points");
    }

    #[rstest]
    fn cancellation_is_a_transport_failure() {
        let err = OsrmError::from(TransportError::Cancelled {
            url: "http://localhost:5000/nearest".to_owned(),
        });
        assert!(err.is_transport());
    }
}
