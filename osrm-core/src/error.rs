//! Errors raised while turning a typed request into an OSRM URL.

use thiserror::Error;

/// A request is missing one of the components every OSRM URL needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The service name was empty.
    #[error("service must not be empty")]
    EmptyService,
    /// The routing profile was empty.
    #[error("profile must not be empty")]
    EmptyProfile,
    /// The request carried no coordinates.
    #[error("at least one coordinate is required")]
    NoCoordinates,
}

/// Errors returned before a request ever leaves the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The request failed basic validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The parameter combination is not served by OSRM.
    #[error("not implemented: {reason}")]
    Unsupported {
        /// Description of the rejected combination.
        reason: String,
    },
}
