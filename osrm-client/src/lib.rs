//! HTTP client for the OSRM v5 routing services.
//!
//! [`Osrm`] sends the typed requests from `osrm_core::service` to a server
//! and decodes the answers. [`BlockingOsrm`] wraps it for synchronous code.
//!
//! Every call builds its request locally, performs exactly one HTTP exchange
//! through an [`HttpTransport`] and classifies the outcome:
//!
//! - invalid or unsupported requests fail before any I/O;
//! - network failures, timeouts, cancellation and statuses other than 200 or
//!   400 become [`TransportError`]s;
//! - bodies that are not OSRM JSON become [`OsrmError::Decode`];
//! - a `code` other than `Ok` becomes [`OsrmError::Api`].
//!
//! # Logging
//!
//! Requests, cancellations and answers are logged at `debug` through the
//! [`log`] facade; unexpected statuses are logged at `warn`.

mod blocking;
mod client;
mod config;
mod error;
#[doc(hidden)]
pub mod test_support;
mod transport;

pub use blocking::BlockingOsrm;
pub use client::{Osrm, decode_payload};
pub use config::{
    ClientConfig, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, RequestMethod,
};
pub use error::{BoxError, ClientBuildError, OsrmError, TransportError};
pub use transport::{
    HttpCall, HttpReply, HttpTransport, ReqwestTransport, URI_CONTENT_TYPE, check_status,
};
