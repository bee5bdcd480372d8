//! Synchronous facade over [`Osrm`].
//!
//! [`BlockingOsrm`] owns a Tokio runtime that is reused across calls, so it
//! can be embedded in code that has no async executor of its own.

use std::fmt;
use std::future::Future;

use osrm_core::ServiceRequest;
use osrm_core::service::{
    MatchRequest, MatchResponse, NearestRequest, NearestResponse, RouteRequest, RouteResponse,
    TableRequest, TableResponse, TripRequest, TripResponse,
};
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use tokio_util::sync::CancellationToken;

use crate::client::Osrm;
use crate::config::ClientConfig;
use crate::error::{ClientBuildError, OsrmError};
use crate::transport::HttpTransport;

/// Blocking OSRM client.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the client drives calls on its own
/// current-thread runtime. Inside a multi-threaded runtime (detected via
/// [`Handle::try_current()`] and [`RuntimeFlavor::MultiThread`]) it uses that
/// runtime's handle with [`tokio::task::block_in_place`] instead.
///
/// Inside a `current_thread` runtime the client falls back to its own
/// runtime, which Tokio refuses to start from within another runtime. Use
/// [`Osrm`] directly from async code.
///
/// The owned runtime also cannot be dropped from async context, so a client
/// created inside a runtime must be dropped inside
/// [`tokio::task::block_in_place`] or on a blocking thread.
///
/// # Example
///
/// ```no_run
/// use osrm_client::BlockingOsrm;
/// use osrm_core::{Path, service::NearestRequest};
///
/// let osrm = BlockingOsrm::new("http://localhost:5000")?;
/// let request = NearestRequest::new("foot", Path::from_lon_lat(&[(13.388_86, 52.517_037)]));
/// let nearest = osrm.nearest(&request)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct BlockingOsrm {
    inner: Osrm,
    runtime: Runtime,
}

impl fmt::Debug for BlockingOsrm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingOsrm")
            .field("inner", &self.inner)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl BlockingOsrm {
    /// Create a client for `server_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn new(server_url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(ClientConfig::new(server_url))
    }

    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn with_config(config: ClientConfig) -> Result<Self, ClientBuildError> {
        Self::from_async(Osrm::with_config(config)?)
    }

    /// Create a client that sends calls through `transport`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the runtime fails to build.
    pub fn with_transport(
        config: ClientConfig,
        transport: impl HttpTransport + 'static,
    ) -> Result<Self, ClientBuildError> {
        Self::from_async(Osrm::with_transport(config, transport)?)
    }

    /// Wrap an existing asynchronous client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError::Runtime`] if the runtime fails to build.
    pub fn from_async(inner: Osrm) -> Result<Self, ClientBuildError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ClientBuildError::Runtime)?;
        Ok(Self { inner, runtime })
    }

    /// Borrow the asynchronous client.
    #[must_use]
    pub const fn as_async(&self) -> &Osrm {
        &self.inner
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }

    /// Fastest route through the coordinates in order.
    ///
    /// # Errors
    ///
    /// See [`OsrmError`].
    pub fn route(&self, request: &RouteRequest) -> Result<RouteResponse, OsrmError> {
        self.block_on(self.inner.route(request))
    }

    /// Duration and distance matrices between coordinates.
    ///
    /// # Errors
    ///
    /// See [`OsrmError`].
    pub fn table(&self, request: &TableRequest) -> Result<TableResponse, OsrmError> {
        self.block_on(self.inner.table(request))
    }

    /// Snap a GPS trace onto the road network.
    ///
    /// # Errors
    ///
    /// See [`OsrmError`].
    pub fn match_trace(&self, request: &MatchRequest) -> Result<MatchResponse, OsrmError> {
        self.block_on(self.inner.match_trace(request))
    }

    /// Nearest road segments to a coordinate.
    ///
    /// # Errors
    ///
    /// See [`OsrmError`].
    pub fn nearest(&self, request: &NearestRequest) -> Result<NearestResponse, OsrmError> {
        self.block_on(self.inner.nearest(request))
    }

    /// Shortest trip visiting every coordinate.
    ///
    /// # Errors
    ///
    /// See [`OsrmError`].
    pub fn trip(&self, request: &TripRequest) -> Result<TripResponse, OsrmError> {
        self.block_on(self.inner.trip(request))
    }

    /// Send any typed request and decode its payload.
    ///
    /// # Errors
    ///
    /// See [`Osrm::query`].
    pub fn query<R: ServiceRequest>(&self, request: &R) -> Result<R::Payload, OsrmError> {
        self.block_on(self.inner.query(request))
    }

    /// Send a request that stops once `cancellation` fires.
    ///
    /// # Errors
    ///
    /// See [`Osrm::query_with_cancellation`].
    pub fn query_with_cancellation<R: ServiceRequest>(
        &self,
        request: &R,
        cancellation: &CancellationToken,
    ) -> Result<R::Payload, OsrmError> {
        self.block_on(self.inner.query_with_cancellation(request, cancellation))
    }
}
