//! Asynchronous facade over the OSRM services.

use std::sync::Arc;

use log::debug;
use osrm_core::service::{
    MatchRequest, MatchResponse, NearestRequest, NearestResponse, RouteRequest, RouteResponse,
    TableRequest, TableResponse, TripRequest, TripResponse,
};
use osrm_core::{Envelope, ServiceRequest};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::config::{ClientConfig, RequestMethod};
use crate::error::{ClientBuildError, OsrmError};
use crate::transport::{HttpCall, HttpTransport, ReqwestTransport, execute};

/// Client for an OSRM v5 server.
///
/// Each call builds its request, sends one HTTP exchange and decodes the
/// body. Clones share the underlying transport.
///
/// # Example
///
/// ```no_run
/// use osrm_client::Osrm;
/// use osrm_core::{Path, service::RouteRequest};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let osrm = Osrm::new("http://localhost:5000")?;
/// let request = RouteRequest::new(
///     "car",
///     Path::from_lon_lat(&[(13.388_86, 52.517_037), (13.397_634, 52.529_407)]),
/// );
/// let response = osrm.route(&request).await?;
/// println!("{} m", response.routes[0].distance);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Osrm {
    transport: Arc<dyn HttpTransport>,
    server_url: String,
    method: RequestMethod,
}

impl Osrm {
    /// Create a client for `server_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// build.
    pub fn new(server_url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(ClientConfig::new(server_url))
    }

    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// build.
    pub fn with_config(config: ClientConfig) -> Result<Self, ClientBuildError> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, transport)
    }

    /// Create a client that sends calls through `transport`.
    ///
    /// Timeout and user agent in `config` are left to the transport.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError::InvalidServerUrl`] if the server URL does
    /// not parse.
    pub fn with_transport(
        config: ClientConfig,
        transport: impl HttpTransport + 'static,
    ) -> Result<Self, ClientBuildError> {
        url::Url::parse(&config.server_url).map_err(|source| {
            ClientBuildError::InvalidServerUrl {
                url: config.server_url.clone(),
                source,
            }
        })?;
        Ok(Self {
            transport: Arc::new(transport),
            server_url: config.server_url,
            method: config.method,
        })
    }

    /// Server this client talks to.
    #[must_use]
    pub const fn server_url(&self) -> &str {
        self.server_url.as_str()
    }

    /// Fastest route through the coordinates in order.
    ///
    /// # Errors
    ///
    /// See [`OsrmError`].
    pub async fn route(&self, request: &RouteRequest) -> Result<RouteResponse, OsrmError> {
        self.query(request).await
    }

    /// Duration and distance matrices between coordinates.
    ///
    /// # Errors
    ///
    /// See [`OsrmError`].
    pub async fn table(&self, request: &TableRequest) -> Result<TableResponse, OsrmError> {
        self.query(request).await
    }

    /// Snap a GPS trace onto the road network.
    ///
    /// # Errors
    ///
    /// See [`OsrmError`].
    pub async fn match_trace(&self, request: &MatchRequest) -> Result<MatchResponse, OsrmError> {
        self.query(request).await
    }

    /// Nearest road segments to a coordinate.
    ///
    /// # Errors
    ///
    /// See [`OsrmError`].
    pub async fn nearest(&self, request: &NearestRequest) -> Result<NearestResponse, OsrmError> {
        self.query(request).await
    }

    /// Shortest trip visiting every coordinate.
    ///
    /// # Errors
    ///
    /// Unsupported `roundtrip`/`source`/`destination` combinations fail with
    /// [`OsrmError::Request`] before anything is sent.
    pub async fn trip(&self, request: &TripRequest) -> Result<TripResponse, OsrmError> {
        self.query(request).await
    }

    /// Send any typed request and decode its payload.
    ///
    /// # Errors
    ///
    /// Returns [`OsrmError::Request`] for invalid requests,
    /// [`OsrmError::Transport`] when the exchange fails,
    /// [`OsrmError::Decode`] for malformed bodies and [`OsrmError::Api`] when
    /// the server reports an error code.
    pub async fn query<R: ServiceRequest>(&self, request: &R) -> Result<R::Payload, OsrmError> {
        self.dispatch(request, None).await
    }

    /// Like [`Osrm::query`], but abandons the call once `cancellation` fires.
    ///
    /// # Errors
    ///
    /// As [`Osrm::query`], plus
    /// [`TransportError::Cancelled`](crate::TransportError::Cancelled).
    pub async fn query_with_cancellation<R: ServiceRequest>(
        &self,
        request: &R,
        cancellation: &CancellationToken,
    ) -> Result<R::Payload, OsrmError> {
        self.dispatch(request, Some(cancellation)).await
    }

    async fn dispatch<R: ServiceRequest>(
        &self,
        request: &R,
        cancellation: Option<&CancellationToken>,
    ) -> Result<R::Payload, OsrmError> {
        let path = request.build()?.url_path()?;
        let call = HttpCall::for_path(&self.server_url, &path, self.method);
        let body = execute(self.transport.as_ref(), call, cancellation).await?;
        decode_payload(&body)
    }
}

/// Decode an OSRM body into its payload, surfacing error codes.
///
/// # Errors
///
/// Returns [`OsrmError::Decode`] when the body is not a valid envelope for
/// `T` and [`OsrmError::Api`] when its code is not `Ok`.
pub fn decode_payload<T: DeserializeOwned>(body: &[u8]) -> Result<T, OsrmError> {
    let envelope: Envelope<T> =
        serde_json::from_slice(body).map_err(|source| OsrmError::Decode {
            body: String::from_utf8_lossy(body).into_owned(),
            source,
        })?;
    envelope.into_result().map_err(|error| {
        debug!("OSRM reported {}", error.code);
        OsrmError::Api(error)
    })
}
