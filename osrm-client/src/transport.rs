//! HTTP transport for OSRM calls.
//!
//! [`HttpTransport`] is the seam between the service facade and the network.
//! [`ReqwestTransport`] is the production implementation; tests substitute
//! [`StubTransport`](crate::test_support::StubTransport).

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tokio_util::sync::CancellationToken;

use crate::config::{ClientConfig, RequestMethod};
use crate::error::{ClientBuildError, TransportError};

/// Content type announcing a request path sent as a `POST` body.
pub const URI_CONTENT_TYPE: &str = "application/x-uri";

/// HTTP status OSRM uses for successful responses.
const STATUS_OK: u16 = 200;
/// HTTP status OSRM uses for error responses that still carry a JSON body.
const STATUS_BAD_REQUEST: u16 = 400;

/// One outbound HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpCall {
    /// Delivery method.
    pub method: RequestMethod,
    /// Absolute URL to call.
    pub url: String,
    /// Request body, present for `POST`.
    pub body: Option<String>,
}

impl HttpCall {
    /// Address `path` on `server_url` using `method`.
    ///
    /// `GET` appends the path to the server URL; `POST` sends it as the body.
    #[must_use]
    pub fn for_path(server_url: &str, path: &str, method: RequestMethod) -> Self {
        let base = server_url.trim_end_matches('/');
        match method {
            RequestMethod::Get => Self {
                method,
                url: format!("{base}/{path}"),
                body: None,
            },
            RequestMethod::Post => Self {
                method,
                url: base.to_owned(),
                body: Some(path.to_owned()),
            },
        }
    }
}

/// Status and fully-read body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

/// Sends HTTP calls on behalf of the client.
///
/// Implementations return any status the server produced; the caller
/// decides which ones carry OSRM bodies.
#[async_trait]
pub trait HttpTransport: Send + Sync + fmt::Debug {
    /// Perform `call` and read the whole response body.
    async fn send(&self, call: HttpCall) -> Result<HttpReply, TransportError>;
}

/// [`HttpTransport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Build a transport honouring the timeout and user agent in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError::HttpClient`] if the HTTP client fails to
    /// build.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    /// Convert a send failure into a [`TransportError`].
    fn convert_send_error(&self, error: reqwest::Error, url: &str) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                url: url.to_owned(),
                timeout: self.timeout,
            };
        }
        if error.is_builder() {
            return TransportError::Build {
                url: url.to_owned(),
                source: Box::new(error),
            };
        }
        TransportError::Network {
            url: url.to_owned(),
            source: Box::new(error),
        }
    }

    /// Convert a body read failure into a [`TransportError`].
    fn convert_read_error(&self, error: reqwest::Error, url: &str) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                url: url.to_owned(),
                timeout: self.timeout,
            };
        }
        TransportError::ReadBody {
            url: url.to_owned(),
            source: Box::new(error),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, call: HttpCall) -> Result<HttpReply, TransportError> {
        let HttpCall { method, url, body } = call;
        let builder = match method {
            RequestMethod::Get => self.client.get(&url),
            RequestMethod::Post => self
                .client
                .post(&url)
                .header(CONTENT_TYPE, URI_CONTENT_TYPE)
                .body(body.unwrap_or_default()),
        };
        let response = builder
            .send()
            .await
            .map_err(|err| self.convert_send_error(err, &url))?;
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| self.convert_read_error(err, &url))?;
        Ok(HttpReply {
            status,
            body: bytes.to_vec(),
        })
    }
}

/// Accept only the statuses OSRM pairs with a JSON body.
///
/// # Errors
///
/// Returns [`TransportError::UnexpectedStatus`] carrying the body for any
/// status other than 200 or 400.
pub fn check_status(reply: HttpReply, url: &str) -> Result<Vec<u8>, TransportError> {
    if reply.status == STATUS_OK || reply.status == STATUS_BAD_REQUEST {
        return Ok(reply.body);
    }
    let body = String::from_utf8_lossy(&reply.body).into_owned();
    warn!("OSRM returned unexpected status {} for {url}", reply.status);
    Err(TransportError::UnexpectedStatus {
        url: url.to_owned(),
        status: reply.status,
        body,
    })
}

/// Send `call`, aborting early when `cancellation` fires.
///
/// A token that is already cancelled stops the call before anything is sent.
pub(crate) async fn execute(
    transport: &dyn HttpTransport,
    call: HttpCall,
    cancellation: Option<&CancellationToken>,
) -> Result<Vec<u8>, TransportError> {
    let url = call.url.clone();
    debug!("OSRM {:?} {url}", call.method);
    let reply = match cancellation {
        Some(token) => {
            tokio::select! {
                biased;
                () = token.cancelled() => {
                    debug!("OSRM call to {url} cancelled");
                    return Err(TransportError::Cancelled { url });
                }
                reply = transport.send(call) => reply?,
            }
        }
        None => transport.send(call).await?,
    };
    debug!("OSRM answered {} for {url}", reply.status);
    check_status(reply, &url)
}
