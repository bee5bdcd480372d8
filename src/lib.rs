//! Facade crate for the OSRM v5 client.
//!
//! This crate re-exports the request and response types from `osrm-core`
//! and, behind the default `client` feature, the HTTP clients from
//! `osrm-client`.

#![forbid(unsafe_code)]

pub use osrm_core::{
    ApiError, Bearing, Envelope, ErrorCode, GeneralOptions, Options, Path, Request, RequestError,
    ResponseStatus, ServiceRequest, VERSION, ValidationError, params, polyline, response,
    service,
};

#[cfg(feature = "client")]
pub use osrm_client::{
    BlockingOsrm, ClientBuildError, ClientConfig, HttpCall, HttpReply, HttpTransport, Osrm,
    OsrmError, ReqwestTransport, RequestMethod, TransportError,
};
