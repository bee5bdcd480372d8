//! Network-free building blocks for talking to an OSRM v5 server.
//!
//! This crate turns typed service requests into OSRM URLs and decodes the
//! JSON bodies the server returns. It never performs I/O; pair it with
//! `osrm-client` to send requests.
//!
//! ```
//! use osrm_core::{Path, ServiceRequest, service::TableRequest};
//!
//! let mut table = TableRequest::new("car", Path::from_lon_lat(&[(13.38, 52.51), (13.39, 52.52)]));
//! table.sources = vec![0];
//! assert_eq!(
//!     table.build()?.url("http://localhost:5000/")?,
//!     "http://localhost:5000/table/v1/car/polyline(ozn_I_htpAo%7D@o%7D@)?sources=0"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod options;
pub mod params;
mod path;
pub mod polyline;
mod request;
pub mod response;
pub mod service;

pub use error::{RequestError, ValidationError};
pub use options::{Options, escape_path_segment, escape_query_component};
pub use params::{Bearing, GeneralOptions};
pub use path::{Path, lon_lat};
pub use request::{Request, ServiceRequest, VERSION, route_like_options};
pub use response::{ApiError, Envelope, ErrorCode, ResponseStatus};
