//! Typed requests and payloads for the five OSRM services.
//!
//! Each request implements [`ServiceRequest`](crate::ServiceRequest) so a
//! client can lower it into a URL and decode the matching payload.

pub mod matching;
pub mod nearest;
pub mod route;
pub mod table;
pub mod trip;

pub use matching::{MatchRequest, MatchResponse, Matching, Tracepoint};
pub use nearest::{NearestRequest, NearestResponse, NearestWaypoint};
pub use route::{RouteRequest, RouteResponse};
pub use table::{Matrix, TableRequest, TableResponse};
pub use trip::{TripRequest, TripResponse, TripWaypoint};
