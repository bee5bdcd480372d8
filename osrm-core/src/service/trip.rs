//! The `trip` service: solve the travelling salesman problem over the input.

use serde::Deserialize;

use crate::error::RequestError;
use crate::params::{
    Annotations, Destination, GeneralOptions, Geometries, Overview, Roundtrip, Source, Steps,
};
use crate::path::Path;
use crate::request::{Request, ServiceRequest, route_like_options};
use crate::response::{Route, Waypoint};

const SERVICE: &str = "trip";

/// Request for the `trip` service.
///
/// OSRM only serves round trips, or one-way trips pinned to both the first
/// and the last coordinate. Other combinations are rejected before sending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripRequest {
    /// Routing profile, such as `car`.
    pub profile: String,
    /// Locations to visit.
    pub coordinates: Path,
    /// Return turn-by-turn steps.
    pub steps: Option<Steps>,
    /// Per-segment metadata to return.
    pub annotations: Option<Annotations>,
    /// Geometry encoding; `polyline6` when unset.
    pub geometries: Option<Geometries>,
    /// Overview geometry detail.
    pub overview: Option<Overview>,
    /// Return to the start.
    pub roundtrip: Roundtrip,
    /// Where the trip starts.
    pub source: Source,
    /// Where the trip ends.
    pub destination: Destination,
    /// Indices of coordinates treated as waypoints rather than stops.
    pub waypoints: Vec<usize>,
    /// Options shared with every service.
    pub general: GeneralOptions,
}

impl TripRequest {
    /// Start a round trip for `profile` over `coordinates`.
    #[must_use]
    pub fn new(profile: impl Into<String>, coordinates: Path) -> Self {
        Self {
            profile: profile.into(),
            coordinates,
            ..Self::default()
        }
    }

    /// Whether OSRM can serve this combination of `roundtrip`, `source` and
    /// `destination`.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        match self.roundtrip {
            Roundtrip::True => true,
            Roundtrip::False => {
                self.source == Source::First && self.destination == Destination::Last
            }
        }
    }
}

impl ServiceRequest for TripRequest {
    type Payload = TripResponse;

    fn build(&self) -> Result<Request<'_>, RequestError> {
        if !self.is_supported() {
            return Err(RequestError::Unsupported {
                reason: format!(
                    "trip with roundtrip={}, source={}, destination={}",
                    self.roundtrip, self.source, self.destination
                ),
            });
        }
        let mut options =
            route_like_options(self.steps, self.annotations, self.geometries, self.overview);
        options
            .set("roundtrip", self.roundtrip.as_str())
            .set("source", self.source.as_str())
            .set("destination", self.destination.as_str());
        if !self.waypoints.is_empty() {
            let joined = self
                .waypoints
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(";");
            options.set("waypoints", joined);
        }
        self.general.apply(&mut options);
        Ok(Request::new(
            SERVICE,
            &self.profile,
            &self.coordinates,
            options,
        ))
    }
}

/// Payload of a successful `trip` response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TripResponse {
    /// One route per trip.
    pub trips: Vec<Route>,
    /// Input coordinates in input order.
    pub waypoints: Vec<TripWaypoint>,
}

/// Input coordinate placed on a trip.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TripWaypoint {
    /// Snapped location.
    #[serde(flatten)]
    pub waypoint: Waypoint,
    /// Index of the trip visiting this coordinate.
    pub trips_index: usize,
    /// Position of the coordinate within that trip.
    pub waypoint_index: usize,
}
