//! Response envelope, status codes and the objects shared across services.
//!
//! Every OSRM body carries a `code` and an optional `message` next to the
//! service payload. [`Envelope`] keeps the two apart so callers only ever see
//! a payload when the code is `Ok`.

use std::fmt;

use geo::Coord;
use serde::Deserialize;
use thiserror::Error;

use crate::path::{Path, lon_lat};

/// Status fields present on every response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResponseStatus {
    /// `Ok` on success, otherwise an error code.
    pub code: String,
    /// Human-readable explanation accompanying an error code.
    #[serde(default)]
    pub message: Option<String>,
}

impl ResponseStatus {
    /// Whether the status reports success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// A decoded body: shared status plus the service payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Envelope<T> {
    /// Response status.
    #[serde(flatten)]
    pub status: ResponseStatus,
    /// Service-specific payload; empty when the status is an error.
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Envelope<T> {
    /// Return the payload on success, otherwise the reported error.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] whenever the code is not `Ok`.
    pub fn into_result(self) -> Result<T, ApiError> {
        if self.status.is_ok() {
            return Ok(self.payload);
        }
        let ResponseStatus { code, message } = self.status;
        Err(ApiError {
            code: ErrorCode::from_code(&code),
            message: message.unwrap_or_default(),
        })
    }
}

/// Error codes documented by the OSRM HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The URL could not be parsed.
    InvalidUrl,
    /// The service name is unknown.
    InvalidService,
    /// The API version is unsupported.
    InvalidVersion,
    /// Options are invalid or combined incorrectly.
    InvalidOptions,
    /// The query string is malformed.
    InvalidQuery,
    /// A parameter value is out of range.
    InvalidValue,
    /// A coordinate could not be snapped to the network.
    NoSegment,
    /// The request exceeds a server-side size limit.
    TooBig,
    /// No route connects the coordinates.
    NoRoute,
    /// No table could be computed.
    NoTable,
    /// No matching was found for the trace.
    NoMatch,
    /// No trip visits every coordinate.
    NoTrips,
    /// The requested feature is not implemented by the server.
    NotImplemented,
    /// Any code not listed above, kept verbatim.
    Other(String),
}

impl ErrorCode {
    /// Map a wire code onto a known variant, keeping unknown codes.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "InvalidUrl" => Self::InvalidUrl,
            "InvalidService" => Self::InvalidService,
            "InvalidVersion" => Self::InvalidVersion,
            "InvalidOptions" => Self::InvalidOptions,
            "InvalidQuery" => Self::InvalidQuery,
            "InvalidValue" => Self::InvalidValue,
            "NoSegment" => Self::NoSegment,
            "TooBig" => Self::TooBig,
            "NoRoute" => Self::NoRoute,
            "NoTable" => Self::NoTable,
            "NoMatch" => Self::NoMatch,
            "NoTrips" => Self::NoTrips,
            "NotImplemented" => Self::NotImplemented,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Wire form of the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::InvalidUrl => "InvalidUrl",
            Self::InvalidService => "InvalidService",
            Self::InvalidVersion => "InvalidVersion",
            Self::InvalidOptions => "InvalidOptions",
            Self::InvalidQuery => "InvalidQuery",
            Self::InvalidValue => "InvalidValue",
            Self::NoSegment => "NoSegment",
            Self::TooBig => "TooBig",
            Self::NoRoute => "NoRoute",
            Self::NoTable => "NoTable",
            Self::NoMatch => "NoMatch",
            Self::NoTrips => "NoTrips",
            Self::NotImplemented => "NotImplemented",
            Self::Other(code) => code,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error reported by the server in the response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code} - {message}")]
pub struct ApiError {
    /// Reported error code.
    pub code: ErrorCode,
    /// Reported message, empty when the server sent none.
    pub message: String,
}

/// Input coordinate snapped to the road network.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Waypoint {
    /// Name of the street the coordinate snapped to.
    pub name: String,
    /// Snapped location.
    #[serde(with = "lon_lat")]
    pub location: Coord<f64>,
    /// Distance in metres from the input coordinate to the snapped one.
    pub distance: f64,
    /// Opaque hint for reusing the snap in later requests.
    pub hint: Option<String>,
}

/// A route between two or more waypoints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Route {
    /// Distance in metres.
    pub distance: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Weight according to `weight_name`.
    pub weight: f64,
    /// Name of the weight metric used by the profile.
    pub weight_name: String,
    /// Overview geometry, absent when `overview=false`.
    pub geometry: Option<Path>,
    /// One leg between each pair of consecutive waypoints.
    pub legs: Vec<RouteLeg>,
}

/// The part of a route between two consecutive waypoints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RouteLeg {
    /// Distance in metres.
    pub distance: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Weight of the leg.
    pub weight: f64,
    /// Names of the most prominent streets on the leg.
    pub summary: String,
    /// Turn-by-turn steps, empty unless `steps=true`.
    pub steps: Vec<RouteStep>,
    /// Per-segment metadata, present when annotations were requested.
    pub annotation: Option<Annotation>,
}

/// Per-segment metadata along a leg.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Annotation {
    /// Segment durations in seconds.
    pub duration: Vec<f64>,
    /// Segment distances in metres.
    pub distance: Vec<f64>,
    /// OSM node identifiers along the leg.
    pub nodes: Vec<u64>,
    /// Data source index of each segment.
    pub datasources: Vec<u32>,
    /// Segment weights.
    pub weight: Vec<f64>,
    /// Segment speeds in metres per second.
    pub speed: Vec<f64>,
}

/// A single navigation instruction.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RouteStep {
    /// Distance in metres.
    pub distance: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Weight of the step.
    pub weight: f64,
    /// Street name.
    pub name: String,
    /// Travel mode, such as `driving`.
    pub mode: String,
    /// Step geometry.
    pub geometry: Option<Path>,
    /// Manoeuvre performed at the start of the step.
    pub maneuver: StepManeuver,
}

/// Manoeuvre at the start of a [`RouteStep`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StepManeuver {
    /// Heading before the manoeuvre, in degrees.
    pub bearing_before: f64,
    /// Heading after the manoeuvre, in degrees.
    pub bearing_after: f64,
    /// Where the manoeuvre takes place.
    #[serde(with = "lon_lat")]
    pub location: Coord<f64>,
    /// Manoeuvre type, such as `turn` or `depart`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Direction change, such as `left`.
    pub modifier: Option<String>,
    /// Roundabout exit number.
    pub exit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Probe {
        waypoints: Vec<Waypoint>,
    }

    #[rstest]
    fn ok_envelope_yields_payload() {
        let json = r#"{"code":"Ok","waypoints":[{"name":"Main St","location":[1.5,2.5],"distance":3.25}]}"#;
        let envelope: Envelope<Probe> = serde_json::from_str(json).expect("envelope decodes");
        let probe = envelope.into_result().expect("status is Ok");
        let waypoint = probe.waypoints.first().expect("one waypoint");
        assert_eq!(waypoint.name, "Main St");
        assert_eq!(waypoint.location, Coord { x: 1.5, y: 2.5 });
        assert!(waypoint.hint.is_none());
    }

    #[rstest]
    fn error_envelope_yields_api_error() {
        let json = r#"{"code":"NoRoute","message":"Impossible route between points"}"#;
        let envelope: Envelope<Probe> = serde_json::from_str(json).expect("envelope decodes");
        let err = envelope.into_result().expect_err("status is an error");
        assert_eq!(err.code, ErrorCode::NoRoute);
        assert_eq!(err.message, "Impossible route between points");
        assert_eq!(err.to_string(), "NoRoute - Impossible route between points");
    }

    #[rstest]
    fn error_without_message_has_empty_text() {
        let envelope: Envelope<Probe> =
            serde_json::from_str(r#"{"code":"TooBig"}"#).expect("envelope decodes");
        let err = envelope.into_result().expect_err("status is an error");
        assert_eq!(err.code, ErrorCode::TooBig);
        assert!(err.message.is_empty());
    }

    #[rstest]
    #[case("InvalidUrl", ErrorCode::InvalidUrl)]
    #[case("NoSegment", ErrorCode::NoSegment)]
    #[case("NoTrips", ErrorCode::NoTrips)]
    #[case("Overloaded", ErrorCode::Other("Overloaded".to_owned()))]
    fn codes_round_trip_through_wire_form(#[case] wire: &str, #[case] code: ErrorCode) {
        assert_eq!(ErrorCode::from_code(wire), code);
        assert_eq!(code.as_str(), wire);
    }

    #[rstest]
    fn route_decodes_nested_objects() {
        let json = r#"{
            "distance": 90.0,
            "duration": 300.5,
            "weight": 300.5,
            "weight_name": "routability",
            "geometry": "w{_tlAnb_clCfEz@zJf@",
            "legs": [{
                "distance": 90.0,
                "duration": 300.5,
                "summary": "Broadway",
                "steps": [{
                    "distance": 90.0,
                    "duration": 300.5,
                    "name": "Broadway",
                    "mode": "driving",
                    "geometry": {"type": "LineString", "coordinates": [[1.0, 2.0], [3.0, 4.0]]},
                    "maneuver": {
                        "bearing_before": 0,
                        "bearing_after": 90,
                        "location": [1.0, 2.0],
                        "type": "depart",
                        "modifier": "right"
                    }
                }],
                "annotation": {"nodes": [1, 2, 3], "speed": [4.5, 6.0]}
            }]
        }"#;
        let route: Route = serde_json::from_str(json).expect("route decodes");
        assert_eq!(route.weight_name, "routability");
        assert_eq!(route.geometry.as_ref().map(Path::len), Some(3));
        let leg = route.legs.first().expect("one leg");
        let step = leg.steps.first().expect("one step");
        assert_eq!(step.maneuver.kind, "depart");
        assert_eq!(step.maneuver.modifier.as_deref(), Some("right"));
        assert_eq!(step.geometry.as_ref().map(Path::len), Some(2));
        let annotation = leg.annotation.as_ref().expect("annotation present");
        assert_eq!(annotation.nodes, vec![1, 2, 3]);
        assert!(annotation.duration.is_empty());
    }
}
