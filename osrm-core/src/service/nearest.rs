//! The `nearest` service: snap a coordinate to the closest road segments.

use serde::Deserialize;

use crate::error::RequestError;
use crate::options::Options;
use crate::params::GeneralOptions;
use crate::path::Path;
use crate::request::{Request, ServiceRequest};
use crate::response::Waypoint;

const SERVICE: &str = "nearest";

/// Request for the `nearest` service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NearestRequest {
    /// Routing profile, such as `car`.
    pub profile: String,
    /// Coordinate to snap; OSRM expects exactly one.
    pub coordinates: Path,
    /// Number of nearest segments to return.
    pub number: Option<u32>,
    /// Options shared with every service.
    pub general: GeneralOptions,
}

impl NearestRequest {
    /// Start a request for `profile` at `coordinates`.
    #[must_use]
    pub fn new(profile: impl Into<String>, coordinates: Path) -> Self {
        Self {
            profile: profile.into(),
            coordinates,
            ..Self::default()
        }
    }
}

impl ServiceRequest for NearestRequest {
    type Payload = NearestResponse;

    fn build(&self) -> Result<Request<'_>, RequestError> {
        let mut options = Options::new();
        options.set_display("number", self.number.filter(|count| *count > 0));
        self.general.apply(&mut options);
        Ok(Request::new(
            SERVICE,
            &self.profile,
            &self.coordinates,
            options,
        ))
    }
}

/// Payload of a successful `nearest` response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NearestResponse {
    /// Snapped candidates, nearest first.
    pub waypoints: Vec<NearestWaypoint>,
}

/// Candidate returned by `nearest`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NearestWaypoint {
    /// Snapped location.
    #[serde(flatten)]
    pub waypoint: Waypoint,
    /// OSM node identifiers of the matched segment.
    pub nodes: Vec<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Bearing;
    use rstest::{fixture, rstest};

    #[fixture]
    fn request() -> NearestRequest {
        NearestRequest::new("foot", Path::from_lon_lat(&[(-73.990_185, 40.714_701)]))
    }

    #[rstest]
    fn encodes_bearings_and_number(mut request: NearestRequest) {
        request.number = Some(2);
        request.general.bearings = vec![Bearing::new(60, 380)];
        let built = request.build().expect("nearest requests always build");
        assert_eq!(
            built.url_path().expect("request is valid"),
            "nearest/v1/foot/polyline(%7BaowFrerbM)?bearings=60%2C380&number=2"
        );
    }

    #[rstest]
    fn zero_number_is_omitted(mut request: NearestRequest) {
        request.number = Some(0);
        let built = request.build().expect("nearest requests always build");
        assert!(built.options.is_empty());
    }

    #[rstest]
    fn decodes_waypoint_nodes() {
        let json = r#"{"waypoints": [{"name": "Broadway", "location": [-73.99, 40.71], "distance": 4.2, "nodes": [42, 43]}]}"#;
        let payload: NearestResponse = serde_json::from_str(json).expect("payload decodes");
        let nearest = payload.waypoints.first().expect("one waypoint");
        assert_eq!(nearest.nodes, vec![42, 43]);
        assert_eq!(nearest.waypoint.name, "Broadway");
    }
}
