//! The `match` service: snap a noisy GPS trace onto the road network.

use serde::Deserialize;

use crate::error::RequestError;
use crate::params::{Annotations, GeneralOptions, Gaps, Geometries, Overview, Steps, Tidy};
use crate::path::Path;
use crate::request::{Request, ServiceRequest, route_like_options};
use crate::response::{Route, Waypoint};

const SERVICE: &str = "match";

/// Request for the `match` service.
///
/// `timestamps`, and any per-coordinate list in `general`, must either be
/// empty or hold one entry per trace point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchRequest {
    /// Routing profile, such as `car`.
    pub profile: String,
    /// Recorded trace.
    pub coordinates: Path,
    /// Return turn-by-turn steps.
    pub steps: Option<Steps>,
    /// Per-segment metadata to return.
    pub annotations: Option<Annotations>,
    /// Geometry encoding; `polyline6` when unset.
    pub geometries: Option<Geometries>,
    /// Overview geometry detail.
    pub overview: Option<Overview>,
    /// UNIX timestamps for each trace point.
    pub timestamps: Vec<i64>,
    /// Treatment of timestamp gaps.
    pub gaps: Option<Gaps>,
    /// Clean up the trace before matching.
    pub tidy: Option<Tidy>,
    /// Options shared with every service.
    pub general: GeneralOptions,
}

impl MatchRequest {
    /// Start a request for `profile` along the trace `coordinates`.
    #[must_use]
    pub fn new(profile: impl Into<String>, coordinates: Path) -> Self {
        Self {
            profile: profile.into(),
            coordinates,
            ..Self::default()
        }
    }
}

impl ServiceRequest for MatchRequest {
    type Payload = MatchResponse;

    fn build(&self) -> Result<Request<'_>, RequestError> {
        let mut options =
            route_like_options(self.steps, self.annotations, self.geometries, self.overview);
        options
            .add_int64("timestamps", self.timestamps.iter().copied())
            .set_display("gaps", self.gaps)
            .set_display("tidy", self.tidy);
        self.general.apply(&mut options);
        Ok(Request::new(
            SERVICE,
            &self.profile,
            &self.coordinates,
            options,
        ))
    }
}

/// Payload of a successful `match` response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MatchResponse {
    /// Sub-traces that could be matched.
    pub matchings: Vec<Matching>,
    /// One entry per input point; `None` for points treated as outliers.
    pub tracepoints: Vec<Option<Tracepoint>>,
}

/// A route describing one matched part of the trace.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Matching {
    /// Matched route.
    #[serde(flatten)]
    pub route: Route,
    /// Confidence of the match between 0 and 1.
    pub confidence: f64,
}

/// Input point snapped as part of a matching.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tracepoint {
    /// Snapped location.
    #[serde(flatten)]
    pub waypoint: Waypoint,
    /// Index of the matching this point belongs to.
    pub matchings_index: usize,
    /// Index of the point within its matching.
    pub waypoint_index: usize,
    /// Number of other likely candidates for this point.
    pub alternatives_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Bearing;
    use rstest::{fixture, rstest};

    #[fixture]
    fn request() -> MatchRequest {
        MatchRequest::new(
            "car",
            Path::from_lon_lat(&[(-73.9902, 40.7147), (-73.990_23, 40.7146), (-73.990_25, 40.714_41)]),
        )
    }

    fn query(request: &MatchRequest) -> String {
        request.build().expect("match requests always build").options.encode()
    }

    #[rstest]
    fn defaults_to_polyline6(request: MatchRequest) {
        assert_eq!(query(&request), "geometries=polyline6");
    }

    #[rstest]
    fn encodes_timestamps_and_radiuses(mut request: MatchRequest) {
        request.timestamps = vec![0, 1, 2];
        request.general.radiuses = vec![Some(0.123_123), Some(0.12), Some(1.0)];
        request.general.hints = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];
        assert_eq!(
            query(&request),
            "geometries=polyline6&hints=a;b;c&radiuses=0.123123;0.12;1&timestamps=0;1;2"
        );
    }

    #[rstest]
    fn encodes_bearings_gaps_and_tidy(mut request: MatchRequest) {
        request.general.bearings = vec![Bearing::new(0, 20), Bearing::new(10, 20), Bearing::new(20, 20)];
        request.gaps = Some(Gaps::Ignore);
        request.tidy = Some(Tidy::True);
        request.overview = Some(Overview::False);
        assert_eq!(
            query(&request),
            "bearings=0%2C20%3B10%2C20%3B20%2C20&gaps=ignore&geometries=polyline6\
             &overview=false&tidy=true"
        );
    }

    #[rstest]
    fn decodes_outlier_tracepoints() {
        let json = r#"{
            "matchings": [{"confidence": 0.92, "distance": 20.0, "duration": 4.5, "legs": []}],
            "tracepoints": [
                {"location": [-73.9902, 40.7147], "matchings_index": 0, "waypoint_index": 0},
                null,
                {"location": [-73.99025, 40.71441], "matchings_index": 0, "waypoint_index": 1}
            ]
        }"#;
        let payload: MatchResponse = serde_json::from_str(json).expect("payload decodes");
        let matching = payload.matchings.first().expect("one matching");
        assert!((0.9..1.0).contains(&matching.confidence));
        assert!(matching.route.legs.is_empty());
        assert_eq!(payload.tracepoints.len(), 3);
        assert!(payload.tracepoints.get(1).is_some_and(Option::is_none));
        let last = payload
            .tracepoints
            .get(2)
            .and_then(Option::as_ref)
            .expect("last point matched");
        assert_eq!(last.waypoint_index, 1);
    }
}
