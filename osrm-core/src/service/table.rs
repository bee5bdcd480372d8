//! The `table` service: duration and distance matrices.

use serde::Deserialize;

use crate::error::RequestError;
use crate::options::Options;
use crate::params::{FallbackCoordinate, GeneralOptions, TableAnnotations};
use crate::path::Path;
use crate::request::{Request, ServiceRequest};
use crate::response::Waypoint;

const SERVICE: &str = "table";

/// Request for the `table` service.
///
/// Empty `sources` or `destinations` mean every coordinate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRequest {
    /// Routing profile, such as `car`.
    pub profile: String,
    /// Coordinates forming the rows and columns of the matrix.
    pub coordinates: Path,
    /// Indices of coordinates used as sources.
    pub sources: Vec<usize>,
    /// Indices of coordinates used as destinations.
    pub destinations: Vec<usize>,
    /// Matrices to compute.
    pub annotations: Option<TableAnnotations>,
    /// Speed in metres per second used for pairs without a route.
    pub fallback_speed: Option<f64>,
    /// Coordinate the fallback speed is measured from.
    pub fallback_coordinate: Option<FallbackCoordinate>,
    /// Multiplier applied to every duration.
    pub scale_factor: Option<f64>,
    /// Options shared with every service.
    pub general: GeneralOptions,
}

impl TableRequest {
    /// Start a request for `profile` across `coordinates`.
    #[must_use]
    pub fn new(profile: impl Into<String>, coordinates: Path) -> Self {
        Self {
            profile: profile.into(),
            coordinates,
            ..Self::default()
        }
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|candidate| *candidate > 0.0)
}

impl ServiceRequest for TableRequest {
    type Payload = TableResponse;

    fn build(&self) -> Result<Request<'_>, RequestError> {
        let mut options = Options::new();
        options
            .add_int("sources", self.sources.iter().copied())
            .add_int("destinations", self.destinations.iter().copied())
            .set_display("annotations", self.annotations)
            .set_display("fallback_speed", positive(self.fallback_speed))
            .set_display("fallback_coordinate", self.fallback_coordinate)
            .set_display("scale_factor", positive(self.scale_factor));
        self.general.apply(&mut options);
        Ok(Request::new(
            SERVICE,
            &self.profile,
            &self.coordinates,
            options,
        ))
    }
}

/// Matrix whose cells are `None` when no route connects the pair.
pub type Matrix = Vec<Vec<Option<f64>>>;

/// Payload of a successful `table` response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableResponse {
    /// Durations in seconds, row per source.
    pub durations: Option<Matrix>,
    /// Distances in metres, row per source.
    pub distances: Option<Matrix>,
    /// Snapped source coordinates.
    pub sources: Vec<Waypoint>,
    /// Snapped destination coordinates.
    pub destinations: Vec<Waypoint>,
    /// `[row, column]` cells estimated with the fallback speed.
    pub fallback_speed_cells: Option<Vec<[usize; 2]>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn request() -> TableRequest {
        TableRequest::new(
            "car",
            Path::from_lon_lat(&[
                (13.388_86, 52.517_037),
                (13.397_634, 52.529_407),
                (13.428_555, 52.523_219),
                (13.4, 52.5),
            ]),
        )
    }

    fn query(request: &TableRequest) -> String {
        request.build().expect("table requests always build").options.encode()
    }

    #[rstest]
    fn empty_options_leave_query_blank(request: TableRequest) {
        assert_eq!(query(&request), "");
    }

    #[rstest]
    fn encodes_sources_and_destinations(mut request: TableRequest) {
        request.sources = vec![0, 1, 2];
        request.destinations = vec![1, 3];
        assert_eq!(query(&request), "destinations=1;3&sources=0;1;2");
    }

    #[rstest]
    fn encodes_annotations_and_fallbacks(mut request: TableRequest) {
        request.annotations = Some(TableAnnotations::DurationDistance);
        request.fallback_speed = Some(11.5);
        request.fallback_coordinate = Some(FallbackCoordinate::Snapped);
        request.scale_factor = Some(2.0);
        assert_eq!(
            query(&request),
            "annotations=duration%2Cdistance&fallback_coordinate=snapped\
             &fallback_speed=11.5&scale_factor=2"
        );
    }

    #[rstest]
    #[case(0.0)]
    #[case(-3.0)]
    fn non_positive_factors_are_omitted(mut request: TableRequest, #[case] value: f64) {
        request.fallback_speed = Some(value);
        request.scale_factor = Some(value);
        assert_eq!(query(&request), "");
    }

    #[rstest]
    fn decodes_nullable_matrix() {
        let json = r#"{
            "durations": [[0.0, 120.5], [null, 0.0]],
            "sources": [{"location": [13.38886, 52.517037]}, {"location": [13.397634, 52.529407]}],
            "destinations": [{"location": [13.38886, 52.517037]}, {"location": [13.397634, 52.529407]}],
            "fallback_speed_cells": [[1, 0]]
        }"#;
        let payload: TableResponse = serde_json::from_str(json).expect("payload decodes");
        let durations = payload.durations.expect("durations present");
        assert_eq!(durations, vec![vec![Some(0.0), Some(120.5)], vec![None, Some(0.0)]]);
        assert!(payload.distances.is_none());
        assert_eq!(payload.fallback_speed_cells, Some(vec![[1, 0]]));
        assert_eq!(payload.sources.len(), 2);
    }
}
