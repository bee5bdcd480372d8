//! The `route` service: fastest route through the coordinates in order.

use serde::Deserialize;

use crate::error::RequestError;
use crate::params::{
    Alternatives, Annotations, ContinueStraight, GeneralOptions, Geometries, Overview, Steps,
};
use crate::path::Path;
use crate::request::{Request, ServiceRequest, route_like_options};
use crate::response::{Route, Waypoint};

const SERVICE: &str = "route";

/// Request for the `route` service.
///
/// # Examples
///
/// ```
/// use osrm_core::{Path, ServiceRequest, params::Overview, service::RouteRequest};
///
/// let mut request = RouteRequest::new("car", Path::from_lon_lat(&[(13.38, 52.51), (13.39, 52.52)]));
/// request.overview = Some(Overview::Full);
/// let url = request.build()?.url_path()?;
/// assert!(url.ends_with("?geometries=polyline6&overview=full"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteRequest {
    /// Routing profile, such as `car`.
    pub profile: String,
    /// Waypoints to visit in order.
    pub coordinates: Path,
    /// Return turn-by-turn steps.
    pub steps: Option<Steps>,
    /// Per-segment metadata to return.
    pub annotations: Option<Annotations>,
    /// Geometry encoding; `polyline6` when unset.
    pub geometries: Option<Geometries>,
    /// Overview geometry detail.
    pub overview: Option<Overview>,
    /// Forbid U-turns at waypoints.
    pub continue_straight: Option<ContinueStraight>,
    /// Search for alternative routes.
    pub alternatives: Option<Alternatives>,
    /// Options shared with every service.
    pub general: GeneralOptions,
}

impl RouteRequest {
    /// Start a request for `profile` through `coordinates`.
    #[must_use]
    pub fn new(profile: impl Into<String>, coordinates: Path) -> Self {
        Self {
            profile: profile.into(),
            coordinates,
            ..Self::default()
        }
    }
}

impl ServiceRequest for RouteRequest {
    type Payload = RouteResponse;

    fn build(&self) -> Result<Request<'_>, RequestError> {
        let mut options =
            route_like_options(self.steps, self.annotations, self.geometries, self.overview);
        options
            .set_display("continue_straight", self.continue_straight)
            .set_display("alternatives", self.alternatives);
        self.general.apply(&mut options);
        Ok(Request::new(
            SERVICE,
            &self.profile,
            &self.coordinates,
            options,
        ))
    }
}

/// Payload of a successful `route` response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RouteResponse {
    /// Best route first, followed by any alternatives.
    pub routes: Vec<Route>,
    /// Input coordinates snapped to the network.
    pub waypoints: Vec<Waypoint>,
}
