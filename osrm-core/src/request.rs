//! Assembly of OSRM request URLs.
//!
//! A typed service request is lowered into a [`Request`], which validates the
//! shared components and renders
//! `{service}/v1/{profile}/polyline({path})[?{options}]`.

use serde::de::DeserializeOwned;

use crate::error::{RequestError, ValidationError};
use crate::options::{Options, escape_path_segment};
use crate::params::{Annotations, Geometries, Overview, Steps};
use crate::path::Path;
use crate::polyline::POLYLINE5_FACTOR;

/// API version segment used by every service.
pub const VERSION: &str = "v1";

/// A fully parameterised call to one OSRM service.
///
/// Built fresh for each call and consumed once.
#[derive(Debug, Clone, PartialEq)]
pub struct Request<'a> {
    /// Service name, such as `route`.
    pub service: &'a str,
    /// Routing profile, such as `car`.
    pub profile: &'a str,
    /// Coordinates addressed by the call.
    pub coordinates: &'a Path,
    /// Encoded query options.
    pub options: Options,
}

impl<'a> Request<'a> {
    /// Bundle the components of a call.
    #[must_use]
    pub const fn new(
        service: &'a str,
        profile: &'a str,
        coordinates: &'a Path,
        options: Options,
    ) -> Self {
        Self {
            service,
            profile,
            coordinates,
            options,
        }
    }

    /// Check that service, profile and coordinates are present.
    ///
    /// # Errors
    ///
    /// Returns the first missing component as a [`ValidationError`].
    pub const fn validate(&self) -> Result<(), ValidationError> {
        if self.service.is_empty() {
            return Err(ValidationError::EmptyService);
        }
        if self.profile.is_empty() {
            return Err(ValidationError::EmptyProfile);
        }
        if self.coordinates.is_empty() {
            return Err(ValidationError::NoCoordinates);
        }
        Ok(())
    }

    /// Render the server-relative path and query string.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when a component is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrm_core::{Options, Path, Request};
    ///
    /// let path = Path::from_lon_lat(&[(-73.990185, 40.714701)]);
    /// let request = Request::new("nearest", "foot", &path, Options::new());
    /// assert_eq!(request.url_path()?, "nearest/v1/foot/polyline(%7BaowFrerbM)");
    /// # Ok::<(), osrm_core::ValidationError>(())
    /// ```
    pub fn url_path(&self) -> Result<String, ValidationError> {
        self.validate()?;
        let polyline = escape_path_segment(&self.coordinates.polyline(POLYLINE5_FACTOR));
        let mut rendered = format!(
            "{}/{VERSION}/{}/polyline({polyline})",
            self.service, self.profile
        );
        if !self.options.is_empty() {
            rendered.push('?');
            rendered.push_str(&self.options.encode());
        }
        Ok(rendered)
    }

    /// Join the rendered path onto `server`, dropping any trailing slash.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when a component is missing.
    pub fn url(&self, server: &str) -> Result<String, ValidationError> {
        Ok(format!(
            "{}/{}",
            server.trim_end_matches('/'),
            self.url_path()?
        ))
    }
}

/// A typed request for one OSRM service.
pub trait ServiceRequest {
    /// Service-specific body of a successful response.
    type Payload: DeserializeOwned;

    /// Lower the typed request into its URL components.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Unsupported`] for parameter combinations OSRM
    /// does not serve. Missing components surface later from
    /// [`Request::url_path`].
    fn build(&self) -> Result<Request<'_>, RequestError>;
}

/// Options shared by route, match and trip.
///
/// `geometries` falls back to `polyline6` so returned geometries always match
/// the precision [`Path`] decodes at.
#[must_use]
pub fn route_like_options(
    steps: Option<Steps>,
    annotations: Option<Annotations>,
    geometries: Option<Geometries>,
    overview: Option<Overview>,
) -> Options {
    let mut options = Options::new();
    options
        .set_display("steps", steps)
        .set_display("annotations", annotations)
        .set(
            "geometries",
            geometries.unwrap_or(Geometries::Polyline6).as_str(),
        )
        .set_display("overview", overview);
    options
}
