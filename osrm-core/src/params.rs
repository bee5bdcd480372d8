//! Typed query parameters shared by the OSRM services.
//!
//! Every enumerated option is a closed set of variants that maps to exactly
//! one wire string. Requests hold them as `Option<_>`; `None` means the
//! option is left out of the query string so the server default applies.

use std::fmt;

use crate::options::Options;

/// Declare a closed parameter enum together with its wire representation.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$variant_meta])* $variant, )+
        }

        impl $name {
            /// String sent to OSRM for this value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Whether route steps are returned for each leg.
    Steps {
        /// Return steps.
        True => "true",
        /// Omit steps.
        False => "false",
    }
}

wire_enum! {
    /// Additional per-segment metadata attached to route legs.
    Annotations {
        /// Return every annotation type.
        True => "true",
        /// Return no annotations.
        False => "false",
        /// OSM node identifiers.
        Nodes => "nodes",
        /// Segment distances.
        Distance => "distance",
        /// Segment durations.
        Duration => "duration",
        /// Data source indices.
        Datasources => "datasources",
        /// Segment weights.
        Weight => "weight",
        /// Segment speeds.
        Speed => "speed",
    }
}

wire_enum! {
    /// Encoding of route geometries in the response.
    Geometries {
        /// Polyline with six digits of precision.
        Polyline6 => "polyline6",
        /// GeoJSON `LineString`.
        GeoJson => "geojson",
    }
}

wire_enum! {
    /// Level of detail of the overview geometry.
    Overview {
        /// Simplified according to the highest zoom level it could be shown at.
        Simplified => "simplified",
        /// Full geometry.
        Full => "full",
        /// No overview geometry.
        False => "false",
    }
}

wire_enum! {
    /// Forces the route to keep going straight at waypoints.
    ContinueStraight {
        /// Use the profile's default.
        Default => "default",
        /// Forbid U-turns at waypoints.
        True => "true",
        /// Allow U-turns at waypoints.
        False => "false",
    }
}

wire_enum! {
    /// Allow the map matcher to drop or merge noisy input.
    Tidy {
        /// Clean up the trace before matching.
        True => "true",
        /// Match the trace as supplied.
        False => "false",
    }
}

wire_enum! {
    /// How the map matcher treats gaps in the input trace.
    Gaps {
        /// Split the trace at large timestamp gaps.
        Split => "split",
        /// Ignore timestamp gaps.
        Ignore => "ignore",
    }
}

wire_enum! {
    /// Whether a trip returns to its first location.
    #[derive(Default)]
    Roundtrip {
        /// Finish at the starting location.
        #[default]
        True => "true",
        /// Finish elsewhere.
        False => "false",
    }
}

wire_enum! {
    /// Which coordinate a trip must start from.
    #[derive(Default)]
    Source {
        /// Any coordinate.
        #[default]
        Any => "any",
        /// The first coordinate.
        First => "first",
    }
}

wire_enum! {
    /// Which coordinate a trip must end at.
    #[derive(Default)]
    Destination {
        /// Any coordinate.
        #[default]
        Any => "any",
        /// The last coordinate.
        Last => "last",
    }
}

wire_enum! {
    /// Matrices returned by the table service.
    TableAnnotations {
        /// Durations only.
        Duration => "duration",
        /// Distances only.
        Distance => "distance",
        /// Durations and distances.
        DurationDistance => "duration,distance",
    }
}

wire_enum! {
    /// Coordinate used when computing fallback speeds in a table.
    FallbackCoordinate {
        /// The coordinate as supplied in the request.
        Input => "input",
        /// The coordinate snapped to the road network.
        Snapped => "snapped",
    }
}

wire_enum! {
    /// Side of the road from which a waypoint is approached.
    Approach {
        /// Either side.
        Unrestricted => "unrestricted",
        /// The curb side for the driving direction.
        Curb => "curb",
    }
}

/// Request for alternative routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alternatives {
    /// Do not search for alternatives.
    Disabled,
    /// Search for alternatives using the server default count.
    Enabled,
    /// Search for up to this many alternatives.
    Count(u32),
}

impl fmt::Display for Alternatives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("false"),
            Self::Enabled => f.write_str("true"),
            Self::Count(count) => write!(f, "{count}"),
        }
    }
}

/// Restricts snapping to road segments heading in a given direction.
///
/// `value` is measured in degrees clockwise from true north and `range` is
/// the tolerated deviation either side of it.
///
/// # Examples
///
/// ```
/// use osrm_core::Bearing;
///
/// assert_eq!(Bearing::new(60, 20).to_string(), "60,20");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bearing {
    /// Direction in degrees from true north.
    pub value: u16,
    /// Allowed deviation in degrees.
    pub range: u16,
}

impl Bearing {
    /// Construct a bearing constraint.
    #[must_use]
    pub const fn new(value: u16, range: u16) -> Self {
        Self { value, range }
    }
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.value, self.range)
    }
}

/// Join bearings into OSRM's `value,range;value,range` form.
pub(crate) fn join_bearings(bearings: &[Bearing]) -> String {
    bearings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

fn render_radius(radius: Option<f64>) -> String {
    radius.map_or_else(|| "unlimited".to_owned(), |metres| metres.to_string())
}

/// Options accepted by every OSRM service.
///
/// All lists are per coordinate and must either be empty or match the
/// number of coordinates; OSRM validates the counts server side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneralOptions {
    /// Direction constraints for snapping each coordinate.
    pub bearings: Vec<Bearing>,
    /// Snapping radius in metres for each coordinate; `None` is unlimited.
    pub radiuses: Vec<Option<f64>>,
    /// Hints from a previous response to speed up snapping.
    pub hints: Vec<String>,
    /// Side of the road each coordinate is approached from.
    pub approaches: Vec<Approach>,
    /// Road classes to avoid, such as `toll` or `motorway`.
    pub exclude: Vec<String>,
    /// Whether the response carries hints; `None` keeps the server default.
    pub generate_hints: Option<bool>,
}

impl GeneralOptions {
    /// Write the populated options into `options`.
    pub(crate) fn apply(&self, options: &mut Options) {
        if !self.bearings.is_empty() {
            options.set("bearings", join_bearings(&self.bearings));
        }
        options.add("radiuses", self.radiuses.iter().map(|radius| render_radius(*radius)));
        options.add("hints", self.hints.iter().cloned());
        options.add("approaches", self.approaches.iter().map(|a| a.as_str()));
        if !self.exclude.is_empty() {
            options.set("exclude", self.exclude.join(","));
        }
        if let Some(generate) = self.generate_hints {
            options.set_bool("generate_hints", generate);
        }
    }
}
