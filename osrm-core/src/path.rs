//! Ordered coordinate sequences and their JSON geometry forms.

use std::fmt;

use geo::Coord;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::polyline::{self, POLYLINE6_FACTOR, PolylineError};

/// Ordered sequence of `(longitude, latitude)` points.
///
/// Requests send a path as a five-digit polyline; responses carry geometries
/// either as `polyline6` strings, GeoJSON `LineString` objects or bare
/// coordinate arrays. All three decode into the same type and a path always
/// serializes back to `polyline6`.
///
/// # Examples
///
/// ```
/// use osrm_core::Path;
///
/// let path = Path::from_lon_lat(&[(-73.990185, 40.714701), (-73.991801, 40.717571)]);
/// assert_eq!(path.len(), 2);
/// assert_eq!(path.polyline(osrm_core::polyline::POLYLINE5_FACTOR), "{aowFrerbM}PbI");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path(Vec<Coord<f64>>);

impl Path {
    /// Wrap an existing list of coordinates.
    #[must_use]
    pub const fn new(points: Vec<Coord<f64>>) -> Self {
        Self(points)
    }

    /// Build a path from `(longitude, latitude)` tuples.
    #[must_use]
    pub fn from_lon_lat(points: &[(f64, f64)]) -> Self {
        points.iter().map(|&(x, y)| Coord { x, y }).collect()
    }

    /// Decode a polyline produced at `factor`.
    ///
    /// # Errors
    ///
    /// Propagates [`PolylineError`] from the codec.
    pub fn from_polyline(encoded: &str, factor: f64) -> Result<Self, PolylineError> {
        polyline::decode(encoded, factor).map(Self)
    }

    /// Encode the path as a polyline at `factor`.
    #[must_use]
    pub fn polyline(&self, factor: f64) -> String {
        polyline::encode(&self.0, factor)
    }

    /// Borrow the underlying points.
    #[must_use]
    pub const fn points(&self) -> &[Coord<f64>] {
        self.0.as_slice()
    }

    /// Number of points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path holds no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the points in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Coord<f64>> {
        self.0.iter()
    }

    /// Consume the path, returning its points.
    #[must_use]
    pub fn into_inner(self) -> Vec<Coord<f64>> {
        self.0
    }
}

impl From<Vec<Coord<f64>>> for Path {
    fn from(points: Vec<Coord<f64>>) -> Self {
        Self(points)
    }
}

impl FromIterator<Coord<f64>> for Path {
    fn from_iter<I: IntoIterator<Item = Coord<f64>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Path {
    type Item = Coord<f64>;
    type IntoIter = std::vec::IntoIter<Coord<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Coord<f64>;
    type IntoIter = std::slice::Iter<'a, Coord<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.polyline(POLYLINE6_FACTOR))
    }
}

/// Geometry shapes OSRM may emit depending on the `geometries` option.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawGeometry {
    Polyline(String),
    GeoJson {
        #[serde(rename = "type")]
        kind: String,
        coordinates: serde_json::Value,
    },
    Points(Vec<[f64; 2]>),
}

/// Reason a GeoJSON geometry could not be read as a path.
struct UnsupportedGeometry<'a>(&'a str);

impl fmt::Display for UnsupportedGeometry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported GeoJSON geometry type {:?}", self.0)
    }
}

fn from_pairs(pairs: Vec<[f64; 2]>) -> Path {
    pairs.into_iter().map(|[x, y]| Coord { x, y }).collect()
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawGeometry::deserialize(deserializer)? {
            RawGeometry::Polyline(encoded) => {
                Self::from_polyline(&encoded, POLYLINE6_FACTOR).map_err(de::Error::custom)
            }
            RawGeometry::GeoJson { kind, coordinates } => {
                if kind == "LineString" {
                    serde_json::from_value(coordinates)
                        .map(from_pairs)
                        .map_err(de::Error::custom)
                } else {
                    Err(de::Error::custom(UnsupportedGeometry(&kind)))
                }
            }
            RawGeometry::Points(pairs) => Ok(from_pairs(pairs)),
        }
    }
}

/// Serde adapter for single locations encoded as `[longitude, latitude]`.
pub mod lon_lat {
    use geo::Coord;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Write `location` as a two-element array.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn serialize<S: Serializer>(location: &Coord<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        [location.x, location.y].serialize(serializer)
    }

    /// Read a two-element array into a coordinate.
    ///
    /// # Errors
    ///
    /// Fails when the input is not an array of exactly two numbers.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Coord<f64>, D::Error> {
        let [x, y] = <[f64; 2]>::deserialize(deserializer)?;
        Ok(Coord { x, y })
    }
}
