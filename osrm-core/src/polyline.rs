//! Google polyline codec with a configurable precision factor.
//!
//! OSRM speaks two flavours of the format: coordinates embedded in request
//! paths use five decimal places ([`POLYLINE5_FACTOR`]) while `polyline6`
//! geometries in responses use six ([`POLYLINE6_FACTOR`]).
//!
//! Each point is written latitude first. Values are stored as deltas from the
//! previous point, zig-zag folded, and emitted as printable ASCII in 5-bit
//! groups, least significant group first.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use osrm_core::polyline::{POLYLINE5_FACTOR, decode, encode};
//!
//! let points = vec![
//!     Coord { x: -120.2, y: 38.5 },
//!     Coord { x: -120.95, y: 40.7 },
//!     Coord { x: -126.453, y: 43.252 },
//! ];
//! let encoded = encode(&points, POLYLINE5_FACTOR);
//! assert_eq!(encoded, "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
//!
//! let decoded = decode(&encoded, POLYLINE5_FACTOR)?;
//! assert_eq!(decoded.len(), 3);
//! # Ok::<(), osrm_core::polyline::PolylineError>(())
//! ```

use geo::Coord;
use thiserror::Error;

/// Precision factor for five decimal places (`polyline`).
pub const POLYLINE5_FACTOR: f64 = 1.0e5;

/// Precision factor for six decimal places (`polyline6`).
pub const POLYLINE6_FACTOR: f64 = 1.0e6;

/// Offset added to every 5-bit group to land in printable ASCII (`'?'`).
const CHAR_OFFSET: u8 = 63;
/// Highest byte a well-formed polyline may contain (`'~'`).
const MAX_CHAR: u8 = 126;
const CONTINUATION_BIT: u64 = 0x20;
const GROUP_MASK: u64 = 0x1f;
const GROUP_BITS: u32 = 5;
/// Largest shift that still fits a 5-bit group into 64 bits.
const MAX_SHIFT: u32 = 60;

/// Errors raised by [`decode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    /// The input ended while a value still expected continuation groups.
    #[error("polyline ended mid-value at byte {position}")]
    Truncated {
        /// Byte offset where more input was expected.
        position: usize,
    },
    /// A byte fell outside the printable polyline alphabet.
    #[error("invalid polyline byte {byte:#04x} at position {position}")]
    InvalidCharacter {
        /// Byte offset of the offending character.
        position: usize,
        /// The offending byte.
        byte: u8,
    },
    /// A single value used more groups than a 64-bit integer can hold.
    #[error("polyline value starting at byte {position} overflows 64 bits")]
    Overflow {
        /// Byte offset where the oversized value starts.
        position: usize,
    },
}

/// Encode `points` as a polyline string at the given precision `factor`.
///
/// Coordinates are read as `x` = longitude, `y` = latitude. An empty slice
/// yields an empty string.
#[must_use]
pub fn encode(points: &[Coord<f64>], factor: f64) -> String {
    let mut encoded = String::with_capacity(points.len().saturating_mul(8));
    let mut previous_lat = 0_i64;
    let mut previous_lon = 0_i64;
    for point in points {
        let lat = to_fixed(point.y, factor);
        let lon = to_fixed(point.x, factor);
        push_value(lat.wrapping_sub(previous_lat), &mut encoded);
        push_value(lon.wrapping_sub(previous_lon), &mut encoded);
        previous_lat = lat;
        previous_lon = lon;
    }
    encoded
}

/// Decode a polyline string produced at precision `factor`.
///
/// # Errors
///
/// Returns [`PolylineError::Truncated`] when the final value is incomplete
/// (including a latitude without a matching longitude),
/// [`PolylineError::InvalidCharacter`] for bytes outside `'?'..='~'` and
/// [`PolylineError::Overflow`] for values wider than 64 bits.
pub fn decode(encoded: &str, factor: f64) -> Result<Vec<Coord<f64>>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut cursor = 0;
    let mut lat = 0_i64;
    let mut lon = 0_i64;
    while cursor < bytes.len() {
        let (lat_delta, lon_start) = read_value(bytes, cursor)?;
        let (lon_delta, next) = read_value(bytes, lon_start)?;
        lat = lat.wrapping_add(lat_delta);
        lon = lon.wrapping_add(lon_delta);
        points.push(Coord {
            x: from_fixed(lon, factor),
            y: from_fixed(lat, factor),
        });
        cursor = next;
    }
    Ok(points)
}

#[expect(
    clippy::float_arithmetic,
    reason = "scaling a coordinate to fixed point is inherently floating-point"
)]
#[expect(
    clippy::cast_possible_truncation,
    reason = "scaled geographic coordinates fit comfortably in i64"
)]
fn to_fixed(value: f64, factor: f64) -> i64 {
    (value * factor).round() as i64
}

#[expect(
    clippy::float_arithmetic,
    reason = "restoring degrees from fixed point is inherently floating-point"
)]
#[expect(
    clippy::cast_precision_loss,
    reason = "fixed-point coordinates stay well inside f64's exact integer range"
)]
fn from_fixed(value: i64, factor: f64) -> f64 {
    value as f64 / factor
}

fn push_value(delta: i64, out: &mut String) {
    let mut remaining = zigzag(delta);
    while remaining >= CONTINUATION_BIT {
        out.push(group_char(CONTINUATION_BIT | (remaining & GROUP_MASK)));
        remaining >>= GROUP_BITS;
    }
    out.push(group_char(remaining));
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "groups carry at most six significant bits"
)]
fn group_char(group: u64) -> char {
    char::from(group as u8 + CHAR_OFFSET)
}

/// Read one zig-zag value starting at `start`, returning it with the offset
/// of the following byte.
fn read_value(bytes: &[u8], start: usize) -> Result<(i64, usize), PolylineError> {
    let mut accumulated = 0_u64;
    let mut shift = 0_u32;
    for (position, &byte) in bytes.iter().enumerate().skip(start) {
        if !(CHAR_OFFSET..=MAX_CHAR).contains(&byte) {
            return Err(PolylineError::InvalidCharacter { position, byte });
        }
        if shift > MAX_SHIFT {
            return Err(PolylineError::Overflow { position: start });
        }
        let group = u64::from(byte - CHAR_OFFSET);
        accumulated |= (group & GROUP_MASK) << shift;
        if group & CONTINUATION_BIT == 0 {
            return Ok((unzigzag(accumulated), position + 1));
        }
        shift += GROUP_BITS;
    }
    Err(PolylineError::Truncated {
        position: bytes.len(),
    })
}

const fn zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)).cast_unsigned()
}

const fn unzigzag(value: u64) -> i64 {
    (value >> 1).cast_signed() ^ (value & 1).cast_signed().wrapping_neg()
}
