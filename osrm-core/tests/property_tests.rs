//! Property-based tests for the polyline codec and the options encoder.
//!
//! # Invariants tested
//!
//! - **Polyline round-trip:** decoding an encoded path restores every point
//!   within one unit of the precision factor.
//! - **Order independence:** the encoded query does not depend on the order
//!   options were recorded in.
//! - **Last write wins:** setting a key twice keeps only the second value.
//! - **Path safety:** an escaped polyline never contains path or query
//!   delimiters.

use geo::Coord;
use osrm_core::polyline::{POLYLINE5_FACTOR, POLYLINE6_FACTOR, decode, encode};
use osrm_core::{Options, escape_path_segment};
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = Coord<f64>> {
    (-180.0_f64..=180.0, -90.0_f64..=90.0).prop_map(|(x, y)| Coord { x, y })
}

fn option_entries() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_map("[a-z_]{1,10}", "[a-zA-Z0-9 ,;.~-]{1,12}", 0..8)
        .prop_map(|entries| entries.into_iter().collect())
}

#[expect(
    clippy::float_arithmetic,
    reason = "tolerance checks require float maths"
)]
fn within(actual: &[Coord<f64>], expected: &[Coord<f64>], factor: f64) -> bool {
    let tolerance = 1.0 / factor;
    actual.len() == expected.len()
        && actual.iter().zip(expected).all(|(got, want)| {
            (got.x - want.x).abs() <= tolerance && (got.y - want.y).abs() <= tolerance
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: polyline5 round-trips within 1e-5 degrees.
    #[test]
    fn polyline5_round_trips(points in prop::collection::vec(coordinate(), 0..40)) {
        let decoded = decode(&encode(&points, POLYLINE5_FACTOR), POLYLINE5_FACTOR)
            .expect("encoder output should decode");
        prop_assert!(within(&decoded, &points, POLYLINE5_FACTOR));
    }

    /// Property: polyline6 round-trips within 1e-6 degrees.
    #[test]
    fn polyline6_round_trips(points in prop::collection::vec(coordinate(), 0..40)) {
        let decoded = decode(&encode(&points, POLYLINE6_FACTOR), POLYLINE6_FACTOR)
            .expect("encoder output should decode");
        prop_assert!(within(&decoded, &points, POLYLINE6_FACTOR));
    }

    /// Property: recording options in reverse yields the same query string.
    #[test]
    fn encoding_ignores_insertion_order(entries in option_entries()) {
        let mut forward = Options::new();
        for (key, value) in &entries {
            forward.set(key, value.as_str());
        }
        let mut backward = Options::new();
        for (key, value) in entries.iter().rev() {
            backward.set(key, value.as_str());
        }
        prop_assert_eq!(forward.encode(), backward.encode());
    }

    /// Property: a second `set` replaces the first.
    #[test]
    fn set_keeps_last_value(
        key in "[a-z]{1,8}",
        first in "[a-z0-9]{1,8}",
        second in "[a-z0-9]{1,8}",
    ) {
        let mut options = Options::new();
        options.set(&key, first).set(&key, second.clone());
        let expected = [second];
        prop_assert_eq!(options.get(&key), Some(expected.as_slice()));
    }

    /// Property: escaped polylines cannot break out of their path segment.
    #[test]
    fn escaped_polyline_has_no_delimiters(points in prop::collection::vec(coordinate(), 1..20)) {
        let escaped = escape_path_segment(&encode(&points, POLYLINE5_FACTOR));
        prop_assert!(!escaped.contains(['/', ';', ',', '?', '#']), "{}", escaped);
    }
}
