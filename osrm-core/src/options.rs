//! Query-string builder for OSRM options.
//!
//! OSRM expects `{option}={value};{value}…` pairs. [`Options`] keeps each key
//! once, preserves the order of values within a key and always encodes keys in
//! byte-wise sorted order so the same options produce the same URL.

use std::collections::BTreeMap;
use std::fmt::Display;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left untouched in query keys and values.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Characters left untouched in a single path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Percent-encode a query key or value. Spaces become `%20`.
#[must_use]
pub fn escape_query_component(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_COMPONENT).to_string()
}

/// Percent-encode text destined for a single URL path segment.
///
/// `/`, `;`, `,` and `?` are escaped along with every other reserved byte.
#[must_use]
pub fn escape_path_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

/// Ordered multi-map of OSRM query options.
///
/// Each request owns its own instance; nothing is shared between calls.
///
/// # Examples
///
/// ```
/// use osrm_core::Options;
///
/// let mut options = Options::new();
/// options.set("overview", "full").add_int("sources", [0, 2]);
/// assert_eq!(options.encode(), "overview=full&sources=0;2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    entries: BTreeMap<String, Vec<String>>,
}

impl Options {
    /// Create an empty option set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Replace every value of `key` with `value`.
    ///
    /// An empty `value` leaves the options untouched so unset parameters
    /// never reach the query string.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        let rendered: String = value.into();
        if !rendered.is_empty() {
            self.entries.insert(key.to_owned(), vec![rendered]);
        }
        self
    }

    /// Replace `key` with the display form of `value` when one is present.
    pub fn set_display(&mut self, key: &str, value: Option<impl Display>) -> &mut Self {
        if let Some(inner) = value {
            self.set(key, inner.to_string());
        }
        self
    }

    /// Replace `key` with `true` or `false`.
    pub fn set_bool(&mut self, key: &str, value: bool) -> &mut Self {
        self.set(key, if value { "true" } else { "false" })
    }

    /// Append `values` to `key`, keeping insertion order.
    ///
    /// Nothing is recorded when `values` is empty.
    pub fn add<I, V>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let mut pending = values.into_iter().map(Into::into).peekable();
        if pending.peek().is_some() {
            self.entries.entry(key.to_owned()).or_default().extend(pending);
        }
        self
    }

    /// Append unsigned integers such as waypoint indices.
    pub fn add_int<I>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = usize>,
    {
        self.add(key, values.into_iter().map(|value| value.to_string()))
    }

    /// Append 64-bit signed integers such as UNIX timestamps.
    pub fn add_int64<I>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = i64>,
    {
        self.add(key, values.into_iter().map(|value| value.to_string()))
    }

    /// Append floats in their shortest round-trip decimal form.
    ///
    /// Integral values drop the fractional part (`5.0` becomes `5`) and no
    /// exponent notation is produced.
    pub fn add_float<I>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = f64>,
    {
        self.add(key, values.into_iter().map(|value| value.to_string()))
    }

    /// Values currently stored for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Whether no option has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the options as an OSRM query string without the leading `?`.
    #[must_use]
    pub fn encode(&self) -> String {
        self.entries
            .iter()
            .map(|(key, values)| {
                let joined = values
                    .iter()
                    .map(|value| escape_query_component(value))
                    .collect::<Vec<_>>()
                    .join(";");
                format!("{}={joined}", escape_query_component(key))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}
