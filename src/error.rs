//! Defines error and its location
use std::fmt;

use saphyr_parser::{ScanError, Span};
use serde::de;

use crate::node::Node;

/// Row/column location within the source YAML document (1-indexed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location {
    /// 1-indexed row number in the input stream.
    pub(crate) row: u32,
    /// 1-indexed column number in the input stream.
    pub(crate) column: u32,
}

impl Location {
    /// Sentinel value meaning "location unknown".
    ///
    /// Nodes built in code (rather than parsed) carry this location.
    pub const UNKNOWN: Self = Self { row: 0, column: 0 };

    /// Create a new location record from 1-indexed coordinates.
    pub(crate) const fn new(row: usize, column: usize) -> Self {
        // Location is for reporting only; documents past 4G lines are not a concern.
        Self {
            row: row as u32,
            column: column as u32,
        }
    }

    /// 1-indexed line, or 0 if unknown.
    pub fn line(&self) -> u64 {
        self.row as u64
    }

    /// 1-indexed column, or 0 if unknown.
    pub fn column(&self) -> u64 {
        self.column as u64
    }

    /// False for [`Location::UNKNOWN`], which nodes built in code carry.
    pub fn is_known(&self) -> bool {
        *self != Self::UNKNOWN
    }
}

/// Convert a `saphyr_parser::Span` to a 1-indexed `Location`.
pub(crate) fn location_from_span(span: &Span) -> Location {
    let start = &span.start;
    Location::new(start.line(), start.col() + 1)
}

/// Error returned by the loader and by every decoding entry point.
///
/// Implements `serde::de::Error`, so `Deserialize` impls (derived or manual)
/// report through it as `Error::Message`.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Free-form error with optional source location.
    Message { msg: String, location: Location },
    /// The node has a different shape than the destination needs.
    Unexpected {
        expected: &'static str,
        /// Human description of the offending node, e.g. ``scalar `abc` ``.
        found: String,
        location: Location,
    },
    /// A sequence entry could not be merged into a mapping destination
    /// because it is not itself a mapping.
    MergeEntry { found: String, location: Location },
    /// Alias references a non-existent anchor id.
    UnknownAnchor { id: usize, location: Location },
    /// A single document was requested but the stream holds more.
    MultipleDocuments { location: Location },
}

impl Error {
    /// Construct a `Message` error with no known location.
    pub(crate) fn msg<S: Into<String>>(s: S) -> Self {
        Error::Message {
            msg: s.into(),
            location: Location::UNKNOWN,
        }
    }

    /// Shape mismatch between `node` and what the destination asked for.
    pub(crate) fn unexpected(expected: &'static str, node: &Node) -> Self {
        Error::Unexpected {
            expected,
            found: node.describe(),
            location: node.location(),
        }
    }

    pub(crate) fn merge_entry(node: &Node) -> Self {
        Error::MergeEntry {
            found: node.describe(),
            location: node.location(),
        }
    }

    pub(crate) fn unknown_anchor(id: usize) -> Self {
        Error::UnknownAnchor {
            id,
            location: Location::UNKNOWN,
        }
    }

    fn location_mut(&mut self) -> &mut Location {
        match self {
            Error::Message { location, .. }
            | Error::Unexpected { location, .. }
            | Error::MergeEntry { location, .. }
            | Error::UnknownAnchor { location, .. }
            | Error::MultipleDocuments { location } => location,
        }
    }

    /// Attach/override a concrete location to this error and return it.
    pub(crate) fn with_location(mut self, set_location: Location) -> Self {
        *self.location_mut() = set_location;
        self
    }

    /// Attach `fallback` only if no location has been recorded yet.
    ///
    /// Errors raised by Serde itself (missing field, unknown variant, ...) have
    /// no position; the innermost node being decoded is the best we can offer.
    pub(crate) fn or_location(mut self, fallback: Location) -> Self {
        let location = self.location_mut();
        if !location.is_known() {
            *location = fallback;
        }
        self
    }

    /// If the error has a known location, return it.
    pub fn location(&self) -> Option<Location> {
        match self {
            Error::Message { location, .. }
            | Error::Unexpected { location, .. }
            | Error::MergeEntry { location, .. }
            | Error::UnknownAnchor { location, .. }
            | Error::MultipleDocuments { location } => {
                if location.is_known() {
                    Some(*location)
                } else {
                    None
                }
            }
        }
    }

    /// Map a `saphyr_parser::ScanError` into our error type with location.
    pub(crate) fn from_scan_error(err: ScanError) -> Self {
        let mark = err.marker();
        let location = Location::new(mark.line(), mark.col() + 1);
        Error::Message {
            msg: err.info().to_owned(),
            location,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Message { msg, location } => fmt_with_location(f, msg, location),
            Error::Unexpected {
                expected,
                found,
                location,
            } => fmt_with_location(f, &format!("expected {expected}, found {found}"), location),
            Error::MergeEntry { found, location } => fmt_with_location(
                f,
                &format!("cannot merge sequence entry into mapping: expected a mapping, found {found}"),
                location,
            ),
            Error::UnknownAnchor { id, location } => {
                fmt_with_location(f, &format!("alias references unknown anchor id {id}"), location)
            }
            Error::MultipleDocuments { location } => fmt_with_location(
                f,
                "multiple YAML documents found where one was expected",
                location,
            ),
        }
    }
}

impl std::error::Error for Error {}

impl de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::msg(msg.to_string())
    }
}

/// Print a message optionally suffixed with "at line X, column Y".
fn fmt_with_location(f: &mut fmt::Formatter<'_>, msg: &str, location: &Location) -> fmt::Result {
    if location.is_known() {
        write!(f, "{msg} at line {}, column {}", location.row, location.column)
    } else {
        write!(f, "{msg}")
    }
}
