//! Error types produced while solving or persisting bridges.

use thiserror::Error;

/// Error returned when the force-balance solve cannot produce a result.
#[derive(Debug, Error, PartialEq)]
pub enum SolveError {
    /// Returned when the final joint is not anchored at the far support.
    ///
    /// The sequential elimination assumes the chain runs support to support,
    /// so a chain whose last joint sits anywhere else is structurally invalid
    /// rather than merely inaccurate.
    #[error("last joint sits at x = {actual} but the span ends at x = {expected}")]
    UnanchoredSpan {
        /// Span of the bridge, where the right support must sit.
        expected: f64,
        /// Horizontal position of the last joint in the chain.
        actual: f64,
    },
    /// Returned when a member direction makes the elimination step divide by
    /// zero, for example an exactly horizontal chord segment.
    #[error("member at joint {joint} has a degenerate direction")]
    DegenerateMember {
        /// Index of the joint whose outgoing members are degenerate.
        joint: usize,
    },
}

/// Error returned when reading or writing the layout file.
///
/// Load failures are recovered locally with a default layout; the variants
/// exist so the fallback can report what went wrong and so tests can assert
/// on the failure mode.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Returned when the file cannot be read or written.
    #[error("layout file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// Returned when the height-scale or span header line is missing.
    #[error("layout file is missing its two-line header")]
    MissingHeader,
    /// Returned when a line does not parse as a floating point number.
    #[error("line {line} of the layout file is not a number: {value:?}")]
    InvalidNumber {
        /// One-based line number of the offending line.
        line: usize,
        /// Raw text that failed to parse.
        value: String,
    },
    /// Returned when a header value is zero or negative.
    #[error("layout header value {value} must be positive ({name})")]
    NonPositiveHeader {
        /// Name of the header field.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}
