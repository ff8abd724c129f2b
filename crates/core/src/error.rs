//! Error types for u-bookgen.

use thiserror::Error;

/// Result type alias for u-bookgen operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running a layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Layout settings failed validation.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Shelf or stack anchors describe degenerate geometry.
    #[error("Invalid anchor: {0}")]
    InvalidAnchor(String),

    /// The lean decision table has no row for this pair of books.
    ///
    /// The fill that hit it is aborted; books placed before it are kept.
    #[error("Unhandled lean case: last book at {last} rad, candidate at {current} rad")]
    UnhandledLeanCase {
        /// Lean angle of the last placed book.
        last: f64,
        /// Lean angle of the rejected candidate.
        current: f64,
    },
}

impl Error {
    /// Returns true if the error was raised before any layout work started.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidSettings(_) | Self::InvalidAnchor(_))
    }
}
