//! Summary of a layout run.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result summary of one `fill()` call.
///
/// Extents are measured along the shelf direction or the stack axis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FillReport {
    /// Number of committed books.
    pub placed: usize,

    /// Target span (shelf length or stack height).
    pub target: f64,

    /// Extent covered by the committed books.
    pub filled: f64,

    /// Extent the discarded candidate would have reached.
    pub rejected: Option<f64>,

    /// Number of candidates sampled, including the discarded one.
    pub candidates: usize,
}

impl FillReport {
    /// Creates an empty report for the given target.
    pub fn new(target: f64) -> Self {
        Self {
            placed: 0,
            target,
            filled: 0.0,
            rejected: None,
            candidates: 0,
        }
    }

    /// Records a committed book reaching `extent`.
    pub fn commit(&mut self, extent: f64) {
        self.placed += 1;
        self.candidates += 1;
        self.filled = extent;
    }

    /// Records the discarded candidate that would have reached `extent`.
    pub fn reject(&mut self, extent: f64) {
        self.candidates += 1;
        self.rejected = Some(extent);
    }

    /// Returns true if no book was placed.
    pub fn is_empty(&self) -> bool {
        self.placed == 0
    }

    /// Remaining span after the committed books.
    pub fn remaining(&self) -> f64 {
        (self.target - self.filled).max(0.0)
    }

    /// Fraction of the target covered (0.0 - 1.0).
    pub fn utilization(&self) -> f64 {
        if self.target > 0.0 {
            self.filled / self.target
        } else {
            0.0
        }
    }

    /// Returns utilization as a percentage string.
    pub fn utilization_percent(&self) -> String {
        format!("{:.1}%", self.utilization() * 100.0)
    }
}
