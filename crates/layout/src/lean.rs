//! Gap resolution between two neighbouring, possibly leaning books.
//!
//! Positive lean angles tilt a book's top towards the end of the shelf,
//! negative angles towards its start. For each pair of neighbours the
//! silhouettes are reduced to two corner heights, and the horizontal gap
//! between their reference edges is picked from a decision table with one
//! closed-form formula per row.

use crate::book::Book;
use std::cmp::Ordering;
use std::f64::consts::FRAC_PI_2;
use u_bookgen_core::{Error, Result};

/// Heights of the two top corners of a book's silhouette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerHeights {
    /// Corner facing the shelf start.
    pub left: f64,
    /// Corner facing the shelf end.
    pub right: f64,
}

impl CornerHeights {
    /// Returns the pair with left and right exchanged.
    pub fn swapped(self) -> Self {
        Self {
            left: self.right,
            right: self.left,
        }
    }

    fn of(book: &Book, low_corner_left: bool) -> Self {
        let angle = book.lean_angle();
        let low = angle.cos() * book.height();
        let high = low + angle.abs().sin() * book.width();
        if low_corner_left {
            Self {
                left: low,
                right: high,
            }
        } else {
            Self {
                left: high,
                right: low,
            }
        }
    }

    /// Corner heights of the last placed book.
    pub fn trailing(book: &Book) -> Self {
        Self::of(book, book.lean_angle() <= 0.0)
    }

    /// Corner heights of the candidate book.
    pub fn leading(book: &Book) -> Self {
        Self::of(book, book.lean_angle() < 0.0)
    }
}

/// The part of a book the gap formulas look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Silhouette {
    /// Signed lean angle.
    pub angle: f64,
    /// Cover height.
    pub height: f64,
    /// Thickness.
    pub width: f64,
    /// Top corner heights.
    pub corners: CornerHeights,
}

impl Silhouette {
    fn new(book: &Book, corners: CornerHeights) -> Self {
        Self {
            angle: book.lean_angle(),
            height: book.height(),
            width: book.width(),
            corners,
        }
    }

    /// Silhouette of the last placed book.
    pub fn trailing(book: &Book) -> Self {
        Self::new(book, CornerHeights::trailing(book))
    }

    /// Silhouette of the candidate book.
    pub fn leading(book: &Book) -> Self {
        Self::new(book, CornerHeights::leading(book))
    }

    fn swapped(self) -> Self {
        Self {
            corners: self.corners.swapped(),
            ..self
        }
    }
}

/// Mirrors a pair: both corner pairs flip and the two books trade roles.
fn mirror(last: Silhouette, current: Silhouette) -> (Silhouette, Silhouette) {
    (current.swapped(), last.swapped())
}

/// Returns true if both angles lean towards the same side.
///
/// Upright books count as leaning right.
pub fn same_direction(last: f64, current: f64) -> bool {
    (last >= 0.0 && current >= 0.0) || (last < 0.0 && current < 0.0)
}

/// Rows of the gap decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeanCase {
    /// Same direction, last book at least as steep, its right corner at or
    /// below the candidate's left corner.
    SameLastSteeperLow,
    /// Same direction, last book at least as steep, its right corner above
    /// the candidate's left corner.
    SameLastSteeperHigh,
    /// Opposite directions, the books lean towards each other.
    Converging,
    /// Opposite directions, the books lean away from each other.
    Diverging,
    /// Same direction, candidate steeper.
    SameCurrentSteeper,
}

impl LeanCase {
    /// Looks up the table row for a (possibly mirrored) pair.
    ///
    /// Same-direction rows compare angle magnitudes, opposite-direction rows
    /// compare signed angles. Returns `None` when no row matches, which only
    /// happens for non-finite input.
    pub fn classify(same_direction: bool, last: &Silhouette, current: &Silhouette) -> Option<Self> {
        let magnitude = last.angle.abs().partial_cmp(&current.angle.abs());
        let signed = last.angle.partial_cmp(&current.angle);
        let corners = last.corners.right.partial_cmp(&current.corners.left);

        use Ordering::{Equal, Greater, Less};
        match (same_direction, magnitude, signed, corners) {
            (true, Some(Greater | Equal), _, Some(Less | Equal)) => Some(Self::SameLastSteeperLow),
            (true, Some(Greater | Equal), _, Some(Greater)) => Some(Self::SameLastSteeperHigh),
            (false, _, Some(Greater), _) => Some(Self::Converging),
            (false, _, Some(Less), _) => Some(Self::Diverging),
            (true, Some(Less), _, _) => Some(Self::SameCurrentSteeper),
            _ => None,
        }
    }

    /// Applies this row's formula.
    pub fn gap(self, last: &Silhouette, current: &Silhouette) -> f64 {
        let la = last.angle.abs();
        let ca = current.angle.abs();

        match self {
            Self::SameLastSteeperLow => {
                la.sin() * last.height
                    - (ca.tan() * last.corners.right - current.width / ca.cos())
            }
            Self::SameLastSteeperHigh => {
                current.corners.left / (FRAC_PI_2 - la).tan()
                    - current.corners.left / (FRAC_PI_2 - ca).tan()
                    + current.width / ca.cos()
            }
            Self::Converging => {
                (FRAC_PI_2 - la).cos() * last.height
                    + last.corners.right / (FRAC_PI_2 - ca).tan()
            }
            Self::Diverging => {
                (FRAC_PI_2 - la).sin() * last.width
                    - (ca.tan() * la.sin() * last.width - current.width / ca.cos())
            }
            Self::SameCurrentSteeper => {
                current.angle.cos() * current.width
                    + current.angle.sin() * current.width / (FRAC_PI_2 - last.angle).tan()
            }
        }
    }
}

/// Outcome of resolving the gap between two books.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Table row that was applied.
    pub case: LeanCase,
    /// Distance between the two books' reference edges.
    pub gap: f64,
    /// Whether the pair was mirrored before the formula was applied.
    pub mirrored: bool,
}

/// Resolves the gap between the last placed book and the next candidate.
///
/// Fails with [`Error::UnhandledLeanCase`] when no table row applies or the
/// formula yields a non-finite gap.
pub fn resolve_gap(last: &Book, current: &Book) -> Result<Resolution> {
    let mut l = Silhouette::trailing(last);
    let mut c = Silhouette::leading(current);

    log::debug!(
        "last - angle: {:.3} left: {:.3} right: {:.3}",
        l.angle.to_degrees(),
        l.corners.left,
        l.corners.right
    );
    log::debug!(
        "current - angle: {:.3} left: {:.3} right: {:.3}",
        c.angle.to_degrees(),
        c.corners.left,
        c.corners.right
    );

    let same = same_direction(l.angle, c.angle);
    let mut mirrored = false;

    // Two books leaning left are handled as their mirror image.
    if same && l.angle < 0.0 {
        (l, c) = mirror(l, c);
        mirrored = true;
    }

    let unhandled = || {
        log::warn!(
            "leaning hit an unhandled case (last {:.3} rad, current {:.3} rad)",
            last.lean_angle(),
            current.lean_angle()
        );
        Error::UnhandledLeanCase {
            last: last.lean_angle(),
            current: current.lean_angle(),
        }
    };

    let case = LeanCase::classify(same, &l, &c).ok_or_else(unhandled)?;

    if case == LeanCase::Converging && l.corners.right > c.corners.left {
        (l, c) = mirror(l, c);
        mirrored = true;
    }

    let gap = case.gap(&l, &c);
    log::debug!("case {:?}, mirrored: {}, gap: {:.4}", case, mirrored, gap);

    if !gap.is_finite() {
        return Err(unhandled());
    }

    Ok(Resolution {
        case,
        gap,
        mirrored,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use u_bookgen_core::{LayoutSettings, Sampler};

    fn book(height: f64, width: f64, angle: f64) -> Book {
        let settings = LayoutSettings::default()
            .without_randomness()
            .with_book_height(height, 0.0)
            .with_book_width(width, 0.0);
        let mut params = Sampler::new(0).sample(&settings);
        params.lean = angle != 0.0;
        params.lean_angle = angle;
        Book::new(params)
    }

    fn case_of(last: f64, current: f64) -> LeanCase {
        resolve_gap(&book(0.2, 0.03, last), &book(0.2, 0.03, current))
            .unwrap()
            .case
    }

    #[test]
    fn test_corner_heights_upright() {
        let b = book(0.2, 0.03, 0.0);
        let trailing = CornerHeights::trailing(&b);
        let leading = CornerHeights::leading(&b);
        assert_relative_eq!(trailing.left, 0.2, epsilon = 1e-12);
        assert_relative_eq!(trailing.right, 0.2, epsilon = 1e-12);
        assert_eq!(trailing, leading);
    }

    #[test]
    fn test_corner_heights_leaning() {
        let angle = 0.2_f64;
        let low = angle.cos() * 0.2;
        let high = low + angle.sin() * 0.03;

        let right = book(0.2, 0.03, angle);
        let c = CornerHeights::trailing(&right);
        assert_relative_eq!(c.left, high, epsilon = 1e-12);
        assert_relative_eq!(c.right, low, epsilon = 1e-12);
        assert_eq!(CornerHeights::leading(&right), c);

        let left = book(0.2, 0.03, -angle);
        let c = CornerHeights::trailing(&left);
        assert_relative_eq!(c.left, low, epsilon = 1e-12);
        assert_relative_eq!(c.right, high, epsilon = 1e-12);
        assert_eq!(c.swapped().left, c.right);
    }

    #[test]
    fn test_same_direction() {
        assert!(same_direction(0.0, 0.0));
        assert!(same_direction(0.1, 0.0));
        assert!(same_direction(-0.1, -0.3));
        assert!(!same_direction(0.0, -0.1));
        assert!(!same_direction(-0.1, 0.2));
    }

    #[test]
    fn test_upright_pair_abuts() {
        let last = book(0.2, 0.03, 0.0);
        let current = book(0.25, 0.04, 0.0);
        let resolution = resolve_gap(&last, &current).unwrap();
        assert_eq!(resolution.case, LeanCase::SameLastSteeperLow);
        assert!(!resolution.mirrored);
        assert_relative_eq!(resolution.gap, 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_classification() {
        assert_eq!(case_of(0.1, 0.1), LeanCase::SameLastSteeperLow);
        assert_eq!(case_of(0.1, -0.1), LeanCase::Converging);
        assert_eq!(case_of(0.0, -0.1), LeanCase::Converging);
        assert_eq!(case_of(-0.1, 0.1), LeanCase::Diverging);
        assert_eq!(case_of(-0.1, 0.0), LeanCase::Diverging);
        assert_eq!(case_of(0.1, 0.2), LeanCase::SameCurrentSteeper);
        assert_eq!(case_of(0.0, 0.2), LeanCase::SameCurrentSteeper);
    }

    #[test]
    fn test_tall_steep_last_book() {
        let last = book(0.3, 0.03, 0.2);
        let current = book(0.2, 0.03, 0.1);
        let resolution = resolve_gap(&last, &current).unwrap();
        assert_eq!(resolution.case, LeanCase::SameLastSteeperHigh);
        assert!(resolution.gap > 0.0);
    }

    #[test]
    fn test_both_left_is_mirrored() {
        let last = book(0.2, 0.03, -0.1);
        let current = book(0.2, 0.03, -0.2);
        let resolution = resolve_gap(&last, &current).unwrap();
        assert!(resolution.mirrored);
        // after mirroring the steeper book is the trailing one
        assert!(matches!(
            resolution.case,
            LeanCase::SameLastSteeperLow | LeanCase::SameLastSteeperHigh
        ));
        assert!(resolution.gap.is_finite());
    }

    #[test]
    fn test_same_direction_formulas() {
        let la = 0.2_f64;
        let ca = 0.1_f64;
        let last = Silhouette::trailing(&book(0.2, 0.03, la));
        let current = Silhouette::leading(&book(0.2, 0.04, ca));

        let expected = la.sin() * 0.2 - (ca.tan() * last.corners.right - 0.04 / ca.cos());
        assert_relative_eq!(
            LeanCase::SameLastSteeperLow.gap(&last, &current),
            expected,
            epsilon = 1e-12
        );

        let expected = 0.04 * ca.cos() + ca.sin() * 0.04 / (FRAC_PI_2 - la).tan();
        assert_relative_eq!(
            LeanCase::SameCurrentSteeper.gap(&last, &current),
            expected,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_diverging_formula() {
        let la = -0.15_f64;
        let ca = 0.25_f64;
        let resolution = resolve_gap(&book(0.2, 0.03, la), &book(0.2, 0.05, ca)).unwrap();
        let expected = (FRAC_PI_2 - la.abs()).sin() * 0.03
            - (ca.tan() * la.abs().sin() * 0.03 - 0.05 / ca.cos());
        assert_eq!(resolution.case, LeanCase::Diverging);
        assert_relative_eq!(resolution.gap, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_non_finite_angle_is_unhandled() {
        let last = book(0.2, 0.03, f64::NAN);
        let current = book(0.2, 0.03, 0.1);
        let err = resolve_gap(&last, &current).unwrap_err();
        assert!(matches!(err, Error::UnhandledLeanCase { .. }));
    }

    #[test]
    fn test_classify_rejects_nan() {
        let b = book(0.2, 0.03, 0.1);
        let mut broken = Silhouette::leading(&b);
        broken.angle = f64::NAN;
        let fine = Silhouette::trailing(&b);
        assert_eq!(LeanCase::classify(true, &fine, &broken), None);
    }
}
