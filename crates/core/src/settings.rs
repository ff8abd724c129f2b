//! Layout settings shared by every grouping.

use crate::sampler::{DIMENSION_SPREAD, LEAN_SPREAD};
use crate::{Error, Result};
use std::f64::consts::FRAC_PI_2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Depth-axis reference edge that books after the first are aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Alignment {
    /// Align the page edges opposite the spine.
    #[default]
    ForeEdge,
    /// Align the spines.
    Spine,
    /// Keep every book centered on the shelf line.
    Center,
}

impl Alignment {
    /// Sign of the depth offset applied to non-first books, `None` for center.
    pub fn depth_sign(self) -> Option<f64> {
        match self {
            Self::ForeEdge => Some(1.0),
            Self::Spine => Some(-1.0),
            Self::Center => None,
        }
    }
}

/// A base value together with how strongly it is randomized.
///
/// A `randomness` of 0 disables variance, 1 enables the full ±20% band.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RandomizedValue {
    /// Base value before scaling and jitter.
    pub base: f64,
    /// Randomization factor.
    pub randomness: f64,
}

impl RandomizedValue {
    /// Creates a new randomized value.
    pub fn new(base: f64, randomness: f64) -> Self {
        Self { base, randomness }
    }

    /// Creates a value without any variance.
    pub fn fixed(base: f64) -> Self {
        Self::new(base, 0.0)
    }

    /// Smallest value reachable with a jitter band of `spread`.
    pub fn lower(&self, spread: f64) -> f64 {
        self.base * (1.0 - spread * self.randomness)
    }

    /// Largest value reachable with a jitter band of `spread`.
    pub fn upper(&self, spread: f64) -> f64 {
        self.base * (1.0 + spread * self.randomness)
    }
}

/// Configuration for one shelf or stack.
///
/// Read-only while a layout runs. Lengths are in scene units, angles in radians.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutSettings {
    /// Uniform scale applied to every sampled length.
    pub scale: f64,

    /// Seed of the parameter stream. Groupings add their id to it.
    pub seed: u64,

    /// Depth alignment of shelf books.
    pub alignment: Alignment,

    /// Probability (0.0 - 1.0) that a shelf book leans.
    pub lean_amount: f64,

    /// Bias of the lean direction, -1.0 (always left) to 1.0 (always right).
    pub lean_direction: f64,

    /// Lean angle and its randomization.
    pub lean_angle: RandomizedValue,

    /// Random in-plane rotation of stacked books (0.0 - 1.0, 1.0 = up to 180°).
    pub rotation: f64,

    /// Cover height.
    pub book_height: RandomizedValue,

    /// Total thickness including both covers.
    pub book_width: RandomizedValue,

    /// Cover depth.
    pub book_depth: RandomizedValue,

    /// Thickness of a single cover board.
    pub cover_thickness: RandomizedValue,

    /// Inset of the page block relative to the cover.
    pub textblock_offset: RandomizedValue,

    /// Curvature of the spine.
    pub spine_curl: RandomizedValue,

    /// Inset of the hinge groove.
    pub hinge_inset: RandomizedValue,

    /// Width of the hinge groove.
    pub hinge_width: RandomizedValue,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            scale: 1.0,
            seed: 0,
            alignment: Alignment::default(),
            lean_amount: 0.0,
            lean_direction: 0.0,
            lean_angle: RandomizedValue::new(8f64.to_radians(), 1.0),
            rotation: 0.0,
            book_height: RandomizedValue::new(0.15, 1.0),
            book_width: RandomizedValue::new(0.03, 1.0),
            book_depth: RandomizedValue::new(0.12, 1.0),
            cover_thickness: RandomizedValue::new(0.002, 1.0),
            textblock_offset: RandomizedValue::new(0.005, 1.0),
            spine_curl: RandomizedValue::new(0.002, 1.0),
            hinge_inset: RandomizedValue::new(0.001, 1.0),
            hinge_width: RandomizedValue::new(0.004, 1.0),
        }
    }
}

impl LayoutSettings {
    /// Creates settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the uniform scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the depth alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Sets lean probability and direction bias.
    pub fn with_lean(mut self, amount: f64, direction: f64) -> Self {
        self.lean_amount = amount;
        self.lean_direction = direction;
        self
    }

    /// Sets the lean angle (radians) and its randomization.
    pub fn with_lean_angle(mut self, angle: f64, randomness: f64) -> Self {
        self.lean_angle = RandomizedValue::new(angle, randomness);
        self
    }

    /// Sets the stack rotation factor.
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the book height.
    pub fn with_book_height(mut self, base: f64, randomness: f64) -> Self {
        self.book_height = RandomizedValue::new(base, randomness);
        self
    }

    /// Sets the book width.
    pub fn with_book_width(mut self, base: f64, randomness: f64) -> Self {
        self.book_width = RandomizedValue::new(base, randomness);
        self
    }

    /// Sets the book depth.
    pub fn with_book_depth(mut self, base: f64, randomness: f64) -> Self {
        self.book_depth = RandomizedValue::new(base, randomness);
        self
    }

    /// Sets the cover thickness.
    pub fn with_cover_thickness(mut self, base: f64, randomness: f64) -> Self {
        self.cover_thickness = RandomizedValue::new(base, randomness);
        self
    }

    /// Sets the page block inset.
    pub fn with_textblock_offset(mut self, base: f64, randomness: f64) -> Self {
        self.textblock_offset = RandomizedValue::new(base, randomness);
        self
    }

    /// Sets the spine curl.
    pub fn with_spine_curl(mut self, base: f64, randomness: f64) -> Self {
        self.spine_curl = RandomizedValue::new(base, randomness);
        self
    }

    /// Sets the hinge inset.
    pub fn with_hinge_inset(mut self, base: f64, randomness: f64) -> Self {
        self.hinge_inset = RandomizedValue::new(base, randomness);
        self
    }

    /// Sets the hinge width.
    pub fn with_hinge_width(mut self, base: f64, randomness: f64) -> Self {
        self.hinge_width = RandomizedValue::new(base, randomness);
        self
    }

    /// Disables the randomization of every dimension and of the lean angle.
    pub fn without_randomness(mut self) -> Self {
        for value in self.randomized_mut() {
            value.randomness = 0.0;
        }
        self
    }

    fn randomized(&self) -> [(&'static str, &RandomizedValue); 9] {
        [
            ("book height", &self.book_height),
            ("book width", &self.book_width),
            ("book depth", &self.book_depth),
            ("cover thickness", &self.cover_thickness),
            ("textblock offset", &self.textblock_offset),
            ("spine curl", &self.spine_curl),
            ("hinge inset", &self.hinge_inset),
            ("hinge width", &self.hinge_width),
            ("lean angle", &self.lean_angle),
        ]
    }

    fn randomized_mut(&mut self) -> [&mut RandomizedValue; 9] {
        [
            &mut self.book_height,
            &mut self.book_width,
            &mut self.book_depth,
            &mut self.cover_thickness,
            &mut self.textblock_offset,
            &mut self.spine_curl,
            &mut self.hinge_inset,
            &mut self.hinge_width,
            &mut self.lean_angle,
        ]
    }

    /// Validates the settings before a layout run.
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::InvalidSettings(format!(
                "scale must be positive, got {}",
                self.scale
            )));
        }

        for (name, value) in self.randomized() {
            if !value.base.is_finite() || value.base < 0.0 {
                return Err(Error::InvalidSettings(format!(
                    "{} must be a non-negative number, got {}",
                    name, value.base
                )));
            }
            if !(0.0..=1.0).contains(&value.randomness) {
                return Err(Error::InvalidSettings(format!(
                    "{} randomness must be within 0..=1, got {}",
                    name, value.randomness
                )));
            }
        }

        for (name, value) in [
            ("book height", self.book_height.base),
            ("book width", self.book_width.base),
            ("book depth", self.book_depth.base),
        ] {
            if value <= 0.0 {
                return Err(Error::InvalidSettings(format!(
                    "{} must be positive",
                    name
                )));
            }
        }

        if self.lean_angle.upper(LEAN_SPREAD) >= FRAC_PI_2 {
            return Err(Error::InvalidSettings(format!(
                "lean angle can reach {:.1} degrees, must stay below 90",
                self.lean_angle.upper(LEAN_SPREAD).to_degrees()
            )));
        }

        if !(0.0..=1.0).contains(&self.lean_amount) {
            return Err(Error::InvalidSettings(format!(
                "lean amount must be within 0..=1, got {}",
                self.lean_amount
            )));
        }

        if !(-1.0..=1.0).contains(&self.lean_direction) {
            return Err(Error::InvalidSettings(format!(
                "lean direction must be within -1..=1, got {}",
                self.lean_direction
            )));
        }

        if !(0.0..=1.0).contains(&self.rotation) {
            return Err(Error::InvalidSettings(format!(
                "rotation must be within 0..=1, got {}",
                self.rotation
            )));
        }

        // Checked at the edges of the jitter band so every sampled book has
        // room for its page block.
        let thinnest = self.book_width.lower(DIMENSION_SPREAD);
        if 2.0 * self.cover_thickness.upper(DIMENSION_SPREAD) >= thinnest {
            return Err(Error::InvalidSettings(
                "two covers can be thicker than the book".into(),
            ));
        }

        let inset = self.textblock_offset.upper(DIMENSION_SPREAD);
        for (name, value) in [
            ("book height", &self.book_height),
            ("book depth", &self.book_depth),
        ] {
            if inset >= value.lower(DIMENSION_SPREAD) {
                return Err(Error::InvalidSettings(format!(
                    "textblock offset can exceed the {}",
                    name
                )));
            }
        }

        Ok(())
    }
}
