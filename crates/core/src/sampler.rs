//! Seeded sampling of book parameters.
//!
//! The order in which values are pulled from the random stream is part of the
//! observable behavior: the same seed must always yield the same books. Draws
//! are therefore listed explicitly in [`DIMENSION_DRAWS`] rather than derived
//! from any container iteration order.

use crate::settings::{LayoutSettings, RandomizedValue};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Half-width of the jitter band applied to dimensions.
pub const DIMENSION_SPREAD: f64 = 0.2;

/// Half-width of the jitter band applied to the lean angle.
pub const LEAN_SPREAD: f64 = 0.4;

/// A named dimension draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draw {
    /// Cover height.
    BookHeight,
    /// Book thickness.
    BookWidth,
    /// Cover depth.
    BookDepth,
    /// Page block inset.
    TextblockOffset,
    /// Cover board thickness.
    CoverThickness,
    /// Spine curl.
    SpineCurl,
    /// Hinge inset.
    HingeInset,
    /// Hinge width.
    HingeWidth,
}

/// Dimension draws in stream order.
pub const DIMENSION_DRAWS: [Draw; 8] = [
    Draw::BookHeight,
    Draw::BookWidth,
    Draw::BookDepth,
    Draw::TextblockOffset,
    Draw::CoverThickness,
    Draw::SpineCurl,
    Draw::HingeInset,
    Draw::HingeWidth,
];

impl Draw {
    /// Returns the setting this draw jitters.
    pub fn setting(self, settings: &LayoutSettings) -> RandomizedValue {
        match self {
            Self::BookHeight => settings.book_height,
            Self::BookWidth => settings.book_width,
            Self::BookDepth => settings.book_depth,
            Self::TextblockOffset => settings.textblock_offset,
            Self::CoverThickness => settings.cover_thickness,
            Self::SpineCurl => settings.spine_curl,
            Self::HingeInset => settings.hinge_inset,
            Self::HingeWidth => settings.hinge_width,
        }
    }
}

/// Jitter values of one sample, indexed by [`Draw`].
#[derive(Debug, Clone, Copy, Default)]
struct Jitter([f64; DIMENSION_DRAWS.len()]);

impl Jitter {
    fn get(&self, draw: Draw) -> f64 {
        self.0[draw as usize]
    }

    /// `scale * base * (1 + jitter)` for the given draw.
    fn scaled(&self, draw: Draw, settings: &LayoutSettings) -> f64 {
        settings.scale * draw.setting(settings).base * (1.0 + self.get(draw))
    }
}

/// Concrete dimensions and lean of one book.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BookParams {
    /// Height of the cover.
    pub cover_height: f64,
    /// Thickness of one cover board.
    pub cover_thickness: f64,
    /// Depth of the cover.
    pub cover_depth: f64,
    /// Height of the page block.
    pub page_height: f64,
    /// Depth of the page block.
    pub page_depth: f64,
    /// Thickness of the page block.
    pub page_thickness: f64,
    /// Spine curl.
    pub spine_curl: f64,
    /// Hinge inset.
    pub hinge_inset: f64,
    /// Hinge width.
    pub hinge_width: f64,
    /// Whether the book leans.
    pub lean: bool,
    /// Signed lean angle in radians, 0 when upright.
    pub lean_angle: f64,
}

impl BookParams {
    /// Total thickness: page block plus both covers.
    pub fn width(&self) -> f64 {
        self.page_thickness + 2.0 * self.cover_thickness
    }
}

/// Seeded stream of book parameters.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    /// Creates a sampler seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws one uniform value in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Draws `uniform(-spread, spread) * factor`.
    fn jitter(&mut self, spread: f64, factor: f64) -> f64 {
        (self.unit() * 2.0 * spread - spread) * factor
    }

    fn dimension_jitter(&mut self, settings: &LayoutSettings) -> Jitter {
        let mut jitter = Jitter::default();
        for draw in DIMENSION_DRAWS {
            jitter.0[draw as usize] =
                self.jitter(DIMENSION_SPREAD, draw.setting(settings).randomness);
        }
        jitter
    }

    /// Samples an upright book, pulling only the dimension draws.
    pub fn sample_flat(&mut self, settings: &LayoutSettings) -> BookParams {
        let jitter = self.dimension_jitter(settings);

        let cover_height = jitter.scaled(Draw::BookHeight, settings);
        let book_width = jitter.scaled(Draw::BookWidth, settings);
        let cover_depth = jitter.scaled(Draw::BookDepth, settings);
        let cover_thickness = jitter.scaled(Draw::CoverThickness, settings);
        let page_offset = jitter.scaled(Draw::TextblockOffset, settings);

        BookParams {
            cover_height,
            cover_thickness,
            cover_depth,
            page_height: cover_height - page_offset,
            page_depth: cover_depth - page_offset,
            page_thickness: book_width - 2.0 * cover_thickness,
            spine_curl: jitter.scaled(Draw::SpineCurl, settings),
            hinge_inset: jitter.scaled(Draw::HingeInset, settings),
            hinge_width: jitter.scaled(Draw::HingeWidth, settings),
            lean: false,
            lean_angle: 0.0,
        }
    }

    /// Samples a book including its lean.
    ///
    /// After the dimension draws come the lean occurrence and direction draws,
    /// then the lean angle jitter, which is only pulled for leaning books.
    pub fn sample(&mut self, settings: &LayoutSettings) -> BookParams {
        let mut params = self.sample_flat(settings);

        let lean = self.unit() < settings.lean_amount;
        let direction = if self.unit() > 0.5 - settings.lean_direction / 2.0 {
            1.0
        } else {
            -1.0
        };

        if lean {
            let jitter = self.jitter(LEAN_SPREAD, settings.lean_angle.randomness);
            params.lean = true;
            params.lean_angle = settings.lean_angle.base * (1.0 + jitter) * direction;
        }

        params
    }
}
