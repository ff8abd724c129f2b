//! Stack layout: books lying flat on top of each other.

use crate::book::Book;
use crate::grouping::{compose_grouping_name, GroupingKind, Layout};
use nalgebra::{Point3, Rotation3, Vector3};
use std::f64::consts::{FRAC_PI_2, PI};
use u_bookgen_core::{Error, FillReport, Frame, LayoutSettings, Result, Sampler, Transform3D};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Slack allowed when the top book exactly reaches the target height.
pub const HEIGHT_TOLERANCE: f64 = 1e-9;

/// Placement anchors of a stack.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StackAnchors {
    /// Base point of the stack.
    pub origin: Point3<f64>,
    /// Direction the spines face.
    pub forward: Vector3<f64>,
    /// Stack axis.
    pub up: Vector3<f64>,
    /// Target stack height.
    pub height: f64,
}

impl StackAnchors {
    /// Creates new stack anchors.
    pub fn new(origin: Point3<f64>, forward: Vector3<f64>, up: Vector3<f64>, height: f64) -> Self {
        Self {
            origin,
            forward,
            up,
            height,
        }
    }

    /// Creates an upright stack at the world origin facing +X.
    pub fn upright(height: f64) -> Self {
        Self::new(Point3::origin(), Vector3::x(), Vector3::z(), height)
    }

    /// Validates the anchors and builds the stack frame.
    pub fn frame(&self) -> Result<Frame> {
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(Error::InvalidAnchor(format!(
                "stack height must be positive, got {}",
                self.height
            )));
        }
        Frame::from_direction_normal(self.origin, &self.forward, &self.up)
    }
}

/// A stack of flat books.
#[derive(Debug, Clone)]
pub struct Stack {
    name: String,
    id: u64,
    anchors: StackAnchors,
    frame: Frame,
    settings: LayoutSettings,
    books: Vec<Book>,
}

impl Stack {
    /// Creates an empty stack.
    pub fn new(anchors: StackAnchors, settings: LayoutSettings) -> Result<Self> {
        settings.validate()?;
        let frame = anchors.frame()?;

        Ok(Self {
            name: compose_grouping_name(GroupingKind::Stack, 0, None),
            id: 0,
            anchors,
            frame,
            settings,
            books: Vec::new(),
        })
    }

    /// Sets the grouping id, which offsets the seed.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self.name = compose_grouping_name(GroupingKind::Stack, id, None);
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the anchors.
    pub fn anchors(&self) -> &StackAnchors {
        &self.anchors
    }

    /// Returns the placement frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Returns the target height.
    pub fn height(&self) -> f64 {
        self.anchors.height
    }

    fn fits(&self, extent: f64) -> bool {
        extent <= self.anchors.height + HEIGHT_TOLERANCE
    }

    /// Appends a book whose center sits at `offset` along the stack axis.
    ///
    /// The in-plane rotation is drawn here so that only committed books pull
    /// it from the sampler.
    fn add_book(&mut self, mut book: Book, offset: f64, sampler: &mut Sampler) {
        let spin = sampler.unit() * self.settings.rotation * PI;

        // spin about the stack axis, then lay the book on its cover
        let placed = Transform3D::new(
            Point3::new(0.0, 0.0, offset),
            Rotation3::from_axis_angle(&Vector3::z_axis(), spin)
                * Rotation3::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2),
        );
        book.set_transform(self.frame.to_transform().then(&placed));
        self.books.push(book);
    }
}

impl Layout for Stack {
    fn kind(&self) -> GroupingKind {
        GroupingKind::Stack
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    fn books(&self) -> &[Book] {
        &self.books
    }

    fn clear(&mut self) {
        self.books.clear();
    }

    fn fill(&mut self) -> Result<FillReport> {
        self.clear();

        let mut sampler = Sampler::new(self.seed());
        let mut report = FillReport::new(self.anchors.height);

        let first = Book::new(sampler.sample_flat(&self.settings));
        let mut offset = first.width() / 2.0;
        let mut last_width = first.width();

        if self.fits(first.width()) {
            self.add_book(first, offset, &mut sampler);
            report.commit(last_width);
        } else {
            report.reject(last_width);
            log::debug!("{}: first book does not fit", self.name);
            return Ok(report);
        }

        loop {
            log::debug!("remaining height to be filled: {:.3}", report.remaining());

            let candidate = Book::new(sampler.sample_flat(&self.settings));
            let width = candidate.width();
            offset += last_width / 2.0 + width / 2.0;
            let extent = offset + width / 2.0;

            if !self.fits(extent) {
                report.reject(extent);
                break;
            }

            self.add_book(candidate, offset, &mut sampler);
            report.commit(extent);
            last_width = width;
        }

        log::debug!(
            "{}: stacked {} books, {} filled",
            self.name,
            report.placed,
            report.utilization_percent()
        );

        Ok(report)
    }
}
