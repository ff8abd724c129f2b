//! Shelf layout: books standing side by side along a line.

use crate::book::Book;
use crate::grouping::{compose_grouping_name, GroupingKind, Layout};
use crate::lean::resolve_gap;
use nalgebra::{Point3, Rotation3, Vector3};
use u_bookgen_core::{Error, FillReport, Frame, LayoutSettings, Result, Sampler, Transform3D};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Placement anchors of a shelf.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShelfAnchors {
    /// Where the first book touches down.
    pub start: Point3<f64>,
    /// End of the shelf line.
    pub end: Point3<f64>,
    /// Up direction of the shelf surface.
    pub normal: Vector3<f64>,
}

impl ShelfAnchors {
    /// Creates new shelf anchors.
    pub fn new(start: Point3<f64>, end: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self { start, end, normal }
    }

    /// Creates a shelf of the given length along +X on the XY plane.
    pub fn along_x(length: f64) -> Self {
        Self::new(
            Point3::origin(),
            Point3::new(length, 0.0, 0.0),
            Vector3::z(),
        )
    }

    /// Distance between start and end.
    pub fn span(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Validates the anchors and builds the shelf frame.
    pub fn frame(&self) -> Result<Frame> {
        let span = self.span();
        if !span.is_finite() || span <= 0.0 {
            return Err(Error::InvalidAnchor(format!(
                "shelf span must be positive, got {}",
                span
            )));
        }
        Frame::from_direction_normal(self.start, &(self.end - self.start), &self.normal)
    }
}

/// A shelf-like grouping of books.
#[derive(Debug, Clone)]
pub struct Shelf {
    name: String,
    id: u64,
    anchors: ShelfAnchors,
    frame: Frame,
    span: f64,
    settings: LayoutSettings,
    books: Vec<Book>,
    align_offset: f64,
}

impl Shelf {
    /// Creates an empty shelf.
    ///
    /// Settings and anchors are validated here; a shelf that was created can
    /// always be filled.
    pub fn new(anchors: ShelfAnchors, settings: LayoutSettings) -> Result<Self> {
        settings.validate()?;
        let frame = anchors.frame()?;

        Ok(Self {
            name: compose_grouping_name(GroupingKind::Shelf, 0, None),
            id: 0,
            span: anchors.span(),
            anchors,
            frame,
            settings,
            books: Vec::new(),
            align_offset: 0.0,
        })
    }

    /// Sets the grouping id, which offsets the seed.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self.name = compose_grouping_name(GroupingKind::Shelf, id, None);
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the anchors.
    pub fn anchors(&self) -> &ShelfAnchors {
        &self.anchors
    }

    /// Returns the placement frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Returns the shelf length.
    pub fn span(&self) -> f64 {
        self.span
    }

    /// Appends a book whose reference edge sits at `offset` along the shelf.
    fn add_book(&mut self, mut book: Book, offset: f64, first: bool) {
        if first {
            self.align_offset = book.depth() / 2.0;
        }

        let mut local = Vector3::zeros();

        if !first {
            if let Some(sign) = self.settings.alignment.depth_sign() {
                local.y += sign * (book.depth() / 2.0 - self.align_offset);
            }
        }

        local.z += book.height() / 2.0;

        // pivot on the bottom corner the book leans away from
        if book.lean_angle() < 0.0 {
            local.x += book.width() / 2.0;
        } else {
            local.x -= book.width() / 2.0;
        }

        let lean = Rotation3::from_axis_angle(&Vector3::y_axis(), book.lean_angle());
        let mut local = lean * local;
        local.x += offset;

        let placed = Transform3D::new(Point3::from(local), lean);
        book.set_transform(self.frame.to_transform().then(&placed));
        self.books.push(book);
    }

    /// Places the first book, returning its offset and extent.
    fn place_first(&mut self, book: Book, report: &mut FillReport) -> Option<f64> {
        let offset = book.touch_down_offset();
        let extent = offset + book.lean_reach();

        if extent < self.span {
            self.add_book(book, offset, true);
            report.commit(extent);
            Some(offset)
        } else {
            report.reject(extent);
            None
        }
    }
}

impl Layout for Shelf {
    fn kind(&self) -> GroupingKind {
        GroupingKind::Shelf
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
        self.align_offset = 0.0;
    }

    fn fill(&mut self) -> Result<FillReport> {
        self.clear();

        let mut sampler = Sampler::new(self.seed());
        let mut report = FillReport::new(self.span);

        let first = Book::new(sampler.sample(&self.settings));
        let Some(mut offset) = self.place_first(first, &mut report) else {
            log::debug!("{}: first book does not fit", self.name);
            return Ok(report);
        };

        loop {
            log::debug!("remaining width to be filled: {:.3}", report.remaining());

            let candidate = Book::new(sampler.sample(&self.settings));
            let Some(last) = self.books.last() else {
                break;
            };
            let resolution = resolve_gap(last, &candidate)?;

            let extent = offset + resolution.gap + candidate.lean_reach();
            offset += resolution.gap;

            if extent < self.span {
                self.add_book(candidate, offset, false);
                report.commit(extent);
            } else {
                report.reject(extent);
                break;
            }
        }

        log::debug!(
            "{}: placed {} books, {} filled",
            self.name,
            report.placed,
            report.utilization_percent()
        );

        Ok(report)
    }
}
