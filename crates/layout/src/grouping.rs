//! Common interface of shelves and stacks.

use crate::book::Book;
use crate::shelf::Shelf;
use crate::stack::Stack;
use nalgebra::Point3;
use std::fmt;
use u_bookgen_core::{FillReport, HullMeshGenerator, LayoutSettings, Mesh, MeshGenerator, Quad, Result, AABB3D};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of a book grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GroupingKind {
    /// Books standing along a line.
    Shelf,
    /// Books lying on top of each other.
    Stack,
}

impl GroupingKind {
    /// Returns the lowercase name used in grouping names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shelf => "shelf",
            Self::Stack => "stack",
        }
    }
}

impl fmt::Display for GroupingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the display name of a grouping, e.g. `shelf_3` or `stack_0_Scene`.
pub fn compose_grouping_name(kind: GroupingKind, id: u64, scene: Option<&str>) -> String {
    match scene {
        Some(scene) => format!("{}_{}_{}", kind, id, scene),
        None => format!("{}_{}", kind, id),
    }
}

/// A layout engine that fills itself with books.
///
/// Every `fill()` reseeds from [`Layout::seed`], so filling twice yields the
/// same books.
pub trait Layout {
    /// Returns the grouping kind.
    fn kind(&self) -> GroupingKind;

    /// Returns the display name.
    fn name(&self) -> &str;

    /// Returns the grouping id.
    fn id(&self) -> u64;

    /// Returns the settings used for sampling.
    fn settings(&self) -> &LayoutSettings;

    /// Returns the placed books in placement order.
    fn books(&self) -> &[Book];

    /// Removes all placed books.
    fn clear(&mut self);

    /// Replaces the books with a fresh layout.
    ///
    /// On error the books committed before the failure are kept.
    fn fill(&mut self) -> Result<FillReport>;

    /// Seed of the sampler, the settings seed offset by the grouping id.
    fn seed(&self) -> u64 {
        self.settings().seed.wrapping_add(self.id())
    }

    /// World-space meshes of all books from the given generator.
    fn geometry_with(&self, generator: &dyn MeshGenerator) -> Mesh {
        let mut mesh = Mesh::new();
        for book in self.books() {
            mesh.append(book.mesh_with(generator));
        }
        mesh
    }

    /// World-space hull vertices and faces of all books for previews.
    fn geometry(&self) -> (Vec<Point3<f64>>, Vec<Quad>) {
        self.geometry_with(&HullMeshGenerator::new()).into_buffers()
    }

    /// Bounding box of the preview geometry, `None` when empty.
    fn bounds(&self) -> Option<AABB3D> {
        self.books()
            .iter()
            .filter_map(Book::bounds)
            .reduce(|acc, b| acc.union(&b))
    }
}

/// A shelf or a stack.
#[derive(Debug, Clone)]
pub enum Grouping {
    Shelf(Shelf),
    Stack(Stack),
}

impl Grouping {
    fn inner(&self) -> &dyn Layout {
        match self {
            Self::Shelf(shelf) => shelf,
            Self::Stack(stack) => stack,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Layout {
        match self {
            Self::Shelf(shelf) => shelf,
            Self::Stack(stack) => stack,
        }
    }

    /// Returns the shelf, if this is one.
    pub fn as_shelf(&self) -> Option<&Shelf> {
        match self {
            Self::Shelf(shelf) => Some(shelf),
            Self::Stack(_) => None,
        }
    }

    /// Returns the stack, if this is one.
    pub fn as_stack(&self) -> Option<&Stack> {
        match self {
            Self::Stack(stack) => Some(stack),
            Self::Shelf(_) => None,
        }
    }
}

impl From<Shelf> for Grouping {
    fn from(shelf: Shelf) -> Self {
        Self::Shelf(shelf)
    }
}

impl From<Stack> for Grouping {
    fn from(stack: Stack) -> Self {
        Self::Stack(stack)
    }
}

impl Layout for Grouping {
    fn kind(&self) -> GroupingKind {
        self.inner().kind()
    }

    fn name(&self) -> &str {
        self.inner().name()
    }

    fn id(&self) -> u64 {
        self.inner().id()
    }

    fn settings(&self) -> &LayoutSettings {
        self.inner().settings()
    }

    fn books(&self) -> &[Book] {
        self.inner().books()
    }

    fn clear(&mut self) {
        self.inner_mut().clear();
    }

    fn fill(&mut self) -> Result<FillReport> {
        self.inner_mut().fill()
    }
}
