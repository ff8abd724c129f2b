//! A single sampled book and its placement.

use nalgebra::Point3;
use u_bookgen_core::{BookParams, HullMeshGenerator, Mesh, MeshGenerator, Quad, Transform3D, AABB3D};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One book: sampled dimensions plus the transform assigned by a layout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Book {
    params: BookParams,
    transform: Transform3D,
}

impl Book {
    /// Creates an unplaced book from sampled parameters.
    pub fn new(params: BookParams) -> Self {
        Self {
            params,
            transform: Transform3D::identity(),
        }
    }

    /// Returns the sampled parameters.
    pub fn params(&self) -> &BookParams {
        &self.params
    }

    /// Returns the cover height.
    pub fn height(&self) -> f64 {
        self.params.cover_height
    }

    /// Returns the thickness including both covers.
    pub fn width(&self) -> f64 {
        self.params.width()
    }

    /// Returns the cover depth.
    pub fn depth(&self) -> f64 {
        self.params.cover_depth
    }

    /// Returns the signed lean angle, 0 when upright.
    pub fn lean_angle(&self) -> f64 {
        self.params.lean_angle
    }

    /// Returns the world transform.
    pub fn transform(&self) -> &Transform3D {
        &self.transform
    }

    /// Returns the world position of the book center.
    pub fn position(&self) -> Point3<f64> {
        self.transform.position
    }

    pub(crate) fn set_transform(&mut self, transform: Transform3D) {
        self.transform = transform;
    }

    /// Offset along the shelf at which the first book touches down so that
    /// its leftmost silhouette point sits on the shelf start.
    pub fn touch_down_offset(&self) -> f64 {
        let angle = self.lean_angle();
        if angle >= 0.0 {
            angle.cos() * self.width()
        } else {
            self.height() * angle.abs().sin()
        }
    }

    /// How far the silhouette reaches past the book's shelf offset.
    pub fn lean_reach(&self) -> f64 {
        let angle = self.lean_angle();
        if angle > 0.0 {
            angle.abs().sin() * self.height()
        } else if angle < 0.0 {
            angle.cos() * self.width()
        } else {
            // upright books are aligned on their right edge
            0.0
        }
    }

    /// Local-space mesh from the given generator.
    pub fn local_mesh<G: MeshGenerator + ?Sized>(&self, generator: &G) -> Mesh {
        generator.generate(&self.params)
    }

    /// World-space mesh from the given generator.
    pub fn mesh_with<G: MeshGenerator + ?Sized>(&self, generator: &G) -> Mesh {
        self.local_mesh(generator).transformed(&self.transform)
    }

    /// World-space hull vertices and faces for previews.
    pub fn geometry(&self) -> (Vec<Point3<f64>>, Vec<Quad>) {
        self.mesh_with(&HullMeshGenerator::new()).into_buffers()
    }

    /// World-space bounding box of the cover hull.
    pub fn bounds(&self) -> Option<AABB3D> {
        let (vertices, _) = self.geometry();
        AABB3D::from_points(&vertices)
    }
}
