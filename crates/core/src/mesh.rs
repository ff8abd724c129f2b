//! Quad mesh buffers and the book mesh generator seam.

use crate::sampler::BookParams;
use crate::transform::Transform3D;
use nalgebra::{Point2, Point3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Four vertex indices of a quad face.
pub type Quad = [usize; 4];

/// An edge between two vertex indices.
pub type Edge = [usize; 2];

/// UV coordinates of the four corners of a quad.
pub type QuadUv = [Point2<f64>; 4];

/// Vertex and face buffers of a quad mesh.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,
    /// Quad faces indexing into `vertices`.
    pub faces: Vec<Quad>,
    /// Edges that should stay sharp under subdivision.
    pub creases: Vec<Edge>,
    /// Per-face UVs, parallel to `faces` when present.
    pub uvs: Option<Vec<QuadUv>>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the mesh has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns a copy with every vertex moved by `transform`.
    pub fn transformed(&self, transform: &Transform3D) -> Self {
        Self {
            vertices: transform.transform_points(&self.vertices),
            ..self.clone()
        }
    }

    /// Appends another mesh, shifting its indices past the current vertices.
    ///
    /// UVs are kept only while every appended mesh carries them.
    pub fn append(&mut self, other: Mesh) {
        let offset = self.vertices.len();
        let was_empty = self.is_empty() && self.faces.is_empty();

        self.vertices.extend(other.vertices);
        self.faces
            .extend(other.faces.iter().map(|f| f.map(|i| i + offset)));
        self.creases
            .extend(other.creases.iter().map(|e| e.map(|i| i + offset)));

        self.uvs = match (self.uvs.take(), other.uvs) {
            (Some(mut mine), Some(theirs)) => {
                mine.extend(theirs);
                Some(mine)
            }
            (None, Some(theirs)) if was_empty => Some(theirs),
            _ => None,
        };
    }

    /// Splits the mesh into the vertex and face buffers used for previews.
    pub fn into_buffers(self) -> (Vec<Point3<f64>>, Vec<Quad>) {
        (self.vertices, self.faces)
    }
}

/// Builds the local-space mesh of a single book.
///
/// The mesh is centered on the book: X spans the thickness, Y the depth and
/// Z the height.
pub trait MeshGenerator {
    /// Generates the mesh for the given book parameters.
    fn generate(&self, params: &BookParams) -> Mesh;
}

/// Generates the outer cover hull of a book as a closed box.
///
/// Used for previews and outlines where the detailed book shape is not needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HullMeshGenerator {
    /// Whether to emit per-face UVs.
    pub with_uvs: bool,
}

impl HullMeshGenerator {
    /// Creates a generator without UVs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables UVs.
    pub fn with_uvs(mut self, with_uvs: bool) -> Self {
        self.with_uvs = with_uvs;
        self
    }
}

const HULL_FACES: [Quad; 6] = [
    [0, 3, 2, 1], // bottom
    [4, 5, 6, 7], // top
    [0, 1, 5, 4], // back
    [2, 3, 7, 6], // front
    [1, 2, 6, 5], // right cover
    [3, 0, 4, 7], // left cover
];

const HULL_EDGES: [Edge; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

impl MeshGenerator for HullMeshGenerator {
    fn generate(&self, params: &BookParams) -> Mesh {
        let hx = params.width() / 2.0;
        let hy = params.cover_depth / 2.0;
        let hz = params.cover_height / 2.0;

        let mut vertices = Vec::with_capacity(8);
        for z in [-hz, hz] {
            vertices.push(Point3::new(-hx, -hy, z));
            vertices.push(Point3::new(hx, -hy, z));
            vertices.push(Point3::new(hx, hy, z));
            vertices.push(Point3::new(-hx, hy, z));
        }

        let uvs = self.with_uvs.then(|| {
            let unit = [
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
            ];
            vec![unit; HULL_FACES.len()]
        });

        Mesh {
            vertices,
            faces: HULL_FACES.to_vec(),
            creases: HULL_EDGES.to_vec(),
            uvs,
        }
    }
}
