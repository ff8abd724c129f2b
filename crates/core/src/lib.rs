//! # U-Bookgen Core
//!
//! Core types for the u-bookgen procedural book layout engine.
//!
//! This crate provides the pieces shared by the shelf and stack layout
//! engines: settings, the seeded parameter sampler, transforms and the mesh
//! buffers exchanged with geometry generators.
//!
//! ## Core Components
//!
//! - **Settings**: `LayoutSettings`, `Alignment`, `RandomizedValue`
//! - **Sampler**: deterministic `BookParams` stream from a seed
//! - **Transform types**: `Transform3D`, placement `Frame`, `AABB3D`
//! - **Meshes**: `Mesh` buffers and the `MeshGenerator` seam
//! - **Reports**: `FillReport` summary of a layout run
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod error;
pub mod mesh;
pub mod report;
pub mod sampler;
pub mod settings;
pub mod transform;

// Re-exports
pub use error::{Error, Result};
pub use mesh::{Edge, HullMeshGenerator, Mesh, MeshGenerator, Quad, QuadUv};
pub use report::FillReport;
pub use sampler::{BookParams, Draw, Sampler, DIMENSION_DRAWS};
pub use settings::{Alignment, LayoutSettings, RandomizedValue};
pub use transform::{Frame, Transform3D, AABB3D};
