//! # U-Bookgen
//!
//! Procedural layout engine for shelves and stacks of books.
//!
//! Books are sampled from randomized dimensions and placed until the shelf
//! length or stack height is used up. The result is a list of books with
//! world transforms, plus preview geometry for the whole grouping.
//!
//! ## Quick Start
//!
//! ```rust
//! use u_bookgen::layout::{Layout, Shelf, ShelfAnchors};
//! use u_bookgen::LayoutSettings;
//!
//! let settings = LayoutSettings::default().with_seed(7).with_lean(0.3, 0.0);
//! let mut shelf = Shelf::new(ShelfAnchors::along_x(1.0), settings)?;
//! let report = shelf.fill()?;
//!
//! assert_eq!(report.placed, shelf.books().len());
//! assert!(report.filled < 1.0);
//! # Ok::<(), u_bookgen::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support

/// Settings, sampling, transforms and meshes.
pub use u_bookgen_core as core;

/// Shelf and stack layout engines.
pub use u_bookgen_layout as layout;

// Re-export commonly used types at root level
pub use u_bookgen_core::{Alignment, Error, FillReport, LayoutSettings, Mesh, MeshGenerator, Result};
pub use u_bookgen_layout::{Book, Grouping, GroupingKind, Layout, Shelf, ShelfAnchors, Stack, StackAnchors};
