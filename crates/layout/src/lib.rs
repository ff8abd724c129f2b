//! # U-Bookgen Layout
//!
//! Shelf and stack layout engines for the u-bookgen procedural book engine.
//!
//! A shelf packs standing books along a line, resolving the gap between
//! neighbours from their lean angles. A stack piles flat books along an axis.
//! Both keep adding sampled books until the next one would overflow the
//! target span.

pub mod book;
pub mod grouping;
pub mod lean;
pub mod shelf;
pub mod stack;

// Re-exports
pub use book::Book;
pub use grouping::{compose_grouping_name, Grouping, GroupingKind, Layout};
pub use lean::{resolve_gap, LeanCase, Resolution};
pub use shelf::{Shelf, ShelfAnchors};
pub use stack::{Stack, StackAnchors};
pub use u_bookgen_core::{Error, FillReport, LayoutSettings, Result};
