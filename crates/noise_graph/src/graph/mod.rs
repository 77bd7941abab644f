//! Graph core: operator nodes, the compiler and the executable pipeline.
//!
//! This module groups the machinery for authoring a directed acyclic graph
//! of noise operators, compiling it into a flat [`Pipeline`] of elements
//! addressed by [`ElementId`], and evaluating it point by point with
//! optional per-query memoization through [`Cache`].
pub mod cache;
pub mod compiler;
pub mod module;
pub mod pipeline;
pub mod point;

pub use cache::Cache;
pub use compiler::{CompileContext, CompileOptions, Compiler};
pub use module::{Module, SourceSlots};
pub use pipeline::{Element, Pipeline};
pub use point::Point;

/// Stable index of one compiled element within its pipeline.
///
/// Handles are assigned in compilation order and are the only way one
/// element may reference another.
pub type ElementId = usize;
