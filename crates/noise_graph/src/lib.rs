#![forbid(unsafe_code)]
//! noise_graph: composable scalar noise fields with a compiled module
//! pipeline and per-query caching.
//!
//! Modules:
//! - graph: operator-node trait, compiler, pipeline and evaluation cache
//! - modules: the built-in operator set (combinators, remappers, transforms)
//! - math: interpolation helpers
//!
//! Operator graphs are authored as [`std::sync::Arc`]-linked
//! [`graph::Module`] nodes (1D, 2D and 3D via the [`graph::Point`]
//! parameter), compiled once into an immutable [`graph::Pipeline`] and then
//! evaluated point by point, optionally through a caller-owned
//! [`graph::Cache`].
pub mod error;
pub mod graph;
pub mod math;
pub mod modules;

/// Convenient re-exports for common types. Import with `use noise_graph::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::graph::{
        Cache, CompileContext, CompileOptions, Compiler, Element, ElementId, Module, Pipeline,
        Point, SourceSlots,
    };
    pub use crate::modules::{
        Absolute, Addition, Blend, Clamp, Constant, ControlPoint, Curve, Exponent, Invert,
        Maximum, Minimum, Multiply, ScaleBias, ScalePoint, Select, TranslatePoint,
        MIN_CONTROL_POINTS,
    };
}
