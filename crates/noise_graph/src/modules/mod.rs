//! The built-in operator set.
//!
//! Operators follow two structural patterns: combinators reduce the values
//! of several sources evaluated at the same point, transforms reparameterize
//! the query point before delegating to a single source. Concrete noise
//! kernels (gradient, ridged, cellular) are deliberately not part of this
//! crate; any type implementing [`crate::graph::Module`] and compiling to a
//! [`crate::graph::Element`] plugs into the same pipelines.
pub mod arithmetic;
pub mod constant;
pub mod curve;
pub mod remap;
pub mod select;
pub mod transform;

pub use arithmetic::{Addition, Maximum, Minimum, Multiply};
pub use constant::Constant;
pub use curve::{ControlPoint, Curve, MIN_CONTROL_POINTS};
pub use remap::{Absolute, Clamp, Exponent, Invert, ScaleBias};
pub use select::{Blend, Select};
pub use transform::{ScalePoint, TranslatePoint};
