//! Curve remapper: maps the source value through a table of control points
//! using localized cubic interpolation.
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{
    Cache, CompileContext, Element, ElementId, Module, Pipeline, Point, SourceSlots,
};
use crate::math::interp_cubic;

/// Minimum number of control points a curve needs to compile.
pub const MIN_CONTROL_POINTS: usize = 4;

/// One knot of a curve remapping table.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint {
    /// Source value this knot applies to.
    pub input: f32,
    /// Remapped value at `input`.
    pub output: f32,
}

/// Remapper that maps the source value onto a curve defined by at least
/// [`MIN_CONTROL_POINTS`] control points.
///
/// The table is kept sorted by input value at all times. Duplicate input
/// values are rejected at insertion so the interpolation parameter is always
/// well-defined; beyond the outermost knots the curve extrapolates flat to
/// the nearest knot's output.
pub struct Curve<P: Point> {
    sources: SourceSlots<P>,
    control_points: Vec<ControlPoint>,
}

impl<P: Point> std::fmt::Debug for Curve<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Curve")
            .field("control_points", &self.control_points)
            .finish_non_exhaustive()
    }
}

impl<P: Point> Curve<P> {
    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(1),
            control_points: Vec::new(),
        }
    }

    /// Creates the remapper with its source set.
    pub fn of(source: Arc<dyn Module<P>>) -> Self {
        let mut module = Self::new();
        module.sources.set(0, source);
        module
    }

    pub fn set_source(&mut self, module: Arc<dyn Module<P>>) {
        self.sources.set(0, module);
    }

    /// Inserts a control point, keeping the table sorted by input value.
    ///
    /// Fails with [`Error::InvalidConfig`] if `input` is not finite or a
    /// knot with the same input already exists.
    pub fn add_control_point(&mut self, input: f32, output: f32) -> Result<&mut Self> {
        if !input.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "curve control point input must be finite, got {input}"
            )));
        }
        match self
            .control_points
            .binary_search_by(|point| point.input.total_cmp(&input))
        {
            Ok(_) => Err(Error::InvalidConfig(format!(
                "curve already has a control point with input {input}"
            ))),
            Err(position) => {
                self.control_points
                    .insert(position, ControlPoint { input, output });
                Ok(self)
            }
        }
    }

    /// Removes all control points.
    pub fn clear_control_points(&mut self) {
        self.control_points.clear();
    }

    /// The control points, sorted by input value.
    pub fn control_points(&self) -> &[ControlPoint] {
        &self.control_points
    }
}

impl<P: Point> Default for Curve<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Point> Module<P> for Curve<P> {
    fn name(&self) -> &'static str {
        "curve"
    }

    fn source_count(&self) -> usize {
        self.sources.arity()
    }

    fn source(&self, index: usize) -> Option<&Arc<dyn Module<P>>> {
        self.sources.get(index)
    }

    fn compile(&self, ctx: &mut CompileContext<'_, P>) -> Result<ElementId> {
        let source = ctx.compile_source(self.name(), &self.sources, 0)?;
        if self.control_points.len() < MIN_CONTROL_POINTS {
            return Err(Error::Compile(format!(
                "curve requires at least {MIN_CONTROL_POINTS} control points but has {}",
                self.control_points.len()
            )));
        }
        Ok(ctx.push(Box::new(CurveElement {
            source,
            points: self.control_points.clone().into_boxed_slice(),
        })))
    }
}

struct CurveElement {
    source: ElementId,
    points: Box<[ControlPoint]>,
}

impl CurveElement {
    /// Maps `value` through the control-point table.
    ///
    /// Finds the first knot whose input exceeds `value`, clamps the four
    /// surrounding indices into the table, and interpolates the clamped
    /// knots' outputs cubically. When the two middle indices collapse
    /// (value at or beyond an extreme of the table) the knot's output is
    /// returned directly, which yields flat extrapolation at the boundaries.
    fn map_value(&self, value: f32) -> f32 {
        let count = self.points.len() as isize;
        let index = self.points.partition_point(|point| point.input <= value) as isize;

        let clamped = |i: isize| i.clamp(0, count - 1) as usize;
        let index0 = clamped(index - 2);
        let index1 = clamped(index - 1);
        let index2 = clamped(index);
        let index3 = clamped(index + 1);

        if index1 == index2 {
            return self.points[index1].output;
        }

        let input1 = self.points[index1].input;
        let input2 = self.points[index2].input;
        let a = (value - input1) / (input2 - input1);
        interp_cubic(
            self.points[index0].output,
            self.points[index1].output,
            self.points[index2].output,
            self.points[index3].output,
            a,
        )
    }
}

impl<P: Point> Element<P> for CurveElement {
    fn value(&self, pipeline: &Pipeline<P>, point: P, cache: Option<&mut Cache>) -> f32 {
        let value = pipeline.element_value(self.source, point, cache);
        self.map_value(value)
    }

    fn sources(&self) -> Vec<ElementId> {
        vec![self.source]
    }
}
