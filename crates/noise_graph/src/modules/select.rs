//! Control-driven combinators: blending and selection between two sources.
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::graph::{
    Cache, CompileContext, Element, ElementId, Module, Pipeline, Point, SourceSlots,
};
use crate::math::{lerp, scurve3};

/// Combinator that linearly blends its two sources.
///
/// The control source's value is mapped from `[-1, 1]` to a blend weight in
/// `[0, 1]`: at `-1` the result is the first source, at `+1` the second.
pub struct Blend<P: Point> {
    sources: SourceSlots<P>,
}

impl<P: Point> Blend<P> {
    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(3),
        }
    }

    /// Creates the combinator with both sources and the control set.
    pub fn of(
        first: Arc<dyn Module<P>>,
        second: Arc<dyn Module<P>>,
        control: Arc<dyn Module<P>>,
    ) -> Self {
        let mut module = Self::new();
        module.sources.set(0, first);
        module.sources.set(1, second);
        module.sources.set(2, control);
        module
    }

    pub fn set_source(&mut self, index: usize, module: Arc<dyn Module<P>>) {
        self.sources.set(index, module);
    }

    /// Sets the control source (slot 2).
    pub fn set_control(&mut self, module: Arc<dyn Module<P>>) {
        self.sources.set(2, module);
    }
}

impl<P: Point> Default for Blend<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Point> Module<P> for Blend<P> {
    fn name(&self) -> &'static str {
        "blend"
    }

    fn source_count(&self) -> usize {
        self.sources.arity()
    }

    fn source(&self, index: usize) -> Option<&Arc<dyn Module<P>>> {
        self.sources.get(index)
    }

    fn compile(&self, ctx: &mut CompileContext<'_, P>) -> Result<ElementId> {
        let first = ctx.compile_source(self.name(), &self.sources, 0)?;
        let second = ctx.compile_source(self.name(), &self.sources, 1)?;
        let control = ctx.compile_source(self.name(), &self.sources, 2)?;
        Ok(ctx.push(Box::new(BlendElement {
            first,
            second,
            control,
        })))
    }
}

struct BlendElement {
    first: ElementId,
    second: ElementId,
    control: ElementId,
}

impl<P: Point> Element<P> for BlendElement {
    fn value(&self, pipeline: &Pipeline<P>, point: P, mut cache: Option<&mut Cache>) -> f32 {
        let first = pipeline.element_value(self.first, point, cache.as_deref_mut());
        let second = pipeline.element_value(self.second, point, cache.as_deref_mut());
        let control = pipeline.element_value(self.control, point, cache);
        lerp(first, second, (control + 1.0) / 2.0)
    }

    fn sources(&self) -> Vec<ElementId> {
        vec![self.first, self.second, self.control]
    }
}

/// Combinator that chooses between its two sources by a control source.
///
/// Where the control value lies inside `[lower, upper]` the second source is
/// returned, outside it the first. A non-zero `falloff` widens the bounds
/// into smooth transition bands blended with a cubic S-curve.
pub struct Select<P: Point> {
    sources: SourceSlots<P>,
    lower: f32,
    upper: f32,
    falloff: f32,
}

impl<P: Point> Select<P> {
    pub fn new(lower: f32, upper: f32) -> Self {
        Self {
            sources: SourceSlots::new(3),
            lower,
            upper,
            falloff: 0.0,
        }
    }

    /// Creates the combinator with both sources and the control set.
    pub fn of(
        first: Arc<dyn Module<P>>,
        second: Arc<dyn Module<P>>,
        control: Arc<dyn Module<P>>,
        lower: f32,
        upper: f32,
    ) -> Self {
        let mut module = Self::new(lower, upper);
        module.sources.set(0, first);
        module.sources.set(1, second);
        module.sources.set(2, control);
        module
    }

    pub fn set_source(&mut self, index: usize, module: Arc<dyn Module<P>>) {
        self.sources.set(index, module);
    }

    /// Sets the control source (slot 2).
    pub fn set_control(&mut self, module: Arc<dyn Module<P>>) {
        self.sources.set(2, module);
    }

    /// Sets the width of the smooth transition band around each bound.
    pub fn set_edge_falloff(&mut self, falloff: f32) {
        self.falloff = falloff;
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.lower, self.upper)
    }

    pub fn edge_falloff(&self) -> f32 {
        self.falloff
    }
}

impl<P: Point> Module<P> for Select<P> {
    fn name(&self) -> &'static str {
        "select"
    }

    fn source_count(&self) -> usize {
        self.sources.arity()
    }

    fn source(&self, index: usize) -> Option<&Arc<dyn Module<P>>> {
        self.sources.get(index)
    }

    fn compile(&self, ctx: &mut CompileContext<'_, P>) -> Result<ElementId> {
        if self.lower > self.upper {
            return Err(Error::Compile(format!(
                "select: lower bound {} exceeds upper bound {}",
                self.lower, self.upper
            )));
        }
        let first = ctx.compile_source(self.name(), &self.sources, 0)?;
        let second = ctx.compile_source(self.name(), &self.sources, 1)?;
        let control = ctx.compile_source(self.name(), &self.sources, 2)?;

        // The falloff band cannot be wider than half the selection range.
        let half_range = (self.upper - self.lower) / 2.0;
        let falloff = self.falloff.min(half_range).max(0.0);

        Ok(ctx.push(Box::new(SelectElement {
            first,
            second,
            control,
            lower: self.lower,
            upper: self.upper,
            falloff,
        })))
    }
}

struct SelectElement {
    first: ElementId,
    second: ElementId,
    control: ElementId,
    lower: f32,
    upper: f32,
    falloff: f32,
}

impl<P: Point> Element<P> for SelectElement {
    fn value(&self, pipeline: &Pipeline<P>, point: P, mut cache: Option<&mut Cache>) -> f32 {
        let control = pipeline.element_value(self.control, point, cache.as_deref_mut());

        if self.falloff > 0.0 {
            if control < self.lower - self.falloff {
                return pipeline.element_value(self.first, point, cache);
            }
            if control < self.lower + self.falloff {
                let a = scurve3(
                    (control - (self.lower - self.falloff)) / (2.0 * self.falloff),
                );
                let first = pipeline.element_value(self.first, point, cache.as_deref_mut());
                let second = pipeline.element_value(self.second, point, cache);
                return lerp(first, second, a);
            }
            if control < self.upper - self.falloff {
                return pipeline.element_value(self.second, point, cache);
            }
            if control < self.upper + self.falloff {
                let a = scurve3(
                    (control - (self.upper - self.falloff)) / (2.0 * self.falloff),
                );
                let second = pipeline.element_value(self.second, point, cache.as_deref_mut());
                let first = pipeline.element_value(self.first, point, cache);
                return lerp(second, first, a);
            }
            return pipeline.element_value(self.first, point, cache);
        }

        if control < self.lower || control > self.upper {
            pipeline.element_value(self.first, point, cache)
        } else {
            pipeline.element_value(self.second, point, cache)
        }
    }

    fn sources(&self) -> Vec<ElementId> {
        vec![self.first, self.second, self.control]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{CompileOptions, Compiler};
    use crate::modules::Constant;

    fn eval(root: Arc<dyn Module<f32>>) -> f32 {
        let (pipeline, id) = Compiler::compile(&root, &CompileOptions::default()).unwrap();
        pipeline.element_value(id, 0.0, None)
    }

    fn select_with_control(control: f32, falloff: f32) -> f32 {
        let first = Arc::new(Constant::new(-1.0));
        let second = Arc::new(Constant::new(1.0));
        let ctl = Arc::new(Constant::new(control));
        let mut select = Select::of(first, second, ctl, -0.5, 0.5);
        select.set_edge_falloff(falloff);
        eval(Arc::new(select))
    }

    #[test]
    fn blend_weights_by_the_control_value() {
        let first = Arc::new(Constant::new(0.0));
        let second = Arc::new(Constant::new(10.0));

        let at = |control: f32| {
            eval(Arc::new(Blend::of(
                first.clone(),
                second.clone(),
                Arc::new(Constant::new(control)),
            )))
        };

        assert_eq!(at(-1.0), 0.0);
        assert_eq!(at(1.0), 10.0);
        assert_eq!(at(0.0), 5.0);
    }

    #[test]
    fn select_without_falloff_switches_at_the_bounds() {
        assert_eq!(select_with_control(0.0, 0.0), 1.0);
        assert_eq!(select_with_control(-0.9, 0.0), -1.0);
        assert_eq!(select_with_control(0.9, 0.0), -1.0);
    }

    #[test]
    fn select_with_falloff_blends_across_the_edges() {
        // Well inside and well outside are unaffected by the falloff.
        assert_eq!(select_with_control(0.0, 0.1), 1.0);
        assert_eq!(select_with_control(-0.9, 0.1), -1.0);

        // At the bound itself the S-curve midpoint gives the average.
        let mid = select_with_control(-0.5, 0.1);
        assert!((mid - 0.0).abs() < 1e-6, "expected midpoint blend, got {mid}");
    }

    #[test]
    fn select_rejects_inverted_bounds() {
        let first = Arc::new(Constant::new(0.0));
        let second = Arc::new(Constant::new(1.0));
        let control = Arc::new(Constant::new(0.0));
        let root: Arc<dyn Module<f32>> = Arc::new(Select::of(first, second, control, 1.0, -1.0));
        assert!(Compiler::compile(&root, &CompileOptions::default()).is_err());
    }
}
