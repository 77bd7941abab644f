//! Binary combinators: pointwise reductions of two source values.
use std::sync::Arc;

use crate::error::Result;
use crate::graph::{
    Cache, CompileContext, Element, ElementId, Module, Pipeline, Point, SourceSlots,
};

/// Combinator that returns the sum of its two sources.
pub struct Addition<P: Point> {
    sources: SourceSlots<P>,
}

impl<P: Point> Addition<P> {
    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(2),
        }
    }

    /// Creates the combinator with both sources set.
    pub fn of(left: Arc<dyn Module<P>>, right: Arc<dyn Module<P>>) -> Self {
        let mut module = Self::new();
        module.sources.set(0, left);
        module.sources.set(1, right);
        module
    }

    pub fn set_source(&mut self, index: usize, module: Arc<dyn Module<P>>) {
        self.sources.set(index, module);
    }
}

impl<P: Point> Default for Addition<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Point> Module<P> for Addition<P> {
    fn name(&self) -> &'static str {
        "addition"
    }

    fn source_count(&self) -> usize {
        self.sources.arity()
    }

    fn source(&self, index: usize) -> Option<&Arc<dyn Module<P>>> {
        self.sources.get(index)
    }

    fn compile(&self, ctx: &mut CompileContext<'_, P>) -> Result<ElementId> {
        let left = ctx.compile_source(self.name(), &self.sources, 0)?;
        let right = ctx.compile_source(self.name(), &self.sources, 1)?;
        Ok(ctx.push(Box::new(AdditionElement { left, right })))
    }
}

struct AdditionElement {
    left: ElementId,
    right: ElementId,
}

impl<P: Point> Element<P> for AdditionElement {
    fn value(&self, pipeline: &Pipeline<P>, point: P, mut cache: Option<&mut Cache>) -> f32 {
        let left = pipeline.element_value(self.left, point, cache.as_deref_mut());
        let right = pipeline.element_value(self.right, point, cache);
        left + right
    }

    fn sources(&self) -> Vec<ElementId> {
        vec![self.left, self.right]
    }
}

/// Combinator that returns the product of its two sources.
pub struct Multiply<P: Point> {
    sources: SourceSlots<P>,
}

impl<P: Point> Multiply<P> {
    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(2),
        }
    }

    /// Creates the combinator with both sources set.
    pub fn of(left: Arc<dyn Module<P>>, right: Arc<dyn Module<P>>) -> Self {
        let mut module = Self::new();
        module.sources.set(0, left);
        module.sources.set(1, right);
        module
    }

    pub fn set_source(&mut self, index: usize, module: Arc<dyn Module<P>>) {
        self.sources.set(index, module);
    }
}

impl<P: Point> Default for Multiply<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Point> Module<P> for Multiply<P> {
    fn name(&self) -> &'static str {
        "multiply"
    }

    fn source_count(&self) -> usize {
        self.sources.arity()
    }

    fn source(&self, index: usize) -> Option<&Arc<dyn Module<P>>> {
        self.sources.get(index)
    }

    fn compile(&self, ctx: &mut CompileContext<'_, P>) -> Result<ElementId> {
        let left = ctx.compile_source(self.name(), &self.sources, 0)?;
        let right = ctx.compile_source(self.name(), &self.sources, 1)?;
        Ok(ctx.push(Box::new(MultiplyElement { left, right })))
    }
}

struct MultiplyElement {
    left: ElementId,
    right: ElementId,
}

impl<P: Point> Element<P> for MultiplyElement {
    fn value(&self, pipeline: &Pipeline<P>, point: P, mut cache: Option<&mut Cache>) -> f32 {
        let left = pipeline.element_value(self.left, point, cache.as_deref_mut());
        let right = pipeline.element_value(self.right, point, cache);
        left * right
    }

    fn sources(&self) -> Vec<ElementId> {
        vec![self.left, self.right]
    }
}

/// Combinator that returns the smaller of its two source values.
pub struct Minimum<P: Point> {
    sources: SourceSlots<P>,
}

impl<P: Point> Minimum<P> {
    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(2),
        }
    }

    /// Creates the combinator with both sources set.
    pub fn of(left: Arc<dyn Module<P>>, right: Arc<dyn Module<P>>) -> Self {
        let mut module = Self::new();
        module.sources.set(0, left);
        module.sources.set(1, right);
        module
    }

    pub fn set_source(&mut self, index: usize, module: Arc<dyn Module<P>>) {
        self.sources.set(index, module);
    }
}

impl<P: Point> Default for Minimum<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Point> Module<P> for Minimum<P> {
    fn name(&self) -> &'static str {
        "minimum"
    }

    fn source_count(&self) -> usize {
        self.sources.arity()
    }

    fn source(&self, index: usize) -> Option<&Arc<dyn Module<P>>> {
        self.sources.get(index)
    }

    fn compile(&self, ctx: &mut CompileContext<'_, P>) -> Result<ElementId> {
        let left = ctx.compile_source(self.name(), &self.sources, 0)?;
        let right = ctx.compile_source(self.name(), &self.sources, 1)?;
        Ok(ctx.push(Box::new(MinimumElement { left, right })))
    }
}

struct MinimumElement {
    left: ElementId,
    right: ElementId,
}

impl<P: Point> Element<P> for MinimumElement {
    fn value(&self, pipeline: &Pipeline<P>, point: P, mut cache: Option<&mut Cache>) -> f32 {
        let left = pipeline.element_value(self.left, point, cache.as_deref_mut());
        let right = pipeline.element_value(self.right, point, cache);
        left.min(right)
    }

    fn sources(&self) -> Vec<ElementId> {
        vec![self.left, self.right]
    }
}

/// Combinator that returns the larger of its two source values.
pub struct Maximum<P: Point> {
    sources: SourceSlots<P>,
}

impl<P: Point> Maximum<P> {
    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(2),
        }
    }

    /// Creates the combinator with both sources set.
    pub fn of(left: Arc<dyn Module<P>>, right: Arc<dyn Module<P>>) -> Self {
        let mut module = Self::new();
        module.sources.set(0, left);
        module.sources.set(1, right);
        module
    }

    pub fn set_source(&mut self, index: usize, module: Arc<dyn Module<P>>) {
        self.sources.set(index, module);
    }
}

impl<P: Point> Default for Maximum<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Point> Module<P> for Maximum<P> {
    fn name(&self) -> &'static str {
        "maximum"
    }

    fn source_count(&self) -> usize {
        self.sources.arity()
    }

    fn source(&self, index: usize) -> Option<&Arc<dyn Module<P>>> {
        self.sources.get(index)
    }

    fn compile(&self, ctx: &mut CompileContext<'_, P>) -> Result<ElementId> {
        let left = ctx.compile_source(self.name(), &self.sources, 0)?;
        let right = ctx.compile_source(self.name(), &self.sources, 1)?;
        Ok(ctx.push(Box::new(MaximumElement { left, right })))
    }
}

struct MaximumElement {
    left: ElementId,
    right: ElementId,
}

impl<P: Point> Element<P> for MaximumElement {
    fn value(&self, pipeline: &Pipeline<P>, point: P, mut cache: Option<&mut Cache>) -> f32 {
        let left = pipeline.element_value(self.left, point, cache.as_deref_mut());
        let right = pipeline.element_value(self.right, point, cache);
        left.max(right)
    }

    fn sources(&self) -> Vec<ElementId> {
        vec![self.left, self.right]
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use super::*;
    use crate::graph::{CompileOptions, Compiler};
    use crate::modules::Constant;

    fn compile_pair<P, F, M>(make: F) -> (Pipeline<P>, ElementId)
    where
        P: Point,
        M: Module<P> + 'static,
        F: FnOnce(Arc<dyn Module<P>>, Arc<dyn Module<P>>) -> M,
    {
        let left = Arc::new(Constant::new(3.0));
        let right = Arc::new(Constant::new(7.0));
        let root: Arc<dyn Module<P>> = Arc::new(make(left, right));
        Compiler::compile(&root, &CompileOptions::default()).unwrap()
    }

    #[test]
    fn maximum_of_constants_in_every_dimension() {
        let (pipeline, root) = compile_pair::<f32, _, _>(Maximum::of);
        assert_eq!(pipeline.element_value(root, -4.0, None), 7.0);

        let (pipeline, root) = compile_pair::<Vec2, _, _>(Maximum::of);
        assert_eq!(pipeline.element_value(root, Vec2::new(1.0, 2.0), None), 7.0);

        let (pipeline, root) = compile_pair::<Vec3, _, _>(Maximum::of);
        assert_eq!(pipeline.element_value(root, Vec3::splat(9.0), None), 7.0);
    }

    #[test]
    fn minimum_of_constants() {
        let (pipeline, root) = compile_pair::<f32, _, _>(Minimum::of);
        assert_eq!(pipeline.element_value(root, 0.0, None), 3.0);
    }

    #[test]
    fn addition_of_constants() {
        let (pipeline, root) = compile_pair::<f32, _, _>(Addition::of);
        assert_eq!(pipeline.element_value(root, 0.0, None), 10.0);
    }

    #[test]
    fn multiply_of_constants() {
        let (pipeline, root) = compile_pair::<f32, _, _>(Multiply::of);
        assert_eq!(pipeline.element_value(root, 0.0, None), 21.0);
    }

    #[test]
    fn combinators_expose_their_sources() {
        let left: Arc<dyn Module<f32>> = Arc::new(Constant::new(1.0));
        let right: Arc<dyn Module<f32>> = Arc::new(Constant::new(2.0));
        let max = Maximum::of(left, right);
        assert_eq!(Module::<f32>::source_count(&max), 2);
        assert!(max.source(0).is_some());
        assert!(max.source(1).is_some());
        assert!(max.source(2).is_none());
    }
}
