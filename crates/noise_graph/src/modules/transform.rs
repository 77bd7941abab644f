//! Point transforms: operators that reparameterize the query point before
//! delegating to their source, leaving the value untouched.
use std::sync::Arc;

use crate::error::Result;
use crate::graph::{
    Cache, CompileContext, Element, ElementId, Module, Pipeline, Point, SourceSlots,
};

/// Transform that shifts the query point by a fixed per-axis offset.
pub struct TranslatePoint<P: Point> {
    sources: SourceSlots<P>,
    translation: P,
}

impl<P: Point> TranslatePoint<P> {
    pub fn new(translation: P) -> Self {
        Self {
            sources: SourceSlots::new(1),
            translation,
        }
    }

    /// Creates the transform with its source set.
    pub fn of(source: Arc<dyn Module<P>>, translation: P) -> Self {
        let mut module = Self::new(translation);
        module.sources.set(0, source);
        module
    }

    pub fn set_source(&mut self, module: Arc<dyn Module<P>>) {
        self.sources.set(0, module);
    }

    pub fn set_translation(&mut self, translation: P) {
        self.translation = translation;
    }

    pub fn translation(&self) -> P {
        self.translation
    }
}

impl<P: Point> Default for TranslatePoint<P> {
    fn default() -> Self {
        Self::new(P::ZERO)
    }
}

impl<P: Point> Module<P> for TranslatePoint<P> {
    fn name(&self) -> &'static str {
        "translate_point"
    }

    fn source_count(&self) -> usize {
        self.sources.arity()
    }

    fn source(&self, index: usize) -> Option<&Arc<dyn Module<P>>> {
        self.sources.get(index)
    }

    fn compile(&self, ctx: &mut CompileContext<'_, P>) -> Result<ElementId> {
        let source = ctx.compile_source(self.name(), &self.sources, 0)?;
        Ok(ctx.push(Box::new(TranslatePointElement {
            source,
            translation: self.translation,
        })))
    }
}

struct TranslatePointElement<P: Point> {
    source: ElementId,
    translation: P,
}

impl<P: Point> Element<P> for TranslatePointElement<P> {
    fn value(&self, pipeline: &Pipeline<P>, point: P, cache: Option<&mut Cache>) -> f32 {
        pipeline.element_value(self.source, point.translated(self.translation), cache)
    }

    fn sources(&self) -> Vec<ElementId> {
        vec![self.source]
    }
}

/// Transform that multiplies the query point by a fixed per-axis factor.
pub struct ScalePoint<P: Point> {
    sources: SourceSlots<P>,
    factor: P,
}

impl<P: Point> ScalePoint<P> {
    pub fn new(factor: P) -> Self {
        Self {
            sources: SourceSlots::new(1),
            factor,
        }
    }

    /// Creates the transform with its source set.
    pub fn of(source: Arc<dyn Module<P>>, factor: P) -> Self {
        let mut module = Self::new(factor);
        module.sources.set(0, source);
        module
    }

    pub fn set_source(&mut self, module: Arc<dyn Module<P>>) {
        self.sources.set(0, module);
    }

    pub fn set_factor(&mut self, factor: P) {
        self.factor = factor;
    }

    pub fn factor(&self) -> P {
        self.factor
    }
}

impl<P: Point> Default for ScalePoint<P> {
    fn default() -> Self {
        Self::new(P::ONE)
    }
}

impl<P: Point> Module<P> for ScalePoint<P> {
    fn name(&self) -> &'static str {
        "scale_point"
    }

    fn source_count(&self) -> usize {
        self.sources.arity()
    }

    fn source(&self, index: usize) -> Option<&Arc<dyn Module<P>>> {
        self.sources.get(index)
    }

    fn compile(&self, ctx: &mut CompileContext<'_, P>) -> Result<ElementId> {
        let source = ctx.compile_source(self.name(), &self.sources, 0)?;
        Ok(ctx.push(Box::new(ScalePointElement {
            source,
            factor: self.factor,
        })))
    }
}

struct ScalePointElement<P: Point> {
    source: ElementId,
    factor: P,
}

impl<P: Point> Element<P> for ScalePointElement<P> {
    fn value(&self, pipeline: &Pipeline<P>, point: P, cache: Option<&mut Cache>) -> f32 {
        pipeline.element_value(self.source, point.scaled(self.factor), cache)
    }

    fn sources(&self) -> Vec<ElementId> {
        vec![self.source]
    }
}
