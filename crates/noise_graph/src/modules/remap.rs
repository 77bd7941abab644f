//! Single-source remappers: operators that reshape one source value.
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::graph::{
    Cache, CompileContext, Element, ElementId, Module, Pipeline, Point, SourceSlots,
};

/// Remapper returning `value * scale + bias`.
pub struct ScaleBias<P: Point> {
    sources: SourceSlots<P>,
    scale: f32,
    bias: f32,
}

impl<P: Point> ScaleBias<P> {
    pub fn new(scale: f32, bias: f32) -> Self {
        Self {
            sources: SourceSlots::new(1),
            scale,
            bias,
        }
    }

    /// Creates the remapper with its source set.
    pub fn of(source: Arc<dyn Module<P>>, scale: f32, bias: f32) -> Self {
        let mut module = Self::new(scale, bias);
        module.sources.set(0, source);
        module
    }

    pub fn set_source(&mut self, module: Arc<dyn Module<P>>) {
        self.sources.set(0, module);
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn bias(&self) -> f32 {
        self.bias
    }
}

impl<P: Point> Module<P> for ScaleBias<P> {
    fn name(&self) -> &'static str {
        "scale_bias"
    }

    fn source_count(&self) -> usize {
        self.sources.arity()
    }

    fn source(&self, index: usize) -> Option<&Arc<dyn Module<P>>> {
        self.sources.get(index)
    }

    fn compile(&self, ctx: &mut CompileContext<'_, P>) -> Result<ElementId> {
        let source = ctx.compile_source(self.name(), &self.sources, 0)?;
        Ok(ctx.push(Box::new(ScaleBiasElement {
            source,
            scale: self.scale,
            bias: self.bias,
        })))
    }
}

struct ScaleBiasElement {
    source: ElementId,
    scale: f32,
    bias: f32,
}

impl<P: Point> Element<P> for ScaleBiasElement {
    fn value(&self, pipeline: &Pipeline<P>, point: P, cache: Option<&mut Cache>) -> f32 {
        pipeline.element_value(self.source, point, cache) * self.scale + self.bias
    }

    fn sources(&self) -> Vec<ElementId> {
        vec![self.source]
    }
}

/// Remapper clamping the source value into `[lower, upper]`.
pub struct Clamp<P: Point> {
    sources: SourceSlots<P>,
    lower: f32,
    upper: f32,
}

impl<P: Point> Clamp<P> {
    pub fn new(lower: f32, upper: f32) -> Self {
        Self {
            sources: SourceSlots::new(1),
            lower,
            upper,
        }
    }

    /// Creates the remapper with its source set.
    pub fn of(source: Arc<dyn Module<P>>, lower: f32, upper: f32) -> Self {
        let mut module = Self::new(lower, upper);
        module.sources.set(0, source);
        module
    }

    pub fn set_source(&mut self, module: Arc<dyn Module<P>>) {
        self.sources.set(0, module);
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.lower, self.upper)
    }
}

impl<P: Point> Module<P> for Clamp<P> {
    fn name(&self) -> &'static str {
        "clamp"
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
                "clamp: lower bound {} exceeds upper bound {}",
                self.lower, self.upper
            )));
        }
        let source = ctx.compile_source(self.name(), &self.sources, 0)?;
        Ok(ctx.push(Box::new(ClampElement {
            source,
            lower: self.lower,
            upper: self.upper,
        })))
    }
}

struct ClampElement {
    source: ElementId,
    lower: f32,
    upper: f32,
}

impl<P: Point> Element<P> for ClampElement {
    fn value(&self, pipeline: &Pipeline<P>, point: P, cache: Option<&mut Cache>) -> f32 {
        pipeline
            .element_value(self.source, point, cache)
            .clamp(self.lower, self.upper)
    }

    fn sources(&self) -> Vec<ElementId> {
        vec![self.source]
    }
}

/// Remapper raising the source value to a power.
///
/// The source value is treated as lying in `[-1, 1]`: it is shifted into
/// `[0, 1]`, exponentiated, and shifted back.
pub struct Exponent<P: Point> {
    sources: SourceSlots<P>,
    exponent: f32,
}

impl<P: Point> Exponent<P> {
    pub fn new(exponent: f32) -> Self {
        Self {
            sources: SourceSlots::new(1),
            exponent,
        }
    }

    /// Creates the remapper with its source set.
    pub fn of(source: Arc<dyn Module<P>>, exponent: f32) -> Self {
        let mut module = Self::new(exponent);
        module.sources.set(0, source);
        module
    }

    pub fn set_source(&mut self, module: Arc<dyn Module<P>>) {
        self.sources.set(0, module);
    }

    pub fn exponent(&self) -> f32 {
        self.exponent
    }
}

impl<P: Point> Module<P> for Exponent<P> {
    fn name(&self) -> &'static str {
        "exponent"
    }

    fn source_count(&self) -> usize {
        self.sources.arity()
    }

    fn source(&self, index: usize) -> Option<&Arc<dyn Module<P>>> {
        self.sources.get(index)
    }

    fn compile(&self, ctx: &mut CompileContext<'_, P>) -> Result<ElementId> {
        let source = ctx.compile_source(self.name(), &self.sources, 0)?;
        Ok(ctx.push(Box::new(ExponentElement {
            source,
            exponent: self.exponent,
        })))
    }
}

struct ExponentElement {
    source: ElementId,
    exponent: f32,
}

impl<P: Point> Element<P> for ExponentElement {
    fn value(&self, pipeline: &Pipeline<P>, point: P, cache: Option<&mut Cache>) -> f32 {
        let value = pipeline.element_value(self.source, point, cache);
        ((value + 1.0) / 2.0).abs().powf(self.exponent) * 2.0 - 1.0
    }

    fn sources(&self) -> Vec<ElementId> {
        vec![self.source]
    }
}

/// Remapper negating the source value.
pub struct Invert<P: Point> {
    sources: SourceSlots<P>,
}

impl<P: Point> Invert<P> {
    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(1),
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
}

impl<P: Point> Default for Invert<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Point> Module<P> for Invert<P> {
    fn name(&self) -> &'static str {
        "invert"
    }

    fn source_count(&self) -> usize {
        self.sources.arity()
    }

    fn source(&self, index: usize) -> Option<&Arc<dyn Module<P>>> {
        self.sources.get(index)
    }

    fn compile(&self, ctx: &mut CompileContext<'_, P>) -> Result<ElementId> {
        let source = ctx.compile_source(self.name(), &self.sources, 0)?;
        Ok(ctx.push(Box::new(InvertElement { source })))
    }
}

struct InvertElement {
    source: ElementId,
}

impl<P: Point> Element<P> for InvertElement {
    fn value(&self, pipeline: &Pipeline<P>, point: P, cache: Option<&mut Cache>) -> f32 {
        -pipeline.element_value(self.source, point, cache)
    }

    fn sources(&self) -> Vec<ElementId> {
        vec![self.source]
    }
}

/// Remapper returning the absolute source value.
pub struct Absolute<P: Point> {
    sources: SourceSlots<P>,
}

impl<P: Point> Absolute<P> {
    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(1),
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
}

impl<P: Point> Default for Absolute<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Point> Module<P> for Absolute<P> {
    fn name(&self) -> &'static str {
        "absolute"
    }

    fn source_count(&self) -> usize {
        self.sources.arity()
    }

    fn source(&self, index: usize) -> Option<&Arc<dyn Module<P>>> {
        self.sources.get(index)
    }

    fn compile(&self, ctx: &mut CompileContext<'_, P>) -> Result<ElementId> {
        let source = ctx.compile_source(self.name(), &self.sources, 0)?;
        Ok(ctx.push(Box::new(AbsoluteElement { source })))
    }
}

struct AbsoluteElement {
    source: ElementId,
}

impl<P: Point> Element<P> for AbsoluteElement {
    fn value(&self, pipeline: &Pipeline<P>, point: P, cache: Option<&mut Cache>) -> f32 {
        pipeline.element_value(self.source, point, cache).abs()
    }

    fn sources(&self) -> Vec<ElementId> {
        vec![self.source]
    }
}
