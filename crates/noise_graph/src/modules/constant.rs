//! Constant-valued leaf generator.
use crate::error::Result;
use crate::graph::{Cache, CompileContext, Element, ElementId, Module, Pipeline, Point};

/// Generator that returns the same value at every point.
#[derive(Clone, Copy, Debug)]
pub struct Constant {
    value: f32,
}

impl Constant {
    pub fn new(value: f32) -> Self {
        Self { value }
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}

impl Default for Constant {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl<P: Point> Module<P> for Constant {
    fn name(&self) -> &'static str {
        "constant"
    }

    fn compile(&self, ctx: &mut CompileContext<'_, P>) -> Result<ElementId> {
        Ok(ctx.push(Box::new(ConstantElement { value: self.value })))
    }
}

struct ConstantElement {
    value: f32,
}

impl<P: Point> Element<P> for ConstantElement {
    fn value(&self, _pipeline: &Pipeline<P>, _point: P, _cache: Option<&mut Cache>) -> f32 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::{Vec2, Vec3};

    use super::*;
    use crate::graph::{CompileOptions, Compiler};

    #[test]
    fn returns_its_value_in_every_dimension() {
        let module = Arc::new(Constant::new(0.75));

        let one: Arc<dyn Module<f32>> = module.clone();
        let (pipeline, root) = Compiler::compile(&one, &CompileOptions::default()).unwrap();
        assert_eq!(pipeline.element_value(root, 12.0, None), 0.75);

        let two: Arc<dyn Module<Vec2>> = module.clone();
        let (pipeline, root) = Compiler::compile(&two, &CompileOptions::default()).unwrap();
        assert_eq!(pipeline.element_value(root, Vec2::new(1.0, 2.0), None), 0.75);

        let three: Arc<dyn Module<Vec3>> = module;
        let (pipeline, root) = Compiler::compile(&three, &CompileOptions::default()).unwrap();
        assert_eq!(pipeline.element_value(root, Vec3::ONE, None), 0.75);
    }
}
