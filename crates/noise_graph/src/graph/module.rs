//! Operator nodes: the user-facing, declarative side of the graph.
//!
//! A [`Module`] describes one noise operation and holds only configuration:
//! parameters and references to its source modules. Modules are assembled
//! into a tree or DAG by the user (sharing a node means cloning its `Arc`
//! into several parents) and turned into executable
//! [`crate::graph::Element`]s by the compiler. The pipeline never owns or
//! mutates modules.
use std::sync::Arc;

use crate::error::Result;
use crate::graph::compiler::CompileContext;
use crate::graph::point::Point;
use crate::graph::ElementId;

/// A vertex of the user-built operator graph.
pub trait Module<P: Point>: Send + Sync {
    /// Operator name used in compile diagnostics.
    fn name(&self) -> &'static str;

    /// Number of declared source slots.
    fn source_count(&self) -> usize {
        0
    }

    /// Returns the module set in source slot `index`, if any.
    fn source(&self, index: usize) -> Option<&Arc<dyn Module<P>>> {
        let _ = index;
        None
    }

    /// Appends this module's compiled element to the pipeline under
    /// construction, sources first, and returns its handle.
    ///
    /// Implementations compile each source slot in declared order through
    /// [`CompileContext::compile_source`] before pushing their own element,
    /// so a node's handle is always greater than those of its sources.
    fn compile(&self, ctx: &mut CompileContext<'_, P>) -> Result<ElementId>;
}

/// Fixed-arity array of optional source references.
///
/// Every declared slot must be set before compilation; compiling a module
/// with an unset slot fails with [`crate::error::Error::Compile`].
pub struct SourceSlots<P: Point> {
    slots: Vec<Option<Arc<dyn Module<P>>>>,
}

impl<P: Point> SourceSlots<P> {
    /// Creates `arity` empty slots.
    pub fn new(arity: usize) -> Self {
        Self {
            slots: vec![None; arity],
        }
    }

    /// Declared arity.
    pub fn arity(&self) -> usize {
        self.slots.len()
    }

    /// Sets slot `index`, replacing any previous source.
    ///
    /// Panics if `index` is outside the declared arity.
    pub fn set(&mut self, index: usize, module: Arc<dyn Module<P>>) {
        self.slots[index] = Some(module);
    }

    /// Returns the module in slot `index`, if set.
    pub fn get(&self, index: usize) -> Option<&Arc<dyn Module<P>>> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    /// Returns `true` if every declared slot is set.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::Constant;

    #[test]
    fn slots_track_completeness() {
        let mut slots: SourceSlots<f32> = SourceSlots::new(2);
        assert_eq!(slots.arity(), 2);
        assert!(!slots.is_complete());
        assert!(slots.get(0).is_none());

        slots.set(0, Arc::new(Constant::new(1.0)));
        assert!(!slots.is_complete());

        slots.set(1, Arc::new(Constant::new(2.0)));
        assert!(slots.is_complete());
        assert!(slots.get(1).is_some());
    }

    #[test]
    #[should_panic]
    fn setting_a_slot_beyond_the_arity_panics() {
        let mut slots: SourceSlots<f32> = SourceSlots::new(1);
        slots.set(1, Arc::new(Constant::new(0.0)));
    }
}
