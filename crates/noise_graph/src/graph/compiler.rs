//! Compiler turning operator graphs into executable pipelines.
//!
//! Compilation is a single depth-first pass: each module compiles its source
//! slots in declared order, then appends its own element, so handles strictly
//! increase along every source edge. Structural problems (an unset source
//! slot, a curve table that is too short) surface as
//! [`crate::error::Error::Compile`] instead of compiling a broken pipeline.
//!
//! By default a module instance reachable through several parents is compiled
//! once per reaching path; the per-query [`crate::graph::Cache`] makes the
//! duplicated elements cheap at evaluation time. Enabling
//! [`CompileOptions::dedup_shared`] memoizes on node identity instead and
//! collapses such diamonds into a single handle.
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::module::{Module, SourceSlots};
use crate::graph::pipeline::{Element, Pipeline};
use crate::graph::point::Point;
use crate::graph::ElementId;

/// Options for compiling an operator graph.
#[derive(Clone, Debug, Default)]
pub struct CompileOptions {
    /// Collapse modules shared by several parents into one element.
    ///
    /// Off by default: each reaching path then compiles its own element,
    /// matching the evaluation result exactly but storing duplicated work.
    pub dedup_shared: bool,
}

/// Compiler for operator graphs.
pub struct Compiler;

impl Compiler {
    /// Compiles the graph rooted at `root` into a fresh pipeline, returning
    /// the pipeline together with the root's handle.
    pub fn compile<P: Point>(
        root: &Arc<dyn Module<P>>,
        opts: &CompileOptions,
    ) -> Result<(Pipeline<P>, ElementId)> {
        let mut pipeline = Pipeline::new();
        let root_id = Self::compile_into(root, &mut pipeline, opts)?;
        Ok((pipeline, root_id))
    }

    /// Compiles the graph rooted at `root` into an existing pipeline.
    ///
    /// Useful for compiling several roots into one pipeline; note that
    /// identity memoization does not carry over between calls.
    pub fn compile_into<P: Point>(
        root: &Arc<dyn Module<P>>,
        pipeline: &mut Pipeline<P>,
        opts: &CompileOptions,
    ) -> Result<ElementId> {
        let mut ctx = CompileContext {
            pipeline,
            dedup: opts.dedup_shared,
            memo: HashMap::new(),
        };
        let root_id = ctx.compile_module(root)?;
        debug!(
            elements = ctx.pipeline.len(),
            root = root_id,
            dedup = opts.dedup_shared,
            "compiled pipeline"
        );
        Ok(root_id)
    }
}

/// State threaded through one compilation pass.
pub struct CompileContext<'a, P: Point> {
    pipeline: &'a mut Pipeline<P>,
    dedup: bool,
    memo: HashMap<*const (), ElementId>,
}

impl<P: Point> CompileContext<'_, P> {
    /// Compiles `module`, consulting the identity memo when deduplication is
    /// enabled.
    pub fn compile_module(&mut self, module: &Arc<dyn Module<P>>) -> Result<ElementId> {
        if !self.dedup {
            return module.compile(self);
        }
        let key = Arc::as_ptr(module) as *const ();
        if let Some(&id) = self.memo.get(&key) {
            return Ok(id);
        }
        let id = module.compile(self)?;
        self.memo.insert(key, id);
        Ok(id)
    }

    /// Compiles the source in slot `index` of `slots`, failing with a
    /// descriptive error when the slot is not set.
    pub fn compile_source(
        &mut self,
        module_name: &str,
        slots: &SourceSlots<P>,
        index: usize,
    ) -> Result<ElementId> {
        let Some(source) = slots.get(index) else {
            return Err(Error::Compile(format!(
                "{module_name}: source slot {index} is not set"
            )));
        };
        self.compile_module(source)
    }

    /// Appends `element` to the pipeline and returns its handle.
    pub fn push(&mut self, element: Box<dyn Element<P>>) -> ElementId {
        self.pipeline.add_element(element)
    }
}
