//! Compiled pipelines and the element evaluation contract.
//!
//! A [`Pipeline`] is the executable form of an operator graph: an append-only
//! collection of [`Element`]s that reference each other by [`ElementId`]
//! instead of owning references. Handles are assigned in compilation order,
//! so an element's handle is always strictly greater than those of its
//! sources; the graph is acyclic by construction and evaluation always
//! terminates.
//!
//! A pipeline is immutable once compilation finishes. Multiple threads may
//! evaluate the same pipeline concurrently as long as each supplies its own
//! [`Cache`].
use crate::error::{Error, Result};
use crate::graph::cache::Cache;
use crate::graph::point::Point;
use crate::graph::ElementId;

/// Executable counterpart of one operator node.
///
/// Every element, including externally defined leaf generators, exposes the
/// same signature, which keeps the compiled graph homogeneous: the pipeline
/// does not care what an element computes, only that it is a pure function
/// of the query point.
pub trait Element<P: Point>: Send + Sync {
    /// Evaluates this element at `point`.
    ///
    /// Source values are obtained through
    /// [`Pipeline::element_value`], passing the cache along (reborrowed with
    /// `as_deref_mut` when there is more than one source).
    fn value(&self, pipeline: &Pipeline<P>, point: P, cache: Option<&mut Cache>) -> f32;

    /// Handles of the elements this element reads from.
    ///
    /// Used for validation and introspection, not during evaluation.
    fn sources(&self) -> Vec<ElementId> {
        Vec::new()
    }
}

/// Owning, append-only collection of compiled elements plus handle resolution.
pub struct Pipeline<P: Point> {
    elements: Vec<Box<dyn Element<P>>>,
}

impl<P: Point> std::fmt::Debug for Pipeline<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("len", &self.elements.len())
            .finish_non_exhaustive()
    }
}

impl<P: Point> Default for Pipeline<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Point> Pipeline<P> {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Number of elements in the pipeline.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the pipeline contains no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Takes ownership of `element`, assigns it the next sequential handle
    /// and returns that handle.
    pub fn add_element(&mut self, element: Box<dyn Element<P>>) -> ElementId {
        let id = self.elements.len();
        self.elements.push(element);
        id
    }

    /// Resolves a handle previously returned by [`Pipeline::add_element`].
    ///
    /// Passing a handle from another pipeline (or any out-of-range value) is
    /// a programming error and panics.
    #[inline]
    pub fn element(&self, id: ElementId) -> &dyn Element<P> {
        self.elements[id].as_ref()
    }

    /// Evaluates the element behind `id` at `point`.
    ///
    /// Without a cache the element recomputes unconditionally from its
    /// sources. With a cache, each distinct handle is evaluated at most once
    /// per query; the cache only affects the work done, never the result.
    pub fn element_value(&self, id: ElementId, point: P, cache: Option<&mut Cache>) -> f32 {
        match cache {
            Some(cache) => {
                if let Some(value) = cache.get(id) {
                    return value;
                }
                let value = self.element(id).value(self, point, Some(&mut *cache));
                cache.store(id, value);
                value
            }
            None => self.element(id).value(self, point, None),
        }
    }

    /// Creates a cache sized for this pipeline.
    pub fn new_cache(&self) -> Cache {
        Cache::new(self.elements.len())
    }

    /// Checks the handle-ordering invariant: every element's sources must
    /// have strictly smaller handles than the element itself.
    pub fn validate(&self) -> Result<()> {
        for (id, element) in self.elements.iter().enumerate() {
            for source in element.sources() {
                if source >= id {
                    return Err(Error::Compile(format!(
                        "element {id} references source {source} with a non-smaller handle"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f32);

    impl<P: Point> Element<P> for Fixed {
        fn value(&self, _pipeline: &Pipeline<P>, _point: P, _cache: Option<&mut Cache>) -> f32 {
            self.0
        }
    }

    struct Sum {
        left: ElementId,
        right: ElementId,
    }

    impl<P: Point> Element<P> for Sum {
        fn value(&self, pipeline: &Pipeline<P>, point: P, mut cache: Option<&mut Cache>) -> f32 {
            let left = pipeline.element_value(self.left, point, cache.as_deref_mut());
            let right = pipeline.element_value(self.right, point, cache);
            left + right
        }

        fn sources(&self) -> Vec<ElementId> {
            vec![self.left, self.right]
        }
    }

    #[test]
    fn handles_are_assigned_sequentially() {
        let mut pipeline: Pipeline<f32> = Pipeline::new();
        assert_eq!(pipeline.add_element(Box::new(Fixed(1.0))), 0);
        assert_eq!(pipeline.add_element(Box::new(Fixed(2.0))), 1);
        assert_eq!(pipeline.len(), 2);
    }

    #[test]
    fn element_value_agrees_with_and_without_cache() {
        let mut pipeline: Pipeline<f32> = Pipeline::new();
        let a = pipeline.add_element(Box::new(Fixed(1.5)));
        let b = pipeline.add_element(Box::new(Fixed(2.5)));
        let sum = pipeline.add_element(Box::new(Sum { left: a, right: b }));

        let uncached = pipeline.element_value(sum, 0.0, None);
        let mut cache = pipeline.new_cache();
        let cached = pipeline.element_value(sum, 0.0, Some(&mut cache));
        assert_eq!(uncached, cached);
        assert_eq!(cached, 4.0);
    }

    #[test]
    fn cached_evaluation_is_idempotent() {
        let mut pipeline: Pipeline<f32> = Pipeline::new();
        let a = pipeline.add_element(Box::new(Fixed(3.0)));

        let mut cache = pipeline.new_cache();
        let first = pipeline.element_value(a, 0.0, Some(&mut cache));
        let second = pipeline.element_value(a, 0.0, Some(&mut cache));
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn validate_accepts_source_first_order() {
        let mut pipeline: Pipeline<f32> = Pipeline::new();
        let a = pipeline.add_element(Box::new(Fixed(1.0)));
        let b = pipeline.add_element(Box::new(Fixed(2.0)));
        pipeline.add_element(Box::new(Sum { left: a, right: b }));
        assert!(pipeline.validate().is_ok());
    }

    #[test]
    fn validate_rejects_forward_references() {
        let mut pipeline: Pipeline<f32> = Pipeline::new();
        pipeline.add_element(Box::new(Sum { left: 1, right: 2 }));
        assert!(pipeline.validate().is_err());
    }

    #[test]
    fn reused_cache_must_be_cleared_between_points() {
        struct Identity;

        impl Element<f32> for Identity {
            fn value(&self, _pipeline: &Pipeline<f32>, point: f32, _cache: Option<&mut Cache>) -> f32 {
                point
            }
        }

        let mut pipeline: Pipeline<f32> = Pipeline::new();
        let id = pipeline.add_element(Box::new(Identity));

        let mut cache = pipeline.new_cache();
        assert_eq!(pipeline.element_value(id, 1.0, Some(&mut cache)), 1.0);

        // Stale: the cache still holds the value for the previous point.
        assert_eq!(pipeline.element_value(id, 2.0, Some(&mut cache)), 1.0);

        cache.clear();
        assert_eq!(pipeline.element_value(id, 2.0, Some(&mut cache)), 2.0);
    }

    #[test]
    #[should_panic]
    fn foreign_handle_lookup_panics() {
        let pipeline: Pipeline<f32> = Pipeline::new();
        let _ = pipeline.element(0);
    }
}
