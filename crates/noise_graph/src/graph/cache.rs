//! Per-query memoization of element values.
//!
//! A [`Cache`] remembers which elements have already produced a value during
//! the evaluation of a single point, so that an element reachable through
//! several parents (a diamond in the graph) is computed only once per query.
//!
//! The cache is owned by the caller, not by the pipeline. One instance must
//! never serve two different points without a [`Cache::clear`] in between:
//! stored values carry no point information, so reuse across points returns
//! stale results. Create one with [`crate::graph::Pipeline::new_cache`].
use crate::graph::ElementId;

/// Memo table mapping element handles to values computed for the current query point.
#[derive(Clone, Debug)]
pub struct Cache {
    slots: Vec<Option<f32>>,
}

impl Cache {
    /// Creates a cache with one slot per element of a pipeline of length `len`.
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Number of slots, equal to the length of the pipeline this cache was sized for.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the cache has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the value stored for `id` during the current query, if any.
    ///
    /// Panics if `id` is out of range for the pipeline this cache was sized for.
    #[inline]
    pub fn get(&self, id: ElementId) -> Option<f32> {
        self.slots[id]
    }

    /// Stores the value computed for `id` during the current query.
    ///
    /// Panics if `id` is out of range for the pipeline this cache was sized for.
    #[inline]
    pub fn store(&mut self, id: ElementId, value: f32) {
        self.slots[id] = Some(value);
    }

    /// Forgets all stored values, keeping the allocation.
    ///
    /// Must be called before reusing the cache for a different query point.
    pub fn clear(&mut self) {
        self.slots.fill(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_returns_values_by_handle() {
        let mut cache = Cache::new(3);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(1), None);

        cache.store(1, 0.25);
        assert_eq!(cache.get(1), Some(0.25));
        assert_eq!(cache.get(0), None);
        assert_eq!(cache.get(2), None);
    }

    #[test]
    fn clear_forgets_all_values() {
        let mut cache = Cache::new(2);
        cache.store(0, 1.0);
        cache.store(1, 2.0);
        cache.clear();
        assert_eq!(cache.get(0), None);
        assert_eq!(cache.get(1), None);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    #[should_panic]
    fn out_of_range_handle_panics() {
        let cache = Cache::new(1);
        let _ = cache.get(1);
    }
}
