//! Per-mixin closure cache.

use std::sync::Arc;

use dashmap::DashMap;
use indexmap::IndexSet;

use crate::id::{MixinId, TypeId};

/// Ordered set of mixins reachable from one mixin, itself included.
pub type Closure = Arc<IndexSet<MixinId>>;

/// Append-only map `MixinId -> Closure`.
///
/// Keyed by mixin only: a mixin's closure does not depend on who composes
/// it. Entries are never evicted or overwritten; when two threads compute
/// the same key, the first insert wins and both observe it.
#[derive(Debug, Default)]
pub struct ClosureCache {
    entries: DashMap<MixinId, Closure>,
}

impl ClosureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, mixin: &MixinId) -> Option<Closure> {
        self.entries.get(mixin).map(|r| Arc::clone(r.value()))
    }

    /// Insert if absent and return the stored closure.
    pub fn insert(&self, mixin: MixinId, closure: IndexSet<TypeId>) -> Closure {
        Arc::clone(self.entries.entry(mixin).or_insert_with(|| Arc::new(closure)).value())
    }

    pub fn contains(&self, mixin: &MixinId) -> bool {
        self.entries.contains_key(mixin)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
