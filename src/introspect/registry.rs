//! Thread-safe type registry.

use std::sync::OnceLock;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rustc_hash::FxHashSet;
use tracing::trace;

use super::{Introspector, TypeInfo};
use crate::error::{RegistryError, ResolveError, Result};
use crate::id::{MixinId, TypeId, TypeKind};
use crate::reflect::{Reflect, TypeDescriptor};

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Explicit mapping `TypeId -> TypeInfo`.
///
/// Uses `DashMap` so registration and lookups can run from several threads.
///
/// ## Usage
///
/// ```ignore
/// let registry = Registry::new();
/// registry.register("Base", TypeInfo::mixin::<[&str; 0]>([]))?;
/// registry.register("Layer", TypeInfo::mixin(["Base"]))?;
/// registry.register("Widget", TypeInfo::concrete(["Layer"]))?;
///
/// assert!(registry.is_mixin(&"Layer".into())?);
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    types: DashMap<TypeId, TypeInfo>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry, created empty on first use.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::new)
    }

    /// Register `id`. Re-registering identical info is a no-op.
    pub fn register(
        &self,
        id: impl Into<TypeId>,
        info: TypeInfo,
    ) -> Result<(), RegistryError> {
        let id = id.into();
        self.check(id, &info)?;
        match self.types.entry(id) {
            Entry::Occupied(existing) => {
                if *existing.get() != info {
                    return Err(RegistryError::Conflicting { id });
                }
            }
            Entry::Vacant(slot) => {
                trace!(%id, kind = ?info.kind, mixins = info.mixins.len(), "Registry::register");
                slot.insert(info);
            }
        }
        Ok(())
    }

    /// Register `T` and every descriptor reachable from it.
    pub fn register_reflected<T: Reflect + ?Sized>(&self) -> Result<(), RegistryError> {
        self.register_descriptor(T::descriptor())
    }

    /// Register a descriptor graph. Each descriptor is visited once, so
    /// cyclic `uses` chains terminate.
    ///
    /// The whole graph is checked against existing entries before anything
    /// is inserted: on `Err` no new entry was added. On `Ok` every reachable
    /// descriptor is present, even when another thread registers the same
    /// graph concurrently.
    pub fn register_descriptor(
        &self,
        root: &'static TypeDescriptor,
    ) -> Result<(), RegistryError> {
        let mut seen: FxHashSet<TypeId> = FxHashSet::default();
        let mut pending = vec![root];
        let mut graph: Vec<(TypeId, TypeInfo)> = Vec::new();
        while let Some(desc) = pending.pop() {
            if !seen.insert(desc.id()) {
                continue;
            }
            let mut info = TypeInfo::build(desc.kind, desc.mixins().map(TypeDescriptor::id));
            info.parent = desc.parent().map(TypeDescriptor::id);
            self.check(desc.id(), &info)?;
            graph.push((desc.id(), info));
            pending.extend(desc.mixins());
            pending.extend(desc.parent());
        }

        for (id, info) in graph {
            self.register(id, info)?;
        }
        Ok(())
    }

    fn check(&self, id: TypeId, info: &TypeInfo) -> Result<(), RegistryError> {
        if info.kind.is_mixin() && info.parent.is_some() {
            return Err(RegistryError::MixinWithParent { id });
        }
        match self.types.get(&id) {
            Some(existing) if existing.value() != info => Err(RegistryError::Conflicting { id }),
            _ => Ok(()),
        }
    }

    pub fn get(&self, id: &TypeId) -> Option<TypeInfo> {
        self.types.get(id).map(|r| r.clone())
    }

    pub fn contains(&self, id: &TypeId) -> bool {
        self.types.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All registered ids, sorted.
    pub fn ids(&self) -> Vec<TypeId> {
        let mut ids: Vec<TypeId> = self.types.iter().map(|r| *r.key()).collect();
        ids.sort_unstable();
        ids
    }

    fn lookup<R>(&self, id: &TypeId, f: impl FnOnce(&TypeInfo) -> R) -> Result<R> {
        self.types
            .get(id)
            .map(|r| f(r.value()))
            .ok_or(ResolveError::UnresolvableType { id: *id })
    }
}

impl Introspector for Registry {
    fn is_mixin(&self, id: &TypeId) -> Result<bool> {
        self.lookup(id, |info| info.kind == TypeKind::Mixin)
    }

    fn direct_mixins(&self, id: &TypeId) -> Result<Vec<MixinId>> {
        self.lookup(id, |info| info.mixins.clone())
    }

    fn parent(&self, id: &TypeId) -> Result<Option<TypeId>> {
        self.lookup(id, |info| info.parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn register_is_idempotent_for_equal_info() {
        let registry = Registry::new();
        registry.register("Base", TypeInfo::mixin(NONE)).unwrap();
        registry.register("Base", TypeInfo::mixin(NONE)).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn register_rejects_conflicting_info() {
        let registry = Registry::new();
        registry.register("Base", TypeInfo::mixin(NONE)).unwrap();
        let err = registry.register("Base", TypeInfo::concrete(NONE)).unwrap_err();
        assert_eq!(err, RegistryError::Conflicting { id: TypeId::new("Base") });
    }

    #[test]
    fn mixins_cannot_have_parents() {
        let registry = Registry::new();
        let err = registry
            .register("M", TypeInfo::mixin(NONE).extends("P"))
            .unwrap_err();
        assert_eq!(err, RegistryError::MixinWithParent { id: TypeId::new("M") });
        assert!(registry.is_empty());
    }

    #[test]
    fn unknown_ids_are_unresolvable() {
        let registry = Registry::new();
        let id = TypeId::new("Missing");
        assert_eq!(
            registry.is_mixin(&id),
            Err(ResolveError::UnresolvableType { id })
        );
        assert_eq!(
            registry.parent(&id),
            Err(ResolveError::UnresolvableType { id })
        );
    }

    #[test]
    fn introspector_reports_edges() {
        let registry = Registry::new();
        registry.register("M", TypeInfo::mixin(NONE)).unwrap();
        registry.register("P", TypeInfo::concrete(NONE)).unwrap();
        registry
            .register("T", TypeInfo::concrete(["M"]).extends("P"))
            .unwrap();

        let t = TypeId::new("T");
        assert!(!registry.is_mixin(&t).unwrap());
        assert_eq!(registry.direct_mixins(&t).unwrap(), vec![TypeId::new("M")]);
        assert_eq!(registry.parent(&t).unwrap(), Some(TypeId::new("P")));
        assert_eq!(
            registry.ids(),
            vec![TypeId::new("M"), TypeId::new("P"), TypeId::new("T")]
        );
    }

    static CYCLE_A: TypeDescriptor = TypeDescriptor {
        name: "cycle::A",
        kind: TypeKind::Mixin,
        mixins: &[cycle_b],
        parent: None,
    };
    static CYCLE_B: TypeDescriptor = TypeDescriptor {
        name: "cycle::B",
        kind: TypeKind::Mixin,
        mixins: &[cycle_a],
        parent: None,
    };
    fn cycle_a() -> &'static TypeDescriptor {
        &CYCLE_A
    }
    fn cycle_b() -> &'static TypeDescriptor {
        &CYCLE_B
    }

    #[test]
    fn descriptor_walk_terminates_on_cycles() {
        let registry = Registry::new();
        registry.register_descriptor(&CYCLE_A).unwrap();
        assert_eq!(registry.ids(), vec![TypeId::new("cycle::A"), TypeId::new("cycle::B")]);
        assert_eq!(
            registry.direct_mixins(&TypeId::new("cycle::B")).unwrap(),
            vec![TypeId::new("cycle::A")]
        );
    }

    static ROOT: TypeDescriptor = TypeDescriptor {
        name: "conflict::Root",
        kind: TypeKind::Concrete,
        mixins: &[cycle_a],
        parent: None,
    };

    #[test]
    fn conflict_leaves_graph_unregistered() {
        let registry = Registry::new();
        registry
            .register("cycle::B", TypeInfo::concrete(NONE))
            .unwrap();

        for _ in 0..2 {
            let err = registry.register_descriptor(&ROOT).unwrap_err();
            assert_eq!(err, RegistryError::Conflicting { id: TypeId::new("cycle::B") });
        }
        assert!(!registry.contains(&TypeId::new("conflict::Root")));
        assert!(!registry.contains(&TypeId::new("cycle::A")));
        assert_eq!(registry.len(), 1);
    }
}
