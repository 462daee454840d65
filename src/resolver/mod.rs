//! # Mixin Composition Resolver
//!
//! Expands a type into the full set of mixins it composes, directly,
//! through other mixins, or through its parent chain, and answers
//! membership queries against that set.
//!
//! ```text
//! query(obj, M)
//!   |
//!   +-- is_mixin(M)?  no -> InvalidInput
//!   |
//!   +-- T = typeOf(obj)
//!        loop: M in expanded(T)?  yes -> true
//!              T = parent(T)      none -> false
//!
//! expanded(T)
//!   for each direct mixin D of T:
//!     D on current path?  -> skip (or CyclicComposition)
//!     cache[D] present?   -> union cache[D]
//!     otherwise           -> cache[D] = expanded(D); union
//!   T concrete with parent P -> union expanded(P)
//! ```
//!
//! Only per-mixin closures are cached. Concrete types are expanded on every
//! query, reusing the cached closures of their mixins.

pub mod cache;
pub mod config;

pub use cache::{Closure, ClosureCache};
pub use config::{CyclePolicy, ResolverConfig};

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHashSet};
use tracing::{debug, trace};

use crate::error::{ResolveError, Result};
use crate::id::{MixinId, TypeId};
use crate::introspect::{Introspector, Registry};
use crate::reflect::Instance;

/// Ids of the recursion frames currently being expanded.
type Path = IndexSet<TypeId, FxBuildHasher>;

static GLOBAL: OnceLock<Resolver<&'static Registry>> = OnceLock::new();

/// Counter snapshot, see [`Resolver::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolverStats {
    /// Mixin closures computed from scratch.
    pub closures_computed: u64,
    /// Direct mixins answered from the closure cache.
    pub cache_hits: u64,
    /// Calls to `query` / `query_type`, including failed ones.
    pub queries: u64,
}

/// Composition resolver over an [`Introspector`].
#[derive(Debug)]
pub struct Resolver<I> {
    introspector: I,
    config: ResolverConfig,
    cache: ClosureCache,
    closures_computed: AtomicU64,
    cache_hits: AtomicU64,
    queries: AtomicU64,
}

impl Resolver<&'static Registry> {
    /// Process-wide resolver over [`Registry::global`].
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| Resolver::new(Registry::global()))
    }
}

impl<I: Introspector> Resolver<I> {
    pub fn new(introspector: I) -> Self {
        Self::with_config(introspector, ResolverConfig::default())
    }

    pub fn with_config(introspector: I, config: ResolverConfig) -> Self {
        Self {
            introspector,
            config,
            cache: ClosureCache::new(),
            closures_computed: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            queries: AtomicU64::new(0),
        }
    }

    pub fn introspector(&self) -> &I {
        &self.introspector
    }

    pub fn config(&self) -> ResolverConfig {
        self.config
    }

    pub fn cache(&self) -> &ClosureCache {
        &self.cache
    }

    pub fn stats(&self) -> ResolverStats {
        ResolverStats {
            closures_computed: self.closures_computed.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            queries: self.queries.load(Ordering::Relaxed),
        }
    }

    /// Does `object`'s type, or any ancestor, compose `target`?
    ///
    /// Fails with [`ResolveError::InvalidInput`] if `target` is not a mixin.
    pub fn query<O: Instance + ?Sized>(&self, object: &O, target: &MixinId) -> Result<bool> {
        self.query_type(&object.instance_type(), target)
    }

    /// [`query`](Self::query) starting from an explicit type id.
    pub fn query_type(&self, ty: &TypeId, target: &MixinId) -> Result<bool> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        if !self.introspector.is_mixin(target)? {
            return Err(ResolveError::InvalidInput { target: *target });
        }

        let mut seen: FxHashSet<TypeId> = FxHashSet::default();
        let mut current = Some(*ty);
        while let Some(id) = current {
            if !seen.insert(id) {
                break;
            }
            if self.expanded_mixins(&id)?.contains(target) {
                debug!(ty = %ty, target = %target, via = %id, "Resolver::query - found");
                return Ok(true);
            }
            current = self.introspector.parent(&id)?;
        }
        debug!(ty = %ty, target = %target, "Resolver::query - not found");
        Ok(false)
    }

    /// Every mixin `ty` composes, directly or transitively, including
    /// those inherited from its parent chain. A mixin includes itself.
    pub fn expanded_mixins(&self, ty: &TypeId) -> Result<IndexSet<MixinId>> {
        let mut path = Path::default();
        path.insert(*ty);
        self.expand(ty, &mut path)
    }

    /// Cached closure of `mixin`, computed on first use.
    pub fn closure(&self, mixin: &MixinId) -> Result<Closure> {
        if !self.introspector.is_mixin(mixin)? {
            return Err(ResolveError::InvalidInput { target: *mixin });
        }
        if let Some(closure) = self.cache.get(mixin) {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            return Ok(closure);
        }
        self.compute_closure(mixin, &mut Path::default())
    }

    /// `ty` followed by its parents, nearest first.
    pub fn ancestors(&self, ty: &TypeId) -> Result<Vec<TypeId>> {
        let mut chain = vec![*ty];
        let mut current = self.introspector.parent(ty)?;
        while let Some(id) = current {
            if chain.contains(&id) {
                break;
            }
            chain.push(id);
            current = self.introspector.parent(&id)?;
        }
        Ok(chain)
    }

    fn expand(&self, id: &TypeId, path: &mut Path) -> Result<IndexSet<MixinId>> {
        let is_mixin = self.introspector.is_mixin(id)?;
        let mut result = IndexSet::new();
        if is_mixin {
            result.insert(*id);
        }

        for direct in self.introspector.direct_mixins(id)? {
            if path.contains(&direct) {
                match self.config.cycle_policy {
                    CyclePolicy::Skip => {
                        trace!(from = %id, mixin = %direct, "Resolver::expand - cycle skipped");
                        continue;
                    }
                    CyclePolicy::Error => {
                        return Err(ResolveError::CyclicComposition {
                            mixin: direct,
                            path: path.iter().copied().collect(),
                        });
                    }
                }
            }

            let closure = match self.cache.get(&direct) {
                Some(closure) => {
                    self.cache_hits.fetch_add(1, Ordering::Relaxed);
                    trace!(mixin = %direct, "Resolver::expand - cache hit");
                    closure
                }
                None => {
                    // only mixins are cached, so a hit never needs this check
                    if !self.introspector.is_mixin(&direct)? {
                        return Err(ResolveError::InvalidInput { target: direct });
                    }
                    self.compute_closure(&direct, path)?
                }
            };
            result.insert(direct);
            result.extend(closure.iter().copied());
        }

        if !is_mixin {
            if let Some(parent) = self.introspector.parent(id)? {
                if path.insert(parent) {
                    let inherited = self.expand(&parent, path);
                    path.pop();
                    result.extend(inherited?);
                }
            }
        }

        Ok(result)
    }

    fn compute_closure(&self, mixin: &MixinId, path: &mut Path) -> Result<Closure> {
        path.insert(*mixin);
        let expanded = self.expand(mixin, path);
        path.pop();
        let expanded = expanded?;

        self.closures_computed.fetch_add(1, Ordering::Relaxed);
        trace!(mixin = %mixin, size = expanded.len(), "Resolver::compute_closure");
        Ok(self.cache.insert(*mixin, expanded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspect::TypeInfo;

    const NONE: [&str; 0] = [];

    fn id(name: &'static str) -> TypeId {
        TypeId::new(name)
    }

    /// Base <- Layer1_1, Layer1_2; Layer2_Base <- Layer1_1;
    /// Layer2_1 <- Layer2_Base, Layer1_2; Inherited2 (uses Layer2_1) extends Inherited1.
    fn layered() -> Registry {
        let registry = Registry::new();
        registry.register("Base", TypeInfo::mixin(NONE)).unwrap();
        registry.register("Layer1_1", TypeInfo::mixin(["Base"])).unwrap();
        registry.register("Layer1_2", TypeInfo::mixin(["Base"])).unwrap();
        registry.register("Layer2_Base", TypeInfo::mixin(["Layer1_1"])).unwrap();
        registry
            .register("Layer2_1", TypeInfo::mixin(["Layer2_Base", "Layer1_2"]))
            .unwrap();
        registry.register("Plain", TypeInfo::concrete(NONE)).unwrap();
        registry.register("Inherited1", TypeInfo::concrete(NONE)).unwrap();
        registry
            .register("Inherited2", TypeInfo::concrete(["Layer2_1"]).extends("Inherited1"))
            .unwrap();
        registry
    }

    #[test]
    fn expanded_set_covers_every_layer() {
        let resolver = Resolver::new(layered());
        let expanded = resolver.expanded_mixins(&id("Inherited2")).unwrap();
        for name in ["Base", "Layer1_1", "Layer1_2", "Layer2_Base", "Layer2_1"] {
            assert!(expanded.contains(&id(name)), "missing {name}");
        }
        assert_eq!(expanded.len(), 5);
    }

    #[test]
    fn mixin_closure_contains_itself() {
        let resolver = Resolver::new(layered());
        let closure = resolver.closure(&id("Layer1_1")).unwrap();
        assert_eq!(closure.iter().copied().collect::<Vec<_>>(), vec![id("Layer1_1"), id("Base")]);
    }

    #[test]
    fn diamond_member_appears_once() {
        let resolver = Resolver::new(layered());
        let expanded = resolver.expanded_mixins(&id("Layer2_1")).unwrap();
        assert_eq!(expanded.iter().filter(|m| **m == id("Base")).count(), 1);
    }

    #[test]
    fn query_rejects_non_mixin_target() {
        let resolver = Resolver::new(layered());
        assert_eq!(
            resolver.query_type(&id("Inherited2"), &id("Plain")),
            Err(ResolveError::InvalidInput { target: id("Plain") })
        );
    }

    #[test]
    fn query_reports_unknown_ids() {
        let resolver = Resolver::new(layered());
        assert_eq!(
            resolver.query_type(&id("Inherited2"), &id("Ghost")),
            Err(ResolveError::UnresolvableType { id: id("Ghost") })
        );
        assert_eq!(
            resolver.query_type(&id("Ghost"), &id("Base")),
            Err(ResolveError::UnresolvableType { id: id("Ghost") })
        );
    }

    #[test]
    fn second_expansion_reuses_cache() {
        let resolver = Resolver::new(layered());
        resolver.expanded_mixins(&id("Inherited2")).unwrap();
        let computed = resolver.stats().closures_computed;
        assert_eq!(computed, 5);

        resolver.expanded_mixins(&id("Inherited2")).unwrap();
        assert_eq!(resolver.stats().closures_computed, computed);
        assert!(resolver.stats().cache_hits > 0);
    }

    #[test]
    fn siblings_do_not_truncate_each_other() {
        let registry = Registry::new();
        registry.register("X", TypeInfo::mixin(NONE)).unwrap();
        registry.register("M", TypeInfo::mixin(["X"])).unwrap();
        registry.register("T", TypeInfo::concrete(["X", "M"])).unwrap();
        let resolver = Resolver::new(registry);

        resolver.expanded_mixins(&id("T")).unwrap();
        let closure = resolver.closure(&id("M")).unwrap();
        assert!(closure.contains(&id("X")));
    }

    fn cyclic() -> Registry {
        let registry = Registry::new();
        registry.register("A", TypeInfo::mixin(["B"])).unwrap();
        registry.register("B", TypeInfo::mixin(["A"])).unwrap();
        registry.register("T", TypeInfo::concrete(["A"])).unwrap();
        registry
    }

    #[test]
    fn cycle_skip_terminates() {
        let resolver = Resolver::new(cyclic());
        let expanded = resolver.expanded_mixins(&id("T")).unwrap();
        assert!(expanded.contains(&id("A")));
        assert!(expanded.contains(&id("B")));

        // B was expanded while A was on the path, so its cached closure
        // misses A. Kept as-is: the graph is malformed.
        let b = resolver.closure(&id("B")).unwrap();
        assert_eq!(b.iter().copied().collect::<Vec<_>>(), vec![id("B")]);
    }

    #[test]
    fn cycle_error_policy_fails_fast() {
        let config = ResolverConfig::new().with_cycle_policy(CyclePolicy::Error);
        let resolver = Resolver::with_config(cyclic(), config);
        let err = resolver.query_type(&id("T"), &id("B")).unwrap_err();
        assert_eq!(
            err,
            ResolveError::CyclicComposition {
                mixin: id("A"),
                path: vec![id("T"), id("A"), id("B")],
            }
        );
        assert!(resolver.cache().is_empty());
    }

    #[test]
    fn self_parent_does_not_loop() {
        let registry = Registry::new();
        registry.register("M", TypeInfo::mixin(NONE)).unwrap();
        registry.register("N", TypeInfo::mixin(NONE)).unwrap();
        registry
            .register("Loop", TypeInfo::concrete(["M"]).extends("Loop"))
            .unwrap();
        let resolver = Resolver::new(registry);

        assert!(resolver.query_type(&id("Loop"), &id("M")).unwrap());
        assert!(!resolver.query_type(&id("Loop"), &id("N")).unwrap());
        assert_eq!(resolver.ancestors(&id("Loop")).unwrap(), vec![id("Loop")]);
    }

    #[test]
    fn concrete_type_used_as_mixin_is_rejected() {
        let registry = Registry::new();
        registry.register("P", TypeInfo::concrete(NONE)).unwrap();
        registry.register("M", TypeInfo::mixin(NONE)).unwrap();
        registry.register("T", TypeInfo::concrete(["P", "M"])).unwrap();
        let resolver = Resolver::new(registry);

        assert_eq!(
            resolver.expanded_mixins(&id("T")),
            Err(ResolveError::InvalidInput { target: id("P") })
        );
        assert_eq!(
            resolver.query_type(&id("T"), &id("M")),
            Err(ResolveError::InvalidInput { target: id("P") })
        );
        assert!(!resolver.cache().contains(&id("P")));
    }

    #[test]
    fn ancestors_are_nearest_first() {
        let resolver = Resolver::new(layered());
        assert_eq!(
            resolver.ancestors(&id("Inherited2")).unwrap(),
            vec![id("Inherited2"), id("Inherited1")]
        );
    }
}
