//! # Type Introspection
//!
//! The resolver never looks at types itself. It asks an [`Introspector`]
//! three questions: is this id a mixin, which mixins does it compose
//! directly, and what is its parent.
//!
//! [`Registry`] is the provided implementation, filled either explicitly
//! (`registry!`, [`Registry::register`]) or from compile-time descriptors
//! ([`Registry::register_reflected`]).

pub mod registry;

pub use registry::Registry;

use crate::error::Result;
use crate::id::{MixinId, TypeId, TypeKind};

/// Source of direct composition edges.
///
/// Every method fails with [`ResolveError::UnresolvableType`](crate::ResolveError::UnresolvableType)
/// for ids it does not know.
pub trait Introspector: Send + Sync {
    fn is_mixin(&self, id: &TypeId) -> Result<bool>;

    /// Direct mixins in declaration order, without duplicates.
    fn direct_mixins(&self, id: &TypeId) -> Result<Vec<MixinId>>;

    fn parent(&self, id: &TypeId) -> Result<Option<TypeId>>;
}

impl<I: Introspector + ?Sized> Introspector for &I {
    fn is_mixin(&self, id: &TypeId) -> Result<bool> {
        (**self).is_mixin(id)
    }

    fn direct_mixins(&self, id: &TypeId) -> Result<Vec<MixinId>> {
        (**self).direct_mixins(id)
    }

    fn parent(&self, id: &TypeId) -> Result<Option<TypeId>> {
        (**self).parent(id)
    }
}

/// Registered composition record of one id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub kind: TypeKind,
    pub mixins: Vec<MixinId>,
    pub parent: Option<TypeId>,
}

impl TypeInfo {
    pub fn mixin<I>(uses: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<MixinId>,
    {
        Self::build(TypeKind::Mixin, uses)
    }

    pub fn concrete<I>(uses: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<MixinId>,
    {
        Self::build(TypeKind::Concrete, uses)
    }

    pub fn extends(mut self, parent: impl Into<TypeId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    fn build<I>(kind: TypeKind, uses: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<MixinId>,
    {
        let mut mixins: Vec<MixinId> = Vec::new();
        for id in uses {
            let id = id.into();
            if !mixins.contains(&id) {
                mixins.push(id);
            }
        }
        Self { kind, mixins, parent: None }
    }
}
