//! # Identifiers
//!
//! Types and mixins are named by their fully qualified path.
//! Derived types use `module_path!() :: Ident`; explicitly registered
//! types may use any `'static` string.

use core::fmt;

use crate::reflect::Reflect;

/// Opaque identifier for a class-like type or a mixin.
///
/// Whether an id names a mixin is decided by the [`Introspector`](crate::Introspector),
/// never by the id itself.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(&'static str);

/// A [`TypeId`] expected to name a mixin.
pub type MixinId = TypeId;

impl TypeId {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Id of a reflected type (its descriptor name).
    pub fn of<T: Reflect + ?Sized>() -> Self {
        Self(T::descriptor().name)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Last path segment, e.g. `TestTraitBase` for `crate::mocks::TestTraitBase`.
    pub fn short_name(&self) -> &'static str {
        match self.0.rfind("::") {
            Some(pos) => &self.0[pos + 2..],
            None => self.0,
        }
    }
}

impl From<&'static str> for TypeId {
    fn from(name: &'static str) -> Self {
        Self(name)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Kind of a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Instantiable type; may have a parent.
    Concrete,
    /// Composition unit; never has a parent.
    Mixin,
}

impl TypeKind {
    pub const fn is_mixin(self) -> bool {
        matches!(self, TypeKind::Mixin)
    }
}
