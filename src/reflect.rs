//! # Compile-time Descriptors
//!
//! `#[derive(Mixin)]` and `#[derive(Composed)]` emit one static
//! [`TypeDescriptor`] per type. Edges are stored as function pointers so
//! descriptors can reference each other (even cyclically) without
//! const-evaluation order problems.
//!
//! ```ignore
//! use tola_mixins::prelude::*;
//!
//! #[derive(Mixin)]
//! struct Base;
//!
//! #[derive(Mixin)]
//! #[mixin(uses(Base))]
//! struct Layer;
//!
//! #[derive(Composed)]
//! #[composed(uses(Layer))]
//! struct Widget;
//!
//! assert!(Widget.has_mixin::<Base>());
//! ```

use crate::id::{TypeId, TypeKind};

/// Lazily dereferenced edge to another descriptor.
pub type DescriptorFn = fn() -> &'static TypeDescriptor;

/// Static composition record of one type or mixin.
#[derive(Debug)]
pub struct TypeDescriptor {
    /// Fully qualified name (`module_path!() :: Ident`).
    pub name: &'static str,
    pub kind: TypeKind,
    /// Direct mixins, in declaration order.
    pub mixins: &'static [DescriptorFn],
    pub parent: Option<DescriptorFn>,
}

impl TypeDescriptor {
    pub const fn id(&self) -> TypeId {
        TypeId::new(self.name)
    }

    pub fn mixins(&self) -> impl Iterator<Item = &'static TypeDescriptor> + '_ {
        self.mixins.iter().map(|edge| edge())
    }

    pub fn parent(&self) -> Option<&'static TypeDescriptor> {
        self.parent.map(|edge| edge())
    }
}

/// Types carrying a generated [`TypeDescriptor`].
pub trait Reflect: 'static {
    fn descriptor() -> &'static TypeDescriptor;
}

/// Marker for reflected mixins.
pub trait Mixin: Reflect {}

/// Object-safe access to the runtime type of a value.
pub trait Instance {
    fn instance_type(&self) -> TypeId;
}

impl<T: Reflect> Instance for T {
    fn instance_type(&self) -> TypeId {
        TypeId::of::<T>()
    }
}
