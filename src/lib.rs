//! # tola-mixins
//!
//! Answers one question: does an object's type, or any ancestor in its
//! parent chain, transitively compose a given mixin?
//!
//! ## Architecture
//!
//! ```text
//! +-------------------------------------------------------------------+
//! |  Layer 0: Identity                                                |
//! |  - TypeId (fully qualified name), TypeKind, errors                |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 1: Introspection                                           |
//! |  - TypeDescriptor (generated by derives), Registry, registry!     |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 2: Resolver                                                |
//! |  - ClosureCache (per-mixin, process-wide), query, expansion       |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 3: User API                                                |
//! |  - #[derive(Mixin)], #[derive(Composed)], Traitable               |
//! +-------------------------------------------------------------------+
//! ```
//!
//! Mixins compose other mixins, so the composition graph can contain
//! diamonds and, for malformed input, cycles. Each mixin's transitive
//! closure is computed once and cached for the life of the resolver.
//!
//! ## Quick Start
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
//! struct Parent;
//!
//! #[derive(Composed)]
//! #[composed(uses(Layer), extends(Parent))]
//! struct Widget;
//!
//! assert!(Widget.has_mixin::<Base>());
//! assert!(Widget.has_capability(&TypeId::of::<Layer>())?);
//! ```
//!
//! Without derives, fill a [`Registry`] and query a [`Resolver`] directly:
//!
//! ```ignore
//! let registry = tola_mixins::registry! {
//!     mixin "Base";
//!     mixin "Layer": "Base";
//!     type "Widget": "Layer";
//! }?;
//! let resolver = Resolver::new(registry);
//! assert!(resolver.query_type(&"Widget".into(), &"Base".into())?);
//! ```

// =============================================================================
// Layer 0: Identity
// =============================================================================
pub mod error;
pub mod id;

// =============================================================================
// Layer 1: Introspection
// =============================================================================
pub mod introspect;
pub mod reflect;

// Syntax macros (registry!)
pub mod syntax_macros;

// =============================================================================
// Layer 2: Resolver
// =============================================================================
pub mod resolver;

// =============================================================================
// Layer 3: User API
// =============================================================================
pub mod traitable;

// =============================================================================
// Re-exports at Crate Root
// =============================================================================

pub use error::{RegistryError, ResolveError, Result};
pub use id::{MixinId, TypeId, TypeKind};
pub use introspect::{Introspector, Registry, TypeInfo};
pub use reflect::{DescriptorFn, Instance, Mixin, Reflect, TypeDescriptor};
pub use resolver::{
    Closure, ClosureCache, CyclePolicy, Resolver, ResolverConfig, ResolverStats,
};
pub use traitable::Traitable;

// Re-export proc-macros
#[cfg(feature = "derive")]
pub use macros::{Composed, Mixin};

// =============================================================================
// Declarative Macro Bridge for #[derive(Mixin)] / #[derive(Composed)]
// =============================================================================
//
// The derives emit a call to __impl_reflect! so that module_path!() expands
// at the use site, giving every descriptor its fully qualified name:
// 1. #[derive(Mixin)] / #[derive(Composed)] (proc-macro) -> __impl_reflect! call
// 2. __impl_reflect! (this decl-macro) -> static TypeDescriptor + Reflect impl

/// Internal macro bridge - DO NOT USE DIRECTLY.
/// Use #[derive(Mixin)] or #[derive(Composed)] instead.
#[macro_export]
#[doc(hidden)]
macro_rules! __impl_reflect {
    (mixin $ty:ident [$($uses:ty),*]) => {
        $crate::__impl_reflect!(@descriptor $ty, Mixin, [$($uses),*], []);
        impl $crate::Mixin for $ty {}
    };

    (concrete $ty:ident [$($uses:ty),*] [$($parent:ty)?]) => {
        $crate::__impl_reflect!(@descriptor $ty, Concrete, [$($uses),*], [$($parent)?]);
    };

    (@descriptor $ty:ident, $kind:ident, [$($uses:ty),*], [$($parent:ty)?]) => {
        impl $crate::Reflect for $ty {
            fn descriptor() -> &'static $crate::TypeDescriptor {
                // `uses(...)` may only name mixins
                #[allow(dead_code)]
                fn assert_mixin<M: $crate::Mixin>() {}
                $(assert_mixin::<$uses>();)*

                static DESCRIPTOR: $crate::TypeDescriptor = $crate::TypeDescriptor {
                    name: concat!(module_path!(), "::", stringify!($ty)),
                    kind: $crate::TypeKind::$kind,
                    mixins: &[$(<$uses as $crate::Reflect>::descriptor as $crate::DescriptorFn),*],
                    parent: $crate::__impl_reflect!(@parent $($parent)?),
                };
                &DESCRIPTOR
            }
        }
    };

    (@parent) => {
        ::core::option::Option::None
    };

    (@parent $parent:ty) => {
        ::core::option::Option::Some(<$parent as $crate::Reflect>::descriptor as $crate::DescriptorFn)
    };
}

/// Common items for composition queries.
pub mod prelude {
    pub use crate::id::{MixinId, TypeId};
    pub use crate::introspect::{Introspector, Registry, TypeInfo};
    pub use crate::reflect::{Instance, Mixin, Reflect};
    pub use crate::resolver::{CyclePolicy, Resolver, ResolverConfig};
    pub use crate::traitable::Traitable;
    #[cfg(feature = "derive")]
    pub use macros::{Composed, Mixin};
}
