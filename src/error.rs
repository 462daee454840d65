//! Error types for resolution and registration.

use crate::id::TypeId;

/// Errors raised while answering a composition query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The queried target is an ordinary type, not a mixin.
    #[error("`{target}` is not a mixin")]
    InvalidInput { target: TypeId },

    /// The introspector has no record of this id.
    #[error("unresolvable type `{id}`")]
    UnresolvableType { id: TypeId },

    /// A mixin re-enters its own expansion path. Only raised under
    /// [`CyclePolicy::Error`](crate::CyclePolicy::Error).
    #[error("cyclic composition through `{mixin}` (path: {})", format_path(.path))]
    CyclicComposition { mixin: TypeId, path: Vec<TypeId> },
}

/// Errors raised by [`Registry`](crate::Registry) registration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("`{id}` is already registered with a different definition")]
    Conflicting { id: TypeId },

    #[error("mixin `{id}` cannot have a parent")]
    MixinWithParent { id: TypeId },
}

pub type Result<T, E = ResolveError> = core::result::Result<T, E>;

fn format_path(path: &[TypeId]) -> String {
    path.iter()
        .map(TypeId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}
