//! Capability checks on objects.
//!
//! Thin surface over [`Resolver::global`]: every reflected type gets
//! `has_capability` / `has_mixin` for free.

use tracing::warn;

use crate::error::Result;
use crate::id::{MixinId, TypeId};
use crate::introspect::Registry;
use crate::reflect::{Instance, Mixin, Reflect};
use crate::resolver::Resolver;

/// Ask an object whether it (or an ancestor) composes a mixin.
pub trait Traitable: Instance {
    /// Delegates to [`Resolver::query`] on the process-wide resolver.
    fn has_capability(&self, mixin: &MixinId) -> Result<bool>;

    /// Typed form of [`has_capability`](Self::has_capability).
    ///
    /// Any registration or resolution failure is logged with `warn!` and
    /// reads as `false`; use `has_capability` to see the error.
    fn has_mixin<M: Mixin>(&self) -> bool
    where
        Self: Sized;
}

impl<T: Reflect> Traitable for T {
    fn has_capability(&self, mixin: &MixinId) -> Result<bool> {
        register::<T>();
        Resolver::global().query(self, mixin)
    }

    fn has_mixin<M: Mixin>(&self) -> bool {
        register::<M>();
        match self.has_capability(&TypeId::of::<M>()) {
            Ok(found) => found,
            Err(err) => {
                warn!(ty = %self.instance_type(), mixin = %TypeId::of::<M>(), %err, "has_mixin failed");
                false
            }
        }
    }
}

fn register<T: Reflect>() {
    if let Err(err) = Registry::global().register_reflected::<T>() {
        warn!(ty = %TypeId::of::<T>(), %err, "descriptor registration failed");
    }
}
