//! User-facing macro implementations
//!
//! | Macro | Usage | Purpose |
//! |-------|-------|---------|
//! | `#[derive(Mixin)]` | on struct/enum | Define a mixin, optionally composing others |
//! | `#[derive(Composed)]` | on struct/enum | Define a concrete type with mixins and a parent |

pub mod reflect;

pub use reflect::{expand_derive_composed, expand_derive_mixin};
