//! Procedural macros for the tola-mixins composition resolver
//!
//! | Macro | Target | Purpose |
//! |-------|--------|---------|
//! | `#[derive(Mixin)]` | struct/enum | Define a mixin |
//! | `#[derive(Composed)]` | struct/enum | Define a concrete type composing mixins |
//!
//! ## Example
//!
//! ```ignore
//! #[derive(Mixin)]
//! struct Base;
//!
//! #[derive(Mixin)]
//! #[mixin(uses(Base))]
//! struct Layer;
//!
//! #[derive(Composed)]
//! #[composed(uses(Layer), extends(Parent))]
//! struct Widget;
//! ```

use proc_macro::TokenStream;
use syn::parse_macro_input;

mod common;
mod user;

/// Derive macro to declare a mixin.
///
/// Generates a static `TypeDescriptor` named `module_path!()::Ident`, plus
/// `Reflect` and `Mixin` impls. Composed mixins go in `#[mixin(uses(...))]`
/// and must themselves derive `Mixin`.
///
/// # Usage
/// ```ignore
/// #[derive(Mixin)]
/// struct TestTraitBase;
///
/// #[derive(Mixin)]
/// #[mixin(uses(TestTraitBase))]
/// struct TestTraitLayer1_1;
/// ```
#[proc_macro_derive(Mixin, attributes(mixin))]
pub fn derive_mixin(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    user::expand_derive_mixin(input).into()
}

/// Derive macro to declare a concrete type.
///
/// `#[composed(uses(...))]` lists directly composed mixins,
/// `#[composed(extends(Parent))]` names the single parent, which must
/// derive `Composed` too.
///
/// # Usage
/// ```ignore
/// #[derive(Composed)]
/// #[composed(uses(TestTraitLayer2_1), extends(TraitObjectInherited1))]
/// struct TraitObjectInherited2;
///
/// assert!(TraitObjectInherited2.has_mixin::<TestTraitBase>());
/// ```
#[proc_macro_derive(Composed, attributes(composed))]
pub fn derive_composed(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    user::expand_derive_composed(input).into()
}
