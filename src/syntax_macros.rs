//! Declarative registration syntax.

// =============================================================================
// registry! - build a Registry from string ids
// =============================================================================

/// Build a [`Registry`](crate::Registry) from a list of declarations.
///
/// Evaluates to `Result<Registry, RegistryError>`.
///
/// # Example
///
/// ```ignore
/// let registry = tola_mixins::registry! {
///     mixin "Base";
///     mixin "Layer": "Base";
///     type "Parent";
///     type "Widget": "Layer" extends "Parent";
/// }?;
/// ```
#[macro_export]
macro_rules! registry {
    ($($body:tt)*) => {
        (|| -> ::core::result::Result<$crate::Registry, $crate::RegistryError> {
            let registry = $crate::Registry::new();
            $crate::__registry_items!(registry; $($body)*);
            ::core::result::Result::Ok(registry)
        })()
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! __registry_items {
    ($reg:ident;) => {};

    ($reg:ident; mixin $name:literal $(: $($uses:literal),+)? ; $($rest:tt)*) => {
        {
            let uses: &[&'static str] = &[$($($uses),+)?];
            $reg.register($name, $crate::TypeInfo::mixin(uses.iter().copied()))?;
        }
        $crate::__registry_items!($reg; $($rest)*);
    };

    ($reg:ident; type $name:literal $(: $($uses:literal),+)? $(extends $parent:literal)? ; $($rest:tt)*) => {
        {
            let uses: &[&'static str] = &[$($($uses),+)?];
            let parent: ::core::option::Option<&'static str> =
                ::core::option::Option::None $(.or(::core::option::Option::Some($parent)))?;
            let mut info = $crate::TypeInfo::concrete(uses.iter().copied());
            if let ::core::option::Option::Some(parent) = parent {
                info = info.extends(parent);
            }
            $reg.register($name, info)?;
        }
        $crate::__registry_items!($reg; $($rest)*);
    };
}
