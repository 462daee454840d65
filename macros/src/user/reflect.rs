use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, Type};

use crate::common::ReflectArgs;

/// Composition edges collected from the derive attribute.
#[derive(Default)]
struct Edges {
    uses: Vec<Type>,
    extends: Option<Type>,
}

/// #[derive(Mixin)] generates a call to the declarative macro bridge.
///
/// The two-layer architecture:
/// 1. #[derive(Mixin)] (proc-macro) -> generates __impl_reflect! call
/// 2. __impl_reflect! (decl-macro) -> expands module_path!() at the use site
pub fn expand_derive_mixin(input: DeriveInput) -> TokenStream2 {
    let edges = match collect_edges(&input, "mixin", &["uses"]) {
        Ok(edges) => edges,
        Err(err) => return err.to_compile_error(),
    };
    let ident = &input.ident;
    let uses = &edges.uses;

    quote! {
        ::tola_mixins::__impl_reflect!(mixin #ident [#(#uses),*]);
    }
}

/// #[derive(Composed)] - same bridge, for concrete types.
pub fn expand_derive_composed(input: DeriveInput) -> TokenStream2 {
    let edges = match collect_edges(&input, "composed", &["uses", "extends"]) {
        Ok(edges) => edges,
        Err(err) => return err.to_compile_error(),
    };
    let ident = &input.ident;
    let uses = &edges.uses;
    let extends = edges.extends.iter();

    quote! {
        ::tola_mixins::__impl_reflect!(concrete #ident [#(#uses),*] [#(#extends)*]);
    }
}

fn collect_edges(input: &DeriveInput, attr_name: &str, keys: &[&str]) -> syn::Result<Edges> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "generic types cannot be reflected: each type needs one static descriptor",
        ));
    }
    if matches!(input.data, syn::Data::Union(_)) {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "unions cannot be reflected",
        ));
    }

    let mut edges = Edges::default();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident(attr_name)) {
        let args: ReflectArgs = attr.parse_args()?;
        for entry in args.entries {
            let key = entry.key.to_string();
            if !keys.contains(&key.as_str()) {
                return Err(syn::Error::new_spanned(
                    &entry.key,
                    format!(
                        "unknown key `{}` in #[{}(...)], expected one of: {}",
                        key,
                        attr_name,
                        keys.join(", ")
                    ),
                ));
            }
            match key.as_str() {
                "uses" => edges.uses.extend(entry.types),
                _ => {
                    let mut types = entry.types.into_iter();
                    let parent = types.next().ok_or_else(|| {
                        syn::Error::new_spanned(&entry.key, "extends(...) needs a parent type")
                    })?;
                    if types.next().is_some() || edges.extends.is_some() {
                        return Err(syn::Error::new_spanned(
                            &entry.key,
                            "a type has at most one parent",
                        ));
                    }
                    edges.extends = Some(parent);
                }
            }
        }
    }
    Ok(edges)
}
