//! Common parsing utilities
//!
//! Shared parsing helpers for the derive attributes.

use syn::{
    parenthesized,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Ident, Token, Type,
};

// =============================================================================
// Attribute Arguments: `key(A, B), key(C)`
// =============================================================================

/// One `key(Type, ...)` entry of a derive attribute.
///
/// Used in:
/// - `#[mixin(uses(Base, Other))]`
/// - `#[composed(uses(Layer), extends(Parent))]`
pub struct KeyedTypes {
    pub key: Ident,
    pub types: Vec<Type>,
}

impl Parse for KeyedTypes {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let key: Ident = input.parse()?;
        let content;
        parenthesized!(content in input);
        let types = parse_type_list(&content)?;
        Ok(KeyedTypes { key, types })
    }
}

/// Full argument list of a derive attribute.
pub struct ReflectArgs {
    pub entries: Punctuated<KeyedTypes, Token![,]>,
}

impl Parse for ReflectArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let entries = Punctuated::parse_terminated(input)?;
        Ok(ReflectArgs { entries })
    }
}

// =============================================================================
// Comma-separated List Parsing
// =============================================================================

/// Parse a comma-separated list of items
pub fn parse_comma_separated<T: Parse>(input: ParseStream) -> syn::Result<Vec<T>> {
    let items = Punctuated::<T, Token![,]>::parse_terminated(input)?;
    Ok(items.into_iter().collect())
}

/// Parse comma-separated types (e.g., in `uses(A, B, C)`)
pub fn parse_type_list(input: ParseStream) -> syn::Result<Vec<Type>> {
    parse_comma_separated(input)
}
