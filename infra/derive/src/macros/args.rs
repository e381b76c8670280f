//! Name-value argument parsing shared by the attribute macros.

use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, Lit, LitStr, Meta, MetaNameValue, Token};

/// Parses `key = value, ...` attribute arguments.
pub fn name_values(args: TokenStream) -> Result<Vec<MetaNameValue>, TokenStream> {
    let parser = Punctuated::<Meta, Token![,]>::parse_terminated;
    let metas = parser.parse2(args).map_err(|err| err.to_compile_error())?;

    metas
        .into_iter()
        .map(|meta| match meta {
            Meta::NameValue(name_value) => Ok(name_value),
            other => Err(syn::Error::new_spanned(
                other,
                "Expected name-value arguments like `key = \"...\"`",
            )
            .to_compile_error()),
        })
        .collect()
}

fn literal(name_value: &MetaNameValue) -> Option<&Lit> {
    match &name_value.value {
        Expr::Lit(expr_lit) => Some(&expr_lit.lit),
        _ => None,
    }
}

pub fn string(name_value: &MetaNameValue, label: &str) -> Result<LitStr, TokenStream> {
    match literal(name_value) {
        Some(Lit::Str(lit)) => Ok(lit.clone()),
        _ => Err(syn::Error::new_spanned(
            &name_value.value,
            format!("{label} must be a string literal"),
        )
        .to_compile_error()),
    }
}

pub fn boolean(name_value: &MetaNameValue, label: &str) -> Result<bool, TokenStream> {
    match literal(name_value) {
        Some(Lit::Bool(lit)) => Ok(lit.value),
        _ => Err(syn::Error::new_spanned(
            &name_value.value,
            format!("{label} must be a boolean literal"),
        )
        .to_compile_error()),
    }
}

pub fn path(name_value: &MetaNameValue, label: &str) -> Result<syn::Path, TokenStream> {
    match &name_value.value {
        Expr::Path(expr_path) => Ok(expr_path.path.clone()),
        other => Err(syn::Error::new_spanned(other, format!("{label} must be a path"))
            .to_compile_error()),
    }
}

pub fn set_once<T>(current: Option<T>, token: &MetaNameValue, value: T) -> Result<T, TokenStream> {
    if current.is_some() {
        return Err(syn::Error::new_spanned(token, "Duplicate argument").to_compile_error());
    }
    Ok(value)
}

/// Collects the trait names already listed in `#[derive(...)]` attributes.
pub fn derived_trait_names(attrs: &[Attribute]) -> FxHashSet<String> {
    let mut traits = FxHashSet::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(segment) = meta.path.segments.last() {
                traits.insert(segment.ident.to_string());
            }
            Ok(())
        });
    }

    traits
}
