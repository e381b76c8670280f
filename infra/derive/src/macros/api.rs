use super::args;
use fxhash::FxHashSet;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Attribute, ItemFn, ItemStruct, LitStr};

/// Expands the `#[api_model]` attribute macro.
pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    match api_model_tokens(args, &input) {
        Ok(tokens) => tokens,
        Err(err) => err,
    }
}

fn api_model_tokens(args: TokenStream, input: &ItemStruct) -> Result<TokenStream, TokenStream> {
    let ApiModelArgs { rename_all, deny_unknown_fields } = ApiModelArgs::parse(args)?;
    let derives = args::derived_trait_names(&input.attrs);
    let serde_meta = SerdeMeta::read(&input.attrs)?;

    let derive_attr = serde_derives(&derives);
    let schema_attr = to_schema_attr(&derives);
    let rename_attr = serde_meta.rename_attr(rename_all)?;
    let deny_attr = serde_meta.deny_attr(deny_unknown_fields.unwrap_or(true), input)?;

    Ok(quote! {
        #derive_attr
        #schema_attr
        #rename_attr
        #deny_attr
        #input
    })
}

/// Expands the `#[api_handler]` attribute macro.
pub fn expand_api_handler(args: TokenStream, input: ItemFn) -> TokenStream {
    let ItemFn { attrs, vis, sig, block } = input;

    quote! {
        #(#attrs)*
        #[allow(clippy::unused_async)]
        #[cfg_attr(feature = "server", ::utoipa::path(#args))]
        #vis #sig #block
    }
}

struct ApiModelArgs {
    rename_all: Option<LitStr>,
    deny_unknown_fields: Option<bool>,
}

impl ApiModelArgs {
    fn parse(tokens: TokenStream) -> Result<Self, TokenStream> {
        let mut rename_all = None;
        let mut deny_unknown_fields = None;

        for name_value in args::name_values(tokens)? {
            if name_value.path.is_ident("rename_all") {
                let value = args::string(&name_value, "rename_all")?;
                rename_all = Some(args::set_once(rename_all, &name_value, value)?);
            } else if name_value.path.is_ident("deny_unknown_fields") {
                let value = args::boolean(&name_value, "deny_unknown_fields")?;
                deny_unknown_fields =
                    Some(args::set_once(deny_unknown_fields, &name_value, value)?);
            } else {
                return Err(syn::Error::new_spanned(
                    name_value.path,
                    "Unsupported argument; expected rename_all or deny_unknown_fields",
                )
                .to_compile_error());
            }
        }

        Ok(Self { rename_all, deny_unknown_fields })
    }
}

/// Serde container settings already present on the item.
struct SerdeMeta {
    rename_all: Option<LitStr>,
    deny_unknown_fields: bool,
}

impl SerdeMeta {
    fn read(attrs: &[Attribute]) -> Result<Self, TokenStream> {
        let mut meta_info = Self { rename_all: None, deny_unknown_fields: false };

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    meta_info.rename_all = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("deny_unknown_fields") {
                    meta_info.deny_unknown_fields = true;
                } else if meta.input.peek(syn::Token![=]) {
                    // Skip the value of container attributes we do not inspect.
                    let _: syn::Expr = meta.value()?.parse()?;
                }
                Ok(())
            })
            .map_err(|err| err.to_compile_error())?;
        }

        Ok(meta_info)
    }

    fn rename_attr(&self, requested: Option<LitStr>) -> Result<TokenStream, TokenStream> {
        let requested = requested.unwrap_or_else(|| LitStr::new("camelCase", Span::call_site()));

        match &self.rename_all {
            Some(existing) if existing.value() != requested.value() => Err(syn::Error::new_spanned(
                existing,
                "Conflicting serde rename_all; remove it or set api_model(rename_all = \"...\") to match",
            )
            .to_compile_error()),
            Some(_) => Ok(quote! {}),
            None => Ok(quote! { #[serde(rename_all = #requested)] }),
        }
    }

    fn deny_attr(&self, deny: bool, input: &ItemStruct) -> Result<TokenStream, TokenStream> {
        match (self.deny_unknown_fields, deny) {
            (true, false) => Err(syn::Error::new_spanned(
                &input.ident,
                "deny_unknown_fields is already set via serde; remove it before disabling",
            )
            .to_compile_error()),
            (false, true) => Ok(quote! { #[serde(deny_unknown_fields)] }),
            _ => Ok(quote! {}),
        }
    }
}

pub(super) fn serde_derives(derives: &FxHashSet<String>) -> TokenStream {
    let missing: Vec<TokenStream> = [
        ("Debug", quote! { Debug }),
        ("Serialize", quote! { ::serde::Serialize }),
        ("Deserialize", quote! { ::serde::Deserialize }),
    ]
    .into_iter()
    .filter(|(name, _)| !derives.contains(*name))
    .map(|(_, tokens)| tokens)
    .collect();

    if missing.is_empty() { quote! {} } else { quote! { #[derive(#(#missing),*)] } }
}

pub(super) fn to_schema_attr(derives: &FxHashSet<String>) -> TokenStream {
    if derives.contains("ToSchema") {
        quote! {}
    } else {
        quote! { #[cfg_attr(feature = "server", derive(::utoipa::ToSchema))] }
    }
}
