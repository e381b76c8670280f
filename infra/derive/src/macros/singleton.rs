use super::api::{serde_derives, to_schema_attr};
use super::args;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Expr, Fields, ItemStruct, Lit, LitStr};

struct SingletonArgs {
    table: LitStr,
    slug: LitStr,
    validate: Option<syn::Path>,
}

impl SingletonArgs {
    fn parse(tokens: TokenStream, input: &ItemStruct) -> Result<Self, TokenStream> {
        let mut table = None;
        let mut slug = None;
        let mut validate = None;

        for name_value in args::name_values(tokens)? {
            if name_value.path.is_ident("table") {
                let value = args::string(&name_value, "table")?;
                table = Some(args::set_once(table, &name_value, value)?);
            } else if name_value.path.is_ident("slug") {
                let value = args::string(&name_value, "slug")?;
                slug = Some(args::set_once(slug, &name_value, value)?);
            } else if name_value.path.is_ident("validate") {
                let value = args::path(&name_value, "validate")?;
                validate = Some(args::set_once(validate, &name_value, value)?);
            } else {
                return Err(syn::Error::new_spanned(
                    name_value.path,
                    "Unsupported argument; expected table, slug or validate",
                )
                .to_compile_error());
            }
        }

        let missing = |what: &str| {
            syn::Error::new_spanned(&input.ident, format!("singleton requires `{what} = \"...\"`"))
                .to_compile_error()
        };

        Ok(Self {
            table: table.ok_or_else(|| missing("table"))?,
            slug: slug.ok_or_else(|| missing("slug"))?,
            validate,
        })
    }
}

/// Expands the `#[singleton]` attribute macro.
pub fn expand_singleton(args: TokenStream, mut input: ItemStruct) -> TokenStream {
    let SingletonArgs { table, slug, validate } = match SingletonArgs::parse(args, &input) {
        Ok(args) => args,
        Err(err) => return err,
    };

    let Fields::Named(fields) = &mut input.fields else {
        return syn::Error::new_spanned(&input.ident, "singleton requires a struct with named fields")
            .to_compile_error();
    };

    let mut initializers = Vec::with_capacity(fields.named.len());
    for field in &mut fields.named {
        let position = field.attrs.iter().position(|attr| attr.path().is_ident("default"));
        let value = match position.map(|idx| field.attrs.remove(idx)) {
            Some(attr) => match attr.parse_args::<Expr>() {
                Ok(expr) => default_value(&expr),
                Err(err) => return err.to_compile_error(),
            },
            None => quote! { ::core::default::Default::default() },
        };
        let ident = &field.ident;
        initializers.push(quote! { #ident: #value });
    }

    let derives = args::derived_trait_names(&input.attrs);
    let serde_attr = serde_derives(&derives);
    let schema_attr = to_schema_attr(&derives);
    let name = &input.ident;

    let validate_fn = validate.map(|path| {
        quote! {
            fn validate(&self) -> ::core::result::Result<(), ::std::borrow::Cow<'static, str>> {
                #path(self)
            }
        }
    });

    quote! {
        #serde_attr
        #schema_attr
        #[derive(Clone, PartialEq)]
        #[serde(rename_all = "camelCase", default)]
        #input

        impl ::core::default::Default for #name {
            fn default() -> Self {
                Self { #(#initializers),* }
            }
        }

        impl ::lobby_kernel::singleton::Singleton for #name {
            const TABLE: &'static str = #table;
            const SLUG: &'static str = #slug;

            #validate_fn
        }
    }
}

/// String literals go through `From<&'static str>` so newtypes like colors can be seeded
/// directly; every other expression is used verbatim.
fn default_value(expr: &Expr) -> TokenStream {
    match expr {
        Expr::Lit(lit) if matches!(lit.lit, Lit::Str(_)) => {
            quote! { ::core::convert::From::from(#expr) }
        },
        _ => quote! { #expr },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn expand(args: TokenStream, item: TokenStream) -> String {
        let input: ItemStruct = syn::parse2(item).expect("struct");
        expand_singleton(args, input).to_string()
    }

    #[test]
    fn strips_default_attributes_and_builds_initializers() {
        let out = expand(
            quote! { table = "navbar_color", slug = "navbar-color" },
            quote! {
                pub struct NavbarColor {
                    #[default("#0b0f1a")]
                    pub background_color: Color,
                    #[default(64)]
                    pub height: u32,
                    pub links: Vec<String>,
                }
            },
        );

        assert!(!out.contains("# [default"), "default attributes must be removed: {out}");
        assert!(out.contains(":: core :: convert :: From :: from (\"#0b0f1a\")"));
        assert!(out.contains("height : 64"));
        assert!(out.contains("links : :: core :: default :: Default :: default ()"));
        assert!(out.contains("const TABLE : & 'static str = \"navbar_color\""));
        assert!(out.contains("const SLUG : & 'static str = \"navbar-color\""));
    }

    #[test]
    fn validate_hook_is_forwarded() {
        let out = expand(
            quote! { table = "footer", slug = "footer", validate = check_footer },
            quote! { pub struct Footer { pub text: String } },
        );
        assert!(out.contains("fn validate"));
        assert!(out.contains("check_footer (self)"));
    }

    #[test]
    fn missing_table_is_reported() {
        let out = expand(quote! { slug = "x" }, quote! { pub struct X { pub a: u32 } });
        assert!(out.contains("compile_error"));
        assert!(out.contains("table"));
    }

    #[test]
    fn tuple_structs_are_rejected() {
        let out = expand(quote! { table = "x", slug = "x" }, quote! { pub struct X(u32); });
        assert!(out.contains("named fields"));
    }
}
