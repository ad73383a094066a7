//! Procedural macros for `confbind`.
//!
//! [`Configurable`] implements `confbind::Configurable` for a struct with
//! named fields. Each field's `#[flag(...)]` attribute supplies its metadata
//! (`name`, `value`, `usage`, and `env_var`, also spelled `envVar`); the
//! field's type picks the storage slot. Types are matched by their last
//! path segment (`bool`, `String`, `i32`, `i64`, `Duration`), so `Duration`
//! must be `std::time::Duration`. Fields of any other type are reported as
//! unsupported and skipped at bind time.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{ToTokens, quote};
use syn::{Data, DeriveInput, Fields, LitStr, PathArguments, Type, parse_macro_input};

/// Derive macro for `confbind::Configurable`.
///
/// ```ignore
/// #[derive(Configurable, Default)]
/// struct Config {
///     #[flag(name = "addr", value = ":8000", usage = "Listen and serve address")]
///     addr: String,
///     #[flag(name = "batchSize", env_var = "BATCH_SIZE")]
///     batch_size: i32,
/// }
/// ```
#[proc_macro_derive(Configurable, attributes(flag))]
pub fn derive_configurable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Configurable requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "Configurable can only be derived for structs",
            ));
        }
    };

    let entries = fields
        .iter()
        .map(|f| {
            let Some(name) = f.ident.as_ref() else {
                return Err(syn::Error::new_spanned(f, "expected a named field"));
            };
            let meta = FlagAttrs::parse(&f.attrs)?.into_tokens();
            Ok(match slot_variant(&f.ty) {
                Some(variant) => quote! {
                    ::confbind::Field::new(#meta, ::confbind::Slot::#variant(&mut self.#name))
                },
                None => {
                    let type_name = type_name(&f.ty);
                    quote! { ::confbind::Field::unsupported(#meta, #type_name) }
                }
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::confbind::Configurable for #ident #ty_generics #where_clause {
            fn fields(&mut self) -> ::std::vec::Vec<::confbind::Field<'_>> {
                ::std::vec![ #( #entries ),* ]
            }
        }
    })
}

#[derive(Default)]
struct FlagAttrs {
    name: String,
    value: String,
    usage: String,
    env_var: String,
}

impl FlagAttrs {
    fn parse(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("flag")) {
            attr.parse_nested_meta(|meta| {
                let slot = if meta.path.is_ident("name") {
                    &mut out.name
                } else if meta.path.is_ident("value") {
                    &mut out.value
                } else if meta.path.is_ident("usage") {
                    &mut out.usage
                } else if meta.path.is_ident("env_var") || meta.path.is_ident("envVar") {
                    &mut out.env_var
                } else {
                    return Err(meta.error("expected `name`, `value`, `usage` or `env_var`"));
                };
                *slot = meta.value()?.parse::<LitStr>()?.value();
                Ok(())
            })?;
        }
        Ok(out)
    }

    fn into_tokens(self) -> TokenStream2 {
        let Self {
            name,
            value,
            usage,
            env_var,
        } = self;
        quote! {
            ::confbind::FieldMeta {
                name: #name,
                value: #value,
                usage: #usage,
                env_var: #env_var,
            }
        }
    }
}

/// A field type as written, with token spacing only between words.
fn type_name(ty: &Type) -> String {
    let is_word_start = |c: char| c.is_alphanumeric() || c == '_' || c == '\'';
    let is_word_end = |c: char| c.is_alphanumeric() || c == '_';

    let text = ty.to_token_stream().to_string();
    let mut out = String::with_capacity(text.len());
    let mut after_word = false;
    for token in text.split(' ').filter(|t| !t.is_empty()) {
        if after_word && token.starts_with(is_word_start) {
            out.push(' ');
        }
        out.push_str(token);
        if token == "," {
            out.push(' ');
        }
        after_word = token.ends_with(is_word_end);
    }
    out
}

/// The `Slot` variant for a field type, or `None` if it is unsupported.
fn slot_variant(ty: &Type) -> Option<syn::Ident> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let last = path.path.segments.last()?;
    if !matches!(last.arguments, PathArguments::None) {
        return None;
    }
    let variant = match last.ident.to_string().as_str() {
        "bool" => "Bool",
        "String" => "Text",
        "i32" => "Int32",
        "i64" => "Int64",
        "Duration" => "Duration",
        _ => return None,
    };
    Some(syn::Ident::new(variant, last.ident.span()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn only_field(input: DeriveInput) -> syn::Field {
        match input.data {
            Data::Struct(data) => data.fields.into_iter().next().unwrap(),
            _ => panic!("expected a struct"),
        }
    }

    fn variant(ty: Type) -> Option<String> {
        slot_variant(&ty).map(|i| i.to_string())
    }

    #[test]
    fn supported_types_map_to_slots() {
        assert_eq!(variant(parse_quote!(bool)).as_deref(), Some("Bool"));
        assert_eq!(variant(parse_quote!(String)).as_deref(), Some("Text"));
        assert_eq!(variant(parse_quote!(i32)).as_deref(), Some("Int32"));
        assert_eq!(variant(parse_quote!(i64)).as_deref(), Some("Int64"));
        assert_eq!(variant(parse_quote!(Duration)).as_deref(), Some("Duration"));
        assert_eq!(
            variant(parse_quote!(std::time::Duration)).as_deref(),
            Some("Duration")
        );
    }

    #[test]
    fn other_types_are_unsupported() {
        assert_eq!(variant(parse_quote!(u32)), None);
        assert_eq!(variant(parse_quote!(Option<String>)), None);
        assert_eq!(variant(parse_quote!(Vec<i32>)), None);
        assert_eq!(variant(parse_quote!(&'static str)), None);
    }

    #[test]
    fn attrs_parse_all_keys() {
        let field = only_field(parse_quote! {
            struct C {
                #[flag(name = "apiKey", value = "x", usage = "API key", env_var = "API_KEY")]
                api_key: String,
            }
        });
        let attrs = FlagAttrs::parse(&field.attrs).unwrap();
        assert_eq!(attrs.name, "apiKey");
        assert_eq!(attrs.value, "x");
        assert_eq!(attrs.usage, "API key");
        assert_eq!(attrs.env_var, "API_KEY");
    }

    #[test]
    fn missing_attribute_is_all_empty() {
        let field = only_field(parse_quote! { struct C { plain: i32 } });
        let attrs = FlagAttrs::parse(&field.attrs).unwrap();
        assert!(attrs.name.is_empty());
        assert!(attrs.value.is_empty());
    }

    #[test]
    fn env_var_accepts_camel_case_spelling() {
        let field = only_field(parse_quote! {
            struct C {
                #[flag(name = "batchSize", envVar = "BATCH_SIZE")]
                batch_size: i32,
            }
        });
        let attrs = FlagAttrs::parse(&field.attrs).unwrap();
        assert_eq!(attrs.env_var, "BATCH_SIZE");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let field = only_field(parse_quote! {
            struct C {
                #[flag(name = "x", env = "X")]
                x: String,
            }
        });
        let err = FlagAttrs::parse(&field.attrs).err().unwrap();
        assert!(err.to_string().contains("env_var"));
    }

    #[test]
    fn type_names_keep_word_spacing() {
        assert_eq!(type_name(&parse_quote!(&'a str)), "&'a str");
        assert_eq!(type_name(&parse_quote!(&'static mut String)), "&'static mut String");
        assert_eq!(type_name(&parse_quote!(Option<Vec<u32>>)), "Option<Vec<u32>>");
        assert_eq!(
            type_name(&parse_quote!(std::collections::HashMap<String, i32>)),
            "std::collections::HashMap<String, i32>"
        );
        assert_eq!(type_name(&parse_quote!(u64)), "u64");
    }

    #[test]
    fn tuple_structs_are_rejected() {
        let input: DeriveInput = parse_quote! { struct Pair(i32, i32); };
        let err = expand(input).unwrap_err();
        assert!(err.to_string().contains("named fields"));
    }

    #[test]
    fn enums_are_rejected() {
        let input: DeriveInput = parse_quote! { enum Mode { Fast, Slow } };
        assert!(expand(input).is_err());
    }

    #[test]
    fn expansion_mentions_every_field() {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[flag(name = "addr", value = ":8000")]
                addr: String,
                #[flag(name = "profit")]
                profit: u32,
            }
        };
        let out = expand(input).unwrap().to_string();
        assert!(out.contains("Slot :: Text"));
        assert!(out.contains("unsupported"));
        assert!(out.contains("\"u32\""));
    }
}
