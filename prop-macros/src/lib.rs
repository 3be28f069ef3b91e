//! Derive macros for PropRS.
//!
//! `#[derive(Properties)]` turns a struct of typed fields into a
//! `load(&prop_core::Properties)` constructor driven by
//! `#[property(...)]` attributes, and `#[derive(PropEnum)]` makes a
//! unit-variant enum usable as a conversion target.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse_macro_input, spanned::Spanned, Data, DeriveInput, Fields, Lit, LitStr, Meta, NestedMeta,
};

/// Derive a `load` constructor that resolves and converts every field
/// from a `prop_core::Properties` instance.
///
/// Field attributes:
/// - `#[property(name = "app.port")]` — property name (defaults to the
///   field name)
/// - `#[property(delimiter = ";")]` — delimiter override for collection
///   fields
/// - `#[property(strip_empty)]` — discard empty tokens when splitting
/// - `#[property(format = "%Y-%m-%d")]` — chrono pattern for date/time
///   fields
/// - `#[property(default = "8080")]` — raw value used when no source has
///   the property
#[proc_macro_derive(Properties, attributes(property))]
pub fn derive_properties(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let struct_ident = input.ident.clone();

    let Data::Struct(data) = &input.data else {
        return syn::Error::new(input.span(), "#[derive(Properties)] requires a struct")
            .to_compile_error()
            .into();
    };
    let Fields::Named(fields) = &data.fields else {
        return syn::Error::new(input.span(), "#[derive(Properties)] requires named fields")
            .to_compile_error()
            .into();
    };

    let mut field_inits = Vec::new();
    for field in &fields.named {
        let ident = field.ident.clone().expect("named field");
        let ty = &field.ty;

        let rules = match collect_property_rules(field) {
            Ok(rules) => rules,
            Err(e) => return e.to_compile_error().into(),
        };

        let key = rules
            .name
            .unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));

        let resolve = match &rules.default {
            Some(default) => quote! {
                match props.resolve(#key) {
                    Ok(value) => value,
                    Err(prop_core::PropError::Unresolved(_)) => #default.to_string(),
                    Err(e) => return Err(e),
                }
            },
            None => quote! { props.resolve(#key)? },
        };

        let mut options = quote! { prop_core::ConversionOptions::new() };
        if let Some(delimiter) = &rules.delimiter {
            options = quote! { #options.with_delimiter(#delimiter) };
        }
        if rules.strip_empty {
            options = quote! { #options.strip_empty(true) };
        }
        if let Some(format) = &rules.format {
            options = quote! { #options.with_datetime_format(#format) };
        }

        field_inits.push(quote! {
            #ident: {
                let raw = #resolve;
                let options = #options;
                let value = props.convert_with_options(
                    &raw,
                    &<#ty as prop_core::PropType>::target_type(),
                    &options,
                )?;
                <#ty as prop_core::PropType>::from_value(value)?
            }
        });
    }

    let expanded = quote! {
        impl #struct_ident {
            /// Resolve and convert every field from `props`.
            pub fn load(props: &prop_core::Properties) -> prop_core::PropResult<Self> {
                Ok(Self {
                    #(#field_inits),*
                })
            }
        }
    };

    TokenStream::from(expanded)
}

/// Derive `prop_core::PropType` for a unit-variant enum, matching
/// property values against the exact variant names.
#[proc_macro_derive(PropEnum)]
pub fn derive_prop_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let enum_ident = input.ident.clone();
    let enum_name = LitStr::new(&enum_ident.to_string(), enum_ident.span());

    let Data::Enum(data) = &input.data else {
        return syn::Error::new(input.span(), "#[derive(PropEnum)] requires an enum")
            .to_compile_error()
            .into();
    };

    let mut variant_names = Vec::new();
    let mut variant_arms = Vec::new();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new(
                variant.span(),
                "#[derive(PropEnum)] supports unit variants only",
            )
            .to_compile_error()
            .into();
        }
        let ident = &variant.ident;
        let name = LitStr::new(&ident.to_string(), ident.span());
        variant_names.push(name.clone());
        variant_arms.push(quote! { #name => Ok(Self::#ident), });
    }

    let expanded = quote! {
        impl prop_core::PropType for #enum_ident {
            fn target_type() -> prop_core::TargetType {
                prop_core::TargetType::Raw(prop_core::RawKind::Enum(prop_core::EnumSpec {
                    type_name: #enum_name,
                    variants: &[#(#variant_names),*],
                }))
            }

            fn from_value(value: prop_core::PropValue) -> Result<Self, prop_core::ConversionError> {
                match value {
                    prop_core::PropValue::Enum { variant, .. } => match variant.as_str() {
                        #(#variant_arms)*
                        other => Err(prop_core::ConversionError::InvalidValue {
                            target: #enum_name.to_string(),
                            value: other.to_string(),
                            source: None,
                        }),
                    },
                    _ => Err(prop_core::ConversionError::ValueMismatch {
                        expected: #enum_name,
                    }),
                }
            }
        }
    };

    TokenStream::from(expanded)
}

#[derive(Default)]
struct PropertyRules {
    name: Option<LitStr>,
    delimiter: Option<LitStr>,
    strip_empty: bool,
    format: Option<LitStr>,
    default: Option<LitStr>,
}

fn collect_property_rules(field: &syn::Field) -> Result<PropertyRules, syn::Error> {
    let mut rules = PropertyRules::default();

    for attr in &field.attrs {
        if !attr.path.is_ident("property") {
            continue;
        }

        let Meta::List(list) = attr.parse_meta()? else {
            return Err(syn::Error::new(
                attr.span(),
                "expected #[property(...)] with arguments",
            ));
        };

        for nested in list.nested {
            match nested {
                NestedMeta::Meta(Meta::NameValue(nv)) => {
                    let Lit::Str(value) = nv.lit else {
                        return Err(syn::Error::new(
                            nv.path.span(),
                            "#[property] values must be string literals",
                        ));
                    };
                    if nv.path.is_ident("name") {
                        rules.name = Some(value);
                    } else if nv.path.is_ident("delimiter") {
                        rules.delimiter = Some(value);
                    } else if nv.path.is_ident("format") {
                        rules.format = Some(value);
                    } else if nv.path.is_ident("default") {
                        rules.default = Some(value);
                    } else {
                        return Err(syn::Error::new(nv.path.span(), "unknown #[property] key"));
                    }
                }
                NestedMeta::Meta(Meta::Path(path)) if path.is_ident("strip_empty") => {
                    rules.strip_empty = true;
                }
                other => {
                    return Err(syn::Error::new(other.span(), "unknown #[property] argument"));
                }
            }
        }
    }

    Ok(rules)
}
