//! Implementation of the `#[derive(Filterable)]` macro.
//!
//! Generates an implementation of `medsift::Filterable` (registry and
//! accessor) plus field name constants.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    spanned::Spanned, Data, DeriveInput, Error, Fields, GenericArgument, PathArguments, Result,
    Type,
};

use super::attrs::{parse_filter_attrs, FieldKind};

/// Main implementation of the Filterable derive macro.
pub fn filterable_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Filterable can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Filterable can only be derived for structs",
            ))
        }
    };

    let mut specs: Vec<TokenStream> = Vec::new();
    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_filter_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let kind = match attrs.kind {
            Some(kind) => kind,
            None if attrs.no_search || attrs.rename.is_some() => {
                return Err(Error::new(
                    attrs.span,
                    "filter attribute needs a field kind: Text, Number, Date or Enum2",
                ))
            }
            None => continue,
        };

        let filter_name = attrs.rename.unwrap_or_else(|| field_name.to_string());
        let const_name = format_ident!("{}", to_screaming_snake_case(&filter_name));

        field_constants.push(quote! {
            /// Field name for filter clauses.
            pub const #const_name: &'static str = #filter_name;
        });

        let (inner, optional) = match option_inner(&field.ty) {
            Some(inner) => (inner, true),
            None => (&field.ty, false),
        };

        let spec = match kind {
            FieldKind::Text => quote! { ::medsift::FieldSpec::text(#filter_name) },
            FieldKind::Number => quote! { ::medsift::FieldSpec::number(#filter_name) },
            FieldKind::Date => quote! { ::medsift::FieldSpec::date(#filter_name) },
            FieldKind::Enum2 => quote! {
                ::medsift::FieldSpec::enum2(#filter_name, <#inner as ::medsift::Dichotomy>::LABELS)
            },
        };
        specs.push(if attrs.no_search {
            quote! { #spec.unsearchable() }
        } else {
            spec
        });

        let value_expr = match kind {
            FieldKind::Text => quote! {
                ::medsift::Value::Text(::core::convert::AsRef::<str>::as_ref(value))
            },
            FieldKind::Number => quote! {
                ::medsift::Value::Number(::medsift::Number::from(*value))
            },
            FieldKind::Date => quote! {
                ::medsift::Value::Date(::medsift::IntoTimestamp::to_timestamp(value))
            },
            FieldKind::Enum2 => quote! {
                ::medsift::Value::Bool(::medsift::Dichotomy::is_primary(value))
            },
        };

        let arm = if optional {
            quote! {
                match &self.#field_name {
                    ::core::option::Option::Some(value) => #value_expr,
                    ::core::option::Option::None => ::medsift::Value::None,
                }
            }
        } else {
            quote! {
                {
                    let value = &self.#field_name;
                    #value_expr
                }
            }
        };

        field_matches.push(quote! {
            #filter_name => #arm,
        });
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::medsift::Filterable for #struct_name #ty_generics #where_clause {
            const FIELDS: &'static [::medsift::FieldSpec] = &[
                #(#specs),*
            ];

            fn field_value(&self, field: &str) -> ::medsift::Value<'_> {
                match field {
                    #(#field_matches)*
                    _ => ::medsift::Value::None,
                }
            }
        }
    };

    Ok(expanded)
}

/// Returns `T` for a field typed `Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}
