//! Attribute parsing for the Filterable derive macro.
//!
//! Parses the `#[filter(...)]` field attributes.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Ident, Lit, Meta, Result, Token,
};

/// The declared kind of a filterable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `#[filter(Text)]`
    Text,
    /// `#[filter(Number)]`
    Number,
    /// `#[filter(Date)]`
    Date,
    /// `#[filter(Enum2)]`, the field type implements `Dichotomy`
    Enum2,
}

impl FieldKind {
    pub fn from_ident(ident: &Ident) -> Result<Self> {
        match ident.to_string().as_str() {
            "Text" | "text" => Ok(FieldKind::Text),
            "Number" | "number" => Ok(FieldKind::Number),
            "Date" | "date" => Ok(FieldKind::Date),
            "Enum2" | "enum2" => Ok(FieldKind::Enum2),
            other => Err(Error::new(
                ident.span(),
                format!(
                    "unknown field kind: '{}'. Expected one of: Text, Number, Date, Enum2",
                    other
                ),
            )),
        }
    }
}

/// Field-level attributes from `#[filter(...)]`.
#[derive(Debug, Clone)]
pub struct FilterAttr {
    pub kind: Option<FieldKind>,
    /// Leave the field out of the registry entirely.
    pub skip: bool,
    /// Keep the field out of free-text search.
    pub no_search: bool,
    /// Name used in clauses (default: the field name).
    pub rename: Option<String>,
    pub span: Span,
}

impl Default for FilterAttr {
    fn default() -> Self {
        FilterAttr {
            kind: None,
            skip: false,
            no_search: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl Parse for FilterAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FilterAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) => {
                    if p.is_ident("skip") {
                        attr.skip = true;
                    } else if p.is_ident("no_search") {
                        attr.no_search = true;
                    } else if let Some(ident) = p.get_ident() {
                        if attr.kind.is_some() {
                            return Err(Error::new(ident.span(), "field kind given twice"));
                        }
                        attr.kind = Some(FieldKind::from_ident(ident)?);
                        attr.span = ident.span();
                    } else {
                        return Err(Error::new(
                            p.span(),
                            "expected field kind: Text, Number, Date, Enum2, skip, or no_search",
                        ));
                    }
                }

                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    {
                        attr.rename = Some(s.value());
                    } else {
                        return Err(Error::new(
                            nv.value.span(),
                            "rename must be a string literal",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown filter attribute. Expected: Text, Number, Date, Enum2, skip, no_search, or rename = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extracts `#[filter(...)]` from a field's attributes.
pub fn parse_filter_attrs(attrs: &[Attribute]) -> Result<FilterAttr> {
    for attr in attrs {
        if attr.path().is_ident("filter") {
            return attr.parse_args::<FilterAttr>();
        }
    }
    Ok(FilterAttr::default())
}
