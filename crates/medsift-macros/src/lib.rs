//! Proc macros for Medsift.
//!
//! - [`Filterable`] - Generate a field registry and accessor for a view struct

mod filterable;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `medsift::Filterable` for a derived-view struct.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `Text` | Text field, any `AsRef<str>` (contains, notContains, equals, notEquals, startsWith, endsWith) |
/// | `Number` | Numeric field, any primitive number (ordering rules) |
/// | `Date` | Date field, any `IntoTimestamp` (ordering rules) |
/// | `Enum2` | Two-valued field, any `Dichotomy` (equals, notEquals) |
/// | `skip` | Exclude this field from the registry |
/// | `no_search` | Register the field but leave it out of free-text search |
/// | `rename = "..."` | Use a custom name in clauses |
///
/// Fields typed `Option<T>` are supported for every kind; `None` reads as
/// an absent value and matches no clause. Fields without a `#[filter]`
/// attribute are ignored.
///
/// # Generated Code
///
/// 1. Field name constants (e.g., `PatientView::FULL_NAME`)
/// 2. `Filterable::FIELDS`, in declaration order
/// 3. `Filterable::field_value()`
///
/// # Example
///
/// ```ignore
/// use medsift::{Filterable, FilterConfig, Predicate, Rule, Settings};
///
/// #[derive(Filterable)]
/// struct VisitView {
///     #[filter(Text)]
///     diagnosis: String,
///
///     #[filter(Date, rename = "visited")]
///     last_visit: Option<chrono::NaiveDateTime>,
///
///     #[filter(Number, no_search)]
///     age: Option<i32>,
///
///     #[filter(skip)]
///     id: u64,
/// }
///
/// let config = FilterConfig::all()
///     .clause(VisitView::VISITED, Rule::GreaterThanOrEqual, "2024-01-01")
///     .clause(VisitView::AGE, Rule::LessThan, 65i64);
/// let predicate = Predicate::<VisitView>::compile(&config, &Settings::default())?;
/// ```
#[proc_macro_derive(Filterable, attributes(filter))]
pub fn filterable_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    filterable::filterable_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
