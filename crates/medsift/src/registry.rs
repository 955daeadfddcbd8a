//! The field registry.
//!
//! Every filterable view type declares, once and statically, which fields it
//! exposes and of which kind. The registry is what the predicate compiler
//! checks clauses against; [`Filterable::field_value`] is what evaluation
//! reads at match time.
//!
//! Registries are normally generated with `#[derive(Filterable)]`:
//!
//! ```ignore
//! use medsift::Filterable;
//!
//! #[derive(Filterable)]
//! struct VisitView {
//!     #[filter(Text)]
//!     diagnosis: String,
//!     #[filter(Date)]
//!     visit: Option<chrono::NaiveDateTime>,
//! }
//! ```

use std::fmt::Write;

use crate::rule::Rule;
use crate::value::Value;

/// Declared value kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text, compared case-insensitively.
    Text,
    /// Number (only ever derived, e.g. age).
    Number,
    /// Calendar date or date-time.
    Date,
    /// Exactly one of two canonical labels.
    Enum2,
}

impl FieldKind {
    /// Rules legal for this kind.
    pub fn rules(self) -> &'static [Rule] {
        match self {
            FieldKind::Text => &Rule::TEXT,
            FieldKind::Number | FieldKind::Date => &Rule::ORDERING,
            FieldKind::Enum2 => &Rule::ENUM2,
        }
    }

    /// Rule applied when a clause names none.
    ///
    /// Ordered kinds have no sensible default and require an explicit rule.
    pub fn default_rule(self) -> Option<Rule> {
        match self {
            FieldKind::Text => Some(Rule::Contains),
            FieldKind::Enum2 => Some(Rule::Equals),
            FieldKind::Number | FieldKind::Date => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Enum2 => "two-valued",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two canonical labels of an ENUM2 field.
///
/// The primary label maps to `true`, the secondary to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Labels {
    pub primary: &'static str,
    pub secondary: &'static str,
}

impl Labels {
    pub const fn new(primary: &'static str, secondary: &'static str) -> Self {
        Labels { primary, secondary }
    }

    /// Returns the label for a flag.
    pub fn label(self, flag: bool) -> &'static str {
        if flag {
            self.primary
        } else {
            self.secondary
        }
    }

    /// Reads one of the two labels back as a flag. Exact match only.
    pub fn resolve(self, label: &str) -> Option<bool> {
        if label == self.primary {
            Some(true)
        } else if label == self.secondary {
            Some(false)
        } else {
            None
        }
    }

    /// Collapses any raw value onto the pair: anything but the primary
    /// label, including nothing at all, is the secondary label.
    pub fn collapse(self, raw: Option<&str>) -> bool {
        raw == Some(self.primary)
    }
}

/// One registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name used in clauses.
    pub name: &'static str,
    /// Declared kind.
    pub kind: FieldKind,
    /// Canonical labels, for ENUM2 fields.
    pub labels: Option<Labels>,
    /// Whether free-text search renders this field.
    pub searchable: bool,
}

impl FieldSpec {
    pub const fn text(name: &'static str) -> Self {
        FieldSpec::new(name, FieldKind::Text, None)
    }

    pub const fn number(name: &'static str) -> Self {
        FieldSpec::new(name, FieldKind::Number, None)
    }

    pub const fn date(name: &'static str) -> Self {
        FieldSpec::new(name, FieldKind::Date, None)
    }

    pub const fn enum2(name: &'static str, labels: Labels) -> Self {
        FieldSpec::new(name, FieldKind::Enum2, Some(labels))
    }

    /// Excludes the field from free-text search.
    pub const fn unsearchable(self) -> Self {
        FieldSpec {
            searchable: false,
            ..self
        }
    }

    const fn new(name: &'static str, kind: FieldKind, labels: Option<Labels>) -> Self {
        FieldSpec {
            name,
            kind,
            labels,
            searchable: true,
        }
    }

    /// Renders a value of this field the way it is shown on screen.
    ///
    /// Dates use `date_format` (a chrono format string). Absent values, and
    /// dates the format cannot render, render as nothing.
    pub fn display(&self, value: &Value<'_>, date_format: &str) -> Option<String> {
        match value {
            Value::Text(s) => Some((*s).to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Date(ts) => {
                let dt = ts.to_datetime()?;
                let mut shown = String::new();
                write!(shown, "{}", dt.format(date_format)).ok()?;
                Some(shown)
            }
            Value::Bool(flag) => self.labels.map(|labels| labels.label(*flag).to_string()),
            Value::None => None,
        }
    }
}

/// Types whose values are one of two canonical labels.
///
/// `#[filter(Enum2)]` fields must implement this.
///
/// ```
/// use medsift::{Dichotomy, Labels};
///
/// enum Shift {
///     Day,
///     Night,
/// }
///
/// impl Dichotomy for Shift {
///     const LABELS: Labels = Labels::new("day", "night");
///
///     fn is_primary(&self) -> bool {
///         matches!(self, Shift::Day)
///     }
/// }
///
/// assert_eq!(Shift::Night.label(), "night");
/// ```
pub trait Dichotomy {
    /// The canonical label pair.
    const LABELS: Labels;

    /// Returns `true` for the value named by the primary label.
    fn is_primary(&self) -> bool;

    /// Returns the canonical label of this value.
    fn label(&self) -> &'static str {
        Self::LABELS.label(self.is_primary())
    }
}

/// Types that can be filtered: a static registry plus field access.
///
/// Usually derived with `#[derive(Filterable)]`, but can be written by hand:
///
/// ```
/// use medsift::{FieldSpec, Filterable, Number, Value};
///
/// struct Visit {
///     diagnosis: String,
///     duration_min: u32,
/// }
///
/// impl Filterable for Visit {
///     const FIELDS: &'static [FieldSpec] = &[
///         FieldSpec::text("diagnosis"),
///         FieldSpec::number("duration_min"),
///     ];
///
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "diagnosis" => Value::Text(&self.diagnosis),
///             "duration_min" => Value::Number(Number::from(self.duration_min)),
///             _ => Value::None,
///         }
///     }
/// }
///
/// assert!(Visit::field_spec("diagnosis").is_some());
/// assert!(Visit::field_spec("ward").is_none());
/// ```
pub trait Filterable {
    /// The registry, in display order.
    const FIELDS: &'static [FieldSpec];

    /// Returns the value of a field, or [`Value::None`] when absent.
    fn field_value(&self, field: &str) -> Value<'_>;

    /// Looks a field up in the registry.
    fn field_spec(name: &str) -> Option<&'static FieldSpec> {
        Self::FIELDS.iter().find(|spec| spec.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Number, Timestamp};

    const LOCALITY: Labels = Labels::new("Город", "Район");

    struct Ward {
        name: String,
        beds: u32,
        urban: bool,
    }

    impl Filterable for Ward {
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec::text("name"),
            FieldSpec::number("beds").unsearchable(),
            FieldSpec::enum2("urban", LOCALITY),
        ];

        fn field_value(&self, field: &str) -> Value<'_> {
            match field {
                "name" => Value::Text(&self.name),
                "beds" => Value::Number(Number::from(self.beds)),
                "urban" => Value::Bool(self.urban),
                _ => Value::None,
            }
        }
    }

    #[test]
    fn manual_registry_lookup() {
        let spec = Ward::field_spec("beds").unwrap();
        assert_eq!(spec.kind, FieldKind::Number);
        assert!(!spec.searchable);
        assert_eq!(Ward::field_spec("urban").unwrap().labels, Some(LOCALITY));
        assert!(Ward::field_spec("floor").is_none());
    }

    #[test]
    fn manual_field_access() {
        let ward = Ward {
            name: "Неврология".into(),
            beds: 12,
            urban: true,
        };
        assert_eq!(ward.field_value("name"), Value::Text("Неврология"));
        assert_eq!(ward.field_value("beds"), Value::Number(Number::U64(12)));
        assert_eq!(ward.field_value("floor"), Value::None);
    }

    #[test]
    fn labels_resolve_exactly() {
        assert_eq!(LOCALITY.resolve("Город"), Some(true));
        assert_eq!(LOCALITY.resolve("Район"), Some(false));
        assert_eq!(LOCALITY.resolve("город"), None);
        assert_eq!(LOCALITY.label(false), "Район");
    }

    #[test]
    fn labels_collapse_to_secondary() {
        assert!(LOCALITY.collapse(Some("Город")));
        assert!(!LOCALITY.collapse(Some("Деревня")));
        assert!(!LOCALITY.collapse(Some("")));
        assert!(!LOCALITY.collapse(None));
        assert_eq!(LOCALITY.label(LOCALITY.collapse(Some("Деревня"))), "Район");
    }

    #[test]
    fn kinds_and_default_rules() {
        assert_eq!(FieldKind::Text.default_rule(), Some(Rule::Contains));
        assert_eq!(FieldKind::Enum2.default_rule(), Some(Rule::Equals));
        assert_eq!(FieldKind::Date.default_rule(), None);
        assert_eq!(FieldKind::Number.rules(), &Rule::ORDERING);
    }

    #[test]
    fn display_forms() {
        let urban = FieldSpec::enum2("urban", LOCALITY);
        assert_eq!(
            urban.display(&Value::Bool(false), "%d.%m.%Y"),
            Some("Район".to_string())
        );

        let when = chrono::NaiveDate::from_ymd_opt(1985, 3, 7).unwrap();
        let visit = FieldSpec::date("visit");
        assert_eq!(
            visit.display(&Value::Date(Timestamp::from(when)), "%d.%m.%Y"),
            Some("07.03.1985".to_string())
        );
        assert_eq!(visit.display(&Value::None, "%d.%m.%Y"), None);
    }

    #[test]
    fn unrenderable_date_format_displays_nothing() {
        let when = chrono::NaiveDate::from_ymd_opt(1985, 3, 7).unwrap();
        let visit = FieldSpec::date("visit");
        assert_eq!(visit.display(&Value::Date(Timestamp::from(when)), "%Q"), None);
        assert_eq!(
            FieldSpec::text("name").display(&Value::Text("Смит"), "%Q"),
            Some("Смит".to_string())
        );
    }
}
