//! Filter clauses.
//!
//! A [`Clause`] is the plain data a form produces: a field name, an optional
//! rule and a value. A [`CompiledClause`] is the same clause after it has
//! been checked against the field registry: rule resolved, value coerced to
//! the field's kind.

use serde::{Deserialize, Deserializer};

use crate::error::{FilterError, Result};
use crate::evaluate::validate_value;
use crate::project::parse_date;
use crate::registry::{FieldKind, FieldSpec, Filterable};
use crate::rule::Rule;
use crate::value::{FilterValue, Number, Timestamp};

/// A single filter condition as configured.
///
/// ```
/// use medsift::{Clause, Rule};
///
/// let clause = Clause::new("full_name", Rule::StartsWith, "Смит");
/// assert_eq!(clause.rule, Some(Rule::StartsWith));
///
/// let clause: Clause = serde_json::from_str(
///     r#"{"field": "full_name", "rule": "", "value": "смит"}"#,
/// ).unwrap();
/// assert_eq!(clause.rule, None);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Clause {
    /// Registry name of the field.
    pub field: String,
    /// Comparison rule; `None` falls back to the field kind's default.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub rule: Option<Rule>,
    /// Value to compare against.
    pub value: FilterValue,
}

impl Clause {
    /// Creates a clause with an explicit rule.
    pub fn new(field: impl Into<String>, rule: Rule, value: impl Into<FilterValue>) -> Self {
        Clause {
            field: field.into(),
            rule: Some(rule),
            value: value.into(),
        }
    }

    /// Creates a clause that uses the field kind's default rule.
    pub fn with_default_rule(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Clause {
            field: field.into(),
            rule: None,
            value: value.into(),
        }
    }
}

// Forms append rows with `rule: ""` before the user picks one.
fn blank_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<Rule>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(name) => name.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Check {
    Compare { rule: Rule, value: FilterValue },
    Never,
}

/// A clause validated against a registry entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledClause {
    field: String,
    check: Check,
}

impl CompiledClause {
    /// Resolves the rule and coerces the value for `spec`.
    pub fn compile(clause: &Clause, spec: &FieldSpec) -> Result<Self> {
        let rule = match clause.rule {
            Some(rule) => rule,
            None => spec.kind.default_rule().ok_or_else(|| FilterError::MissingRule {
                field: clause.field.clone(),
                kind: spec.kind,
            })?,
        };

        if !rule.is_legal_for(spec.kind) {
            return Err(FilterError::RuleNotAllowed {
                field: clause.field.clone(),
                rule,
                kind: spec.kind,
            });
        }

        Ok(CompiledClause {
            field: clause.field.clone(),
            check: Check::Compare {
                rule,
                value: coerce(&clause.value, spec)?,
            },
        })
    }

    /// A clause that matches nothing, standing in for an unknown field.
    pub fn never(field: impl Into<String>) -> Self {
        CompiledClause {
            field: field.into(),
            check: Check::Never,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Resolved rule; `None` for a never-matching clause.
    pub fn rule(&self) -> Option<Rule> {
        match &self.check {
            Check::Compare { rule, .. } => Some(*rule),
            Check::Never => None,
        }
    }

    /// Coerced value; `None` for a never-matching clause.
    pub fn value(&self) -> Option<&FilterValue> {
        match &self.check {
            Check::Compare { value, .. } => Some(value),
            Check::Never => None,
        }
    }

    /// Evaluates the clause against one view.
    pub fn matches<T: Filterable>(&self, view: &T) -> bool {
        match &self.check {
            Check::Compare { rule, value } => {
                validate_value(value, &view.field_value(&self.field), *rule)
            }
            Check::Never => false,
        }
    }
}

fn coerce(value: &FilterValue, spec: &FieldSpec) -> Result<FilterValue> {
    let mismatch = |expected: &'static str| FilterError::ValueKind {
        field: spec.name.to_string(),
        expected,
        actual: value.kind_name(),
    };

    match (spec.kind, value) {
        (FieldKind::Text, FilterValue::Text(_))
        | (FieldKind::Number, FilterValue::Number(_))
        | (FieldKind::Date, FilterValue::Date(_))
        | (FieldKind::Enum2, FilterValue::Bool(_)) => Ok(value.clone()),

        (FieldKind::Number, FilterValue::Text(text)) => Number::parse(text)
            .map(FilterValue::Number)
            .ok_or_else(|| mismatch("number")),

        (FieldKind::Date, FilterValue::Text(text)) => parse_date(text)
            .map(|dt| FilterValue::Date(Timestamp::from(dt)))
            .ok_or_else(|| mismatch("date")),

        (FieldKind::Enum2, FilterValue::Text(label)) => {
            let labels = spec.labels.ok_or_else(|| mismatch("boolean"))?;
            labels
                .resolve(label)
                .map(FilterValue::Bool)
                .ok_or_else(|| FilterError::UnknownLabel {
                    field: spec.name.to_string(),
                    label: label.clone(),
                    primary: labels.primary,
                    secondary: labels.secondary,
                })
        }

        (FieldKind::Text, _) => Err(mismatch("text")),
        (FieldKind::Number, _) => Err(mismatch("number")),
        (FieldKind::Date, _) => Err(mismatch("date")),
        (FieldKind::Enum2, _) => Err(mismatch("boolean")),
    }
}
