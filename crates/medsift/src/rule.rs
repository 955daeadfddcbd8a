//! Comparison rules for filter clauses.
//!
//! The [`Rule`] enum names every comparison a clause can make. Rules come in
//! two disjoint tables: [`Rule::TEXT`] for case-insensitive string matching
//! and [`Rule::ORDERING`] for numbers and dates. Two-valued (ENUM2) fields
//! accept only `equals` and `notEquals`.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::FilterError;
use crate::registry::FieldKind;

/// Comparison rule for a filter clause.
///
/// Every rule reads as "record value `<rule>` filter value": `lessThan`
/// matches when the record's value is smaller than the clause's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rule {
    /// Record text contains the filter text.
    Contains,
    /// Record text does not contain the filter text.
    NotContains,
    /// Equal. Valid for every kind.
    Equals,
    /// Not equal. Valid for every kind.
    NotEquals,
    /// Record text starts with the filter text.
    StartsWith,
    /// Record text ends with the filter text.
    EndsWith,
    /// Strictly smaller.
    LessThan,
    /// Smaller or equal.
    LessThanOrEqual,
    /// Strictly greater.
    GreaterThan,
    /// Greater or equal.
    GreaterThanOrEqual,
}

impl Rule {
    /// Rules legal for TEXT fields.
    pub const TEXT: [Rule; 6] = [
        Rule::Contains,
        Rule::NotContains,
        Rule::Equals,
        Rule::NotEquals,
        Rule::StartsWith,
        Rule::EndsWith,
    ];

    /// Rules legal for NUMBER and DATE fields.
    pub const ORDERING: [Rule; 6] = [
        Rule::Equals,
        Rule::NotEquals,
        Rule::LessThan,
        Rule::LessThanOrEqual,
        Rule::GreaterThan,
        Rule::GreaterThanOrEqual,
    ];

    /// Rules legal for ENUM2 fields.
    pub const ENUM2: [Rule; 2] = [Rule::Equals, Rule::NotEquals];

    /// Returns `true` if this rule belongs to the text table.
    pub fn is_text_rule(self) -> bool {
        Rule::TEXT.contains(&self)
    }

    /// Returns `true` if this rule belongs to the ordering table.
    pub fn is_ordering_rule(self) -> bool {
        Rule::ORDERING.contains(&self)
    }

    /// Returns `true` if this rule may be used on a field of `kind`.
    pub fn is_legal_for(self, kind: FieldKind) -> bool {
        kind.rules().contains(&self)
    }

    /// Evaluates an ordering rule given `record.cmp(filter)`.
    ///
    /// Text-only rules never match.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Rule::Equals => ordering == Ordering::Equal,
            Rule::NotEquals => ordering != Ordering::Equal,
            Rule::LessThan => ordering == Ordering::Less,
            Rule::LessThanOrEqual => ordering != Ordering::Greater,
            Rule::GreaterThan => ordering == Ordering::Greater,
            Rule::GreaterThanOrEqual => ordering != Ordering::Less,
            _ => false,
        }
    }

    /// Evaluates a text rule with both sides case-folded.
    ///
    /// Ordering-only rules never match.
    pub fn eval_text(self, field: &str, pattern: &str) -> bool {
        let field = field.to_lowercase();
        let pattern = pattern.to_lowercase();
        match self {
            Rule::Contains => field.contains(&pattern),
            Rule::NotContains => !field.contains(&pattern),
            Rule::Equals => field == pattern,
            Rule::NotEquals => field != pattern,
            Rule::StartsWith => field.starts_with(&pattern),
            Rule::EndsWith => field.ends_with(&pattern),
            _ => false,
        }
    }

    /// Returns the name of this rule as it appears in configurations.
    pub fn as_str(self) -> &'static str {
        match self {
            Rule::Contains => "contains",
            Rule::NotContains => "notContains",
            Rule::Equals => "equals",
            Rule::NotEquals => "notEquals",
            Rule::StartsWith => "startsWith",
            Rule::EndsWith => "endsWith",
            Rule::LessThan => "lessThan",
            Rule::LessThanOrEqual => "lessThanOrEqual",
            Rule::GreaterThan => "greaterThan",
            Rule::GreaterThanOrEqual => "greaterThanOrEqual",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rule {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::TEXT
            .iter()
            .chain(Rule::ORDERING.iter())
            .copied()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| FilterError::UnknownRule(s.to_string()))
    }
}
