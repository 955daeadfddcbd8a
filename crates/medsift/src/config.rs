//! Filter configuration and engine settings.
//!
//! [`FilterConfig`] is the per-session data a filter form builds: clauses and
//! a combination mode. [`Settings`] is the deployment-level configuration of
//! the engine itself. Both deserialize from JSON with every field optional.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Deserializer};

use crate::clause::Clause;
use crate::error::{FilterError, Result};
use crate::rule::Rule;
use crate::value::FilterValue;

/// Default chrono format for dates in free-text search (`15.06.1990, 00:00:00`).
pub const DEFAULT_DATE_DISPLAY: &str = "%d.%m.%Y, %H:%M:%S";

/// How clauses combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Every clause must match.
    #[default]
    All,
    /// At least one clause must match.
    Any,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::All => "all",
            Mode::Any => "any",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<bool> for Mode {
    /// The form's "match all" toggle: `true` is [`Mode::All`].
    fn from(all: bool) -> Self {
        if all {
            Mode::All
        } else {
            Mode::Any
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModeRepr {
    Toggle(bool),
    Name(String),
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match ModeRepr::deserialize(deserializer)? {
            ModeRepr::Toggle(all) => Ok(Mode::from(all)),
            ModeRepr::Name(name) => match name.to_ascii_lowercase().as_str() {
                "all" => Ok(Mode::All),
                "any" => Ok(Mode::Any),
                _ => Err(serde::de::Error::unknown_variant(&name, &["all", "any"])),
            },
        }
    }
}

/// Ordered clauses plus a combination mode.
///
/// Accepts the form's own key names (`filter`, `type`) as aliases.
///
/// ```
/// use medsift::{FilterConfig, Mode, Rule};
///
/// let config = FilterConfig::from_json(
///     r#"{"type": false, "filter": [{"field": "gender", "rule": "equals", "value": "м"}]}"#,
/// ).unwrap();
/// assert_eq!(config.mode, Mode::Any);
/// assert_eq!(config.clauses[0].rule, Some(Rule::Equals));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FilterConfig {
    #[serde(default, alias = "filter")]
    pub clauses: Vec<Clause>,
    #[serde(default, alias = "type")]
    pub mode: Mode,
}

impl FilterConfig {
    /// Empty configuration combining with `mode`.
    pub fn new(mode: Mode) -> Self {
        FilterConfig {
            clauses: Vec::new(),
            mode,
        }
    }

    /// Empty ALL configuration.
    pub fn all() -> Self {
        FilterConfig::new(Mode::All)
    }

    /// Empty ANY configuration.
    pub fn any() -> Self {
        FilterConfig::new(Mode::Any)
    }

    /// Appends a clause with an explicit rule.
    pub fn clause(mut self, field: &str, rule: Rule, value: impl Into<FilterValue>) -> Self {
        self.clauses.push(Clause::new(field, rule, value));
        self
    }

    /// Appends a clause that uses its field's default rule.
    pub fn clause_default(mut self, field: &str, value: impl Into<FilterValue>) -> Self {
        self.clauses.push(Clause::with_default_rule(field, value));
        self
    }

    /// Appends an already built clause.
    pub fn push(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Returns `true` when there are no clauses (everything matches).
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// What to do with a clause naming a field the registry does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFieldPolicy {
    /// Fail compilation of the whole configuration.
    #[default]
    Reject,
    /// Compile the clause into one that never matches.
    NeverMatch,
}

/// Engine settings.
///
/// ```
/// use medsift::{Settings, UnknownFieldPolicy};
///
/// let settings = Settings::from_json(r#"{"unknown_fields": "never_match"}"#).unwrap();
/// assert_eq!(settings.unknown_fields, UnknownFieldPolicy::NeverMatch);
/// assert_eq!(settings.date_display, medsift::DEFAULT_DATE_DISPLAY);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Handling of clauses on unregistered fields.
    pub unknown_fields: UnknownFieldPolicy,
    /// chrono format string used to render dates for free-text search.
    pub date_display: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            unknown_fields: UnknownFieldPolicy::default(),
            date_display: DEFAULT_DATE_DISPLAY.to_string(),
        }
    }
}

impl Settings {
    /// Decodes settings and checks the date display format.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks that `date_display` is a format chrono can render.
    pub fn validate(&self) -> Result<()> {
        let mut items = StrftimeItems::new(&self.date_display);
        if items.any(|item| matches!(item, Item::Error)) {
            return Err(FilterError::DateFormat(self.date_display.clone()));
        }
        Ok(())
    }

    /// Same settings with a different unknown-field policy.
    pub fn with_unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }
}
