//! Medsift - typed multi-condition filtering for in-memory record sets.
//!
//! Medsift filters a clinic's patient table the way its on-screen filter
//! works: either one free-text search box, or a list of per-field clauses
//! combined with ALL or ANY. It supports:
//!
//! - Field kinds: text, number, date, and two-valued fields (ENUM2)
//! - Rules per kind: substring and equality rules for text, ordering rules
//!   for numbers and dates, equality for ENUM2
//! - Derived views: raw records are projected (age computed, dates parsed,
//!   labels collapsed) before anything is compared
//! - Construction-time validation: illegal rules and uncoercible values are
//!   errors when a filter is compiled, never at match time
//! - Tallies of two-valued fields for statistics cards
//!
//! # Quick Start
//!
//! ```rust
//! use medsift::{Filterable, FilterConfig, Predicate, Rule, Settings};
//!
//! #[derive(Filterable)]
//! struct VisitView {
//!     #[filter(Text)]
//!     diagnosis: String,
//!     #[filter(Number)]
//!     age: Option<i32>,
//! }
//!
//! let views = vec![
//!     VisitView { diagnosis: "Гипертония".into(), age: Some(67) },
//!     VisitView { diagnosis: "ДЭП".into(), age: Some(44) },
//!     VisitView { diagnosis: "ИБС".into(), age: None },
//! ];
//!
//! let config = FilterConfig::any()
//!     .clause("age", Rule::GreaterThan, 60i64)
//!     .clause("diagnosis", Rule::Equals, "дэп");
//! let predicate = Predicate::<VisitView>::compile(&config, &Settings::default()).unwrap();
//!
//! let results = predicate.filter(&views);
//! assert_eq!(results.len(), 2);
//! assert_eq!(results[1].diagnosis, "ДЭП");
//! ```
//!
//! # Filter Semantics
//!
//! ```text
//! no clauses  => every view matches
//! Mode::All   => every clause matches
//! Mode::Any   => at least one clause matches
//! ```
//!
//! Clauses are evaluated in order and short-circuit. A view whose field is
//! absent or holds a value of another kind never matches that clause,
//! whatever the rule (`notEquals` included).
//!
//! # Field Kinds and Rules
//!
//! | Kind | Rules | Default rule |
//! |------|-------|--------------|
//! | Text | `contains`, `notContains`, `equals`, `notEquals`, `startsWith`, `endsWith` | `contains` |
//! | Number | `equals`, `notEquals`, `lessThan`, `lessThanOrEqual`, `greaterThan`, `greaterThanOrEqual` | none |
//! | Date | same as Number | none |
//! | Enum2 | `equals`, `notEquals` | `equals` |
//!
//! Text rules are case-insensitive. Ordering rules always read
//! `record <op> filter`.
//!
//! # Free-Text Search
//!
//! [`TextQuery`] renders the searchable fields of a view into one lowercase
//! string without whitespace and requires every query token to be a
//! substring of it.

mod clause;
mod config;
mod error;
mod evaluate;
mod predicate;
mod project;
mod registry;
mod rule;
mod search;
mod selection;
mod tally;
mod value;

// Re-export public API
pub use clause::{Clause, CompiledClause};
pub use config::{FilterConfig, Mode, Settings, UnknownFieldPolicy, DEFAULT_DATE_DISPLAY};
pub use error::{FilterError, Result};
pub use evaluate::validate_value;
pub use predicate::Predicate;
pub use project::{age_on, parse_date, Project, Projector};
pub use registry::{Dichotomy, FieldKind, FieldSpec, Filterable, Labels};
pub use rule::Rule;
pub use search::{render, TextQuery};
pub use selection::RowFilter;
pub use tally::{split, Split};
pub use value::{FilterValue, IntoTimestamp, Number, Timestamp, Value};

// Derive macro shares the trait's name, like serde's.
pub use medsift_macros::Filterable;
