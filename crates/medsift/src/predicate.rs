//! Predicate compilation and execution.
//!
//! A [`Predicate`] is a [`FilterConfig`] checked against the registry of a
//! view type. Compilation is where configuration mistakes surface; once
//! compiled, evaluation never fails and a record with missing or malformed
//! data simply does not match.

use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, trace, warn};

use crate::clause::CompiledClause;
use crate::config::{FilterConfig, Mode, Settings, UnknownFieldPolicy};
use crate::error::{FilterError, Result};
use crate::project::{Project, Projector};
use crate::registry::Filterable;

/// A compiled filter over views of type `T`.
///
/// ```
/// use medsift::{FieldSpec, FilterConfig, Filterable, Predicate, Rule, Settings, Value};
///
/// struct Visit {
///     diagnosis: &'static str,
/// }
///
/// impl Filterable for Visit {
///     const FIELDS: &'static [FieldSpec] = &[FieldSpec::text("diagnosis")];
///
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "diagnosis" => Value::Text(self.diagnosis),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let visits = [
///     Visit { diagnosis: "Гипертония II ст." },
///     Visit { diagnosis: "ДЭП" },
/// ];
/// let config = FilterConfig::all().clause("diagnosis", Rule::StartsWith, "гипер");
/// let predicate = Predicate::<Visit>::compile(&config, &Settings::default()).unwrap();
///
/// assert_eq!(predicate.count(&visits), 1);
/// ```
pub struct Predicate<T> {
    clauses: Vec<CompiledClause>,
    mode: Mode,
    view: PhantomData<fn(&T)>,
}

impl<T: Filterable> Predicate<T> {
    /// Compiles a configuration against `T`'s registry.
    ///
    /// Fails on the first clause that is illegal for its field. Clauses on
    /// unknown fields fail or never match according to
    /// [`Settings::unknown_fields`].
    pub fn compile(config: &FilterConfig, settings: &Settings) -> Result<Self> {
        let clauses = config
            .clauses
            .iter()
            .map(|clause| match T::field_spec(&clause.field) {
                Some(spec) => CompiledClause::compile(clause, spec),
                None => match settings.unknown_fields {
                    UnknownFieldPolicy::Reject => Err(FilterError::UnknownField {
                        field: clause.field.clone(),
                    }),
                    UnknownFieldPolicy::NeverMatch => {
                        warn!(field = %clause.field, "clause on unknown field will never match");
                        Ok(CompiledClause::never(clause.field.as_str()))
                    }
                },
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(clauses = clauses.len(), mode = %config.mode, "compiled filter");

        Ok(Predicate {
            clauses,
            mode: config.mode,
            view: PhantomData,
        })
    }

    /// A predicate with no clauses: matches every view.
    pub fn everything() -> Self {
        Predicate {
            clauses: Vec::new(),
            mode: Mode::All,
            view: PhantomData,
        }
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn clauses(&self) -> &[CompiledClause] {
        &self.clauses
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns `true` if this predicate has no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    // ========================================================================
    // Execution over views
    // ========================================================================

    /// Tests one view. Clauses run in configured order and short-circuit.
    pub fn matches(&self, view: &T) -> bool {
        if self.clauses.is_empty() {
            return true;
        }
        match self.mode {
            Mode::All => self.clauses.iter().all(|clause| clause.matches(view)),
            Mode::Any => self.clauses.iter().any(|clause| clause.matches(view)),
        }
    }

    /// Returns references to matching views, in input order.
    pub fn filter<'a>(&self, views: &'a [T]) -> Vec<&'a T> {
        let results: Vec<&'a T> = views.iter().filter(|view| self.matches(view)).collect();
        trace!(scanned = views.len(), matched = results.len(), "filtered views");
        results
    }

    /// Clones matching views.
    pub fn filter_cloned(&self, views: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        self.filter(views).into_iter().cloned().collect()
    }

    /// Keeps only matching views.
    pub fn filter_mut(&self, views: &mut Vec<T>) {
        views.retain(|view| self.matches(view));
    }

    pub fn count(&self, views: &[T]) -> usize {
        views.iter().filter(|view| self.matches(view)).count()
    }

    pub fn find<'a>(&self, views: &'a [T]) -> Option<&'a T> {
        views.iter().find(|view| self.matches(view))
    }

    pub fn position(&self, views: &[T]) -> Option<usize> {
        views.iter().position(|view| self.matches(view))
    }

    // ========================================================================
    // Execution over raw records
    // ========================================================================

    /// Tests one raw record through its projection.
    pub fn matches_record<R>(&self, record: &R, projector: &Projector) -> bool
    where
        R: Project<View = T>,
    {
        self.matches(&projector.view(record))
    }

    /// Projects each record and returns the raw records whose view matches.
    pub fn filter_records<'a, R>(&self, records: &'a [R], projector: &Projector) -> Vec<&'a R>
    where
        R: Project<View = T>,
    {
        let results: Vec<&'a R> = records
            .iter()
            .filter(|record| self.matches_record(*record, projector))
            .collect();
        trace!(scanned = records.len(), matched = results.len(), "filtered records");
        results
    }

    pub fn count_records<R>(&self, records: &[R], projector: &Projector) -> usize
    where
        R: Project<View = T>,
    {
        records
            .iter()
            .filter(|record| self.matches_record(*record, projector))
            .count()
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Predicate {
            clauses: self.clauses.clone(),
            mode: self.mode,
            view: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("clauses", &self.clauses)
            .field("mode", &self.mode)
            .finish()
    }
}
