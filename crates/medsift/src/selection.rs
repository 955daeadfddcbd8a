//! The table's single global filter slot.

use crate::config::{FilterConfig, Settings};
use crate::error::Result;
use crate::predicate::Predicate;
use crate::project::{Project, Projector};
use crate::registry::Filterable;
use crate::search::TextQuery;

/// Either free-text search or a clause filter, never both.
#[derive(Debug, Clone)]
pub enum RowFilter<T> {
    /// No filter set.
    Everything,
    /// Free-text search.
    Search(TextQuery),
    /// Compiled clauses.
    Clauses(Predicate<T>),
}

impl<T> Default for RowFilter<T> {
    fn default() -> Self {
        RowFilter::Everything
    }
}

impl<T: Filterable> RowFilter<T> {
    /// Free-text search with default settings.
    pub fn search(query: &str) -> Self {
        RowFilter::Search(TextQuery::parse(query))
    }

    /// Compiles a clause filter.
    pub fn clauses(config: &FilterConfig, settings: &Settings) -> Result<Self> {
        Predicate::compile(config, settings).map(RowFilter::Clauses)
    }

    pub fn matches(&self, view: &T) -> bool {
        match self {
            RowFilter::Everything => true,
            RowFilter::Search(query) => query.matches(view),
            RowFilter::Clauses(predicate) => predicate.matches(view),
        }
    }

    pub fn filter<'a>(&self, views: &'a [T]) -> Vec<&'a T> {
        match self {
            RowFilter::Everything => views.iter().collect(),
            RowFilter::Search(query) => query.filter(views),
            RowFilter::Clauses(predicate) => predicate.filter(views),
        }
    }

    pub fn filter_records<'a, R>(&self, records: &'a [R], projector: &Projector) -> Vec<&'a R>
    where
        R: Project<View = T>,
    {
        match self {
            RowFilter::Everything => records.iter().collect(),
            RowFilter::Search(query) => query.filter_records(records, projector),
            RowFilter::Clauses(predicate) => predicate.filter_records(records, projector),
        }
    }
}
