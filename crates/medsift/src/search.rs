//! Free-text search.
//!
//! A view is rendered to one lowercase string with all whitespace removed;
//! a query matches when every whitespace-separated token occurs in it.

use tracing::trace;

use crate::config::{Settings, DEFAULT_DATE_DISPLAY};
use crate::project::{Project, Projector};
use crate::registry::Filterable;

/// Renders the searchable fields of a view for substring search.
///
/// Fields are concatenated in registry order in their display form, then
/// lowercased and stripped of whitespace. Absent fields contribute nothing.
pub fn render<T: Filterable>(view: &T, date_format: &str) -> String {
    T::FIELDS
        .iter()
        .filter(|spec| spec.searchable)
        .filter_map(|spec| spec.display(&view.field_value(spec.name), date_format))
        .flat_map(|shown| shown.to_lowercase().chars().collect::<Vec<_>>())
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// A parsed free-text query.
///
/// ```
/// use medsift::TextQuery;
///
/// let query = TextQuery::parse("  Смит   198 ");
/// assert_eq!(query.tokens(), ["смит", "198"]);
/// assert!(TextQuery::parse("   ").is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery {
    tokens: Vec<String>,
    date_display: String,
}

impl TextQuery {
    /// Parses a query with the default date display format.
    pub fn parse(query: &str) -> Self {
        TextQuery::with_format(query, DEFAULT_DATE_DISPLAY)
    }

    /// Parses a query, rendering dates as `settings.date_display`.
    pub fn with_settings(query: &str, settings: &Settings) -> Self {
        TextQuery::with_format(query, &settings.date_display)
    }

    fn with_format(query: &str, date_display: &str) -> Self {
        TextQuery {
            tokens: query.split_whitespace().map(str::to_lowercase).collect(),
            date_display: date_display.to_string(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Returns `true` for a blank query, which matches everything.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn matches<T: Filterable>(&self, view: &T) -> bool {
        if self.tokens.is_empty() {
            return true;
        }
        let haystack = render(view, &self.date_display);
        self.tokens.iter().all(|token| haystack.contains(token.as_str()))
    }

    pub fn filter<'a, T: Filterable>(&self, views: &'a [T]) -> Vec<&'a T> {
        let results: Vec<&'a T> = views.iter().filter(|view| self.matches(*view)).collect();
        trace!(scanned = views.len(), matched = results.len(), "searched views");
        results
    }

    pub fn count<T: Filterable>(&self, views: &[T]) -> usize {
        views.iter().filter(|view| self.matches(*view)).count()
    }

    /// Projects each record and returns the raw records whose view matches.
    pub fn filter_records<'a, R: Project>(
        &self,
        records: &'a [R],
        projector: &Projector,
    ) -> Vec<&'a R> {
        let results: Vec<&'a R> = records
            .iter()
            .filter(|record| self.matches(&projector.view(*record)))
            .collect();
        trace!(scanned = records.len(), matched = results.len(), "searched records");
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{FieldSpec, Labels};
    use crate::value::{Number, Timestamp, Value};
    use chrono::NaiveDate;

    struct Row {
        name: &'static str,
        born: Option<NaiveDate>,
        age: Option<i32>,
        urban: bool,
        note: &'static str,
    }

    impl Filterable for Row {
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec::text("name"),
            FieldSpec::date("birthday"),
            FieldSpec::number("age"),
            FieldSpec::enum2("locality", Labels::new("Город", "Район")),
            FieldSpec::text("note").unsearchable(),
        ];

        fn field_value(&self, field: &str) -> Value<'_> {
            match field {
                "name" => Value::Text(self.name),
                "birthday" => self.born.map_or(Value::None, |d| Value::Date(Timestamp::from(d))),
                "age" => self.age.map_or(Value::None, |a| Value::Number(Number::from(a))),
                "locality" => Value::Bool(self.urban),
                "note" => Value::Text(self.note),
                _ => Value::None,
            }
        }
    }

    fn smith() -> Row {
        Row {
            name: "Джон Смит",
            born: NaiveDate::from_ymd_opt(1985, 3, 7),
            age: Some(39),
            urban: false,
            note: "секрет",
        }
    }

    #[test]
    fn render_strips_whitespace_and_case() {
        assert_eq!(
            render(&smith(), DEFAULT_DATE_DISPLAY),
            "джонсмит07.03.1985,00:00:0039район"
        );
    }

    #[test]
    fn render_skips_absent_and_unsearchable_fields() {
        let row = Row {
            born: None,
            age: None,
            urban: true,
            ..smith()
        };
        assert_eq!(render(&row, DEFAULT_DATE_DISPLAY), "джонсмитгород");
    }

    #[test]
    fn every_token_must_match() {
        let row = smith();
        assert!(TextQuery::parse("смит 198").matches(&row));
        assert!(TextQuery::parse("ДЖОН район").matches(&row));
        assert!(!TextQuery::parse("смит 197").matches(&row));
        assert!(!TextQuery::parse("секрет").matches(&row));
    }

    #[test]
    fn tokens_may_span_fields() {
        // whitespace between fields is gone, so adjacent fields run together
        assert!(TextQuery::parse("джонсмит07.03").matches(&smith()));
    }

    #[test]
    fn blank_query_matches_everything() {
        let rows = [smith()];
        assert_eq!(TextQuery::parse("").count(&rows), 1);
        assert_eq!(TextQuery::parse(" \t ").filter(&rows).len(), 1);
    }

    #[test]
    fn date_display_follows_settings() {
        let settings = Settings {
            date_display: "%Y-%m-%d".to_string(),
            ..Settings::default()
        };
        assert!(TextQuery::with_settings("1985-03-07", &settings).matches(&smith()));
        assert!(!TextQuery::parse("1985-03-07").matches(&smith()));
    }

    #[test]
    fn unrenderable_date_format_leaves_dates_out() {
        let settings = Settings {
            date_display: "%Q".to_string(),
            ..Settings::default()
        };
        let rows = [smith()];
        assert_eq!(TextQuery::with_settings("1985", &settings).count(&rows), 0);
        assert_eq!(TextQuery::with_settings("смит", &settings).count(&rows), 1);
        assert_eq!(render(&smith(), "%Q"), "джонсмит39район");
    }
}
