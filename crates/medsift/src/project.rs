//! Derived-view projection.
//!
//! Raw records are never filtered directly. A [`Project`] implementation
//! turns each one into a view that the registry describes: dates parsed,
//! two-valued fields collapsed onto their labels, derived fields such as
//! age computed against the projector's notion of today.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::registry::Filterable;

const DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d.%m.%Y"];

/// Parses a stored date or date-time.
///
/// Accepts RFC 3339 (converted to its UTC instant), ISO date-times with or
/// without fractional seconds, ISO dates and `DD.MM.YYYY`. Empty or
/// unparseable input is absent, never a default date.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Whole years between `birth` and `today`.
///
/// One less than the year difference while today's month and day precede
/// the birthday's.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age - 1
    } else {
        age
    }
}

/// Raw records that project onto a filterable view.
pub trait Project {
    /// The derived view.
    type View: Filterable;

    /// Builds the view as of `projector`'s date.
    fn project(&self, projector: &Projector) -> Self::View;
}

/// Carries the evaluation date for projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projector {
    today: NaiveDate,
}

impl Projector {
    /// Projects as of a fixed date.
    pub fn at(today: NaiveDate) -> Self {
        Projector { today }
    }

    /// Projects as of the local clock's current date.
    pub fn today() -> Self {
        Projector::at(Local::now().date_naive())
    }

    /// The evaluation date.
    pub fn date(&self) -> NaiveDate {
        self.today
    }

    /// Age for a birth date, if there is one.
    pub fn age(&self, birth: Option<NaiveDateTime>) -> Option<i32> {
        birth.map(|birth| age_on(birth.date(), self.today))
    }

    /// Projects one record.
    pub fn view<R: Project>(&self, record: &R) -> R::View {
        record.project(self)
    }
}

impl Default for Projector {
    fn default() -> Self {
        Projector::today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_decrements_before_birthday() {
        let birth = date(1990, 6, 15);
        assert_eq!(age_on(birth, date(2024, 6, 14)), 33);
        assert_eq!(age_on(birth, date(2024, 6, 15)), 34);
        assert_eq!(age_on(birth, date(2024, 12, 31)), 34);
        assert_eq!(age_on(birth, date(2024, 1, 1)), 33);
    }

    #[test]
    fn age_on_leap_day_birthday() {
        let birth = date(2000, 2, 29);
        assert_eq!(age_on(birth, date(2023, 2, 28)), 22);
        assert_eq!(age_on(birth, date(2023, 3, 1)), 23);
    }

    #[test]
    fn projector_age_is_absent_without_birth_date() {
        let projector = Projector::at(date(2024, 6, 15));
        assert_eq!(projector.age(None), None);
        assert_eq!(projector.age(parse_date("1990-06-15")), Some(34));
    }

    #[test]
    fn parse_supported_formats() {
        let midnight = date(1999, 12, 31).and_time(NaiveTime::MIN);
        assert_eq!(parse_date("1999-12-31"), Some(midnight));
        assert_eq!(parse_date("31.12.1999"), Some(midnight));
        assert_eq!(parse_date("1999-12-31T00:00:00"), Some(midnight));
        assert_eq!(parse_date("1999-12-31T00:00:00.000"), Some(midnight));
        assert_eq!(parse_date("1999-12-31 00:00:00"), Some(midnight));
        assert_eq!(parse_date("1999-12-31T00:00:00Z"), Some(midnight));
    }

    #[test]
    fn offsets_compare_by_instant() {
        let evening = date(1999, 12, 30).and_hms_opt(21, 0, 0).unwrap();
        assert_eq!(parse_date("1999-12-31T00:00:00+03:00"), Some(evening));
        assert_eq!(
            parse_date("1999-12-31T00:00:00+03:00"),
            parse_date("1999-12-30T21:00:00Z")
        );
        assert_ne!(
            parse_date("1999-12-31T00:00:00+03:00"),
            parse_date("1999-12-31T00:00:00Z")
        );
    }

    #[test]
    fn parse_rejects_garbage_and_empty() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("не указано"), None);
        assert_eq!(parse_date("1999-13-01"), None);
    }
}
