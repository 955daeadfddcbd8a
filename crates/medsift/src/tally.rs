//! Category counts for two-valued fields.

use crate::error::{FilterError, Result};
use crate::registry::{FieldKind, Filterable, Labels};
use crate::value::Value;

/// Primary/secondary counts for one ENUM2 field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Split {
    pub primary: usize,
    pub secondary: usize,
}

impl Split {
    pub fn total(&self) -> usize {
        self.primary + self.secondary
    }

    /// Counts paired with their labels, primary first.
    pub fn entries(&self, labels: Labels) -> [(&'static str, usize); 2] {
        [
            (labels.primary, self.primary),
            (labels.secondary, self.secondary),
        ]
    }
}

/// Counts `field` over `views`.
///
/// A view counts as primary only when the field holds `true`; `false` and
/// absent values count as secondary.
///
/// ```
/// use medsift::{split, FieldSpec, Filterable, Labels, Value};
///
/// struct Visit(Option<bool>);
///
/// impl Filterable for Visit {
///     const FIELDS: &'static [FieldSpec] = &[FieldSpec::enum2("bp", Labels::new("Да", "Нет"))];
///
///     fn field_value(&self, _field: &str) -> Value<'_> {
///         self.0.map_or(Value::None, Value::Bool)
///     }
/// }
///
/// let visits = [Visit(Some(true)), Visit(None), Visit(Some(false))];
/// let counts = split(&visits, "bp").unwrap();
/// assert_eq!((counts.primary, counts.secondary), (1, 2));
/// ```
pub fn split<'a, T, I>(views: I, field: &str) -> Result<Split>
where
    T: Filterable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let spec = T::field_spec(field).ok_or_else(|| FilterError::UnknownField {
        field: field.to_string(),
    })?;
    if spec.kind != FieldKind::Enum2 {
        return Err(FilterError::ValueKind {
            field: field.to_string(),
            expected: FieldKind::Enum2.as_str(),
            actual: spec.kind.as_str(),
        });
    }

    Ok(views.into_iter().fold(Split::default(), |mut counts, view| {
        match view.field_value(field) {
            Value::Bool(true) => counts.primary += 1,
            _ => counts.secondary += 1,
        }
        counts
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FieldSpec;

    const GENDER: Labels = Labels::new("м", "ж");

    struct Row {
        male: Option<bool>,
        name: &'static str,
    }

    impl Filterable for Row {
        const FIELDS: &'static [FieldSpec] =
            &[FieldSpec::enum2("gender", GENDER), FieldSpec::text("name")];

        fn field_value(&self, field: &str) -> Value<'_> {
            match field {
                "gender" => self.male.map_or(Value::None, Value::Bool),
                "name" => Value::Text(self.name),
                _ => Value::None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { male: Some(true), name: "Иван" },
            Row { male: Some(false), name: "Анна" },
            Row { male: None, name: "?" },
            Row { male: Some(true), name: "Пётр" },
        ]
    }

    #[test]
    fn counts_absent_as_secondary() {
        let counts = split(&rows(), "gender").unwrap();
        assert_eq!(counts, Split { primary: 2, secondary: 2 });
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.entries(GENDER), [("м", 2), ("ж", 2)]);
    }

    #[test]
    fn works_over_filtered_references() {
        let rows = rows();
        let named: Vec<&Row> = rows.iter().filter(|r| r.name != "?").collect();
        let counts = split(named, "gender").unwrap();
        assert_eq!(counts, Split { primary: 2, secondary: 1 });
    }

    #[test]
    fn rejects_unknown_and_non_enum2_fields() {
        assert!(matches!(
            split(&rows(), "ward"),
            Err(FilterError::UnknownField { .. })
        ));
        assert!(matches!(
            split(&rows(), "name"),
            Err(FilterError::ValueKind { expected: "two-valued", actual: "text", .. })
        ));
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(split::<Row, _>(Vec::<&Row>::new(), "gender").unwrap().total(), 0);
    }
}
