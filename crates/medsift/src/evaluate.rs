//! Rule evaluation for a single pair of operands.

use crate::rule::Rule;
use crate::value::{FilterValue, Value};

/// Checks a record value against a filter value under `rule`.
///
/// Dispatch is on the pairing of the two operands:
///
/// | filter | record | comparison |
/// |--------|--------|------------|
/// | text | text | text rules, case-folded |
/// | number | number | ordering rules |
/// | date | date | ordering rules on epoch milliseconds |
/// | boolean | boolean | equality, negated by `notEquals` |
///
/// Every other pairing, an absent record value included, is `false`.
///
/// ```
/// use medsift::{validate_value, FilterValue, Rule, Value};
///
/// let value = FilterValue::from("смит");
/// assert!(validate_value(&value, &Value::Text("Смитов"), Rule::StartsWith));
/// assert!(!validate_value(&value, &Value::None, Rule::NotContains));
/// ```
pub fn validate_value(value: &FilterValue, record: &Value<'_>, rule: Rule) -> bool {
    match (value, record) {
        (FilterValue::Text(pattern), Value::Text(field)) => rule.eval_text(field, pattern),
        (FilterValue::Number(clause), Value::Number(field)) => field
            .compare(*clause)
            .is_some_and(|ordering| rule.eval_ordering(ordering)),
        (FilterValue::Date(clause), Value::Date(field)) => rule.eval_ordering(field.cmp(clause)),
        (FilterValue::Bool(clause), Value::Bool(field)) => match rule {
            Rule::NotEquals => field != clause,
            _ => field == clause,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Number, Timestamp};

    #[test]
    fn text_pairs_use_text_rules() {
        let value = FilterValue::from("ГИПЕР");
        assert!(validate_value(&value, &Value::Text("гипертония"), Rule::Contains));
        assert!(!validate_value(&value, &Value::Text("гипертония"), Rule::EndsWith));
        assert!(validate_value(&value, &Value::Text("ишемия"), Rule::NotContains));
    }

    #[test]
    fn number_pairs_compare_record_to_filter() {
        let value = FilterValue::from(60i64);
        assert!(validate_value(&value, &Value::Number(Number::I64(59)), Rule::LessThan));
        assert!(validate_value(&value, &Value::Number(Number::I64(60)), Rule::LessThanOrEqual));
        assert!(!validate_value(&value, &Value::Number(Number::I64(61)), Rule::LessThanOrEqual));
        assert!(validate_value(&value, &Value::Number(Number::F64(60.5)), Rule::GreaterThan));
    }

    #[test]
    fn nan_never_matches() {
        let value = FilterValue::from(f64::NAN);
        assert!(!validate_value(&value, &Value::Number(Number::I64(1)), Rule::NotEquals));
    }

    #[test]
    fn date_pairs_compare_millis() {
        let value = FilterValue::Date(Timestamp(1_000));
        assert!(validate_value(&value, &Value::Date(Timestamp(999)), Rule::LessThan));
        assert!(validate_value(&value, &Value::Date(Timestamp(1_000)), Rule::Equals));
        assert!(!validate_value(&value, &Value::Date(Timestamp(1_001)), Rule::LessThanOrEqual));
    }

    #[test]
    fn bool_pairs_use_equality() {
        let value = FilterValue::from(true);
        assert!(validate_value(&value, &Value::Bool(true), Rule::Equals));
        assert!(!validate_value(&value, &Value::Bool(false), Rule::Equals));
        assert!(validate_value(&value, &Value::Bool(false), Rule::NotEquals));
        // legacy default rule on a boolean is plain equality
        assert!(validate_value(&value, &Value::Bool(true), Rule::Contains));
    }

    #[test]
    fn mismatched_pairs_are_false() {
        let text = FilterValue::from("м");
        assert!(!validate_value(&text, &Value::None, Rule::NotEquals));
        assert!(!validate_value(&text, &Value::Bool(true), Rule::Equals));
        assert!(!validate_value(&FilterValue::from(1i64), &Value::Text("1"), Rule::Equals));
        assert!(!validate_value(
            &FilterValue::Date(Timestamp(0)),
            &Value::Number(Number::I64(0)),
            Rule::Equals
        ));
    }
}
