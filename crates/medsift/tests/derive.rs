//! Tests for `#[derive(Filterable)]`.

use chrono::{NaiveDate, NaiveDateTime};
use medsift::{
    Dichotomy, FieldKind, FieldSpec, FilterConfig, Filterable, Labels, Number, Predicate, Rule,
    Settings, Timestamp, Value,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Shift {
    Day,
    Night,
}

impl Dichotomy for Shift {
    const LABELS: Labels = Labels::new("день", "ночь");

    fn is_primary(&self) -> bool {
        matches!(self, Shift::Day)
    }
}

#[derive(Debug, Clone, Filterable)]
struct Visit {
    #[filter(Text)]
    doctor: String,

    #[filter(Text, rename = "room")]
    cabinet: &'static str,

    #[filter(Number)]
    duration: u32,

    #[filter(Number, no_search)]
    age: Option<i32>,

    #[filter(Date)]
    visited: NaiveDateTime,

    #[filter(Date)]
    follow_up: Option<NaiveDate>,

    #[filter(Enum2)]
    shift: Shift,

    #[filter(Enum2)]
    previous_shift: Option<Shift>,

    #[filter(skip)]
    #[allow(dead_code)]
    id: u64,

    #[allow(dead_code)]
    notes: String,
}

fn visit() -> Visit {
    Visit {
        doctor: "Петрова".into(),
        cabinet: "214",
        duration: 20,
        age: Some(52),
        visited: NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap(),
        follow_up: None,
        shift: Shift::Night,
        previous_shift: Some(Shift::Day),
        id: 7,
        notes: "ничего".into(),
    }
}

#[test]
fn registry_follows_declaration_order() {
    let names: Vec<&str> = Visit::FIELDS.iter().map(|spec| spec.name).collect();
    assert_eq!(
        names,
        [
            "doctor",
            "room",
            "duration",
            "age",
            "visited",
            "follow_up",
            "shift",
            "previous_shift"
        ]
    );
}

#[test]
fn registry_records_kinds_labels_and_search() {
    assert_eq!(Visit::field_spec("visited").unwrap().kind, FieldKind::Date);
    assert_eq!(
        Visit::field_spec("shift").unwrap(),
        &FieldSpec::enum2("shift", Shift::LABELS)
    );
    assert!(!Visit::field_spec("age").unwrap().searchable);
    assert!(Visit::field_spec("duration").unwrap().searchable);
    assert!(Visit::field_spec("cabinet").is_none());
    assert!(Visit::field_spec("id").is_none());
    assert!(Visit::field_spec("notes").is_none());
}

#[test]
fn name_constants() {
    assert_eq!(Visit::DOCTOR, "doctor");
    assert_eq!(Visit::ROOM, "room");
    assert_eq!(Visit::FOLLOW_UP, "follow_up");
    assert_eq!(Visit::PREVIOUS_SHIFT, "previous_shift");
}

#[test]
fn field_values() {
    let visit = visit();
    assert_eq!(visit.field_value(Visit::DOCTOR), Value::Text("Петрова"));
    assert_eq!(visit.field_value("room"), Value::Text("214"));
    assert_eq!(visit.field_value("duration"), Value::Number(Number::U64(20)));
    assert_eq!(visit.field_value("age"), Value::Number(Number::I64(52)));
    assert_eq!(
        visit.field_value("visited"),
        Value::Date(Timestamp::from(visit.visited))
    );
    assert_eq!(visit.field_value("follow_up"), Value::None);
    assert_eq!(visit.field_value("shift"), Value::Bool(false));
    assert_eq!(visit.field_value("previous_shift"), Value::Bool(true));
    assert_eq!(visit.field_value("id"), Value::None);
}

#[test]
fn derived_view_compiles_into_predicates() {
    let visits = vec![
        visit(),
        Visit {
            shift: Shift::Day,
            age: None,
            ..visit()
        },
    ];
    let config = FilterConfig::all()
        .clause(Visit::SHIFT, Rule::Equals, "ночь")
        .clause(Visit::VISITED, Rule::GreaterThanOrEqual, "2024-03-01");
    let predicate = Predicate::<Visit>::compile(&config, &Settings::default()).unwrap();
    assert_eq!(predicate.count(&visits), 1);

    let config = FilterConfig::all().clause(Visit::AGE, Rule::NotEquals, 0i64);
    let predicate = Predicate::<Visit>::compile(&config, &Settings::default()).unwrap();
    assert_eq!(predicate.position(&visits), Some(0));
    assert_eq!(predicate.count(&visits), 1);
}

#[derive(Filterable)]
struct Tagged<T: AsRef<str>> {
    #[filter(Text)]
    tag: T,
}

#[test]
fn generic_views() {
    let tagged = Tagged { tag: "важно" };
    assert_eq!(tagged.field_value("tag"), Value::Text("важно"));
    assert_eq!(Tagged::<String>::FIELDS.len(), 1);
}
