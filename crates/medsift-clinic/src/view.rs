//! The filterable view of a patient.

use chrono::NaiveDateTime;
use medsift::{parse_date, Filterable, Project, Projector};

use crate::labels::{Answer, Gender, Locality};
use crate::patient::Patient;

/// A patient as the table filters it: dates parsed, age derived, locality
/// collapsed.
///
/// Fields are in table column order, which is also the order free-text
/// search renders them in.
#[derive(Debug, Clone, PartialEq, Filterable)]
pub struct PatientView {
    #[filter(Text)]
    pub full_name: String,

    #[filter(Enum2)]
    pub gender: Option<Gender>,

    #[filter(Date)]
    pub birthday: Option<NaiveDateTime>,

    #[filter(Number)]
    pub age: Option<i32>,

    #[filter(Enum2)]
    pub inhabited_locality: Locality,

    #[filter(Text)]
    pub living_place: Option<String>,

    #[filter(Text)]
    pub job_title: Option<String>,

    #[filter(Enum2)]
    pub bp: Option<Answer>,

    #[filter(Enum2)]
    pub ischemia: Option<Answer>,

    #[filter(Enum2)]
    pub dep: Option<Answer>,

    #[filter(Date)]
    pub first_visit: Option<NaiveDateTime>,

    #[filter(Date)]
    pub last_visit: Option<NaiveDateTime>,

    #[filter(Text)]
    pub diagnosis: Option<String>,

    #[filter(Text)]
    pub treatment: Option<String>,
}

impl Project for Patient {
    type View = PatientView;

    fn project(&self, projector: &Projector) -> PatientView {
        let birthday = self.birthday.as_deref().and_then(parse_date);
        PatientView {
            full_name: self.full_name.clone(),
            gender: self.gender.as_deref().and_then(Gender::parse),
            birthday,
            age: projector.age(birthday),
            inhabited_locality: Locality::collapse(self.inhabited_locality.as_deref()),
            living_place: self.living_place.clone(),
            job_title: self.job_title.clone(),
            bp: self.bp.map(Answer::from),
            ischemia: self.ischemia.map(Answer::from),
            dep: self.dep.map(Answer::from),
            first_visit: self.first_visit.as_deref().and_then(parse_date),
            last_visit: self.last_visit.as_deref().and_then(parse_date),
            diagnosis: self.diagnosis.clone(),
            treatment: self.treatment.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use medsift::{Number, Value};

    fn projector() -> Projector {
        Projector::at(NaiveDate::from_ymd_opt(2024, 6, 14).unwrap())
    }

    #[test]
    fn projection_derives_age_and_parses_dates() {
        let patient = Patient {
            birthday: Some("1990-06-15".into()),
            first_visit: Some("2023-11-02T10:15:00.000Z".into()),
            last_visit: Some("".into()),
            ..Patient::named("Смит Джон")
        };
        let view = projector().view(&patient);
        assert_eq!(view.age, Some(33));
        assert_eq!(
            view.first_visit,
            NaiveDate::from_ymd_opt(2023, 11, 2).unwrap().and_hms_opt(10, 15, 0)
        );
        assert_eq!(view.last_visit, None);
        assert_eq!(view.field_value(PatientView::AGE), Value::Number(Number::I64(33)));
    }

    #[test]
    fn unparseable_birthday_means_no_age() {
        let patient = Patient {
            birthday: Some("не указана".into()),
            ..Patient::named("Смит Джон")
        };
        let view = projector().view(&patient);
        assert_eq!(view.birthday, None);
        assert_eq!(view.age, None);
        assert_eq!(view.field_value("age"), Value::None);
    }

    #[test]
    fn locality_and_answers_collapse() {
        let patient = Patient {
            gender: Some("мужской".into()),
            inhabited_locality: Some("Деревня".into()),
            bp: Some(true),
            ..Patient::named("Смит Джон")
        };
        let view = projector().view(&patient);
        assert_eq!(view.gender, None);
        assert_eq!(view.inhabited_locality, Locality::District);
        assert_eq!(view.field_value("inhabited_locality"), Value::Bool(false));
        assert_eq!(view.bp, Some(Answer::Yes));
        assert_eq!(view.dep, None);
    }

    #[test]
    fn registry_covers_every_column() {
        let names: Vec<&str> = PatientView::FIELDS.iter().map(|spec| spec.name).collect();
        assert_eq!(names.len(), 14);
        assert!(names.contains(&"first_visit"));
        assert!(PatientView::field_spec("id").is_none());
    }
}
