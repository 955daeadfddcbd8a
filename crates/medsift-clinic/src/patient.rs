//! Stored patient records.
//!
//! Records arrive from the registry service as JSON. Older records were
//! written by a form that stored yes/no answers as `"Да"`/`"Нет"` strings
//! and locality as `"Деревня"`/`"Район"`/`"Город"`; newer ones store
//! booleans. Both shapes deserialize into [`Patient`].

use serde::{Deserialize, Deserializer};

/// Record identifier: the service has used both numeric and string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum PatientId {
    Number(i64),
    Text(String),
}

/// A patient record as stored.
///
/// Every field except the name is optional; dates stay unparsed text until
/// projection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Patient {
    pub id: Option<PatientId>,
    pub full_name: String,
    /// `м` or `ж`.
    pub gender: Option<String>,
    pub birthday: Option<String>,
    pub inhabited_locality: Option<String>,
    pub living_place: Option<String>,
    pub job_title: Option<String>,
    #[serde(deserialize_with = "yes_no")]
    pub bp: Option<bool>,
    #[serde(deserialize_with = "yes_no")]
    pub ischemia: Option<bool>,
    #[serde(deserialize_with = "yes_no")]
    pub dep: Option<bool>,
    pub first_visit: Option<String>,
    pub last_visit: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
}

impl Patient {
    /// A record with just a name.
    pub fn named(full_name: impl Into<String>) -> Self {
        Patient {
            full_name: full_name.into(),
            ..Patient::default()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YesNo {
    Flag(bool),
    Label(String),
}

// Unrecognised labels read as unanswered.
fn yes_no<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<YesNo>::deserialize(deserializer)? {
        Some(YesNo::Flag(flag)) => Some(flag),
        Some(YesNo::Label(label)) => match label.as_str() {
            "Да" => Some(true),
            "Нет" => Some(false),
            _ => None,
        },
        None => None,
    })
}
