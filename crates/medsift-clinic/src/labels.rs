//! Two-valued patient attributes.

use medsift::{Dichotomy, Labels};

/// Patient gender as recorded by the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Reads the stored label. Anything but `м` or `ж` is unknown.
    pub fn parse(raw: &str) -> Option<Gender> {
        Gender::LABELS
            .resolve(raw)
            .map(|male| if male { Gender::Male } else { Gender::Female })
    }
}

impl Dichotomy for Gender {
    const LABELS: Labels = Labels::new("м", "ж");

    fn is_primary(&self) -> bool {
        matches!(self, Gender::Male)
    }
}

/// Settlement type, collapsed to city or district.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locality {
    City,
    District,
}

impl Locality {
    /// `Город` is a city; any other value, or none, is a district.
    pub fn collapse(raw: Option<&str>) -> Locality {
        if Locality::LABELS.collapse(raw) {
            Locality::City
        } else {
            Locality::District
        }
    }
}

impl Dichotomy for Locality {
    const LABELS: Labels = Labels::new("Город", "Район");

    fn is_primary(&self) -> bool {
        matches!(self, Locality::City)
    }
}

/// Yes/no answer to a diagnosis question (BP, ischemia, DEP).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Answer {
    Yes,
    No,
}

impl From<bool> for Answer {
    fn from(yes: bool) -> Self {
        if yes {
            Answer::Yes
        } else {
            Answer::No
        }
    }
}

impl Dichotomy for Answer {
    const LABELS: Labels = Labels::new("Да", "Нет");

    fn is_primary(&self) -> bool {
        matches!(self, Answer::Yes)
    }
}
