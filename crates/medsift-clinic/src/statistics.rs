//! Statistics cards for the patient table.

use medsift::{split, Projector, Result, RowFilter, Split};
use tracing::debug;

use crate::patient::Patient;
use crate::view::PatientView;

/// Totals and per-category counts over the filtered patients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Statistics {
    /// Patients before filtering.
    pub total: usize,
    /// Patients left after filtering.
    pub found: usize,
    pub gender: Split,
    pub ischemia: Split,
    pub bp: Split,
    pub dep: Split,
    pub locality: Split,
}

impl Statistics {
    /// Filters `patients` and tallies what is left.
    ///
    /// Unanswered questions and unknown genders count in the second
    /// category, the way the cards have always shown them.
    pub fn collect(
        patients: &[Patient],
        filter: &RowFilter<PatientView>,
        projector: &Projector,
    ) -> Result<Statistics> {
        let views: Vec<PatientView> = patients
            .iter()
            .map(|patient| projector.view(patient))
            .filter(|view| filter.matches(view))
            .collect();

        let stats = Statistics {
            total: patients.len(),
            found: views.len(),
            gender: split(&views, PatientView::GENDER)?,
            ischemia: split(&views, PatientView::ISCHEMIA)?,
            bp: split(&views, PatientView::BP)?,
            dep: split(&views, PatientView::DEP)?,
            locality: split(&views, PatientView::INHABITED_LOCALITY)?,
        };
        debug!(total = stats.total, found = stats.found, "collected statistics");
        Ok(stats)
    }
}
