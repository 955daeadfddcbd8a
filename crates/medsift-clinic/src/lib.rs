//! The clinic's patient registry schema on top of medsift.
//!
//! [`Patient`] is the stored record, [`PatientView`] the projection the
//! patient table filters, and [`Statistics`] the cards shown above it.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use medsift::{FilterConfig, Projector, RowFilter, Rule, Settings};
//! use medsift_clinic::{Patient, PatientView, Statistics};
//!
//! let patients = vec![
//!     Patient { gender: Some("м".into()), bp: Some(false), ..Patient::named("Джон Смит") },
//!     Patient { gender: Some("ж".into()), bp: Some(true), ..Patient::named("Джейн Смит") },
//! ];
//! let projector = Projector::at(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
//!
//! let config = FilterConfig::all().clause(PatientView::BP, Rule::Equals, "Да");
//! let filter = RowFilter::<PatientView>::clauses(&config, &Settings::default()).unwrap();
//!
//! let found = filter.filter_records(&patients, &projector);
//! assert_eq!(found[0].full_name, "Джейн Смит");
//!
//! let stats = Statistics::collect(&patients, &filter, &projector).unwrap();
//! assert_eq!((stats.total, stats.found), (2, 1));
//! assert_eq!(stats.gender.secondary, 1);
//! ```

mod labels;
mod patient;
mod statistics;
mod view;

pub use labels::{Answer, Gender, Locality};
pub use patient::{Patient, PatientId};
pub use statistics::Statistics;
pub use view::PatientView;
