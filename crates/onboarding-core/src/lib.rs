//! Onboarding form engine
//!
//! Validation and step routing for the five-step employee onboarding
//! wizard. The engine is pure Rust with no I/O: a [`WizardSession`] holds
//! the record being edited, [`SchemaEngine`] checks it against the form
//! rules, and validated applications leave through a [`SubmitSink`].
//!
//! Soft failures (a missing name, a salary out of range) come back as data
//! in a [`ValidationReport`]. Only misuse of the session API, such as an
//! unknown field path, is a [`FormError`].

pub mod calendar;
pub mod coerce;
pub mod error;
pub mod options;
pub mod path;
pub mod patterns;
pub mod record;
pub mod rules;
pub mod schema;
pub mod steps;
pub mod summary;
pub mod wizard;

#[cfg(test)]
mod test_support;

pub use calendar::FormCalendar;
pub use error::FormError;
pub use options::{Department, Manager, OptionsCatalog, SelectOption};
pub use path::{Field, FieldPath};
pub use record::{
    ApplicationRecord, EmergencyContact, Experience, JobType, NumericInput, ProfilePicture,
    WorkingHours,
};
pub use schema::{FailureKind, FieldError, SchemaEngine, ValidationReport};
pub use steps::{fields_for_step, step_indicator, Step, StepInfo, StepStatus};
pub use summary::ReviewSummary;
pub use wizard::{
    FieldState, Navigation, SubmitSink, Submission, SubmittedApplication, WizardSession,
};

/// Crate version, surfaced to the page as `getVersion()`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
