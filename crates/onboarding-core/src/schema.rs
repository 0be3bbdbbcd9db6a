//! Field Schema Engine
//!
//! Runs the per-field rules for every step, then the cross-field rules, and
//! collects every failure into a [`ValidationReport`]. Validation is pure:
//! the same record and the same "today" always give the same report.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::calendar::FormCalendar;
use crate::options::OptionsCatalog;
use crate::path::{Field, FieldPath};
use crate::record::ApplicationRecord;
use crate::rules;

/// Applicants younger than this cannot apply
pub const MIN_AGE: i32 = 18;
/// Applicants younger than this must name a guardian
pub const GUARDIAN_AGE: i32 = 21;
/// Largest accepted profile picture (2 MiB)
pub const MAX_PICTURE_BYTES: u64 = 2 * 1024 * 1024;
pub const ALLOWED_PICTURE_TYPES: &[&str] = &["image/jpeg", "image/png"];
/// Start date must fall within this many days from today
pub const START_WINDOW_DAYS: i64 = 90;
pub const MIN_POSITION_TITLE_CHARS: usize = 3;
pub const MIN_SKILLS: usize = 3;
pub const MIN_EXPERIENCE_YEARS: f64 = 1.0;
pub const MAX_NOTES_CHARS: usize = 500;
pub const MIN_SALARY_INPUT: f64 = 1.0;
pub const REMOTE_PREFERENCE_RANGE: (f64, f64) = (0.0, 100.0);

/// Inclusive pay bounds for a job type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryBounds {
    pub min: f64,
    pub max: f64,
}

/// Annual salary bounds for full-time roles
pub const FULL_TIME_SALARY: SalaryBounds = SalaryBounds {
    min: 30_000.0,
    max: 200_000.0,
};

/// Hourly rate bounds for contract roles
pub const CONTRACT_RATE: SalaryBounds = SalaryBounds {
    min: 50.0,
    max: 150.0,
};

/// Failure taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A required value is missing
    Required,
    /// Regex, length or enum mismatch
    Format,
    /// Numeric or date bounds
    Range,
    /// Two fields disagree (min > max, end before start)
    Consistency,
    /// Required only because of another field (guardian when under 21)
    ConditionalRequirement,
    /// Non-numeric input to a numeric field
    Coercion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: FieldPath,
    pub kind: FailureKind,
    pub message: String,
}

impl FieldError {
    pub fn new(path: FieldPath, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
        }
    }
}

/// Every failure found in one validation pass, in the order rules reported them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn errors_for(&self, path: FieldPath) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter(move |e| e.path == path)
    }

    /// The failure shown to the user for `path`: the first one reported
    pub fn first_error(&self, path: FieldPath) -> Option<&FieldError> {
        self.errors_for(path).next()
    }

    pub fn message_for(&self, path: FieldPath) -> Option<&str> {
        self.first_error(path).map(|e| e.message.as_str())
    }

    /// First failure at `path` or anywhere beneath it, so a container such
    /// as `workingHours` surfaces the error of its `end` leaf.
    pub fn first_error_within(&self, path: FieldPath) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.path.is_within(&path))
    }

    /// First message per path, keyed by dotted path
    pub fn messages(&self) -> BTreeMap<String, String> {
        let mut messages = BTreeMap::new();
        for error in &self.errors {
            messages
                .entry(error.path.to_string())
                .or_insert_with(|| error.message.clone());
        }
        messages
    }

    /// Only the failures under the given top-level fields
    pub fn restricted_to(&self, fields: &[Field]) -> ValidationReport {
        ValidationReport {
            errors: self
                .errors
                .iter()
                .filter(|e| fields.contains(&e.path.field()))
                .cloned()
                .collect(),
        }
    }

    /// Top-level fields that have at least one failure
    pub fn failing_fields(&self) -> Vec<Field> {
        let mut fields: Vec<Field> = self.errors.iter().map(|e| e.path.field()).collect();
        fields.sort();
        fields.dedup();
        fields
    }
}

impl Extend<FieldError> for ValidationReport {
    fn extend<T: IntoIterator<Item = FieldError>>(&mut self, iter: T) {
        self.errors.extend(iter);
    }
}

/// Everything a rule may look at
pub struct RuleContext<'a> {
    pub record: &'a ApplicationRecord,
    pub catalog: &'a OptionsCatalog,
    pub today: NaiveDate,
    /// Derived age; `None` while the date of birth is missing or invalid
    pub age: Option<i32>,
}

/// Validates application records against the form schema
pub struct SchemaEngine<'a> {
    catalog: &'a OptionsCatalog,
}

impl<'a> SchemaEngine<'a> {
    pub fn new(catalog: &'a OptionsCatalog) -> Self {
        Self { catalog }
    }

    /// Validate a (possibly partial) record as of `today`
    pub fn validate(&self, record: &ApplicationRecord, today: NaiveDate) -> ValidationReport {
        let ctx = RuleContext {
            record,
            catalog: self.catalog,
            today,
            age: FormCalendar::age_from_input(&record.dob, today),
        };

        let mut report = ValidationReport::new();

        // Per-field rules, in form order
        report.extend(rules::personal::check_personal(&ctx));
        report.extend(rules::job::check_job_details(&ctx));
        report.extend(rules::skills::check_skills_preferences(&ctx));
        report.extend(rules::emergency::check_emergency_contact(&ctx));
        report.extend(rules::confirmation::check_confirmation(&ctx));

        // Cross-field rules; order decides which message a path shows first
        report.extend(rules::cross_field::check_salary(&ctx));
        report.extend(rules::cross_field::check_manager_department(&ctx));
        report.extend(rules::cross_field::check_skill_department(&ctx));
        report.extend(rules::cross_field::check_working_hours(&ctx));
        report.extend(rules::cross_field::check_guardian(&ctx));

        report
    }

    /// Validate and keep only the failures for `fields`
    pub fn validate_fields(
        &self,
        record: &ApplicationRecord,
        today: NaiveDate,
        fields: &[Field],
    ) -> ValidationReport {
        self.validate(record, today).restricted_to(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NumericInput;
    use crate::test_support::{today, valid_record};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_record_has_no_errors() {
        let catalog = OptionsCatalog::default();
        let engine = SchemaEngine::new(&catalog);
        let report = engine.validate(&valid_record(), today());
        assert_eq!(report.errors().to_vec(), Vec::<FieldError>::new());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let catalog = OptionsCatalog::default();
        let engine = SchemaEngine::new(&catalog);
        let record = valid_record();
        let first = engine.validate(&record, today());
        let second = engine.validate(&record, today());
        assert_eq!(first, second);
        assert!(first.is_empty());
    }

    #[test]
    fn test_default_record_reports_every_step() {
        let catalog = OptionsCatalog::default();
        let engine = SchemaEngine::new(&catalog);
        let report = engine.validate(&ApplicationRecord::default(), today());
        let fields = report.failing_fields();
        assert!(fields.contains(&Field::FullName));
        assert!(fields.contains(&Field::Department));
        assert!(fields.contains(&Field::Skills));
        assert!(fields.contains(&Field::EmergencyContact));
        assert!(fields.contains(&Field::ConfirmInformation));
        // No picture is fine
        assert!(!fields.contains(&Field::ProfilePicture));
    }

    #[test]
    fn test_first_error_wins_for_a_path() {
        let catalog = OptionsCatalog::default();
        let engine = SchemaEngine::new(&catalog);
        let mut record = valid_record();
        record.min_salary = NumericInput::Number(0.0);

        let report = engine.validate(&record, today());
        assert_eq!(
            report.message_for(FieldPath::MinSalary),
            Some("Minimum salary must be at least 1")
        );
        assert!(report.errors_for(FieldPath::MinSalary).count() >= 2);
        assert_eq!(
            report.messages().get("minSalary").map(String::as_str),
            Some("Minimum salary must be at least 1")
        );
    }

    #[test]
    fn test_restricted_to_keeps_only_step_fields() {
        let catalog = OptionsCatalog::default();
        let engine = SchemaEngine::new(&catalog);
        let report = engine.validate_fields(
            &ApplicationRecord::default(),
            today(),
            &[Field::ConfirmInformation],
        );
        assert_eq!(report.len(), 1);
        assert_eq!(report.errors()[0].path, FieldPath::ConfirmInformation);
    }

    #[test]
    fn test_first_error_within_finds_leaf_failures() {
        let catalog = OptionsCatalog::default();
        let engine = SchemaEngine::new(&catalog);
        let mut record = valid_record();
        record.emergency_contact.relation = String::new();

        let report = engine.validate(&record, today());
        let error = report
            .first_error_within(FieldPath::EmergencyContact)
            .unwrap();
        assert_eq!(error.path, FieldPath::Relation);
        assert_eq!(report.message_for(FieldPath::EmergencyContact), None);
        assert!(report.first_error_within(FieldPath::WorkingHours).is_none());
    }
}
