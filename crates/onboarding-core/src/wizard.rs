//! Wizard session
//!
//! Owns one in-progress application: the record, the current step, the
//! option catalog and which fields the user has touched. All edits go
//! through [`WizardSession::set_field`] or [`WizardSession::toggle_skill`]
//! so the department-dependent reset and the skill/experience pairing can
//! never be skipped.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calendar::FormCalendar;
use crate::error::FormError;
use crate::options::{OptionsCatalog, SelectOption};
use crate::path::{Field, FieldPath};
use crate::patterns::is_blank;
use crate::record::{
    ApplicationRecord, EmergencyContact, JobType, NumericInput, ProfilePicture, WorkingHours,
};
use crate::schema::{SchemaEngine, ValidationReport};
use crate::steps::{step_indicator, Step, StepInfo};
use crate::summary::{guardian_visible, ReviewSummary};

/// Immutable snapshot handed to a [`SubmitSink`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedApplication {
    pub application_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub age: Option<i32>,
    pub record: ApplicationRecord,
}

/// Receives validated applications
pub trait SubmitSink {
    fn submit(&mut self, application: SubmittedApplication) -> anyhow::Result<()>;
}

impl SubmitSink for Vec<SubmittedApplication> {
    fn submit(&mut self, application: SubmittedApplication) -> anyhow::Result<()> {
        self.push(application);
        Ok(())
    }
}

/// Outcome of a step transition
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    Moved(Step),
    /// Stayed on `step` because its fields failed validation
    Blocked {
        step: Step,
        report: ValidationReport,
    },
}

impl Navigation {
    pub fn step(&self) -> Step {
        match self {
            Navigation::Moved(step) => *step,
            Navigation::Blocked { step, .. } => *step,
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Navigation::Blocked { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Accepted { application_id: Uuid },
    Rejected(ValidationReport),
}

/// What the renderer needs to draw one input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldState {
    pub path: FieldPath,
    pub value: Value,
    /// First failure for this path, only once the field has been touched
    pub error: Option<String>,
    pub required: bool,
    pub visible: bool,
}

pub struct WizardSession {
    id: Uuid,
    step: Step,
    record: ApplicationRecord,
    catalog: OptionsCatalog,
    touched: BTreeSet<Field>,
    today: Option<NaiveDate>,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new(OptionsCatalog::default())
    }
}

impl WizardSession {
    pub fn new(catalog: OptionsCatalog) -> Self {
        Self {
            id: Uuid::new_v4(),
            step: Step::FIRST,
            record: ApplicationRecord::default(),
            catalog,
            touched: BTreeSet::new(),
            today: None,
        }
    }

    /// Pin "today" instead of reading the local clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn current_step(&self) -> Step {
        self.step
    }

    pub fn record(&self) -> &ApplicationRecord {
        &self.record
    }

    pub fn catalog(&self) -> &OptionsCatalog {
        &self.catalog
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(FormCalendar::today)
    }

    pub fn age(&self) -> Option<i32> {
        FormCalendar::age_from_input(&self.record.dob, self.today())
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    // ------------------------------------------------------------------
    // Edits
    // ------------------------------------------------------------------

    /// Apply one edit from the form.
    ///
    /// # Errors
    ///
    /// `UnknownField` for paths outside the schema, `ReadOnlyField` for
    /// paths the session maintains itself, and `InvalidValue` when the JSON
    /// type does not fit the field. The record is unchanged on error.
    pub fn set_field(&mut self, path: &str, value: Value) -> Result<(), FormError> {
        let path: FieldPath = path.parse()?;
        let record = &mut self.record;

        match path {
            FieldPath::FullName => record.full_name = expect_string(path, value)?,
            FieldPath::Email => record.email = expect_string(path, value)?,
            FieldPath::PhoneNumber => record.phone_number = expect_string(path, value)?,
            FieldPath::Dob => record.dob = expect_string(path, value)?,
            FieldPath::ProfilePicture => {
                record.profile_picture = if value.is_null() {
                    None
                } else {
                    Some(from_object::<ProfilePicture>(path, value)?)
                }
            }
            FieldPath::Department => {
                let department = expect_string(path, value)?;
                self.change_department(department);
            }
            FieldPath::PositionTitle => record.position_title = expect_string(path, value)?,
            FieldPath::StartDate => record.start_date = expect_string(path, value)?,
            FieldPath::JobType => {
                let label = expect_string(path, value)?;
                record.job_type = if is_blank(&label) {
                    None
                } else {
                    Some(JobType::from_label(&label).ok_or_else(|| {
                        FormError::invalid_value(path, format!("unknown job type {:?}", label))
                    })?)
                };
            }
            FieldPath::MaxSalary => record.max_salary = expect_number(path, &value)?,
            FieldPath::MinSalary => record.min_salary = expect_number(path, &value)?,
            FieldPath::Manager => record.manager = expect_string(path, value)?,
            FieldPath::Skills => {
                let skills = expect_string_list(path, value)?;
                if let Some(skill) = skills
                    .iter()
                    .find(|s| !self.catalog.skill_in_department(&record.department, s))
                {
                    return Err(FormError::UnknownSkill {
                        skill: skill.clone(),
                        department: record.department.clone(),
                    });
                }
                record.set_skills(skills);
            }
            FieldPath::Experiences | FieldPath::ExperienceSkill(_) => {
                return Err(FormError::ReadOnlyField(path.to_string()));
            }
            FieldPath::ExperienceYears(index) => {
                let years = expect_number(path, &value)?;
                let entry = record.experiences.get_mut(index).ok_or_else(|| {
                    FormError::invalid_value(path, "no experience entry at this index")
                })?;
                entry.years = years;
            }
            FieldPath::WorkingHours => {
                record.working_hours = from_object::<WorkingHours>(path, value)?
            }
            FieldPath::WorkingHoursStart => {
                record.working_hours.start = expect_string(path, value)?
            }
            FieldPath::WorkingHoursEnd => record.working_hours.end = expect_string(path, value)?,
            FieldPath::RemotePreference => {
                record.remote_preference = expect_number(path, &value)?
            }
            FieldPath::Notes => record.notes = expect_string(path, value)?,
            FieldPath::EmergencyContact => {
                record.emergency_contact = from_object::<EmergencyContact>(path, value)?
            }
            FieldPath::ContactName => {
                record.emergency_contact.contact_name = expect_string(path, value)?
            }
            FieldPath::Relation => record.emergency_contact.relation = expect_string(path, value)?,
            FieldPath::ContactPhone => {
                record.emergency_contact.phone_number = expect_string(path, value)?
            }
            FieldPath::GuardianName => {
                record.emergency_contact.guardian_contact_name = expect_string(path, value)?
            }
            FieldPath::GuardianPhone => {
                record.emergency_contact.guardian_contact_phone = expect_string(path, value)?
            }
            FieldPath::ConfirmInformation => {
                record.confirm_information = value.as_bool().ok_or_else(|| {
                    FormError::invalid_value(path, "expected a boolean")
                })?
            }
        }

        self.touched.insert(path.field());
        debug!(session = %self.id, path = %path, "field updated");
        Ok(())
    }

    fn change_department(&mut self, department: String) {
        if self.record.department == department {
            return;
        }
        debug!(
            session = %self.id,
            from = %self.record.department,
            to = %department,
            "department changed, clearing manager and skills"
        );
        self.record.department = department;
        self.record.reset_department_dependents();
    }

    /// Current value at `path`, in the record's JSON shape
    pub fn field_value(&self, path: &str) -> Result<Value, FormError> {
        let parsed: FieldPath = path.parse()?;
        let mut value = serde_json::to_value(&self.record)
            .map_err(|e| FormError::invalid_value(parsed, e.to_string()))?;

        for segment in parsed.to_string().split('.') {
            value = match value {
                Value::Object(mut map) => map.remove(segment),
                Value::Array(mut items) => segment
                    .parse::<usize>()
                    .ok()
                    .filter(|i| *i < items.len())
                    .map(|i| items.swap_remove(i)),
                _ => None,
            }
            .ok_or_else(|| FormError::UnknownField(path.to_string()))?;
        }
        Ok(value)
    }

    /// Select or deselect a skill with its experience entry.
    /// Returns whether the skill is selected afterwards.
    ///
    /// # Errors
    ///
    /// `UnknownSkill` when selecting a skill the current department does
    /// not offer. Deselecting always succeeds.
    pub fn toggle_skill(&mut self, skill: &str) -> Result<bool, FormError> {
        if !self.record.has_skill(skill)
            && !self
                .catalog
                .skill_in_department(&self.record.department, skill)
        {
            return Err(FormError::UnknownSkill {
                skill: skill.to_string(),
                department: self.record.department.clone(),
            });
        }
        let selected = self.record.toggle_skill(skill);
        self.touched.insert(Field::Skills);
        debug!(session = %self.id, skill, selected, "skill toggled");
        Ok(selected)
    }

    // ------------------------------------------------------------------
    // Derived options
    // ------------------------------------------------------------------

    pub fn department_options(&self) -> Vec<String> {
        self.catalog.department_names()
    }

    /// Managers of the selected department; empty until one is chosen
    pub fn manager_options(&self) -> Vec<SelectOption> {
        self.catalog.manager_options(&self.record.department)
    }

    pub fn skill_options(&self) -> Vec<String> {
        self.catalog.skills_for(&self.record.department).to_vec()
    }

    pub fn relation_options(&self) -> Vec<String> {
        self.catalog.relations.clone()
    }

    pub fn job_type_options(&self) -> Vec<&'static str> {
        JobType::ALL.iter().map(JobType::as_str).collect()
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    pub fn validate(&self) -> ValidationReport {
        SchemaEngine::new(&self.catalog).validate(&self.record, self.today())
    }

    /// Failures restricted to the fields gated by `step`
    pub fn validate_step(&self, step: Step) -> ValidationReport {
        self.validate().restricted_to(step.fields())
    }

    pub fn field_state(&self, path: &str) -> Result<FieldState, FormError> {
        let parsed: FieldPath = path.parse()?;
        let value = self.field_value(path)?;
        let guardian = guardian_visible(self.age());

        let error = if self.touched.contains(&parsed.field()) {
            let report = self.validate();
            report
                .first_error_within(parsed)
                .map(|e| e.message.clone())
        } else {
            None
        };

        let (required, visible) = match parsed {
            FieldPath::GuardianName | FieldPath::GuardianPhone => (guardian, guardian),
            FieldPath::ProfilePicture | FieldPath::Notes => (false, true),
            _ => (true, true),
        };

        Ok(FieldState {
            path: parsed,
            value,
            error,
            required,
            visible,
        })
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Advance one step if the current step's fields validate
    pub fn next(&mut self) -> Result<Navigation, FormError> {
        let current = self.step;
        let target = current.next().ok_or(FormError::NoNextStep)?;

        let report = self.validate_step(current);
        self.touch_step(current);
        if !report.is_empty() {
            warn!(
                session = %self.id,
                step = current.number(),
                failures = report.len(),
                "step transition blocked"
            );
            return Ok(Navigation::Blocked {
                step: current,
                report,
            });
        }

        self.step = target;
        debug!(session = %self.id, from = current.number(), to = target.number(), "next step");
        Ok(Navigation::Moved(target))
    }

    /// Go back one step without validating; stays put on the first step
    pub fn prev(&mut self) -> Step {
        if let Some(previous) = self.step.prev() {
            debug!(session = %self.id, to = previous.number(), "previous step");
            self.step = previous;
        }
        self.step
    }

    /// Jump to `target`. Backward jumps are free; forward jumps validate
    /// each step on the way and stop at the first one that fails.
    pub fn go_to(&mut self, target: Step) -> Navigation {
        while self.step < target {
            match self.next() {
                Ok(Navigation::Moved(_)) => {}
                Ok(blocked @ Navigation::Blocked { .. }) => return blocked,
                Err(_) => break,
            }
        }
        if target < self.step {
            debug!(session = %self.id, to = target.number(), "jumped back");
            self.step = target;
        }
        Navigation::Moved(self.step)
    }

    /// Validate the whole record and hand it to `sink`.
    ///
    /// On success the session starts over on step 1 with an empty record.
    ///
    /// # Errors
    ///
    /// `SubmitUnavailable` outside the review step; `Sink` when the sink
    /// refuses the application, in which case the record is kept.
    pub fn submit<S>(&mut self, sink: &mut S) -> Result<Submission, FormError>
    where
        S: SubmitSink + ?Sized,
    {
        if self.step != Step::Review {
            return Err(FormError::SubmitUnavailable(self.step));
        }

        // The confirmation box is reported on its own first
        let mut report = self.validate_step(Step::Review);
        if report.is_empty() {
            report = self.validate();
        }
        if !report.is_empty() {
            self.touched.extend(report.failing_fields());
            warn!(session = %self.id, failures = report.len(), "submission rejected");
            return Ok(Submission::Rejected(report));
        }

        let application = SubmittedApplication {
            application_id: self.id,
            submitted_at: Utc::now(),
            age: self.age(),
            record: self.record.clone(),
        };

        if let Err(e) = sink.submit(application) {
            warn!(session = %self.id, error = %e, "submit sink failed");
            return Err(FormError::Sink(format!("{:#}", e)));
        }

        let application_id = self.id;
        info!(session = %application_id, "application submitted");
        self.reset();
        Ok(Submission::Accepted { application_id })
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    pub fn summary(&self) -> ReviewSummary {
        ReviewSummary::build(&self.record, &self.catalog, self.age())
    }

    pub fn steps(&self) -> Vec<StepInfo> {
        step_indicator(self.step)
    }

    pub fn progress(&self) -> f64 {
        self.step.progress_percent()
    }

    /// Start a fresh application with the same catalog
    pub fn reset(&mut self) {
        self.id = Uuid::new_v4();
        self.step = Step::FIRST;
        self.record = ApplicationRecord::default();
        self.touched.clear();
        debug!(session = %self.id, "session reset");
    }

    fn touch_step(&mut self, step: Step) {
        self.touched.extend(step.fields().iter().copied());
    }
}

fn expect_string(path: FieldPath, value: Value) -> Result<String, FormError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        _ => Err(FormError::invalid_value(path, "expected a string")),
    }
}

fn expect_number(path: FieldPath, value: &Value) -> Result<NumericInput, FormError> {
    NumericInput::from_json(value)
        .ok_or_else(|| FormError::invalid_value(path, "expected a number or numeric text"))
}

fn expect_string_list(path: FieldPath, value: Value) -> Result<Vec<String>, FormError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(FormError::invalid_value(path, "expected a list of strings")),
            })
            .collect(),
        _ => Err(FormError::invalid_value(path, "expected a list of strings")),
    }
}

fn from_object<T: serde::de::DeserializeOwned>(
    path: FieldPath,
    value: Value,
) -> Result<T, FormError> {
    if !value.is_object() {
        return Err(FormError::invalid_value(path, "expected an object"));
    }
    serde_json::from_value(value).map_err(|e| FormError::invalid_value(path, e.to_string()))
}
