//! Step Router
//!
//! Maps each wizard step to the fields that must validate before the user
//! may move past it, and exposes the step metadata the indicator renders.

use serde::Serialize;
use std::fmt;

use crate::error::FormError;
use crate::path::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Step {
    Personal = 1,
    Job = 2,
    Skills = 3,
    EmergencyContact = 4,
    Review = 5,
}

const PERSONAL_FIELDS: &[Field] = &[
    Field::FullName,
    Field::Email,
    Field::PhoneNumber,
    Field::Dob,
    Field::ProfilePicture,
];

const JOB_FIELDS: &[Field] = &[
    Field::Department,
    Field::PositionTitle,
    Field::StartDate,
    Field::JobType,
    Field::MaxSalary,
    Field::MinSalary,
    Field::Manager,
];

const SKILLS_FIELDS: &[Field] = &[
    Field::Skills,
    Field::Experiences,
    Field::WorkingHours,
    Field::RemotePreference,
    Field::Notes,
];

const EMERGENCY_FIELDS: &[Field] = &[Field::EmergencyContact];

const REVIEW_FIELDS: &[Field] = &[Field::ConfirmInformation];

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Personal,
        Step::Job,
        Step::Skills,
        Step::EmergencyContact,
        Step::Review,
    ];

    pub const FIRST: Step = Step::Personal;
    pub const LAST: Step = Step::Review;

    /// 1-based step number
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Result<Self, FormError> {
        match number {
            1 => Ok(Step::Personal),
            2 => Ok(Step::Job),
            3 => Ok(Step::Skills),
            4 => Ok(Step::EmergencyContact),
            5 => Ok(Step::Review),
            other => Err(FormError::InvalidStep(other)),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Personal => "Personal Info",
            Step::Job => "Job Details",
            Step::Skills => "Skills & Preferences",
            Step::EmergencyContact => "Emergency Contact",
            Step::Review => "Review & Submit",
        }
    }

    /// Fields validated before leaving this step, in form order
    pub fn fields(self) -> &'static [Field] {
        match self {
            Step::Personal => PERSONAL_FIELDS,
            Step::Job => JOB_FIELDS,
            Step::Skills => SKILLS_FIELDS,
            Step::EmergencyContact => EMERGENCY_FIELDS,
            Step::Review => REVIEW_FIELDS,
        }
    }

    pub fn next(self) -> Option<Step> {
        Step::from_number(self.number() + 1).ok()
    }

    pub fn prev(self) -> Option<Step> {
        Step::from_number(self.number().checked_sub(1)?).ok()
    }

    /// The step that gates `field`
    pub fn of_field(field: Field) -> Step {
        Step::ALL
            .into_iter()
            .find(|step| step.fields().contains(&field))
            .unwrap_or(Step::LAST)
    }

    /// Progress bar fill in percent: 0 on the first step, 100 on the last
    pub fn progress_percent(self) -> f64 {
        let total = Step::ALL.len() as f64;
        (f64::from(self.number()) - 1.0) / (total - 1.0) * 100.0
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.title())
    }
}

/// `fieldsForStep` by step number
pub fn fields_for_step(number: u8) -> Result<&'static [Field], FormError> {
    Step::from_number(number).map(Step::fields)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

/// One entry of the step indicator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepInfo {
    pub number: u8,
    pub title: &'static str,
    pub status: StepStatus,
}

/// Indicator entries for every step relative to `current`
pub fn step_indicator(current: Step) -> Vec<StepInfo> {
    Step::ALL
        .into_iter()
        .map(|step| StepInfo {
            number: step.number(),
            title: step.title(),
            status: if step < current {
                StepStatus::Completed
            } else if step == current {
                StepStatus::Current
            } else {
                StepStatus::Upcoming
            },
        })
        .collect()
}
