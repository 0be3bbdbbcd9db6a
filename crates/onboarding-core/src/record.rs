//! The application record collected by the wizard
//!
//! One `ApplicationRecord` exists per in-progress session. It holds the raw
//! values the user entered; everything derived from it (age, option lists)
//! is computed on demand and never stored here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Employment type offered on step 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
}

impl JobType {
    pub const ALL: [JobType; 3] = [JobType::FullTime, JobType::PartTime, JobType::Contract];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
        }
    }

    /// Parse the label shown on the radio buttons
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == label.trim())
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numeric input exactly as the user supplied it.
///
/// Number inputs in the browser hand back either a number or the raw text,
/// and an untouched input may hand back nothing at all. Coercion to `f64`
/// happens during validation (see [`crate::coerce`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl NumericInput {
    /// Build from a JSON value, rejecting arrays, objects and booleans
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => Some(NumericInput::Missing),
            serde_json::Value::Number(n) => n.as_f64().map(NumericInput::Number),
            serde_json::Value::String(s) => Some(NumericInput::Text(s.clone())),
            _ => None,
        }
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

/// Metadata of the optional profile picture (contents never reach the engine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePicture {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
}

/// Years of experience for one selected skill
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Experience {
    pub skill: String,
    pub years: NumericInput,
}

impl Experience {
    /// Fresh entry created when a skill is ticked
    pub fn for_skill(skill: &str) -> Self {
        Self {
            skill: skill.to_string(),
            years: NumericInput::Number(0.0),
        }
    }
}

/// Same-day working window, `HH:MM` strings from time inputs
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkingHours {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmergencyContact {
    pub contact_name: String,
    pub relation: String,
    pub phone_number: String,
    pub guardian_contact_name: String,
    pub guardian_contact_phone: String,
}

/// Everything the wizard collects across its five steps
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    // Step 1
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub dob: String,
    pub profile_picture: Option<ProfilePicture>,
    // Step 2
    pub department: String,
    pub position_title: String,
    pub start_date: String,
    pub job_type: Option<JobType>,
    pub min_salary: NumericInput,
    pub max_salary: NumericInput,
    pub manager: String,
    // Step 3
    pub skills: Vec<String>,
    pub experiences: Vec<Experience>,
    pub working_hours: WorkingHours,
    pub remote_preference: NumericInput,
    pub notes: String,
    // Step 4
    pub emergency_contact: EmergencyContact,
    // Step 5
    pub confirm_information: bool,
}

impl Default for ApplicationRecord {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone_number: String::new(),
            dob: String::new(),
            profile_picture: None,
            department: String::new(),
            position_title: String::new(),
            start_date: String::new(),
            job_type: Some(JobType::FullTime),
            min_salary: NumericInput::Number(0.0),
            max_salary: NumericInput::Number(0.0),
            manager: String::new(),
            skills: Vec::new(),
            experiences: Vec::new(),
            working_hours: WorkingHours::default(),
            remote_preference: NumericInput::Number(0.0),
            notes: String::new(),
            emergency_contact: EmergencyContact::default(),
            confirm_information: false,
        }
    }
}

impl ApplicationRecord {
    /// Clear everything that depends on the department.
    pub fn reset_department_dependents(&mut self) {
        self.manager.clear();
        self.skills.clear();
        self.experiences.clear();
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    /// Select or deselect a skill together with its experience entry.
    /// Returns whether the skill is selected afterwards.
    pub fn toggle_skill(&mut self, skill: &str) -> bool {
        if let Some(index) = self.skills.iter().position(|s| s == skill) {
            self.skills.remove(index);
            self.experiences.retain(|e| e.skill != skill);
            false
        } else {
            self.skills.push(skill.to_string());
            self.experiences.push(Experience::for_skill(skill));
            true
        }
    }

    /// Replace the whole skill selection.
    ///
    /// Experience entries are rebuilt in the new order; entries for skills
    /// that stay selected keep their years. Duplicates are dropped.
    pub fn set_skills(&mut self, skills: Vec<String>) {
        let mut previous = std::mem::take(&mut self.experiences);
        self.skills.clear();

        for skill in skills {
            if self.has_skill(&skill) {
                continue;
            }
            let entry = match previous.iter().position(|e| e.skill == skill) {
                Some(index) => previous.swap_remove(index),
                None => Experience::for_skill(&skill),
            };
            self.skills.push(skill);
            self.experiences.push(entry);
        }
    }

    /// Whether `experiences` mirrors `skills` one-to-one, in order
    pub fn skills_in_lockstep(&self) -> bool {
        self.skills.len() == self.experiences.len()
            && self
                .skills
                .iter()
                .zip(&self.experiences)
                .all(|(skill, exp)| *skill == exp.skill)
    }
}
