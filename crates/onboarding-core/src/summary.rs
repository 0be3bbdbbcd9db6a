//! Read-only review shown on the last step

use serde::Serialize;

use crate::coerce::coerce_number;
use crate::options::OptionsCatalog;
use crate::patterns::format_amount;
use crate::record::{ApplicationRecord, NumericInput};
use crate::schema::GUARDIAN_AGE;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalSummary {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub dob: String,
    pub age: Option<i32>,
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub department: String,
    pub position: String,
    pub start_date: String,
    pub job_type: String,
    /// e.g. `$60,000 - $90,000`
    pub salary_range: String,
    /// Manager display name, falling back to the stored id
    pub manager: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsSummary {
    pub skills: String,
    pub experience: Vec<String>,
    pub working_hours: String,
    pub remote_preference: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencySummary {
    pub name: String,
    pub relationship: String,
    pub phone: String,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
}

/// Everything entered so far, formatted for the review step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub personal: PersonalSummary,
    pub job: JobSummary,
    pub skills: SkillsSummary,
    pub emergency_contact: EmergencySummary,
    pub shows_guardian: bool,
}

impl ReviewSummary {
    pub fn build(record: &ApplicationRecord, catalog: &OptionsCatalog, age: Option<i32>) -> Self {
        let shows_guardian = guardian_visible(age);
        let contact = &record.emergency_contact;

        let manager = catalog
            .manager_name(&record.manager)
            .map(str::to_string)
            .unwrap_or_else(|| record.manager.clone());

        Self {
            personal: PersonalSummary {
                full_name: record.full_name.trim().to_string(),
                email: record.email.trim().to_string(),
                phone: record.phone_number.clone(),
                dob: record.dob.clone(),
                age,
                profile_picture: record.profile_picture.as_ref().map(|p| p.name.clone()),
            },
            job: JobSummary {
                department: record.department.clone(),
                position: record.position_title.trim().to_string(),
                start_date: record.start_date.clone(),
                job_type: record
                    .job_type
                    .map(|t| t.to_string())
                    .unwrap_or_default(),
                salary_range: format!(
                    "${} - ${}",
                    display_number(&record.min_salary),
                    display_number(&record.max_salary)
                ),
                manager,
            },
            skills: SkillsSummary {
                skills: record.skills.join(", "),
                experience: record
                    .experiences
                    .iter()
                    .map(|e| format!("{}: {} yrs", e.skill, display_number(&e.years)))
                    .collect(),
                working_hours: format!(
                    "{} - {}",
                    record.working_hours.start, record.working_hours.end
                ),
                remote_preference: format!("{}%", display_number(&record.remote_preference)),
                notes: Some(record.notes.trim())
                    .filter(|n| !n.is_empty())
                    .map(str::to_string),
            },
            emergency_contact: EmergencySummary {
                name: contact.contact_name.clone(),
                relationship: contact.relation.clone(),
                phone: contact.phone_number.clone(),
                guardian_name: shows_guardian.then(|| contact.guardian_contact_name.clone()),
                guardian_phone: shows_guardian.then(|| contact.guardian_contact_phone.clone()),
            },
            shows_guardian,
        }
    }
}

/// Guardian inputs show only for applicants known to be under 21
pub fn guardian_visible(age: Option<i32>) -> bool {
    matches!(age, Some(age) if age < GUARDIAN_AGE)
}

fn display_number(input: &NumericInput) -> String {
    match coerce_number(input).value() {
        Some(v) => format_amount(v),
        None => match input {
            NumericInput::Text(text) => text.trim().to_string(),
            _ => String::new(),
        },
    }
}
