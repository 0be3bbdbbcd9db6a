//! Fixtures shared by unit tests

use chrono::NaiveDate;

use crate::calendar::FormCalendar;
use crate::options::OptionsCatalog;
use crate::record::{
    ApplicationRecord, EmergencyContact, JobType, NumericInput, ProfilePicture, WorkingHours,
};
use crate::schema::RuleContext;

/// Fixed "today" used across tests: 2024-06-15
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

/// A record that passes every rule as of [`today`]
pub fn valid_record() -> ApplicationRecord {
    let mut record = ApplicationRecord {
        full_name: "Jane Doe".into(),
        email: "jane.doe@example.com".into(),
        phone_number: "+1-555-123-4567".into(),
        dob: "1990-05-20".into(),
        profile_picture: Some(ProfilePicture {
            name: "jane.png".into(),
            mime_type: "image/png".into(),
            size: 512 * 1024,
        }),
        department: "Engineering".into(),
        position_title: "Backend Engineer".into(),
        start_date: "2024-07-01".into(),
        job_type: Some(JobType::FullTime),
        min_salary: NumericInput::Number(60000.0),
        max_salary: NumericInput::Number(90000.0),
        manager: "eng-1".into(),
        working_hours: WorkingHours {
            start: "09:00".into(),
            end: "17:00".into(),
        },
        remote_preference: NumericInput::Number(50.0),
        notes: "Prefers async standups.".into(),
        emergency_contact: EmergencyContact {
            contact_name: "John Doe".into(),
            relation: "Spouse".into(),
            phone_number: "+1-555-987-6543".into(),
            guardian_contact_name: String::new(),
            guardian_contact_phone: String::new(),
        },
        confirm_information: true,
        ..ApplicationRecord::default()
    };
    for (skill, years) in [("Rust", 3.0), ("SQL", 5.0), ("Python", 2.0)] {
        record.toggle_skill(skill);
        if let Some(entry) = record.experiences.last_mut() {
            entry.years = NumericInput::Number(years);
        }
    }
    record
}

pub fn context<'a>(
    record: &'a ApplicationRecord,
    catalog: &'a OptionsCatalog,
    today: NaiveDate,
) -> RuleContext<'a> {
    RuleContext {
        record,
        catalog,
        today,
        age: FormCalendar::age_from_input(&record.dob, today),
    }
}
