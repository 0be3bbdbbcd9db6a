// Step 3: skills and preferences
use crate::calendar::FormCalendar;
use crate::coerce::{coerce_number, Coerced};
use crate::path::FieldPath;
use crate::patterns::{char_len, is_blank};
use crate::schema::{
    FailureKind, FieldError, RuleContext, MAX_NOTES_CHARS, MIN_EXPERIENCE_YEARS, MIN_SKILLS,
    REMOTE_PREFERENCE_RANGE,
};

pub fn check_skills_preferences(ctx: &RuleContext) -> Vec<FieldError> {
    let record = ctx.record;
    let mut errors = Vec::new();

    if record.skills.len() < MIN_SKILLS {
        errors.push(FieldError::new(
            FieldPath::Skills,
            FailureKind::Range,
            format!("Select at least {} skills", MIN_SKILLS),
        ));
    }

    for (index, experience) in record.experiences.iter().enumerate() {
        let path = FieldPath::ExperienceYears(index);
        match coerce_number(&experience.years) {
            Coerced::Invalid => errors.push(FieldError::new(
                path,
                FailureKind::Coercion,
                "Please enter valid number",
            )),
            Coerced::Value(years) if years >= MIN_EXPERIENCE_YEARS => {}
            Coerced::Value(_) | Coerced::Missing => errors.push(FieldError::new(
                path,
                FailureKind::Range,
                "Experience required",
            )),
        }
    }

    errors.extend(check_time(
        FieldPath::WorkingHoursStart,
        &record.working_hours.start,
        "Start time required",
    ));
    errors.extend(check_time(
        FieldPath::WorkingHoursEnd,
        &record.working_hours.end,
        "End time required",
    ));

    let (low, high) = REMOTE_PREFERENCE_RANGE;
    match coerce_number(&record.remote_preference) {
        Coerced::Invalid => errors.push(FieldError::new(
            FieldPath::RemotePreference,
            FailureKind::Coercion,
            "Please enter valid number",
        )),
        Coerced::Value(v) if (low..=high).contains(&v) => {}
        Coerced::Value(_) | Coerced::Missing => errors.push(FieldError::new(
            FieldPath::RemotePreference,
            FailureKind::Range,
            format!("Remote preference must be between {} and {}", low, high),
        )),
    }

    if char_len(&record.notes) > MAX_NOTES_CHARS {
        errors.push(FieldError::new(
            FieldPath::Notes,
            FailureKind::Format,
            format!("Notes cannot exceed {} characters", MAX_NOTES_CHARS),
        ));
    }

    errors
}

fn check_time(path: FieldPath, value: &str, required: &str) -> Option<FieldError> {
    if is_blank(value) {
        Some(FieldError::new(path, FailureKind::Required, required))
    } else if FormCalendar::parse_time(value).is_none() {
        Some(FieldError::new(path, FailureKind::Format, "Invalid time"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionsCatalog;
    use crate::record::{ApplicationRecord, NumericInput};
    use crate::test_support::{context, today, valid_record};

    fn check(record: &ApplicationRecord) -> Vec<FieldError> {
        let catalog = OptionsCatalog::default();
        check_skills_preferences(&context(record, &catalog, today()))
    }

    #[test]
    fn test_accepts_valid_preferences() {
        assert!(check(&valid_record()).is_empty());
    }

    #[test]
    fn test_requires_three_skills() {
        let mut record = valid_record();
        record.set_skills(vec!["Rust".into(), "SQL".into()]);
        let errors = check(&record);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Select at least 3 skills");
    }

    #[test]
    fn test_experience_years_per_entry() {
        let mut record = valid_record();
        record.experiences[0].years = NumericInput::Number(0.0);
        record.experiences[2].years = "lots".into();
        let errors = check(&record);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].path, FieldPath::ExperienceYears(0));
        assert_eq!(errors[0].message, "Experience required");
        assert_eq!(errors[1].path, FieldPath::ExperienceYears(2));
        assert_eq!(errors[1].kind, FailureKind::Coercion);
        assert_eq!(errors[1].message, "Please enter valid number");

        record.experiences[0].years = NumericInput::Missing;
        record.experiences[2].years = "   ".into();
        let errors = check(&record);
        assert_eq!(errors.len(), 2);
        for (error, index) in errors.iter().zip([0, 2]) {
            assert_eq!(error.path, FieldPath::ExperienceYears(index));
            assert_eq!(error.kind, FailureKind::Range);
            assert_eq!(error.message, "Experience required");
        }
    }

    #[test]
    fn test_freshly_toggled_skill_needs_years() {
        let mut record = valid_record();
        record.toggle_skill("Docker");
        let errors = check(&record);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, FieldPath::ExperienceYears(3));
    }

    #[test]
    fn test_working_hours_required_and_formatted() {
        let mut record = valid_record();
        record.working_hours.start = String::new();
        record.working_hours.end = "5pm".into();
        let errors = check(&record);
        assert_eq!(errors[0].path, FieldPath::WorkingHoursStart);
        assert_eq!(errors[0].message, "Start time required");
        assert_eq!(errors[1].path, FieldPath::WorkingHoursEnd);
        assert_eq!(errors[1].message, "Invalid time");
    }

    #[test]
    fn test_remote_preference_bounds() {
        let mut record = valid_record();
        for ok in [0.0, 55.0, 100.0] {
            record.remote_preference = NumericInput::Number(ok);
            assert!(check(&record).is_empty());
        }
        record.remote_preference = NumericInput::Number(101.0);
        assert_eq!(
            check(&record)[0].message,
            "Remote preference must be between 0 and 100"
        );
        record.remote_preference = "70".into();
        assert!(check(&record).is_empty());

        record.remote_preference = "abc".into();
        let errors = check(&record);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, FieldPath::RemotePreference);
        assert_eq!(errors[0].kind, FailureKind::Coercion);
        assert_eq!(errors[0].message, "Please enter valid number");

        record.remote_preference = NumericInput::Missing;
        let errors = check(&record);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, FailureKind::Range);
        assert_eq!(
            errors[0].message,
            "Remote preference must be between 0 and 100"
        );
    }

    #[test]
    fn test_notes_limit_counts_characters() {
        let mut record = valid_record();
        record.notes = "é".repeat(500);
        assert!(check(&record).is_empty());
        record.notes.push('x');
        assert_eq!(check(&record)[0].message, "Notes cannot exceed 500 characters");
    }
}
