//! Property-based tests for onboarding-core
//!
//! Exercises the schema engine and wizard session with generated input.

use chrono::NaiveDate;
use onboarding_core::patterns::is_valid_phone;
use onboarding_core::{
    ApplicationRecord, EmergencyContact, Field, FieldPath, FormCalendar, JobType, NumericInput,
    OptionsCatalog, SchemaEngine, Step, WizardSession, WorkingHours,
};
use proptest::prelude::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn base_record() -> ApplicationRecord {
    let mut record = ApplicationRecord {
        full_name: "Sam Rivera".into(),
        email: "sam.rivera@example.com".into(),
        phone_number: "+44-207-555-0199".into(),
        dob: "1985-11-02".into(),
        department: "Finance".into(),
        position_title: "Analyst".into(),
        start_date: "2024-08-01".into(),
        job_type: Some(JobType::FullTime),
        min_salary: NumericInput::Number(50000.0),
        max_salary: NumericInput::Number(70000.0),
        manager: "fin-1".into(),
        working_hours: WorkingHours {
            start: "08:00".into(),
            end: "16:00".into(),
        },
        remote_preference: NumericInput::Number(20.0),
        emergency_contact: EmergencyContact {
            contact_name: "Ana Rivera".into(),
            relation: "Sibling".into(),
            phone_number: "+44-207-555-0100".into(),
            ..EmergencyContact::default()
        },
        confirm_information: true,
        ..ApplicationRecord::default()
    };
    let catalog = OptionsCatalog::default();
    for skill in catalog.skills_for("Finance").iter().take(3) {
        record.toggle_skill(skill);
        if let Some(entry) = record.experiences.last_mut() {
            entry.years = NumericInput::Number(2.0);
        }
    }
    record
}

// ============================================================
// Strategies
// ============================================================

fn valid_phone() -> impl Strategy<Value = String> {
    "\\+[0-9]{1,3}-[0-9]{3}-[0-9]{3}-[0-9]{4}"
}

fn invalid_phone() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{10}",                                  // No separators
        "[0-9]{1,3}-[0-9]{3}-[0-9]{3}-[0-9]{4}",      // Missing plus
        "\\+[0-9]{4}-[0-9]{3}-[0-9]{3}-[0-9]{4}",     // Country code too long
        "\\+[0-9]{1,3}-[0-9]{3}-[0-9]{3}-[0-9]{1,3}", // Short line number
        Just("".to_string()),
    ]
}

fn numeric_input() -> impl Strategy<Value = NumericInput> {
    prop_oneof![
        (-1000.0f64..300_000.0).prop_map(NumericInput::Number),
        "[0-9,]{0,8}".prop_map(NumericInput::Text),
        "[a-z ]{0,6}".prop_map(NumericInput::Text),
        Just(NumericInput::Missing),
    ]
}

fn job_type() -> impl Strategy<Value = Option<JobType>> {
    prop_oneof![
        Just(Some(JobType::FullTime)),
        Just(Some(JobType::PartTime)),
        Just(Some(JobType::Contract)),
        Just(None),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================================
    // Engine
    // ============================================================

    #[test]
    fn validation_is_deterministic(
        name in "[A-Za-z ]{0,20}",
        min in numeric_input(),
        max in numeric_input(),
        job in job_type()
    ) {
        let catalog = OptionsCatalog::default();
        let engine = SchemaEngine::new(&catalog);
        let mut record = base_record();
        record.full_name = name;
        record.min_salary = min;
        record.max_salary = max;
        record.job_type = job;

        let first = engine.validate(&record, today());
        let second = engine.validate(&record, today());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn full_time_salaries_within_bounds_pass(
        min in 30_000u32..=200_000,
        spread in 0u32..=170_000
    ) {
        let max = (min + spread).min(200_000);
        let catalog = OptionsCatalog::default();
        let mut record = base_record();
        record.min_salary = NumericInput::Number(f64::from(min));
        record.max_salary = NumericInput::Number(f64::from(max));

        let report = SchemaEngine::new(&catalog).validate(&record, today());
        prop_assert_eq!(report.message_for(FieldPath::MinSalary), None);
        prop_assert_eq!(report.message_for(FieldPath::MaxSalary), None);
    }

    #[test]
    fn inverted_salary_range_is_flagged(min in 1u32..1_000_000, gap in 1u32..1000) {
        let catalog = OptionsCatalog::default();
        let mut record = base_record();
        record.job_type = Some(JobType::PartTime);
        record.min_salary = NumericInput::Number(f64::from(min) + f64::from(gap));
        record.max_salary = NumericInput::Number(f64::from(min));

        let report = SchemaEngine::new(&catalog).validate(&record, today());
        prop_assert_eq!(
            report.message_for(FieldPath::MinSalary),
            Some("Minimum salary cannot exceed maximum salary")
        );
    }

    #[test]
    fn step_reports_only_contain_step_fields(
        name in "[A-Za-z ]{0,20}",
        hours_end in "[0-9]{2}:[0-9]{2}",
        number in 1u8..=5
    ) {
        let catalog = OptionsCatalog::default();
        let mut record = base_record();
        record.full_name = name;
        record.working_hours.end = hours_end;
        let step = Step::from_number(number).unwrap();

        let report = SchemaEngine::new(&catalog)
            .validate_fields(&record, today(), step.fields());
        for field in report.failing_fields() {
            prop_assert_eq!(Step::of_field(field), step);
        }
    }

    // ============================================================
    // Age and guardian
    // ============================================================

    #[test]
    fn age_counts_completed_years(years in 0i32..90, month in 1u32..=12, day in 1u32..=28) {
        let today = today();
        let dob = NaiveDate::from_ymd_opt(2024 - years - 1, month, day).unwrap();
        let age = FormCalendar::age_on(dob, today);

        let birthday_passed = (month, day) <= (6, 15);
        let expected = if birthday_passed { years + 1 } else { years };
        prop_assert_eq!(age, expected);
    }

    #[test]
    fn guardian_required_exactly_under_21(years in 18i32..40) {
        let catalog = OptionsCatalog::default();
        let mut record = base_record();
        record.dob = format!("{}-06-15", 2024 - years);

        let report = SchemaEngine::new(&catalog).validate(&record, today());
        let flagged = report.message_for(FieldPath::GuardianName).is_some();
        prop_assert_eq!(flagged, years < 21);
        prop_assert_eq!(report.message_for(FieldPath::GuardianPhone).is_some(), years < 21);
    }

    // ============================================================
    // Phone pattern
    // ============================================================

    #[test]
    fn generated_phones_are_accepted(phone in valid_phone()) {
        prop_assert!(is_valid_phone(&phone));
    }

    #[test]
    fn malformed_phones_are_rejected(phone in invalid_phone()) {
        prop_assert!(!is_valid_phone(&phone));
    }

    // ============================================================
    // Session
    // ============================================================

    #[test]
    fn skills_and_experiences_stay_in_lockstep(
        toggles in proptest::collection::vec(0usize..8, 0..30)
    ) {
        let mut session = WizardSession::default().with_today(today());
        session.set_field("department", serde_json::json!("Engineering")).unwrap();
        let offered = session.skill_options();

        for index in toggles {
            session.toggle_skill(&offered[index % offered.len()]).unwrap();
            prop_assert!(session.record().skills_in_lockstep());
        }

        session.set_field("department", serde_json::json!("Sales")).unwrap();
        prop_assert!(session.record().skills.is_empty());
        prop_assert!(session.record().experiences.is_empty());
    }

    #[test]
    fn edits_touch_their_top_level_field(index in 0usize..3, years in 0u8..40) {
        let mut session = WizardSession::default().with_today(today());
        session.set_field("department", serde_json::json!("Finance")).unwrap();
        session
            .set_field("skills", serde_json::json!(["Budgeting", "Excel", "Forecasting"]))
            .unwrap();
        session
            .set_field(&format!("experiences.{}.years", index), serde_json::json!(years))
            .unwrap();
        prop_assert!(session.is_touched(Field::Experiences));
        prop_assert!(session.record().skills_in_lockstep());
    }
}
