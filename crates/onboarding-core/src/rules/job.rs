// Step 2: job details
use crate::calendar::FormCalendar;
use crate::coerce::{coerce_number, Coerced};
use crate::path::FieldPath;
use crate::patterns::{char_len, is_blank};
use crate::record::NumericInput;
use crate::schema::{
    FailureKind, FieldError, RuleContext, MIN_POSITION_TITLE_CHARS, MIN_SALARY_INPUT,
    START_WINDOW_DAYS,
};

pub fn check_job_details(ctx: &RuleContext) -> Vec<FieldError> {
    let record = ctx.record;
    let mut errors = Vec::new();

    if is_blank(&record.department) {
        errors.push(FieldError::new(
            FieldPath::Department,
            FailureKind::Required,
            "Department is required",
        ));
    } else if ctx.catalog.department(&record.department).is_none() {
        errors.push(FieldError::new(
            FieldPath::Department,
            FailureKind::Format,
            "Unknown department",
        ));
    }

    if char_len(record.position_title.trim()) < MIN_POSITION_TITLE_CHARS {
        errors.push(FieldError::new(
            FieldPath::PositionTitle,
            FailureKind::Format,
            format!(
                "Position title must be at least {} characters",
                MIN_POSITION_TITLE_CHARS
            ),
        ));
    }

    errors.extend(check_start_date(ctx));

    if record.job_type.is_none() {
        errors.push(FieldError::new(
            FieldPath::JobType,
            FailureKind::Required,
            "Job type is required",
        ));
    }

    errors.extend(check_salary_input(
        FieldPath::MaxSalary,
        &record.max_salary,
        "Maximum salary must be at least 1",
    ));
    errors.extend(check_salary_input(
        FieldPath::MinSalary,
        &record.min_salary,
        "Minimum salary must be at least 1",
    ));

    if is_blank(&record.manager) {
        errors.push(FieldError::new(
            FieldPath::Manager,
            FailureKind::Required,
            "Manager is required",
        ));
    }

    errors
}

fn check_start_date(ctx: &RuleContext) -> Option<FieldError> {
    let start_date = &ctx.record.start_date;
    if is_blank(start_date) {
        return Some(FieldError::new(
            FieldPath::StartDate,
            FailureKind::Required,
            "Start date is required",
        ));
    }

    let Some(date) = FormCalendar::parse_date(start_date) else {
        return Some(FieldError::new(
            FieldPath::StartDate,
            FailureKind::Format,
            "Invalid date",
        ));
    };

    let days = FormCalendar::days_from(ctx.today, date);
    if !(0..=START_WINDOW_DAYS).contains(&days) {
        return Some(FieldError::new(
            FieldPath::StartDate,
            FailureKind::Range,
            format!(
                "Start date must be within 0–{} days from today",
                START_WINDOW_DAYS
            ),
        ));
    }

    None
}

/// Per-field salary check. A missing value is left to the salary cross-field rule.
fn check_salary_input(
    path: FieldPath,
    input: &NumericInput,
    below_minimum: &str,
) -> Option<FieldError> {
    match coerce_number(input) {
        Coerced::Missing => None,
        Coerced::Invalid => Some(FieldError::new(
            path,
            FailureKind::Coercion,
            "Please enter valid number",
        )),
        Coerced::Value(v) if v < MIN_SALARY_INPUT => {
            Some(FieldError::new(path, FailureKind::Range, below_minimum))
        }
        Coerced::Value(_) => None,
    }
}
