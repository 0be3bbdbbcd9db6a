// Rules that depend on more than one field
use crate::calendar::FormCalendar;
use crate::coerce::coerce_number;
use crate::path::FieldPath;
use crate::patterns::{format_amount, is_blank};
use crate::record::JobType;
use crate::schema::{
    FailureKind, FieldError, RuleContext, SalaryBounds, CONTRACT_RATE, FULL_TIME_SALARY,
    GUARDIAN_AGE,
};

/// Salary range by job type, then min <= max.
///
/// A missing or non-numeric bound short-circuits the remaining salary checks.
pub fn check_salary(ctx: &RuleContext) -> Vec<FieldError> {
    let record = ctx.record;
    let mut errors = Vec::new();

    let min = coerce_number(&record.min_salary).value();
    let max = coerce_number(&record.max_salary).value();
    let (Some(min), Some(max)) = (min, max) else {
        errors.push(FieldError::new(
            FieldPath::MinSalary,
            FailureKind::Required,
            "Salary expectation is required",
        ));
        return errors;
    };

    match record.job_type {
        Some(JobType::FullTime) => {
            errors.extend(check_bounds(min, max, FULL_TIME_SALARY, "Full-time", "salary"))
        }
        Some(JobType::Contract) => {
            errors.extend(check_bounds(min, max, CONTRACT_RATE, "Contract", "hourly rate"))
        }
        Some(JobType::PartTime) | None => {}
    }

    if min > max {
        errors.push(FieldError::new(
            FieldPath::MinSalary,
            FailureKind::Consistency,
            "Minimum salary cannot exceed maximum salary",
        ));
    }

    errors
}

fn check_bounds(
    min: f64,
    max: f64,
    bounds: SalaryBounds,
    label: &str,
    unit: &str,
) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if min < bounds.min {
        errors.push(FieldError::new(
            FieldPath::MinSalary,
            FailureKind::Range,
            format!(
                "{} minimum {} must be at least ${}",
                label,
                unit,
                format_amount(bounds.min)
            ),
        ));
    }
    if max > bounds.max {
        errors.push(FieldError::new(
            FieldPath::MaxSalary,
            FailureKind::Range,
            format!(
                "{} maximum {} cannot exceed ${}",
                label,
                unit,
                format_amount(bounds.max)
            ),
        ));
    }
    errors
}

/// A chosen manager must belong to the chosen department
pub fn check_manager_department(ctx: &RuleContext) -> Option<FieldError> {
    let record = ctx.record;
    if is_blank(&record.manager) || is_blank(&record.department) {
        return None;
    }
    if ctx
        .catalog
        .manager_in_department(&record.department, &record.manager)
    {
        None
    } else {
        Some(FieldError::new(
            FieldPath::Manager,
            FailureKind::Consistency,
            "Manager must belong to the selected department",
        ))
    }
}

/// Selected skills must be offered by the department, and experience
/// entries must mirror the selection.
pub fn check_skill_department(ctx: &RuleContext) -> Vec<FieldError> {
    let record = ctx.record;
    let mut errors = Vec::new();

    if !is_blank(&record.department) {
        for skill in &record.skills {
            if !ctx.catalog.skill_in_department(&record.department, skill) {
                errors.push(FieldError::new(
                    FieldPath::Skills,
                    FailureKind::Consistency,
                    format!("{} is not offered for {}", skill, record.department),
                ));
            }
        }
    }

    if !record.skills_in_lockstep() {
        errors.push(FieldError::new(
            FieldPath::Experiences,
            FailureKind::Consistency,
            "Experience entries must match selected skills",
        ));
    }

    errors
}

/// End time must come after start time on the same day
pub fn check_working_hours(ctx: &RuleContext) -> Option<FieldError> {
    let hours = &ctx.record.working_hours;
    let start = FormCalendar::parse_time(&hours.start)?;
    let end = FormCalendar::parse_time(&hours.end)?;

    if FormCalendar::is_after_same_day(start, end) {
        None
    } else {
        Some(FieldError::new(
            FieldPath::WorkingHoursEnd,
            FailureKind::Consistency,
            "End time must be after start time",
        ))
    }
}

/// Applicants under 21 must name a guardian. Unknown age means no requirement.
pub fn check_guardian(ctx: &RuleContext) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let Some(age) = ctx.age else {
        return errors;
    };
    if age >= GUARDIAN_AGE {
        return errors;
    }

    let contact = &ctx.record.emergency_contact;
    if is_blank(&contact.guardian_contact_name) {
        errors.push(FieldError::new(
            FieldPath::GuardianName,
            FailureKind::ConditionalRequirement,
            format!(
                "Guardian name is required for applicants under {}",
                GUARDIAN_AGE
            ),
        ));
    }
    if is_blank(&contact.guardian_contact_phone) {
        errors.push(FieldError::new(
            FieldPath::GuardianPhone,
            FailureKind::ConditionalRequirement,
            format!(
                "Guardian phone is required for applicants under {}",
                GUARDIAN_AGE
            ),
        ));
    }
    errors
}
