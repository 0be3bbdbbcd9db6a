use crate::steps::Step;
use thiserror::Error;

/// Errors from misusing the wizard session API.
///
/// Validation failures are not errors; they come back as data in a
/// [`crate::ValidationReport`].
#[derive(Error, Debug)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {path}: {reason}")]
    InvalidValue { path: String, reason: String },

    #[error("Field is read-only: {0}")]
    ReadOnlyField(String),

    #[error("Invalid step: {0} (expected 1-5)")]
    InvalidStep(u8),

    #[error("Already on the last step")]
    NoNextStep,

    #[error("Submit is only available on the review step (current step: {0})")]
    SubmitUnavailable(Step),

    #[error("Skill {skill} is not offered for department {department:?}")]
    UnknownSkill { skill: String, department: String },

    #[error("Submission failed: {0}")]
    Sink(String),
}

impl FormError {
    pub(crate) fn invalid_value(path: impl ToString, reason: impl Into<String>) -> Self {
        FormError::InvalidValue {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
