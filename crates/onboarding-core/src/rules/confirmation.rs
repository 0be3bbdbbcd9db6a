// Step 5: confirmation checkbox
use crate::path::FieldPath;
use crate::schema::{FailureKind, FieldError, RuleContext};

pub fn check_confirmation(ctx: &RuleContext) -> Option<FieldError> {
    if ctx.record.confirm_information {
        None
    } else {
        Some(FieldError::new(
            FieldPath::ConfirmInformation,
            FailureKind::Required,
            "You must confirm the information is correct",
        ))
    }
}
