// Step 4: emergency contact
use crate::path::FieldPath;
use crate::patterns::is_blank;
use crate::rules::personal::check_phone;
use crate::schema::{FailureKind, FieldError, RuleContext};

pub fn check_emergency_contact(ctx: &RuleContext) -> Vec<FieldError> {
    let contact = &ctx.record.emergency_contact;
    let mut errors = Vec::new();

    if is_blank(&contact.contact_name) {
        errors.push(FieldError::new(
            FieldPath::ContactName,
            FailureKind::Required,
            "Contact name is required",
        ));
    }

    if is_blank(&contact.relation) {
        errors.push(FieldError::new(
            FieldPath::Relation,
            FailureKind::Required,
            "Relationship is required",
        ));
    }

    errors.extend(check_phone(FieldPath::ContactPhone, &contact.phone_number));

    // Whether a guardian is required at all is a cross-field rule; a phone
    // that was given still has to be well formed.
    if !is_blank(&contact.guardian_contact_phone) {
        errors.extend(check_phone(
            FieldPath::GuardianPhone,
            &contact.guardian_contact_phone,
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionsCatalog;
    use crate::record::ApplicationRecord;
    use crate::test_support::{context, today, valid_record};

    fn check(record: &ApplicationRecord) -> Vec<FieldError> {
        let catalog = OptionsCatalog::default();
        check_emergency_contact(&context(record, &catalog, today()))
    }

    #[test]
    fn test_accepts_valid_contact() {
        assert!(check(&valid_record()).is_empty());
    }

    #[test]
    fn test_empty_contact_reports_each_field() {
        let mut record = valid_record();
        record.emergency_contact = Default::default();
        let paths: Vec<FieldPath> = check(&record).into_iter().map(|e| e.path).collect();
        assert_eq!(
            paths,
            vec![
                FieldPath::ContactName,
                FieldPath::Relation,
                FieldPath::ContactPhone
            ]
        );
    }

    #[test]
    fn test_guardian_phone_format_when_given() {
        let mut record = valid_record();
        record.emergency_contact.guardian_contact_phone = "555-1234".into();
        let errors = check(&record);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, FieldPath::GuardianPhone);
    }
}
