// Step 1: personal information
use crate::calendar::FormCalendar;
use crate::path::FieldPath;
use crate::patterns::{is_blank, is_valid_email, is_valid_phone, word_count, PHONE_EXAMPLE};
use crate::record::ProfilePicture;
use crate::schema::{
    FailureKind, FieldError, RuleContext, ALLOWED_PICTURE_TYPES, MAX_PICTURE_BYTES, MIN_AGE,
};

pub fn check_personal(ctx: &RuleContext) -> Vec<FieldError> {
    let record = ctx.record;
    let mut errors = Vec::new();

    if is_blank(&record.full_name) {
        errors.push(FieldError::new(
            FieldPath::FullName,
            FailureKind::Required,
            "Full name is required",
        ));
    } else if word_count(&record.full_name) < 2 {
        errors.push(FieldError::new(
            FieldPath::FullName,
            FailureKind::Format,
            "Full name must have at least 2 words",
        ));
    }

    if !is_valid_email(record.email.trim()) {
        errors.push(FieldError::new(
            FieldPath::Email,
            FailureKind::Format,
            "Invalid email address",
        ));
    }

    errors.extend(check_phone(FieldPath::PhoneNumber, &record.phone_number));
    errors.extend(check_dob(ctx));

    if let Some(picture) = &record.profile_picture {
        errors.extend(check_profile_picture(picture));
    }

    errors
}

/// Phone format check shared with the emergency contact step
pub fn check_phone(path: FieldPath, phone: &str) -> Option<FieldError> {
    if is_valid_phone(phone) {
        None
    } else {
        Some(FieldError::new(
            path,
            FailureKind::Format,
            format!("Phone must be like {}", PHONE_EXAMPLE),
        ))
    }
}

fn check_dob(ctx: &RuleContext) -> Option<FieldError> {
    let dob = &ctx.record.dob;
    if is_blank(dob) {
        return Some(FieldError::new(
            FieldPath::Dob,
            FailureKind::Required,
            "Date of birth is required",
        ));
    }

    let Some(date) = FormCalendar::parse_date(dob) else {
        return Some(FieldError::new(
            FieldPath::Dob,
            FailureKind::Format,
            "Invalid date",
        ));
    };

    if FormCalendar::age_on(date, ctx.today) < MIN_AGE {
        return Some(FieldError::new(
            FieldPath::Dob,
            FailureKind::Range,
            format!("You must be at least {} years old", MIN_AGE),
        ));
    }

    None
}

/// Type and size checks; both are reported when both fail
pub fn check_profile_picture(picture: &ProfilePicture) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let mime = picture.mime_type.trim().to_ascii_lowercase();
    if !ALLOWED_PICTURE_TYPES.contains(&mime.as_str()) {
        errors.push(FieldError::new(
            FieldPath::ProfilePicture,
            FailureKind::Format,
            "Only JPG/PNG files are allowed",
        ));
    }

    if picture.size > MAX_PICTURE_BYTES {
        errors.push(FieldError::new(
            FieldPath::ProfilePicture,
            FailureKind::Range,
            "File must be less than 2MB",
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

    fn messages(record: &ApplicationRecord) -> Vec<(String, String)> {
        let catalog = OptionsCatalog::default();
        check_personal(&context(record, &catalog, today()))
            .into_iter()
            .map(|e| (e.path.to_string(), e.message))
            .collect()
    }

    #[test]
    fn test_accepts_valid_personal_info() {
        assert!(messages(&valid_record()).is_empty());
    }

    #[test]
    fn test_full_name_requires_two_words() {
        let mut record = valid_record();
        record.full_name = "Cher".into();
        assert_eq!(
            messages(&record),
            vec![("fullName".to_string(), "Full name must have at least 2 words".to_string())]
        );

        record.full_name = "   ".into();
        assert_eq!(
            messages(&record),
            vec![("fullName".to_string(), "Full name is required".to_string())]
        );
    }

    #[test]
    fn test_rejects_bad_email_and_phone() {
        let mut record = valid_record();
        record.email = "not-an-email".into();
        record.phone_number = "123-456-7890".into();
        let found = messages(&record);
        assert!(found.contains(&("email".into(), "Invalid email address".into())));
        assert!(found.contains(&(
            "phoneNumber".into(),
            "Phone must be like +1-123-456-7890".into()
        )));
    }

    #[test]
    fn test_dob_checks() {
        let mut record = valid_record();
        record.dob = String::new();
        assert_eq!(messages(&record)[0].1, "Date of birth is required");

        record.dob = "31/12/1999".into();
        assert_eq!(messages(&record)[0].1, "Invalid date");

        // today() is 2024-06-15
        record.dob = "2006-07-01".into();
        assert_eq!(messages(&record)[0].1, "You must be at least 18 years old");

        record.dob = "2006-06-15".into();
        assert!(messages(&record).is_empty());
    }

    #[test]
    fn test_profile_picture_is_optional() {
        let mut record = valid_record();
        record.profile_picture = None;
        assert!(messages(&record).is_empty());
    }

    #[test]
    fn test_profile_picture_type_and_size() {
        let ok = ProfilePicture {
            name: "me.PNG".into(),
            mime_type: "image/png".into(),
            size: MAX_PICTURE_BYTES,
        };
        assert!(check_profile_picture(&ok).is_empty());

        let both_bad = ProfilePicture {
            name: "me.gif".into(),
            mime_type: "image/gif".into(),
            size: MAX_PICTURE_BYTES + 1,
        };
        let errors = check_profile_picture(&both_bad);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "Only JPG/PNG files are allowed");
        assert_eq!(errors[1].kind, FailureKind::Range);
    }
}
