use super::common::*;

use crate::registration::domain::RegistrationId;
use crate::registration::guard::{RegistrationGuard, RegistrationViolation};
use crate::registration::schema::{RegistrationSchema, SIGNED_FORM_FIELD};
use crate::registration::validators::ValidationError;

#[test]
fn accepted_submission_is_trimmed_into_a_profile() {
    let guard = RegistrationGuard::default();
    let mut submission = submission();
    submission.organization_name = Some("  Apex Data Services Ltd  ".to_string());
    submission.street_name = Some(" Royal Road ".to_string());
    submission.country = Some(" Mauritius ".to_string());
    submission.apartment = None;

    let profile = guard
        .profile_from_submission(submission)
        .expect("submission passes");

    assert_eq!(profile.registration_id, RegistrationId("pending".to_string()));
    assert_eq!(profile.organization_name, "Apex Data Services Ltd");
    assert_eq!(profile.address.street_name, "Royal Road");
    assert_eq!(profile.address.country, "Mauritius");
    assert_eq!(profile.address.apartment, "");
    assert_eq!(profile.applicant.applicant_name, "Priya Ramsamy");
    assert_eq!(profile.applicant.email, "dpo@apexdata.mu");

    // The countersigned form joins the six document slots.
    assert_eq!(profile.attachments.len(), 7);
    assert!(profile.attachments.contains_key(SIGNED_FORM_FIELD));
    assert!(profile.attachments.contains_key("identity_card"));
}

#[test]
fn violations_are_collected_across_fields_and_attachments() {
    let guard = RegistrationGuard::default();
    let mut submission = submission();
    submission.street_name = Some("   ".to_string());
    submission.postal_code = Some("74A".to_string());
    submission.attachments.remove("identity_card");
    submission.attachments.insert(
        "business_registration_certificate".to_string(),
        attachment("brn-certificate.svg", 1024),
    );

    match guard.profile_from_submission(submission) {
        Err(RegistrationViolation::InvalidFields(violations)) => {
            assert_eq!(violations.len(), 4);
            assert!(violations.contains_field("street_name"));
            assert!(violations.contains_field("postal_code"));
            assert!(violations.contains_field("identity_card"));
            assert!(violations.contains_field("business_registration_certificate"));
        }
        other => panic!("expected field violations, got {other:?}"),
    }
}

#[test]
fn attachment_size_cap_applies_to_every_slot() {
    let guard =
        RegistrationGuard::from_schema(RegistrationSchema::standard().with_max_attachment_bytes(1024));

    match guard.profile_from_submission(submission()) {
        Err(RegistrationViolation::InvalidFields(violations)) => {
            assert_eq!(violations.len(), 7);
            for violation in violations.violations() {
                assert_eq!(violation.error, ValidationError::FileSizeExceeded);
            }
        }
        other => panic!("expected size violations, got {other:?}"),
    }
}

#[test]
fn countersigned_form_is_required() {
    let guard = RegistrationGuard::default();
    let mut submission = submission();
    submission.signed_form = None;

    match guard.profile_from_submission(submission) {
        Err(RegistrationViolation::InvalidFields(violations)) => {
            assert_eq!(violations.len(), 1);
            assert!(violations.contains_field(SIGNED_FORM_FIELD));
            assert_eq!(
                violations.violations()[0].error,
                ValidationError::AttachmentRequired
            );
        }
        other => panic!("expected a signed form violation, got {other:?}"),
    }
}

#[test]
fn terms_are_checked_once_fields_pass() {
    let guard = RegistrationGuard::default();

    match guard.profile_from_submission(unaccepted_terms_submission()) {
        Err(RegistrationViolation::TermsNotAccepted) => {}
        other => panic!("expected a terms violation, got {other:?}"),
    }

    // Field violations are reported first even when the terms box is also
    // unchecked.
    let mut submission = unaccepted_terms_submission();
    submission.street_name = Some("   ".to_string());
    match guard.profile_from_submission(submission) {
        Err(RegistrationViolation::InvalidFields(violations)) => {
            assert!(violations.contains_field("street_name"));
        }
        other => panic!("expected field violations, got {other:?}"),
    }
}
