//! Admission guard for incoming registration submissions.
//!
//! Every submission passes through here before a profile is persisted.
//! The guard collects all field and attachment violations in one pass so
//! applicants see the complete list, then checks the terms declaration.

use thiserror::Error;

use super::domain::{
    trimmed_text, AgencyProfile, ApplicantDetails, OrganizationAddress, RegistrationId,
    RegistrationSubmission,
};
use super::schema::{
    FieldViolation, FieldViolations, RegistrationSchema, SIGNED_FORM_FIELD,
    SUPPORTED_ATTACHMENT_FORMATS,
};
use super::subscription::SubscriptionError;
use super::validators;

/// Reasons a submission is refused before persistence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationViolation {
    #[error("submission has invalid fields: {0}")]
    InvalidFields(FieldViolations),
    #[error("terms and conditions must be accepted")]
    TermsNotAccepted,
    #[error(transparent)]
    Subscription(#[from] SubscriptionError),
}

/// Validates submissions against the registration form schema.
#[derive(Debug, Clone)]
pub struct RegistrationGuard {
    schema: RegistrationSchema,
}

impl Default for RegistrationGuard {
    fn default() -> Self {
        Self {
            schema: RegistrationSchema::standard(),
        }
    }
}

impl RegistrationGuard {
    pub fn from_schema(schema: RegistrationSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &RegistrationSchema {
        &self.schema
    }

    /// Validates a submission and shapes it into a profile awaiting an
    /// assigned registration id.
    pub fn profile_from_submission(
        &self,
        submission: RegistrationSubmission,
    ) -> Result<AgencyProfile, RegistrationViolation> {
        let mut violations = self
            .schema
            .validate_values(|name| submission.field_value(name));

        for spec in self.schema.attachments() {
            if let Err(error) = spec.check(
                submission.attachments.get(spec.name),
                self.schema.max_attachment_bytes(),
            ) {
                violations.push(FieldViolation {
                    field: spec.name,
                    error,
                });
            }
        }

        if let Err(error) = validators::supported_attachment(
            submission.signed_form.as_ref(),
            SUPPORTED_ATTACHMENT_FORMATS,
            self.schema.max_attachment_bytes(),
        ) {
            violations.push(FieldViolation {
                field: SIGNED_FORM_FIELD,
                error,
            });
        }

        if !violations.is_empty() {
            return Err(RegistrationViolation::InvalidFields(violations));
        }

        if !submission.terms_accepted {
            return Err(RegistrationViolation::TermsNotAccepted);
        }

        let mut attachments = submission.attachments.clone();
        if let Some(signed_form) = submission.signed_form.clone() {
            attachments.insert(SIGNED_FORM_FIELD.to_string(), signed_form);
        }

        Ok(AgencyProfile {
            registration_id: RegistrationId("pending".to_string()),
            organization_name: trimmed_text(&submission.organization_name),
            brn_number: trimmed_text(&submission.brn_number),
            address: OrganizationAddress {
                apartment: trimmed_text(&submission.apartment),
                street_name: trimmed_text(&submission.street_name),
                locality: trimmed_text(&submission.locality),
                village: trimmed_text(&submission.village),
                district: trimmed_text(&submission.district),
                postal_code: trimmed_text(&submission.postal_code),
                country: trimmed_text(&submission.country),
            },
            applicant: ApplicantDetails {
                applicant_name: trimmed_text(&submission.applicant_name),
                position: trimmed_text(&submission.position),
                national_id: trimmed_text(&submission.national_id),
                phone_number: trimmed_text(&submission.phone_number),
                email: trimmed_text(&submission.email),
            },
            attachments,
        })
    }
}
