//! Static form schemas binding field names to ordered validation rules.
//!
//! A schema is resolved once at construction and never mutated. Per field,
//! the first failing rule in declaration order is the reported reason;
//! validating a whole submission collects one violation per failing field.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::domain::AttachmentMetadata;
use super::validators::{self, ValidationError};

/// Accepted upload formats for supporting documents.
pub const SUPPORTED_ATTACHMENT_FORMATS: &[&str] = &["jpg", "jpeg", "png", "pdf"];

/// Default attachment size cap.
pub const DEFAULT_MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

/// Field name of the countersigned application form upload.
pub const SIGNED_FORM_FIELD: &str = "signed_form";

/// Ordered validation rule attached to a named field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Required,
    NoWhitespace,
    Alphabetic,
    AlphaNumeric,
    AlphabeticWithPunctuation,
    Numeric,
    PhoneNumber,
    NationalIdentityNumber,
    Email,
    MinLength(usize),
    MaxLength(usize),
}

impl FieldRule {
    /// Applies the rule to a raw field value.
    pub fn check(self, value: Option<&str>) -> Result<(), ValidationError> {
        match self {
            FieldRule::Required => match value {
                Some(value) if !value.is_empty() => Ok(()),
                _ => Err(ValidationError::Required),
            },
            FieldRule::NoWhitespace => validators::no_whitespace(value),
            FieldRule::Alphabetic => validators::alphabetic(value),
            FieldRule::AlphaNumeric => validators::alpha_numeric(value),
            FieldRule::AlphabeticWithPunctuation => validators::alphabetic_with_punctuation(value),
            FieldRule::Numeric => validators::numeric(value),
            FieldRule::PhoneNumber => validators::phone_number(value),
            FieldRule::NationalIdentityNumber => validators::national_identity_number(value),
            FieldRule::Email => validators::email(value),
            FieldRule::MinLength(limit) => min_length(value, limit),
            FieldRule::MaxLength(limit) => max_length(value, limit),
        }
    }
}

fn min_length(value: Option<&str>, limit: usize) -> Result<(), ValidationError> {
    match value {
        Some(value) if !value.is_empty() => {
            let actual = value.chars().count();
            if actual < limit {
                Err(ValidationError::MinLength { limit, actual })
            } else {
                Ok(())
            }
        }
        _ => Ok(()),
    }
}

fn max_length(value: Option<&str>, limit: usize) -> Result<(), ValidationError> {
    match value {
        Some(value) => {
            let actual = value.chars().count();
            if actual > limit {
                Err(ValidationError::MaxLength { limit, actual })
            } else {
                Ok(())
            }
        }
        None => Ok(()),
    }
}

/// A named form field with its ordered rule list.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub rules: Vec<FieldRule>,
}

impl FieldSpec {
    /// Runs the rules in order; the first failure wins.
    pub fn check(&self, value: Option<&str>) -> Result<(), ValidationError> {
        for rule in &self.rules {
            rule.check(value)?;
        }
        Ok(())
    }
}

/// A required supporting document slot.
#[derive(Debug, Clone)]
pub struct AttachmentSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub formats: &'static [&'static str],
}

impl AttachmentSpec {
    pub fn check(
        &self,
        attachment: Option<&AttachmentMetadata>,
        max_bytes: u64,
    ) -> Result<(), ValidationError> {
        validators::supported_attachment(attachment, self.formats, max_bytes)
    }
}

/// One field's failed check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {error}")]
pub struct FieldViolation {
    pub field: &'static str,
    pub error: ValidationError,
}

impl FieldViolation {
    /// Wire-facing shape carrying the stable reason code.
    pub fn to_view(&self) -> FieldViolationView {
        FieldViolationView {
            field: self.field,
            code: self.error.code(),
            message: self.error.to_string(),
        }
    }
}

/// Serialized violation payload returned by the HTTP surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolationView {
    pub field: &'static str,
    pub code: &'static str,
    pub message: String,
}

/// All field violations found in one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldViolations(Vec<FieldViolation>);

impl FieldViolations {
    pub fn push(&mut self, violation: FieldViolation) {
        self.0.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    pub fn to_views(&self) -> Vec<FieldViolationView> {
        self.0.iter().map(FieldViolation::to_view).collect()
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.0.iter().any(|violation| violation.field == field)
    }
}

impl fmt::Display for FieldViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|violation| violation.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

/// Errors from ad hoc single-field validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldCheckError {
    #[error("field {0} is not part of this form")]
    UnknownField(String),
    #[error(transparent)]
    Violation(#[from] FieldViolation),
}

/// Static field-to-rules mapping for one registration form.
#[derive(Debug, Clone)]
pub struct RegistrationSchema {
    fields: Vec<FieldSpec>,
    attachments: Vec<AttachmentSpec>,
    max_attachment_bytes: u64,
}

impl RegistrationSchema {
    /// Full agency registration form.
    pub fn standard() -> Self {
        Self {
            fields: standard_fields(),
            attachments: standard_attachments(),
            max_attachment_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
        }
    }

    /// Address-only update form used while a registration is active.
    pub fn address_update() -> Self {
        Self {
            fields: address_update_fields(),
            attachments: Vec::new(),
            max_attachment_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
        }
    }

    pub fn with_max_attachment_bytes(mut self, max_bytes: u64) -> Self {
        self.max_attachment_bytes = max_bytes;
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn attachments(&self) -> &[AttachmentSpec] {
        &self.attachments
    }

    pub fn max_attachment_bytes(&self) -> u64 {
        self.max_attachment_bytes
    }

    /// Validates one named field on its own.
    pub fn validate_field(&self, name: &str, value: Option<&str>) -> Result<(), FieldCheckError> {
        let spec = self
            .fields
            .iter()
            .find(|field| field.name == name)
            .ok_or_else(|| FieldCheckError::UnknownField(name.to_string()))?;
        spec.check(value).map_err(|error| {
            FieldCheckError::Violation(FieldViolation {
                field: spec.name,
                error,
            })
        })
    }

    /// Checks every schema field against the supplied lookup, collecting
    /// all violations.
    pub fn validate_values<'a, F>(&self, value_of: F) -> FieldViolations
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let mut violations = FieldViolations::default();
        for spec in &self.fields {
            if let Err(error) = spec.check(value_of(spec.name)) {
                violations.push(FieldViolation {
                    field: spec.name,
                    error,
                });
            }
        }
        violations
    }
}

fn standard_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec {
            name: "organization_name",
            label: "Organization Name",
            rules: vec![FieldRule::Required, FieldRule::NoWhitespace],
        },
        FieldSpec {
            name: "apartment",
            label: "Apartment / Suite",
            rules: vec![FieldRule::NoWhitespace],
        },
        FieldSpec {
            name: "street_name",
            label: "Street Name",
            rules: vec![FieldRule::Required, FieldRule::NoWhitespace],
        },
        FieldSpec {
            name: "locality",
            label: "Locality",
            rules: vec![FieldRule::Required, FieldRule::NoWhitespace],
        },
        FieldSpec {
            name: "village",
            label: "Village / Town",
            rules: vec![FieldRule::Required, FieldRule::NoWhitespace],
        },
        FieldSpec {
            name: "district",
            label: "District",
            rules: vec![FieldRule::Required, FieldRule::AlphabeticWithPunctuation],
        },
        FieldSpec {
            name: "postal_code",
            label: "Postal Code",
            rules: vec![
                FieldRule::Required,
                FieldRule::Numeric,
                FieldRule::MinLength(5),
                FieldRule::MaxLength(12),
            ],
        },
        FieldSpec {
            name: "country",
            label: "Country",
            rules: vec![FieldRule::Required],
        },
        FieldSpec {
            name: "position",
            label: "Position Held",
            rules: vec![FieldRule::Required, FieldRule::Alphabetic],
        },
        FieldSpec {
            name: "phone_number",
            label: "Mobile Phone",
            rules: vec![FieldRule::Required, FieldRule::PhoneNumber],
        },
        FieldSpec {
            name: "brn_number",
            label: "Business Registration Number",
            rules: vec![
                FieldRule::Required,
                FieldRule::AlphaNumeric,
                FieldRule::MinLength(9),
                FieldRule::MaxLength(9),
            ],
        },
        FieldSpec {
            name: "applicant_name",
            label: "Applicant Name",
            rules: vec![FieldRule::Required, FieldRule::AlphabeticWithPunctuation],
        },
        FieldSpec {
            name: "national_id",
            label: "National Identity Number",
            rules: vec![
                FieldRule::Required,
                FieldRule::NationalIdentityNumber,
                FieldRule::AlphaNumeric,
                FieldRule::MinLength(14),
                FieldRule::MaxLength(14),
            ],
        },
        FieldSpec {
            name: "email",
            label: "Email Address",
            rules: vec![
                FieldRule::Required,
                FieldRule::Email,
                FieldRule::MinLength(3),
                FieldRule::MaxLength(320),
            ],
        },
    ]
}

fn address_update_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec {
            name: "apartment",
            label: "Apartment / Suite",
            rules: vec![FieldRule::Required, FieldRule::NoWhitespace],
        },
        FieldSpec {
            name: "street_name",
            label: "Street Name",
            rules: vec![FieldRule::Required, FieldRule::NoWhitespace],
        },
        FieldSpec {
            name: "locality",
            label: "Locality",
            rules: vec![FieldRule::Required, FieldRule::NoWhitespace],
        },
        FieldSpec {
            name: "village",
            label: "Village / Town",
            rules: vec![FieldRule::Required, FieldRule::NoWhitespace],
        },
        FieldSpec {
            name: "district",
            label: "District",
            rules: vec![FieldRule::Required, FieldRule::AlphabeticWithPunctuation],
        },
        FieldSpec {
            name: "postal_code",
            label: "Postal Code",
            rules: vec![
                FieldRule::Required,
                FieldRule::Numeric,
                FieldRule::MinLength(5),
                FieldRule::MaxLength(12),
            ],
        },
        FieldSpec {
            name: "phone_number",
            label: "Mobile Phone",
            rules: vec![FieldRule::Required, FieldRule::PhoneNumber],
        },
    ]
}

fn standard_attachments() -> Vec<AttachmentSpec> {
    vec![
        AttachmentSpec {
            name: "identity_card",
            label: "Identity card of the applicant",
            formats: SUPPORTED_ATTACHMENT_FORMATS,
        },
        AttachmentSpec {
            name: "business_registration_certificate",
            label: "Business registration certificate",
            formats: SUPPORTED_ATTACHMENT_FORMATS,
        },
        AttachmentSpec {
            name: "authorized_signatory",
            label: "Letter designating the authorized signatory",
            formats: SUPPORTED_ATTACHMENT_FORMATS,
        },
        AttachmentSpec {
            name: "notarized_board_resolution",
            label: "Notarized board resolution",
            formats: SUPPORTED_ATTACHMENT_FORMATS,
        },
        AttachmentSpec {
            name: "power_of_attorney",
            label: "Power of attorney",
            formats: SUPPORTED_ATTACHMENT_FORMATS,
        },
        AttachmentSpec {
            name: "data_protection_certificate",
            label: "Registration certificate for controller",
            formats: SUPPORTED_ATTACHMENT_FORMATS,
        },
    ]
}
