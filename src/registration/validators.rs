//! Field validators for the agency registration form.
//!
//! Every validator is a pure function over an optional raw value and fails
//! with exactly one named reason. Format validators treat null and the empty
//! string as valid: presence is the job of the separate required rule, so
//! these only reject malformed non-empty input. The identity-number and
//! attachment validators are the exceptions and enforce presence themselves.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::domain::AttachmentMetadata;

static ALPHABETIC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]+(\s[a-zA-Z]+)*\s?$").expect("valid regex pattern"));

static ALPHA_NUMERIC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9\s]*$").expect("valid regex pattern"));

static ALPHA_PUNCTUATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[a-zA-Z][a-zA-Z\s!@#$%^&*(),.?":{}|<>+-]*$"#).expect("valid regex pattern")
});

static DIGITS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+$").expect("valid regex pattern"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{7,8}$").expect("valid regex pattern"));

static IDENTITY_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]\d{12}[A-Za-z\d]$").expect("valid regex pattern"));

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid regex pattern")
});

/// Special characters a strong password must draw from.
const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// National identity numbers are always fourteen characters.
const IDENTITY_NUMBER_LENGTH: usize = 14;

/// Single named reason attached to a failing field check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("value is required")]
    Required,
    #[error("value contains only whitespace")]
    Whitespace,
    #[error("value must be letters in single-space separated words")]
    Alphabet,
    #[error("value must start with a letter or digit and use only letters, digits, and spaces")]
    InvalidAlphaNumeric,
    #[error("value must start with a letter and use only letters, spaces, and permitted punctuation")]
    InvalidChars,
    #[error("value must contain only digits")]
    InvalidNumber,
    #[error("phone number must be exactly 7 or 8 digits")]
    InvalidPhoneNumber,
    #[error("national identity number must be exactly 14 characters")]
    InvalidLength,
    #[error("national identity number must be a letter, twelve digits, then a letter or digit")]
    InvalidNin,
    #[error("password must mix uppercase, lowercase, digit, and special characters")]
    InvalidPassword,
    #[error("'{value}' is not a valid email address")]
    InvalidEmail { value: String },
    #[error("attachment is required")]
    AttachmentRequired,
    #[error("attachment format is not supported")]
    UnsupportedFormat,
    #[error("file type is not supported")]
    InvalidFileType,
    #[error("attachment exceeds the size limit")]
    FileSizeExceeded,
    #[error("value must be at least {limit} characters, got {actual}")]
    MinLength { limit: usize, actual: usize },
    #[error("value must be at most {limit} characters, got {actual}")]
    MaxLength { limit: usize, actual: usize },
}

impl ValidationError {
    /// Stable machine-readable code carried in violation payloads.
    pub const fn code(&self) -> &'static str {
        match self {
            ValidationError::Required => "required",
            ValidationError::Whitespace => "whitespace",
            ValidationError::Alphabet => "alphabet",
            ValidationError::InvalidAlphaNumeric => "invalidAlphaNumeric",
            ValidationError::InvalidChars => "invalidChars",
            ValidationError::InvalidNumber => "invalidNumber",
            ValidationError::InvalidPhoneNumber => "invalidPhoneNumber",
            ValidationError::InvalidLength => "invalidLength",
            ValidationError::InvalidNin => "invalidNIN",
            ValidationError::InvalidPassword => "invalidPassword",
            ValidationError::InvalidEmail { .. } => "invalidEmail",
            ValidationError::AttachmentRequired => "attachmentRequired",
            ValidationError::UnsupportedFormat => "unsupportedFormat",
            ValidationError::InvalidFileType => "invalidFileType",
            ValidationError::FileSizeExceeded => "fileSizeExceeded",
            ValidationError::MinLength { .. } => "minlength",
            ValidationError::MaxLength { .. } => "maxlength",
        }
    }
}

fn checked_format(
    value: Option<&str>,
    pattern: &Regex,
    reason: ValidationError,
) -> Result<(), ValidationError> {
    match value {
        Some(value) if !value.is_empty() && !pattern.is_match(value) => Err(reason),
        _ => Ok(()),
    }
}

/// Rejects values that contain characters but reduce to nothing once
/// trimmed.
pub fn no_whitespace(value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(value) if !value.is_empty() && value.trim().is_empty() => {
            Err(ValidationError::Whitespace)
        }
        _ => Ok(()),
    }
}

/// Letters only, grouped into single-space separated words. A single
/// trailing space is tolerated.
pub fn alphabetic(value: Option<&str>) -> Result<(), ValidationError> {
    checked_format(value, &ALPHABETIC_PATTERN, ValidationError::Alphabet)
}

/// Letters, digits, and spaces; the first character must be a letter or
/// digit.
pub fn alpha_numeric(value: Option<&str>) -> Result<(), ValidationError> {
    checked_format(
        value,
        &ALPHA_NUMERIC_PATTERN,
        ValidationError::InvalidAlphaNumeric,
    )
}

/// Letters plus a fixed punctuation set; the first character must be a
/// letter.
pub fn alphabetic_with_punctuation(value: Option<&str>) -> Result<(), ValidationError> {
    checked_format(
        value,
        &ALPHA_PUNCTUATION_PATTERN,
        ValidationError::InvalidChars,
    )
}

/// Digits only.
pub fn numeric(value: Option<&str>) -> Result<(), ValidationError> {
    checked_format(value, &DIGITS_PATTERN, ValidationError::InvalidNumber)
}

/// Exactly 7 or 8 digits.
pub fn phone_number(value: Option<&str>) -> Result<(), ValidationError> {
    checked_format(value, &PHONE_PATTERN, ValidationError::InvalidPhoneNumber)
}

/// Fourteen characters shaped letter + twelve digits + letter-or-digit.
/// The length check runs first and reports its own reason.
pub fn national_identity_number(value: Option<&str>) -> Result<(), ValidationError> {
    let value = value.unwrap_or_default();
    if value.chars().count() != IDENTITY_NUMBER_LENGTH {
        return Err(ValidationError::InvalidLength);
    }
    if !IDENTITY_NUMBER_PATTERN.is_match(value) {
        return Err(ValidationError::InvalidNin);
    }
    Ok(())
}

/// At least one uppercase letter, one lowercase letter, one digit, and one
/// special character.
pub fn password_strength(value: Option<&str>) -> Result<(), ValidationError> {
    let value = match value {
        Some(value) if !value.is_empty() => value,
        _ => return Ok(()),
    };

    let has_uppercase = value.chars().any(|c| c.is_ascii_uppercase());
    let has_lowercase = value.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_special = value.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c));

    if has_uppercase && has_lowercase && has_digit && has_special {
        Ok(())
    } else {
        Err(ValidationError::InvalidPassword)
    }
}

/// Basic `local@domain.tld` shape; the rejected value travels with the
/// error.
pub fn email(value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(value) if !value.is_empty() && !EMAIL_PATTERN.is_match(value) => {
            Err(ValidationError::InvalidEmail {
                value: value.to_string(),
            })
        }
        _ => Ok(()),
    }
}

/// Extension after the final dot, lowercased. A name without a dot yields
/// the whole name, which then fails the allow-list check.
fn extension(file_name: &str) -> String {
    file_name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Required attachment with an extension allow-list and a size cap.
pub fn supported_attachment(
    attachment: Option<&AttachmentMetadata>,
    formats: &[&str],
    max_bytes: u64,
) -> Result<(), ValidationError> {
    let attachment = match attachment {
        Some(attachment) => attachment,
        None => return Err(ValidationError::AttachmentRequired),
    };

    let extension = extension(&attachment.file_name);
    if !formats.iter().any(|format| extension == *format) {
        return Err(ValidationError::UnsupportedFormat);
    }
    if attachment.size_bytes > max_bytes {
        return Err(ValidationError::FileSizeExceeded);
    }
    Ok(())
}

/// Extension allow-list check for an already-picked file. A missing file
/// passes; presence is the caller's concern here.
pub fn file_type(
    attachment: Option<&AttachmentMetadata>,
    formats: &[&str],
) -> Result<(), ValidationError> {
    let attachment = match attachment {
        Some(attachment) => attachment,
        None => return Ok(()),
    };

    let extension = extension(&attachment.file_name);
    if formats.iter().any(|format| extension == *format) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFileType)
    }
}
