//! Agency registration intake, field validation, and subscription derivation.
//!
//! The module mirrors the paper workflow it replaces: a submission is checked
//! field by field against the registration form schema, supporting documents
//! are verified, the selected subscriptions are folded into a combined plan
//! with a surcharge-inclusive total, and the accepted profile is persisted
//! behind a repository trait and exposed through an axum router.

pub mod domain;
pub mod guard;
pub mod repository;
pub mod router;
pub mod schema;
pub mod service;
pub mod subscription;
pub mod summary;
pub mod validators;

#[cfg(test)]
mod tests;

pub use domain::{
    AddressUpdate, AgencyProfile, AgencyStatus, ApplicantDetails, AttachmentMetadata,
    OrganizationAddress, RegistrationId, RegistrationSubmission,
};
pub use guard::{RegistrationGuard, RegistrationViolation};
pub use repository::{
    NoticeError, NoticePublisher, RegistrationNotice, RegistrationRecord, RegistrationRepository,
    RegistrationStatusView, RepositoryError,
};
pub use router::registration_router;
pub use schema::{
    AttachmentSpec, FieldCheckError, FieldRule, FieldSpec, FieldViolation, FieldViolationView,
    FieldViolations, RegistrationSchema, DEFAULT_MAX_ATTACHMENT_BYTES, SIGNED_FORM_FIELD,
    SUPPORTED_ATTACHMENT_FORMATS,
};
pub use service::{RegistrationConfig, RegistrationService, RegistrationServiceError};
pub use subscription::{
    combined_plan_id, total_with_surcharge, OrderLine, SubscriptionError, SubscriptionOffering,
    SubscriptionOrder, SubscriptionSelection, BASE_SUBSCRIPTION_IDS, SURCHARGE_RATE,
};
pub use summary::{
    DocumentChecklistItem, RegistrationSummary, SubscriptionLine, SummaryRow, APPLICATION_TITLE,
};
