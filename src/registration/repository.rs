use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{AgencyProfile, AgencyStatus, RegistrationId};
use super::subscription::SubscriptionOrder;

/// Repository record pairing the profile with its lifecycle status and the
/// derived subscription order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub profile: AgencyProfile,
    pub status: AgencyStatus,
    pub order: SubscriptionOrder,
}

impl RegistrationRecord {
    pub fn status_view(&self) -> RegistrationStatusView {
        RegistrationStatusView {
            registration_id: self.profile.registration_id.clone(),
            status: self.status.label(),
            combined_plan_id: self.order.combined_plan_id,
            total_with_surcharge: self.order.total_with_surcharge,
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait RegistrationRepository: Send + Sync {
    fn insert(&self, record: RegistrationRecord) -> Result<RegistrationRecord, RepositoryError>;
    fn update(&self, record: RegistrationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &RegistrationId) -> Result<Option<RegistrationRecord>, RepositoryError>;
    fn pending(&self, limit: usize) -> Result<Vec<RegistrationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("registration already exists")]
    Conflict,
    #[error("registration not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing outbound notice hooks (e.g., mail or queue adapters).
pub trait NoticePublisher: Send + Sync {
    fn publish(&self, notice: RegistrationNotice) -> Result<(), NoticeError>;
}

/// Notice payload so routes/tests can assert integration boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationNotice {
    pub template: String,
    pub registration_id: RegistrationId,
    pub details: BTreeMap<String, String>,
}

/// Notice dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NoticeError {
    #[error("notice transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized representation of a registration's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationStatusView {
    pub registration_id: RegistrationId,
    pub status: &'static str,
    pub combined_plan_id: u8,
    pub total_with_surcharge: f64,
}
