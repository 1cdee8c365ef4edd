use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::domain::{
    trimmed_text, AddressUpdate, AgencyStatus, RegistrationId, RegistrationSubmission,
};
use super::guard::{RegistrationGuard, RegistrationViolation};
use super::repository::{
    NoticeError, NoticePublisher, RegistrationNotice, RegistrationRecord, RegistrationRepository,
    RegistrationStatusView, RepositoryError,
};
use super::schema::RegistrationSchema;
use super::subscription::{SubscriptionOffering, SubscriptionOrder};

/// Catalog and limits the service is provisioned with.
#[derive(Debug, Clone)]
pub struct RegistrationConfig {
    pub offerings: Vec<SubscriptionOffering>,
    pub max_attachment_bytes: u64,
}

/// Service composing the admission guard, repository, and order derivation.
pub struct RegistrationService<R, N> {
    guard: Arc<RegistrationGuard>,
    address_schema: Arc<RegistrationSchema>,
    repository: Arc<R>,
    notices: Arc<N>,
    offerings: Arc<Vec<SubscriptionOffering>>,
}

static REGISTRATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_registration_id() -> RegistrationId {
    let id = REGISTRATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RegistrationId(format!("reg-{id:06}"))
}

impl<R, N> RegistrationService<R, N>
where
    R: RegistrationRepository + 'static,
    N: NoticePublisher + 'static,
{
    pub fn new(repository: Arc<R>, notices: Arc<N>, config: RegistrationConfig) -> Self {
        let guard = RegistrationGuard::from_schema(
            RegistrationSchema::standard().with_max_attachment_bytes(config.max_attachment_bytes),
        );

        Self {
            guard: Arc::new(guard),
            address_schema: Arc::new(
                RegistrationSchema::address_update()
                    .with_max_attachment_bytes(config.max_attachment_bytes),
            ),
            repository,
            notices,
            offerings: Arc::new(config.offerings),
        }
    }

    /// Submit a new registration, returning the repository-backed record.
    pub fn submit(
        &self,
        submission: RegistrationSubmission,
    ) -> Result<RegistrationRecord, RegistrationServiceError> {
        let selections = submission.subscriptions.clone();
        let mut profile = self.guard.profile_from_submission(submission)?;
        let order = SubscriptionOrder::from_selections(&selections, &self.offerings)
            .map_err(RegistrationViolation::from)?;

        let registration_id = next_registration_id();
        profile.registration_id = registration_id.clone();

        let record = RegistrationRecord {
            profile,
            status: AgencyStatus::Pending,
            order,
        };

        let stored = self.repository.insert(record)?;

        let mut details = BTreeMap::new();
        details.insert(
            "organization".to_string(),
            stored.profile.organization_name.clone(),
        );
        self.notices.publish(RegistrationNotice {
            template: "registration_received".to_string(),
            registration_id,
            details,
        })?;

        Ok(stored)
    }

    /// Replace a rejected registration with a corrected submission.
    pub fn resubmit(
        &self,
        registration_id: &RegistrationId,
        submission: RegistrationSubmission,
    ) -> Result<RegistrationRecord, RegistrationServiceError> {
        let existing = self
            .repository
            .fetch(registration_id)?
            .ok_or(RepositoryError::NotFound)?;

        if existing.status != AgencyStatus::Rejected {
            return Err(RegistrationServiceError::ResubmitNotAllowed {
                status: existing.status.label(),
            });
        }

        let selections = submission.subscriptions.clone();
        let mut profile = self.guard.profile_from_submission(submission)?;
        let order = SubscriptionOrder::from_selections(&selections, &self.offerings)
            .map_err(RegistrationViolation::from)?;
        profile.registration_id = registration_id.clone();

        let record = RegistrationRecord {
            profile,
            status: AgencyStatus::Pending,
            order,
        };

        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Apply an address correction to an active registration.
    pub fn update_address(
        &self,
        registration_id: &RegistrationId,
        update: AddressUpdate,
    ) -> Result<RegistrationRecord, RegistrationServiceError> {
        let mut record = self
            .repository
            .fetch(registration_id)?
            .ok_or(RepositoryError::NotFound)?;

        if record.status != AgencyStatus::Active {
            return Err(RegistrationServiceError::ProfileLocked {
                status: record.status.label(),
            });
        }

        let violations = self
            .address_schema
            .validate_values(|name| update.field_value(name));
        if !violations.is_empty() {
            return Err(RegistrationViolation::InvalidFields(violations).into());
        }

        let address = &mut record.profile.address;
        address.apartment = trimmed_text(&update.apartment);
        address.street_name = trimmed_text(&update.street_name);
        address.locality = trimmed_text(&update.locality);
        address.village = trimmed_text(&update.village);
        address.district = trimmed_text(&update.district);
        address.postal_code = trimmed_text(&update.postal_code);
        record.profile.applicant.phone_number = trimmed_text(&update.phone_number);

        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Fetch a registration record for API responses.
    pub fn registration(
        &self,
        registration_id: &RegistrationId,
    ) -> Result<RegistrationRecord, RegistrationServiceError> {
        let record = self
            .repository
            .fetch(registration_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Current status projection for a registration.
    pub fn status_view(
        &self,
        registration_id: &RegistrationId,
    ) -> Result<RegistrationStatusView, RegistrationServiceError> {
        Ok(self.registration(registration_id)?.status_view())
    }
}

/// Error raised by the registration service.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationServiceError {
    #[error(transparent)]
    Rejected(#[from] RegistrationViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notice(#[from] NoticeError),
    #[error("registration is {status}; address updates require an active registration")]
    ProfileLocked { status: &'static str },
    #[error("registration is {status}; only rejected registrations may be resubmitted")]
    ResubmitNotAllowed { status: &'static str },
}
