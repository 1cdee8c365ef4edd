use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::registration::domain::{
    AddressUpdate, AttachmentMetadata, RegistrationId, RegistrationSubmission,
};
use crate::registration::repository::{
    NoticeError, NoticePublisher, RegistrationNotice, RegistrationRecord, RegistrationRepository,
    RepositoryError,
};
use crate::registration::schema::DEFAULT_MAX_ATTACHMENT_BYTES;
use crate::registration::subscription::{SubscriptionOffering, SubscriptionSelection};
use crate::registration::{registration_router, RegistrationConfig, RegistrationService};

pub(super) fn attachment(file_name: &str, size_bytes: u64) -> AttachmentMetadata {
    AttachmentMetadata {
        file_name: file_name.to_string(),
        size_bytes,
    }
}

pub(super) fn attachments() -> BTreeMap<String, AttachmentMetadata> {
    let mut attachments = BTreeMap::new();
    for (name, file_name) in [
        ("identity_card", "identity-card.png"),
        ("business_registration_certificate", "brn-certificate.pdf"),
        ("authorized_signatory", "signatory-letter.pdf"),
        ("notarized_board_resolution", "board-resolution.pdf"),
        ("power_of_attorney", "power-of-attorney.pdf"),
        ("data_protection_certificate", "controller-certificate.jpg"),
    ] {
        attachments.insert(name.to_string(), attachment(file_name, 240 * 1024));
    }
    attachments
}

pub(super) fn selection(id: u8, checked: bool, reason: &str) -> SubscriptionSelection {
    SubscriptionSelection {
        id,
        checked,
        reason: reason.to_string(),
        price: 0.0,
        start_at: None,
        expire_at: None,
    }
}

pub(super) fn selections() -> Vec<SubscriptionSelection> {
    vec![
        selection(1, true, "Reading citizen card data during onboarding"),
        selection(2, true, "Mobile ID checks for field agents"),
        selection(3, false, ""),
    ]
}

pub(super) fn submission() -> RegistrationSubmission {
    RegistrationSubmission {
        organization_name: Some("Apex Data Services Ltd".to_string()),
        apartment: Some("Suite 4".to_string()),
        street_name: Some("Royal Road".to_string()),
        locality: Some("La Caverne".to_string()),
        village: Some("Vacoas".to_string()),
        district: Some("Plaines Wilhems".to_string()),
        postal_code: Some("74201".to_string()),
        country: Some("Mauritius".to_string()),
        position: Some("Compliance Officer".to_string()),
        phone_number: Some("57412345".to_string()),
        brn_number: Some("C12345678".to_string()),
        applicant_name: Some("Priya Ramsamy".to_string()),
        national_id: Some("P210987654321A".to_string()),
        email: Some("dpo@apexdata.mu".to_string()),
        attachments: attachments(),
        signed_form: Some(attachment("countersigned-form.pdf", 180 * 1024)),
        terms_accepted: true,
        subscriptions: selections(),
    }
}

pub(super) fn whitespace_street_submission() -> RegistrationSubmission {
    let mut submission = submission();
    submission.street_name = Some("   ".to_string());
    submission
}

pub(super) fn unaccepted_terms_submission() -> RegistrationSubmission {
    let mut submission = submission();
    submission.terms_accepted = false;
    submission
}

pub(super) fn missing_reason_submission() -> RegistrationSubmission {
    let mut submission = submission();
    submission.subscriptions = vec![selection(1, true, "   ")];
    submission
}

pub(super) fn address_update() -> AddressUpdate {
    AddressUpdate {
        apartment: Some("Level 2".to_string()),
        street_name: Some("Brabant Street".to_string()),
        locality: Some("Port Louis".to_string()),
        village: Some("Port Louis".to_string()),
        district: Some("Port Louis".to_string()),
        postal_code: Some("11328".to_string()),
        phone_number: Some("52960031".to_string()),
    }
}

pub(super) fn offerings() -> Vec<SubscriptionOffering> {
    vec![
        SubscriptionOffering {
            id: 1,
            name: "Card Data Access".to_string(),
            price: 100.0,
        },
        SubscriptionOffering {
            id: 2,
            name: "Mobile ID Data Access".to_string(),
            price: 250.0,
        },
        SubscriptionOffering {
            id: 3,
            name: "Identity Verification".to_string(),
            price: 400.0,
        },
    ]
}

pub(super) fn registration_config() -> RegistrationConfig {
    RegistrationConfig {
        offerings: offerings(),
        max_attachment_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
    }
}

pub(super) fn build_service() -> (
    RegistrationService<MemoryRepository, MemoryNotices>,
    Arc<MemoryRepository>,
    Arc<MemoryNotices>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notices = Arc::new(MemoryNotices::default());
    let service =
        RegistrationService::new(repository.clone(), notices.clone(), registration_config());
    (service, repository, notices)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<RegistrationId, RegistrationRecord>>>,
}

impl RegistrationRepository for MemoryRepository {
    fn insert(&self, record: RegistrationRecord) -> Result<RegistrationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.profile.registration_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.profile.registration_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: RegistrationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.profile.registration_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &RegistrationId) -> Result<Option<RegistrationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending(&self, _limit: usize) -> Result<Vec<RegistrationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotices {
    events: Arc<Mutex<Vec<RegistrationNotice>>>,
}

impl MemoryNotices {
    pub(super) fn events(&self) -> Vec<RegistrationNotice> {
        self.events.lock().expect("notice mutex poisoned").clone()
    }
}

impl NoticePublisher for MemoryNotices {
    fn publish(&self, notice: RegistrationNotice) -> Result<(), NoticeError> {
        self.events
            .lock()
            .expect("notice mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) struct FailingNotices;

impl NoticePublisher for FailingNotices {
    fn publish(&self, _notice: RegistrationNotice) -> Result<(), NoticeError> {
        Err(NoticeError::Transport("mail relay offline".to_string()))
    }
}

pub(super) struct ConflictRepository;

impl RegistrationRepository for ConflictRepository {
    fn insert(&self, _record: RegistrationRecord) -> Result<RegistrationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: RegistrationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &RegistrationId) -> Result<Option<RegistrationRecord>, RepositoryError> {
        Ok(None)
    }

    fn pending(&self, _limit: usize) -> Result<Vec<RegistrationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl RegistrationRepository for UnavailableRepository {
    fn insert(&self, _record: RegistrationRecord) -> Result<RegistrationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: RegistrationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &RegistrationId) -> Result<Option<RegistrationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn pending(&self, _limit: usize) -> Result<Vec<RegistrationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn assert_conflict_response(response: Response) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn registration_router_with_service(
    service: RegistrationService<MemoryRepository, MemoryNotices>,
) -> axum::Router {
    registration_router(Arc::new(service))
}
