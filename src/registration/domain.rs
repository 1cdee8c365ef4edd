use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::subscription::SubscriptionSelection;

/// Identifier wrapper for agency registrations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationId(pub String);

/// Metadata for an uploaded supporting document. Only the descriptor crosses
/// this service; file bytes stay in the upload store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentMetadata {
    pub file_name: String,
    pub size_bytes: u64,
}

/// Raw registration payload exactly as the portal posts it. Field values are
/// free text and may be null; nothing here is trusted until the guard has
/// accepted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationSubmission {
    pub organization_name: Option<String>,
    pub apartment: Option<String>,
    pub street_name: Option<String>,
    pub locality: Option<String>,
    pub village: Option<String>,
    pub district: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub position: Option<String>,
    pub phone_number: Option<String>,
    pub brn_number: Option<String>,
    pub applicant_name: Option<String>,
    pub national_id: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub attachments: BTreeMap<String, AttachmentMetadata>,
    #[serde(default)]
    pub signed_form: Option<AttachmentMetadata>,
    #[serde(default)]
    pub terms_accepted: bool,
    #[serde(default)]
    pub subscriptions: Vec<SubscriptionSelection>,
}

impl RegistrationSubmission {
    /// Raw value lookup by schema field name. Unknown names read as null.
    pub fn field_value(&self, name: &str) -> Option<&str> {
        let slot = match name {
            "organization_name" => &self.organization_name,
            "apartment" => &self.apartment,
            "street_name" => &self.street_name,
            "locality" => &self.locality,
            "village" => &self.village,
            "district" => &self.district,
            "postal_code" => &self.postal_code,
            "country" => &self.country,
            "position" => &self.position,
            "phone_number" => &self.phone_number,
            "brn_number" => &self.brn_number,
            "applicant_name" => &self.applicant_name,
            "national_id" => &self.national_id,
            "email" => &self.email,
            _ => return None,
        };
        slot.as_deref()
    }
}

/// Postal address of the registering organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationAddress {
    pub apartment: String,
    pub street_name: String,
    pub locality: String,
    pub village: String,
    pub district: String,
    pub postal_code: String,
    pub country: String,
}

impl OrganizationAddress {
    /// Joined single-line rendering. The district and postal code share one
    /// segment; blank segments are skipped entirely.
    pub fn single_line(&self) -> String {
        let district_zone = [self.district.as_str(), self.postal_code.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        [
            self.apartment.as_str(),
            self.street_name.as_str(),
            self.locality.as_str(),
            self.village.as_str(),
            district_zone.as_str(),
            self.country.as_str(),
        ]
        .iter()
        .filter(|segment| !segment.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Contact details of the person filing on the agency's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantDetails {
    pub applicant_name: String,
    pub position: String,
    pub national_id: String,
    pub phone_number: String,
    pub email: String,
}

/// The sanitized agency model after the registration guard has accepted a
/// submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencyProfile {
    pub registration_id: RegistrationId,
    pub organization_name: String,
    pub brn_number: String,
    pub address: OrganizationAddress,
    pub applicant: ApplicantDetails,
    pub attachments: BTreeMap<String, AttachmentMetadata>,
}

/// Address-only changes permitted while a registration is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressUpdate {
    pub apartment: Option<String>,
    pub street_name: Option<String>,
    pub locality: Option<String>,
    pub village: Option<String>,
    pub district: Option<String>,
    pub postal_code: Option<String>,
    pub phone_number: Option<String>,
}

impl AddressUpdate {
    /// Raw value lookup by schema field name. Unknown names read as null.
    pub fn field_value(&self, name: &str) -> Option<&str> {
        let slot = match name {
            "apartment" => &self.apartment,
            "street_name" => &self.street_name,
            "locality" => &self.locality,
            "village" => &self.village,
            "district" => &self.district,
            "postal_code" => &self.postal_code,
            "phone_number" => &self.phone_number,
            _ => return None,
        };
        slot.as_deref()
    }
}

/// Lifecycle status tracked for every agency registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgencyStatus {
    Pending,
    Active,
    Rejected,
}

impl AgencyStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AgencyStatus::Pending => "pending",
            AgencyStatus::Active => "active",
            AgencyStatus::Rejected => "rejected",
        }
    }
}

pub(crate) fn trimmed_text(value: &Option<String>) -> String {
    value.as_deref().unwrap_or_default().trim().to_string()
}
