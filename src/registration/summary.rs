//! Data content of the application summary document.
//!
//! The summary mirrors the printed application form: labeled profile rows,
//! subscription lines with their stated purpose, the surcharge-inclusive
//! total, the required-documents checklist, and the declaration text. It is
//! data-only; rendering (terminal, PDF) happens elsewhere.

use serde::Serialize;

use super::repository::RegistrationRecord;
use super::schema::{RegistrationSchema, SIGNED_FORM_FIELD};

/// Document heading of the application form.
pub const APPLICATION_TITLE: &str =
    "Application for Authorization for Reading Card Data or Mobile ID Data";

/// Lead-in line for the declaration block.
pub const DECLARATION_PREAMBLE: &str = "I declare that";

const DECLARATIONS: [&str; 4] = [
    "the particulars, information and documents submitted in connection with this application are, to the best of my knowledge, true and correct;",
    "I have not wilfully concealed any material fact;",
    "I am aware that in case I have produced any false document for the purpose of this application, I am liable to prosecution and my authorization may be cancelled; and",
    "I have read and agreed to the Terms of Use.",
];

const SIGNED_FORM_LABEL: &str = "Countersigned application form";

/// One labeled line of the profile table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: String,
}

/// One subscribed offering with its stated purpose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionLine {
    pub name: String,
    pub reason: String,
}

/// One required document and whether the submission carried it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentChecklistItem {
    pub label: &'static str,
    pub provided: bool,
}

/// The full application document, ready for serialization or rendering.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationSummary {
    pub title: &'static str,
    pub registration_id: String,
    pub rows: Vec<SummaryRow>,
    pub subscriptions: Vec<SubscriptionLine>,
    pub total_with_surcharge: f64,
    pub documents: Vec<DocumentChecklistItem>,
    pub declaration_preamble: &'static str,
    pub declarations: Vec<&'static str>,
}

impl RegistrationSummary {
    pub fn from_record(record: &RegistrationRecord) -> Self {
        let profile = &record.profile;

        let rows = vec![
            SummaryRow {
                label: "Organization Name",
                value: profile.organization_name.clone(),
            },
            SummaryRow {
                label: "Business Registration Number",
                value: profile.brn_number.clone(),
            },
            SummaryRow {
                label: "Organization Address",
                value: profile.address.single_line(),
            },
            SummaryRow {
                label: "Name of the Applicant (Authorized Signatory)",
                value: profile.applicant.applicant_name.clone(),
            },
            SummaryRow {
                label: "Position",
                value: profile.applicant.position.clone(),
            },
            SummaryRow {
                label: "National Identity Number",
                value: profile.applicant.national_id.clone(),
            },
            SummaryRow {
                label: "Mobile Phone",
                value: profile.applicant.phone_number.clone(),
            },
            SummaryRow {
                label: "Email Address",
                value: profile.applicant.email.clone(),
            },
        ];

        let subscriptions = record
            .order
            .lines
            .iter()
            .map(|line| SubscriptionLine {
                name: line.name.clone(),
                reason: line.reason.clone(),
            })
            .collect();

        let schema = RegistrationSchema::standard();
        let mut documents: Vec<DocumentChecklistItem> = schema
            .attachments()
            .iter()
            .map(|spec| DocumentChecklistItem {
                label: spec.label,
                provided: profile.attachments.contains_key(spec.name),
            })
            .collect();
        documents.push(DocumentChecklistItem {
            label: SIGNED_FORM_LABEL,
            provided: profile.attachments.contains_key(SIGNED_FORM_FIELD),
        });

        Self {
            title: APPLICATION_TITLE,
            registration_id: profile.registration_id.0.clone(),
            rows,
            subscriptions,
            total_with_surcharge: record.order.total_with_surcharge,
            documents,
            declaration_preamble: DECLARATION_PREAMBLE,
            declarations: DECLARATIONS.to_vec(),
        }
    }
}
