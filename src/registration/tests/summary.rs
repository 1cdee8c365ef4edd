use super::common::*;

use crate::registration::summary::{RegistrationSummary, APPLICATION_TITLE, DECLARATION_PREAMBLE};

#[test]
fn summary_mirrors_the_stored_record() {
    let (service, _repository, _notices) = build_service();
    let record = service.submit(submission()).expect("submission accepted");

    let summary = RegistrationSummary::from_record(&record);

    assert_eq!(summary.title, APPLICATION_TITLE);
    assert_eq!(summary.registration_id, record.profile.registration_id.0);

    assert_eq!(summary.rows.len(), 8);
    assert_eq!(summary.rows[0].label, "Organization Name");
    assert_eq!(summary.rows[0].value, "Apex Data Services Ltd");
    assert_eq!(summary.rows[1].label, "Business Registration Number");
    assert_eq!(summary.rows[1].value, "C12345678");
    assert_eq!(
        summary.rows[2].value,
        "Suite 4, Royal Road, La Caverne, Vacoas, Plaines Wilhems 74201, Mauritius"
    );
    assert_eq!(summary.rows[5].value, "P210987654321A");

    assert_eq!(summary.subscriptions.len(), 2);
    assert_eq!(summary.subscriptions[0].name, "Card Data Access");
    assert_eq!(
        summary.subscriptions[0].reason,
        "Reading citizen card data during onboarding"
    );
    assert_eq!(summary.total_with_surcharge, 402.5);

    assert_eq!(summary.documents.len(), 7);
    assert!(summary.documents.iter().all(|item| item.provided));
    assert_eq!(summary.documents[6].label, "Countersigned application form");

    assert_eq!(summary.declaration_preamble, DECLARATION_PREAMBLE);
    assert_eq!(summary.declarations.len(), 4);
    assert!(summary.declarations[3].contains("Terms of Use"));
}

#[test]
fn address_line_skips_blank_segments() {
    let (service, _repository, _notices) = build_service();
    let mut submission = submission();
    submission.apartment = None;
    let record = service.submit(submission).expect("submission accepted");

    let summary = RegistrationSummary::from_record(&record);
    assert_eq!(summary.rows[2].label, "Organization Address");
    assert_eq!(
        summary.rows[2].value,
        "Royal Road, La Caverne, Vacoas, Plaines Wilhems 74201, Mauritius"
    );
}

#[test]
fn missing_documents_are_flagged() {
    let (service, _repository, _notices) = build_service();
    let mut record = service.submit(submission()).expect("submission accepted");
    record.profile.attachments.remove("power_of_attorney");

    let summary = RegistrationSummary::from_record(&record);
    let item = summary
        .documents
        .iter()
        .find(|item| item.label == "Power of attorney")
        .expect("checklist item");
    assert!(!item.provided);
    assert!(summary
        .documents
        .iter()
        .filter(|item| item.label != "Power of attorney")
        .all(|item| item.provided));
}
