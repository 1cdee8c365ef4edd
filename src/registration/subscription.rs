//! Subscription plan derivation for agency registrations.
//!
//! Agencies pick from three base data-access offerings; the authorization is
//! issued against a single combined plan derived from the selected set. The
//! combination table is a business rule, not an arithmetic encoding, and is
//! kept as an explicit enumerated mapping.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifiers of the base offerings agencies can subscribe to. Combined
/// plans are derived, never offered directly.
pub const BASE_SUBSCRIPTION_IDS: [u8; 3] = [1, 2, 3];

/// Surcharge applied to every subscribed offering's base price.
pub const SURCHARGE_RATE: f64 = 0.15;

/// One subscription offering from the registry catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionOffering {
    pub id: u8,
    pub name: String,
    pub price: f64,
}

/// Applicant selection state for a single offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionSelection {
    pub id: u8,
    pub checked: bool,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub start_at: Option<NaiveDate>,
    #[serde(default)]
    pub expire_at: Option<NaiveDate>,
}

/// Derivation failures surfaced to the caller instead of sentinel values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriptionError {
    #[error("at least one subscription must be selected")]
    EmptySelection,
    #[error("subscription ids {0:?} fall outside the base offerings")]
    OutOfDomain(Vec<u8>),
    #[error("subscription id {0} is not in the current catalog")]
    UnknownOffering(u8),
    #[error("subscription id {0} is selected without a usage reason")]
    MissingReason(u8),
}

/// Resolves the combined plan for a set of selected base offerings.
///
/// Duplicates and ordering are ignored; only set membership matters. The
/// mapping enumerates every non-empty subset of {1, 2, 3}: singletons keep
/// their own id, {1,2} is 6, {1,3} is 4, {2,3} is 5, and the full set is 7.
pub fn combined_plan_id(selected_ids: &[u8]) -> Result<u8, SubscriptionError> {
    let mut ids = selected_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();

    match ids.as_slice() {
        [] => Err(SubscriptionError::EmptySelection),
        [1] => Ok(1),
        [2] => Ok(2),
        [3] => Ok(3),
        [1, 2] => Ok(6),
        [1, 3] => Ok(4),
        [2, 3] => Ok(5),
        [1, 2, 3] => Ok(7),
        other => Err(SubscriptionError::OutOfDomain(other.to_vec())),
    }
}

/// Sums `price + price * SURCHARGE_RATE` across checked selections.
///
/// Lines accumulate unrounded; only the final total is rounded, half away
/// from zero, to two decimal places.
pub fn total_with_surcharge(selections: &[SubscriptionSelection]) -> f64 {
    let total: f64 = selections
        .iter()
        .filter(|selection| selection.checked)
        .map(|selection| with_surcharge(selection.price))
        .sum();
    round_currency(total)
}

fn with_surcharge(price: f64) -> f64 {
    price + price * SURCHARGE_RATE
}

fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// A derived subscription order: the combined plan, the resolved offering
/// lines, and the surcharge-inclusive total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionOrder {
    pub combined_plan_id: u8,
    pub lines: Vec<OrderLine>,
    pub total_with_surcharge: f64,
}

/// One subscribed offering with the price taken from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub subscription_id: u8,
    pub name: String,
    pub reason: String,
    pub price: f64,
    pub start_at: Option<NaiveDate>,
    pub expire_at: Option<NaiveDate>,
}

impl SubscriptionOrder {
    /// Builds the order for the checked selections. Every checked line must
    /// carry a usage reason, and prices always come from the catalog; a
    /// client-sent price is ignored.
    pub fn from_selections(
        selections: &[SubscriptionSelection],
        offerings: &[SubscriptionOffering],
    ) -> Result<SubscriptionOrder, SubscriptionError> {
        let checked: Vec<&SubscriptionSelection> = selections
            .iter()
            .filter(|selection| selection.checked)
            .collect();
        if checked.is_empty() {
            return Err(SubscriptionError::EmptySelection);
        }

        let mut lines = Vec::with_capacity(checked.len());
        for selection in checked {
            if selection.reason.trim().is_empty() {
                return Err(SubscriptionError::MissingReason(selection.id));
            }
            let offering = offerings
                .iter()
                .find(|offering| offering.id == selection.id)
                .ok_or(SubscriptionError::UnknownOffering(selection.id))?;
            lines.push(OrderLine {
                subscription_id: selection.id,
                name: offering.name.clone(),
                reason: selection.reason.trim().to_string(),
                price: offering.price,
                start_at: selection.start_at,
                expire_at: selection.expire_at,
            });
        }

        let ids: Vec<u8> = lines.iter().map(|line| line.subscription_id).collect();
        let combined_plan_id = combined_plan_id(&ids)?;
        let total: f64 = lines.iter().map(|line| with_surcharge(line.price)).sum();

        Ok(SubscriptionOrder {
            combined_plan_id,
            lines,
            total_with_surcharge: round_currency(total),
        })
    }
}
