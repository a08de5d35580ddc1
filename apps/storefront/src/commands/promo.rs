//! # Promo Commands
//!
//! Promo codes are only acknowledged here; any discount is settled at
//! payment outside this app, so Totals never change.

use paradise_core::{check_promo_code, PromoOutcome};
use paradise_store::KeyValueSlot;
use serde::Serialize;
use tracing::debug;

use crate::state::CheckoutSession;

/// Promo check result plus the message shown under the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoResponse {
    #[serde(flatten)]
    pub outcome: PromoOutcome,
    pub message: String,
}

/// Checks a promo code and remembers it on the session when accepted.
///
/// A rejected or blank code forgets any previously accepted one.
pub fn apply_promo_code<S: KeyValueSlot>(session: &mut CheckoutSession<S>, code: &str) -> PromoResponse {
    debug!(code = %code, "apply_promo_code command");

    let outcome = check_promo_code(code);
    let accepted = matches!(outcome, PromoOutcome::Accepted { .. });
    session.set_promo_code(accepted.then(|| code.trim().to_uppercase()));

    PromoResponse {
        message: outcome.message().to_string(),
        outcome,
    }
}
