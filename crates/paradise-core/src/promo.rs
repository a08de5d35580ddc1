//! Promo code lookup.
//!
//! Codes only produce a message for the checkout page. Discounts are applied
//! at payment by the order backend, so they never feed into [`Totals`].
//!
//! [`Totals`]: crate::pricing::Totals

use serde::{Deserialize, Serialize};

/// The one code the storefront currently advertises.
pub const PARADISE10: &str = "PARADISE10";

/// Result of checking a promo code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PromoOutcome {
    /// Nothing was typed.
    Empty,
    /// Known code.
    Accepted { percent_off: u8 },
    /// Unknown code.
    Invalid,
}

impl PromoOutcome {
    /// Message shown under the promo input.
    pub fn message(&self) -> &'static str {
        match self {
            PromoOutcome::Empty => "Please enter a promo code.",
            PromoOutcome::Accepted { .. } => "Promo applied: 10% off will be reflected at payment.",
            PromoOutcome::Invalid => "This promo code is not valid.",
        }
    }
}

/// Checks a promo code. Input is trimmed and upper-cased first.
pub fn check_promo_code(input: &str) -> PromoOutcome {
    let code = input.trim().to_uppercase();
    if code.is_empty() {
        return PromoOutcome::Empty;
    }
    if code == PARADISE10 {
        PromoOutcome::Accepted { percent_off: 10 }
    } else {
        PromoOutcome::Invalid
    }
}
