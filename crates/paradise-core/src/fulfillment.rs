//! # Fulfillment Mode Controller
//!
//! Single source of truth for "delivery or pickup?" and "which payment
//! method?". Pricing, the required-field set and every mode-dependent label
//! read from here; nothing else decides the mode.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  FulfillmentModeController   │
//! │  mode: Delivery | Pickup     │──► PricingPolicy::compute_totals (fee)
//! │  payment_method: Card|Other  │──► validation::required_fields
//! └──────────────────────────────┘──► shipping/submit labels, row visibility
//! ```
//!
//! There are no transition guards. Switching mode never touches values the
//! customer already typed; it only changes what is required and shown.

use serde::{Deserialize, Serialize};

use crate::types::{FulfillmentMode, PaymentMethod};
use crate::validation::{required_fields, FormField};

/// Holds the current fulfillment mode and payment method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentModeController {
    mode: FulfillmentMode,
    payment_method: PaymentMethod,
}

impl FulfillmentModeController {
    /// Creates a controller with the defaults (delivery, card).
    pub fn new() -> Self {
        Self::default()
    }

    /// Current fulfillment mode.
    pub fn mode(&self) -> FulfillmentMode {
        self.mode
    }

    /// Current payment method.
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Replaces the mode. Returns true if dependents must be recomputed.
    pub fn set_mode(&mut self, mode: FulfillmentMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    /// Replaces the payment method. Returns true if dependents must be
    /// recomputed.
    pub fn set_payment_method(&mut self, method: PaymentMethod) -> bool {
        let changed = self.payment_method != method;
        self.payment_method = method;
        changed
    }

    /// Required fields for the current selection, in validation order.
    pub fn required_fields(&self) -> Vec<FormField> {
        required_fields(self.mode, self.payment_method)
    }

    /// Label for the fee row of the order summary.
    pub fn shipping_label(&self) -> &'static str {
        match self.mode {
            FulfillmentMode::Delivery => "Estimated Shipping",
            FulfillmentMode::Pickup => "Pickup",
        }
    }

    /// Label for the submit button on the payment page.
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FulfillmentMode::Delivery => "Complete Payment",
            FulfillmentMode::Pickup => "Place Pickup Order",
        }
    }

    /// Message shown once the order has gone through.
    pub fn success_message(&self) -> &'static str {
        match self.mode {
            FulfillmentMode::Delivery => "Payment successful! Your order is on its way.",
            FulfillmentMode::Pickup => {
                "Your pickup order has been placed! We’ll have it ready shortly."
            }
        }
    }

    /// Address rows are only shown for delivery.
    pub fn shows_address_fields(&self) -> bool {
        !self.mode.is_pickup()
    }

    /// Card rows are shown for card payment in either mode.
    pub fn shows_card_fields(&self) -> bool {
        self.payment_method.is_card()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let controller = FulfillmentModeController::new();
        assert_eq!(controller.mode(), FulfillmentMode::Delivery);
        assert_eq!(controller.payment_method(), PaymentMethod::Card);
        assert_eq!(controller.shipping_label(), "Estimated Shipping");
        assert_eq!(controller.submit_label(), "Complete Payment");
    }

    #[test]
    fn test_set_mode_signals_change() {
        let mut controller = FulfillmentModeController::new();
        assert!(controller.set_mode(FulfillmentMode::Pickup));
        assert!(!controller.set_mode(FulfillmentMode::Pickup));
        assert!(controller.set_mode(FulfillmentMode::Delivery));
    }

    #[test]
    fn test_pickup_labels_and_rows() {
        let mut controller = FulfillmentModeController::new();
        controller.set_mode(FulfillmentMode::Pickup);

        assert_eq!(controller.shipping_label(), "Pickup");
        assert_eq!(controller.submit_label(), "Place Pickup Order");
        assert!(!controller.shows_address_fields());
        assert!(controller.shows_card_fields());
        assert!(controller.success_message().starts_with("Your pickup order"));
    }

    #[test]
    fn test_required_fields_follow_selection() {
        let mut controller = FulfillmentModeController::new();
        assert_eq!(controller.required_fields().len(), 10);

        controller.set_mode(FulfillmentMode::Pickup);
        controller.set_payment_method(PaymentMethod::Other);
        assert_eq!(controller.required_fields(), FormField::BASE.to_vec());
        assert!(!controller.shows_card_fields());
    }
}
