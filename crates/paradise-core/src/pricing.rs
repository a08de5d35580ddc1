//! # Pricing
//!
//! Derives the order summary from cart contents and fulfillment mode.
//!
//! ## Formula
//! ```text
//! subtotal = Σ price × quantity
//! fee      = delivery_fee   if subtotal > 0 AND mode == Delivery
//!            0              otherwise (pickup, or empty cart)
//! tax      = subtotal × tax_rate
//! total    = subtotal + fee + tax
//! ```
//!
//! Every call recomputes from scratch. Nothing is cached and nothing is
//! rounded: `Money`'s `Display` does the 2-decimal formatting.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::Money;
use crate::types::{FulfillmentMode, TaxRate};
use crate::FIXED_DELIVERY_FEE_CENTS;

/// Derived order amounts. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    #[ts(type = "string")]
    pub subtotal: Money,
    #[ts(type = "string")]
    pub fee: Money,
    #[ts(type = "string")]
    pub tax: Money,
    #[ts(type = "string")]
    pub total: Money,
}

/// Fee and tax settings used to price an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPolicy {
    /// Flat delivery charge.
    pub delivery_fee: Money,
    /// Flat tax rate applied to the subtotal.
    pub tax_rate: TaxRate,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            delivery_fee: Money::from_cents(FIXED_DELIVERY_FEE_CENTS),
            tax_rate: TaxRate::default(),
        }
    }
}

impl PricingPolicy {
    /// Computes totals for `cart` under `mode`.
    ///
    /// ## Example
    /// ```rust
    /// use paradise_core::{Cart, FulfillmentMode, Money, PricingPolicy};
    ///
    /// let mut cart = Cart::new();
    /// cart.add_item("Burger", Money::from_cents(800), None);
    /// cart.add_item("Burger", Money::from_cents(800), None);
    ///
    /// let totals = PricingPolicy::default().compute_totals(&cart, FulfillmentMode::Pickup);
    /// assert_eq!(totals.fee, Money::zero());
    /// assert_eq!(totals.total, Money::from_cents(1888));
    /// ```
    pub fn compute_totals(&self, cart: &Cart, mode: FulfillmentMode) -> Totals {
        let subtotal = cart.subtotal();
        let fee = if subtotal.is_positive() && mode == FulfillmentMode::Delivery {
            self.delivery_fee
        } else {
            Money::zero()
        };
        let tax = subtotal.apply_rate(self.tax_rate);

        Totals {
            subtotal,
            fee,
            tax,
            total: subtotal + fee + tax,
        }
    }
}

/// Computes totals with the storefront's fixed fee and tax rate.
pub fn compute_totals(cart: &Cart, mode: FulfillmentMode) -> Totals {
    PricingPolicy::default().compute_totals(cart, mode)
}

// =============================================================================
// Unit Tests
// =============================================================================
