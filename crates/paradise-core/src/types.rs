//! # Domain Types
//!
//! Small value types shared by pricing, fulfillment and validation.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │ FulfillmentMode │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Delivery (def) │   │  Card (def)     │       │
//! │  │  1800 = 18%     │   │  Pickup         │   │  Other          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (the storefront's flat rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for configuration input).
    ///
    /// Returns `None` for NaN, infinities, negatives and anything that
    /// doesn't fit in `u32` basis points once rounded.
    pub fn from_percentage(pct: f64) -> Option<Self> {
        let bps = (pct * 100.0).round();
        if !bps.is_finite() || bps < 0.0 || bps > f64::from(u32::MAX) {
            return None;
        }
        Some(TaxRate(bps as u32))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as an exact fraction (1800 bps → 0.18).
    #[inline]
    pub fn as_fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(crate::TAX_RATE_BPS)
    }
}

// =============================================================================
// Fulfillment Mode
// =============================================================================

/// Whether the order is delivered to an address or picked up.
///
/// Drives the delivery fee waiver, the address fields and the labels shown
/// on the payment page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentMode {
    /// Delivered to the customer's street address.
    #[default]
    Delivery,
    /// Collected by the customer; no fee, no address.
    Pickup,
}

impl FulfillmentMode {
    /// Returns true for pickup orders.
    #[inline]
    pub fn is_pickup(&self) -> bool {
        matches!(self, FulfillmentMode::Pickup)
    }
}

impl fmt::Display for FulfillmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FulfillmentMode::Delivery => write!(f, "delivery"),
            FulfillmentMode::Pickup => write!(f, "pickup"),
        }
    }
}

impl FromStr for FulfillmentMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "delivery" => Ok(FulfillmentMode::Delivery),
            "pickup" => Ok(FulfillmentMode::Pickup),
            other => Err(CoreError::UnknownFulfillmentMode(other.to_string())),
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// The payment method picked on the payment form.
///
/// Only `Card` adds required fields; every other choice the storefront
/// offers (cash on delivery, pay at counter, ...) behaves the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Card payment; card number, expiry and CVV become required.
    #[default]
    Card,
    /// Any non-card method.
    #[serde(other)]
    Other,
}

impl PaymentMethod {
    /// Maps a payment `<select>` value onto a method. Never fails.
    pub fn from_form_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("card") {
            PaymentMethod::Card
        } else {
            PaymentMethod::Other
        }
    }

    /// Returns true if card details are required.
    #[inline]
    pub fn is_card(&self) -> bool {
        matches!(self, PaymentMethod::Card)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::Other => write!(f, "other"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
