//! # paradise-core: Pure Business Logic for the Paradise Storefront
//!
//! This crate is the state engine behind the storefront's cart, order
//! summary and payment form. Everything here is a pure function or a plain
//! value type; persistence lives in `paradise-store` and rendering lives in
//! whatever presentation layer consumes these outputs.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Paradise Storefront Architecture                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (menu/checkout/payment)            │   │
//! │  │    Add to Cart ──► Qty +/- ──► Delivery/Pickup ──► Complete     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON lines                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 Storefront commands (apps/storefront)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ paradise-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────────┐ ┌────────────────┐   │   │
//! │  │   │  cart   │ │ pricing │ │ fulfillment │ │   validation   │   │   │
//! │  │   │  Cart   │ │ Totals  │ │ Controller  │ │ required set   │   │   │
//! │  │   └─────────┘ └─────────┘ └─────────────┘ └────────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              paradise-store (single key-value slot)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type over exact decimals
//! - [`types`] - FulfillmentMode, PaymentMethod, TaxRate
//! - [`cart`] - Cart and CartItem with the merge rule
//! - [`pricing`] - Subtotal/fee/tax/total derivation
//! - [`fulfillment`] - Delivery/pickup and payment method selection
//! - [`validation`] - Checkout form rules and item input checks
//! - [`promo`] - Promo code lookup
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use paradise_core::{compute_totals, Cart, FulfillmentMode, Money};
//!
//! let mut cart = Cart::new();
//! cart.add_item("Burger", Money::from_cents(800), None);
//! cart.add_item("Burger", Money::from_cents(800), None);
//!
//! let totals = compute_totals(&cart, FulfillmentMode::Delivery);
//! assert_eq!(totals.total.to_string(), "$23.87");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod fulfillment;
pub mod money;
pub mod pricing;
pub mod promo;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use fulfillment::FulfillmentModeController;
pub use money::Money;
pub use pricing::{compute_totals, PricingPolicy, Totals};
pub use promo::{check_promo_code, PromoOutcome};
pub use types::*;
pub use validation::{
    required_fields, validate, CheckoutForm, FormField, ValidationResult,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat delivery charge in cents ($4.99).
///
/// Waived for pickup orders and for empty carts.
pub const FIXED_DELIVERY_FEE_CENTS: i64 = 499;

/// Flat tax rate in basis points (18%).
///
/// No jurisdiction logic: every order pays the same rate on its subtotal.
pub const TAX_RATE_BPS: u32 = 1800;

/// Storage key for the persisted cart.
///
/// An incompatible schema change needs a new key; there is no migration step.
pub const CART_STORAGE_KEY: &str = "paradise_cart_v1";

/// Maximum length of a menu item name accepted from the presentation layer.
pub const MAX_ITEM_NAME_LEN: usize = 200;

/// Highest unit price accepted for a cart line, in cents ($1,000,000.00).
///
/// Applies to new items and to lines restored from storage.
pub const MAX_ITEM_PRICE_CENTS: i64 = 100_000_000;
