//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Payment  │────►│  Order   │       │
//! │  │  Cart    │     │          │     │  Page    │     │ Complete │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                │             │
//! │                   add_to_cart       place_order     complete_order     │
//! │                   update_quantity   (checkout.rs)   (checkout.rs)      │
//! │                        │                                  │             │
//! │                        ▼                                  ▼             │
//! │                   clear_cart ─────────────────────► (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use paradise_core::validation::{validate_item_name, validate_price};
use paradise_core::{FulfillmentMode, Money, Totals};
use paradise_store::KeyValueSlot;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiResult;
use crate::state::{CheckoutSession, ConfigState};

/// One cart line as the presentation layer renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    /// Position in the cart; the handle for `update_quantity`
    pub index: usize,
    pub name: String,
    pub price: Money,
    pub quantity: u32,
    pub line_total: Money,
    /// The item's image, or the configured placeholder
    pub image: String,
}

/// Order summary amounts, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsDisplay {
    pub subtotal: String,
    pub fee: String,
    pub tax: String,
    pub total: String,
}

impl TotalsDisplay {
    pub fn new(totals: &Totals, config: &ConfigState) -> Self {
        TotalsDisplay {
            subtotal: config.format_currency(totals.subtotal),
            fee: config.format_currency(totals.fee),
            tax: config.format_currency(totals.tax),
            total: config.format_currency(totals.total),
        }
    }
}

/// Cart response including lines, badge count and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineView>,
    /// Sum of quantities (cart badge)
    pub item_count: u64,
    pub is_empty: bool,
    pub mode: FulfillmentMode,
    /// "Estimated Shipping" or "Pickup"
    pub shipping_label: String,
    pub totals: Totals,
    pub display: TotalsDisplay,
}

impl CartResponse {
    /// Builds the view from the session's current cart and mode.
    pub fn from_session<S: KeyValueSlot>(session: &CheckoutSession<S>, config: &ConfigState) -> Self {
        let cart = session.cart();
        let totals = session.totals();

        let items = cart
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| CartLineView {
                index,
                name: item.name.clone(),
                price: item.price,
                quantity: item.quantity,
                line_total: item.line_total(),
                image: config.image_or_fallback(item.image.as_deref()),
            })
            .collect();

        CartResponse {
            items,
            item_count: cart.total_quantity(),
            is_empty: cart.is_empty(),
            mode: session.controller().mode(),
            shipping_label: session.controller().shipping_label().to_string(),
            display: TotalsDisplay::new(&totals, config),
            totals,
        }
    }
}

/// Result of adding an item: the cart plus the toast text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartResponse {
    pub cart: CartResponse,
    pub message: String,
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart Panel                                                             │
/// │                                                                         │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  CART                                              3 items     │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  Burger                  x2              $16.00               │    │
/// │  │  Mango Lassi             x1               $3.75               │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  Subtotal                                $19.75               │    │
/// │  │  Estimated Shipping                       $4.99               │    │
/// │  │  Tax (18%)                                $3.56               │    │
/// │  │  ──────────────────────────────────────────────────          │    │
/// │  │  TOTAL                                   $28.30               │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// │                                                                         │
/// │  {"command":"get_cart"} → { items: [...], totals: {...} }              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart<S: KeyValueSlot>(session: &CheckoutSession<S>, config: &ConfigState) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from_session(session, config)
}

/// Adds one unit of a menu item to the cart.
///
/// ## Behavior
/// - Same name and price already in cart: quantity increases
/// - Otherwise: appended as a new line
/// - Name is trimmed. Blank or over-long names, negative prices and prices
///   above $1,000,000.00 are rejected before the cart is touched
///
/// ## Returns
/// Updated cart and the "added to cart" message
pub fn add_to_cart<S: KeyValueSlot>(
    session: &mut CheckoutSession<S>,
    config: &ConfigState,
    name: &str,
    price: Money,
    image: Option<String>,
) -> ApiResult<AddToCartResponse> {
    debug!(name = %name, price = %price, "add_to_cart command");

    validate_item_name(name)?;
    validate_price(price)?;

    let name = name.trim();
    let image = image.filter(|i| !i.trim().is_empty());
    session.add_item(name, price, image);

    Ok(AddToCartResponse {
        cart: CartResponse::from_session(session, config),
        message: format!("✓ {} added to cart!", name),
    })
}

/// Changes the quantity of the line at `index` by `delta`.
///
/// ## Behavior
/// - Resulting quantity ≤ 0: the line is removed
/// - Index out of range: nothing changes (not an error)
pub fn update_quantity<S: KeyValueSlot>(
    session: &mut CheckoutSession<S>,
    config: &ConfigState,
    index: usize,
    delta: i64,
) -> CartResponse {
    debug!(index, delta, "update_quantity command");
    session.update_quantity(index, delta);
    CartResponse::from_session(session, config)
}

/// Clears all items from the cart.
pub fn clear_cart<S: KeyValueSlot>(session: &mut CheckoutSession<S>, config: &ConfigState) -> CartResponse {
    debug!("clear_cart command");
    session.clear_cart();
    CartResponse::from_session(session, config)
}
