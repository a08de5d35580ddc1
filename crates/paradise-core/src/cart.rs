//! # Cart
//!
//! The shopping cart data model and its mutation rules.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Mutations                                       │
//! │                                                                         │
//! │  Presentation Action       Cart Method             Effect               │
//! │  ───────────────────       ───────────             ──────               │
//! │                                                                         │
//! │  Add to Cart ────────────► add_item() ───────────► merge or push       │
//! │                                                                         │
//! │  Qty + / Qty − ──────────► update_quantity() ────► qty += delta,       │
//! │                                                    remove if ≤ 0       │
//! │                                                                         │
//! │  Order completed ────────► clear() ──────────────► items.clear()       │
//! │                                                                         │
//! │  NOTE: persisting after each mutation is CartStore's job, not ours.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::MAX_ITEM_PRICE_CENTS;

// =============================================================================
// Cart Item
// =============================================================================

/// One line in the cart.
///
/// ## Merge Identity
/// Two additions merge when BOTH `name` and `price` match. The same dish at a
/// different price (e.g. a size variant) is a separate line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// Display name, also half of the merge identity.
    pub name: String,

    /// Unit price, the other half of the merge identity.
    #[ts(type = "string")]
    pub price: Money,

    /// Always ≥ 1 while the line exists.
    pub quantity: u32,

    /// Opaque image reference (thumbnail URL/path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image: Option<String>,
}

impl CartItem {
    /// Creates a line with quantity 1.
    pub fn new(name: impl Into<String>, price: Money, image: Option<String>) -> Self {
        CartItem {
            name: name.into(),
            price,
            quantity: 1,
            image,
        }
    }

    /// Returns true if this line has the given merge identity.
    #[inline]
    pub fn matches(&self, name: &str, price: Money) -> bool {
        self.name == name && self.price == price
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// Why a persisted item list was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartDataError {
    #[error("cart item '{name}' has non-positive quantity")]
    NonPositiveQuantity { name: String },

    #[error("cart item '{name}' has a negative price")]
    NegativePrice { name: String },

    #[error("cart item '{name}' has a price above the accepted maximum")]
    PriceTooLarge { name: String },
}

/// The shopping cart.
///
/// ## Invariants
/// - Insertion order is display order
/// - No two lines share a (name, price) identity
/// - Every quantity is ≥ 1
///
/// Serialized as a bare array of item records. Loading an array that has a
/// zero quantity or a price outside `0..=MAX_ITEM_PRICE_CENTS` fails;
/// duplicate identities are merged into the first line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Returns the lines in display order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns the line at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&CartItem> {
        self.items.get(index)
    }

    /// Adds one unit of an item, merging with an existing line that has the
    /// same (name, price).
    ///
    /// ## Example
    /// ```rust
    /// use paradise_core::{Cart, Money};
    ///
    /// let mut cart = Cart::new();
    /// cart.add_item("Burger", Money::from_cents(800), None);
    /// cart.add_item("Burger", Money::from_cents(800), None);
    /// cart.add_item("Burger", Money::from_cents(1000), None);
    ///
    /// assert_eq!(cart.line_count(), 2);
    /// assert_eq!(cart.items()[0].quantity, 2);
    /// ```
    pub fn add_item(&mut self, name: impl Into<String>, price: Money, image: Option<String>) {
        let name = name.into();
        if let Some(item) = self.items.iter_mut().find(|i| i.matches(&name, price)) {
            item.quantity = item.quantity.saturating_add(1);
            return;
        }
        self.items.push(CartItem::new(name, price, image));
    }

    /// Adds `delta` to the quantity of the line at `index`.
    ///
    /// ## Behavior
    /// - Index out of range: no-op, returns false
    /// - Resulting quantity ≤ 0: the line is removed
    ///
    /// Returns true if the cart changed.
    pub fn update_quantity(&mut self, index: usize, delta: i64) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };

        let next = i64::from(item.quantity).saturating_add(delta);
        if next <= 0 {
            self.items.remove(index);
        } else {
            item.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        }
        true
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all lines (the cart badge count).
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Σ price × quantity over all lines.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl TryFrom<Vec<CartItem>> for Cart {
    type Error = CartDataError;

    fn try_from(records: Vec<CartItem>) -> Result<Self, Self::Error> {
        let mut cart = Cart::new();
        for record in records {
            if record.quantity == 0 {
                return Err(CartDataError::NonPositiveQuantity { name: record.name });
            }
            if record.price.is_negative() {
                return Err(CartDataError::NegativePrice { name: record.name });
            }
            if record.price > Money::from_cents(MAX_ITEM_PRICE_CENTS) {
                return Err(CartDataError::PriceTooLarge { name: record.name });
            }
            match cart
                .items
                .iter_mut()
                .find(|i| i.matches(&record.name, record.price))
            {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(record.quantity)
                }
                None => cart.items.push(record),
            }
        }
        Ok(cart)
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn burger_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item("Burger", Money::from_cents(800), Some("burger.png".into()));
        cart
    }

    #[test]
    fn test_add_same_identity_merges() {
        let mut cart = burger_cart();
        cart.add_item("Burger", Money::from_cents(800), None);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        // First image wins
        assert_eq!(cart.items()[0].image.as_deref(), Some("burger.png"));
    }

    #[test]
    fn test_add_different_price_is_new_line() {
        let mut cart = burger_cart();
        cart.add_item("Burger", Money::from_cents(950), None);
        cart.add_item("Fries", Money::from_cents(300), None);

        assert_eq!(cart.line_count(), 3);
        assert_eq!(cart.items()[1].price, Money::from_cents(950));
        assert_eq!(cart.items()[2].name, "Fries");
    }

    #[test]
    fn test_update_quantity_increments() {
        let mut cart = burger_cart();
        assert!(cart.update_quantity(0, 2));
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.subtotal(), Money::from_cents(2400));
    }

    #[test]
    fn test_update_quantity_to_zero_removes() {
        let mut cart = burger_cart();
        cart.add_item("Fries", Money::from_cents(300), None);

        assert!(cart.update_quantity(0, -1));
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].name, "Fries");

        assert!(cart.update_quantity(0, -5));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_out_of_range_is_noop() {
        let mut cart = burger_cart();
        let before = cart.clone();
        assert!(!cart.update_quantity(1, 1));
        assert!(!cart.update_quantity(usize::MAX, -1));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_totals_helpers() {
        let mut cart = burger_cart();
        cart.add_item("Burger", Money::from_cents(800), None);
        cart.add_item("Soda", Money::from_cents(199), None);

        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.subtotal(), Money::from_cents(1799));
        assert_eq!(cart.items()[0].line_total(), Money::from_cents(1600));
    }

    #[test]
    fn test_clear() {
        let mut cart = burger_cart();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::zero());
    }

    #[test]
    fn test_serialized_shape() {
        let mut cart = burger_cart();
        cart.add_item("Fries", Money::from_cents(300), None);

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"name": "Burger", "price": "8.00", "quantity": 1, "image": "burger.png"},
                {"name": "Fries", "price": "3.00", "quantity": 1}
            ])
        );
    }

    #[test]
    fn test_deserialize_legacy_numbers() {
        let raw = r#"[{"name":"Burger","price":8,"quantity":2,"image":"b.png"}]"#;
        let cart: Cart = serde_json::from_str(raw).unwrap();
        assert_eq!(cart.items()[0].price, Money::from_cents(800));
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_deserialize_rejects_zero_quantity() {
        let raw = r#"[{"name":"Burger","price":"8.00","quantity":0}]"#;
        assert!(serde_json::from_str::<Cart>(raw).is_err());

        let negative = r#"[{"name":"Burger","price":"8.00","quantity":-1}]"#;
        assert!(serde_json::from_str::<Cart>(negative).is_err());
    }

    #[test]
    fn test_deserialize_rejects_negative_price() {
        let raw = r#"[{"name":"Refund","price":"-50.00","quantity":1}]"#;
        let err = serde_json::from_str::<Cart>(raw).unwrap_err();
        assert!(err.to_string().contains("negative price"));
    }

    #[test]
    fn test_deserialize_rejects_oversized_price() {
        let raw = r#"[{"name":"Gold","price":"79228162514264337593543950335","quantity":1}]"#;
        assert!(serde_json::from_str::<Cart>(raw).is_err());

        let at_max = r#"[{"name":"Gold","price":"1000000.00","quantity":1}]"#;
        assert!(serde_json::from_str::<Cart>(at_max).is_ok());
    }

    #[test]
    fn test_deserialize_merges_duplicate_identities() {
        let raw = r#"[
            {"name":"Burger","price":"8.00","quantity":1},
            {"name":"Burger","price":8,"quantity":2}
        ]"#;
        let cart: Cart = serde_json::from_str(raw).unwrap();
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }
}
