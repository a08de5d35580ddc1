//! # Cart Store
//!
//! Loads and saves the cart, and runs each cart mutation followed by a save.
//!
//! ## Failure Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Situation                         Outcome                              │
//! │  ─────────                         ───────                              │
//! │  No stored value                   empty Cart                           │
//! │  Stored value fails to parse       empty Cart, WARN logged              │
//! │  Slot read fails                   empty Cart, WARN logged              │
//! │  Slot write fails (quota, I/O)     WARN logged, caller keeps its Cart   │
//! │  Index out of range                no-op (still saved)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No operation here returns an error to the caller.

use paradise_core::{Cart, Money, CART_STORAGE_KEY};
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::slot::KeyValueSlot;

/// Persistence owner for the cart slot.
///
/// Each mutating method takes the current cart by value, applies the change
/// and returns the new cart after attempting to save it.
#[derive(Debug)]
pub struct CartStore<S> {
    slot: S,
    key: String,
}

impl<S: KeyValueSlot> CartStore<S> {
    /// Creates a store using the default cart key.
    pub fn new(slot: S) -> Self {
        Self::with_key(slot, CART_STORAGE_KEY)
    }

    /// Creates a store under a custom key.
    pub fn with_key(slot: S, key: impl Into<String>) -> Self {
        CartStore {
            slot,
            key: key.into(),
        }
    }

    /// The slot key the cart lives under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrows the underlying slot.
    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Reads the persisted cart. Never fails: anything unreadable is an
    /// empty cart.
    pub fn load(&self) -> Cart {
        match self.try_load() {
            Ok(Some(cart)) => {
                debug!(key = %self.key, lines = cart.line_count(), "Cart loaded");
                cart
            }
            Ok(None) => {
                debug!(key = %self.key, "No stored cart, starting empty");
                Cart::new()
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Discarding unreadable cart");
                Cart::new()
            }
        }
    }

    /// Writes the cart. Failures are logged and swallowed.
    pub fn save(&mut self, cart: &Cart) {
        if let Err(e) = self.try_save(cart) {
            warn!(key = %self.key, error = %e, "Failed to persist cart, keeping in-memory copy");
        }
    }

    /// Adds one unit of (name, price), merging with a matching line.
    pub fn add_item(
        &mut self,
        mut cart: Cart,
        name: impl Into<String>,
        price: Money,
        image: Option<String>,
    ) -> Cart {
        cart.add_item(name, price, image);
        self.save(&cart);
        cart
    }

    /// Adds `delta` to the line at `index`, removing it if it drops to zero.
    pub fn update_quantity(&mut self, mut cart: Cart, index: usize, delta: i64) -> Cart {
        if !cart.update_quantity(index, delta) {
            debug!(index, lines = cart.line_count(), "Quantity update ignored, index out of range");
        }
        self.save(&cart);
        cart
    }

    /// Empties the cart.
    pub fn clear(&mut self, mut cart: Cart) -> Cart {
        cart.clear();
        self.save(&cart);
        cart
    }

    fn try_load(&self) -> StoreResult<Option<Cart>> {
        let Some(raw) = self.slot.read(&self.key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn try_save(&mut self, cart: &Cart) -> StoreResult<()> {
        let raw = serde_json::to_string(cart)?;
        self.slot.write(&self.key, &raw)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::{FileSlot, MemorySlot};

    fn burger() -> Money {
        Money::from_cents(800)
    }

    #[test]
    fn test_load_empty_slot() {
        let store = CartStore::new(MemorySlot::new());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_add_item_persists() {
        let mut store = CartStore::new(MemorySlot::new());
        let cart = store.add_item(Cart::new(), "Burger", burger(), Some("b.png".into()));
        let cart = store.add_item(cart, "Burger", burger(), None);

        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(store.load(), cart);
    }

    #[test]
    fn test_roundtrip_preserves_order_and_images() {
        let mut store = CartStore::new(MemorySlot::new());
        let mut cart = Cart::new();
        cart.add_item("Burger", burger(), Some("b.png".into()));
        cart.add_item("Burger", Money::from_cents(1050), None);
        cart.add_item("Lassi", Money::from_cents(375), Some("l.png".into()));
        cart.update_quantity(2, 3);

        store.save(&cart);
        assert_eq!(store.load(), cart);
    }

    #[test]
    fn test_update_quantity_removes_and_persists() {
        let mut store = CartStore::new(MemorySlot::new());
        let cart = store.add_item(Cart::new(), "Burger", burger(), None);
        let cart = store.update_quantity(cart, 0, -1);

        assert!(cart.is_empty());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_update_quantity_out_of_range_is_noop() {
        let mut store = CartStore::new(MemorySlot::new());
        let cart = store.add_item(Cart::new(), "Burger", burger(), None);
        let before = cart.clone();

        let cart = store.update_quantity(cart, 7, 1);
        assert_eq!(cart, before);
        assert_eq!(store.load(), before);
    }

    #[test]
    fn test_clear_persists_empty() {
        let mut store = CartStore::new(MemorySlot::new());
        let cart = store.add_item(Cart::new(), "Burger", burger(), None);
        let cart = store.clear(cart);

        assert!(cart.is_empty());
        assert_eq!(store.slot().read(CART_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_corrupted_data_loads_empty() {
        for raw in [
            "{not json",
            "{\"name\":\"Burger\"}",
            r#"[{"name":"Burger","price":"abc","quantity":1}]"#,
            r#"[{"name":"Burger","price":"8.00","quantity":0}]"#,
            r#"[{"name":"Refund","price":"-50.00","quantity":1}]"#,
            r#"[{"name":"Gold","price":"79228162514264337593543950335","quantity":1}]"#,
        ] {
            let mut slot = MemorySlot::new();
            slot.insert_raw(CART_STORAGE_KEY, raw);
            let store = CartStore::new(slot);
            assert!(store.load().is_empty(), "expected empty cart for {raw}");
        }
    }

    #[test]
    fn test_legacy_numeric_prices_load() {
        let mut slot = MemorySlot::new();
        slot.insert_raw(
            CART_STORAGE_KEY,
            r#"[{"name":"Burger","price":8,"quantity":2,"image":"assets/images/burger.png"}]"#,
        );
        let store = CartStore::new(slot);
        let cart = store.load();

        assert_eq!(cart.items()[0].price, burger());
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_write_failure_keeps_in_memory_cart() {
        let mut store = CartStore::new(MemorySlot::with_capacity(8));
        let cart = store.add_item(Cart::new(), "Burger", burger(), None);

        assert_eq!(cart.items()[0].quantity, 1);
        // Nothing made it into the slot
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_custom_key() {
        let mut store = CartStore::with_key(MemorySlot::new(), "test_cart");
        store.save(&Cart::new());
        assert_eq!(store.key(), "test_cart");
        assert!(store.slot().read("test_cart").unwrap().is_some());
        assert!(store.slot().read(CART_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_file_backed_store_survives_restart() {
        let dir = tempfile::tempdir().unwrap();

        let mut first = CartStore::new(FileSlot::new(dir.path()));
        let cart = first.add_item(Cart::new(), "Burger", burger(), None);
        let cart = first.add_item(cart, "Fries", Money::from_cents(300), None);

        let second = CartStore::new(FileSlot::new(dir.path()));
        assert_eq!(second.load(), cart);
    }
}
