//! # paradise-store: Cart Persistence for the Paradise Storefront
//!
//! This crate persists the cart in ONE key-value slot, the way a browser
//! storefront keeps it in local storage.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Paradise Storefront Data Flow                      │
//! │                                                                         │
//! │  Storefront command (add_to_cart)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  paradise-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────────┐          ┌───────────────────────┐     │   │
//! │  │   │    CartStore      │          │   KeyValueSlot        │     │   │
//! │  │   │ (repository/cart) │─────────►│   (slot.rs)           │     │   │
//! │  │   │                   │          │                       │     │   │
//! │  │   │ load / save       │          │ MemorySlot (tests)    │     │   │
//! │  │   │ add_item          │          │ FileSlot (on disk)    │     │   │
//! │  │   │ update_quantity   │          │                       │     │   │
//! │  │   │ clear             │          │                       │     │   │
//! │  │   └───────────────────┘          └───────────────────────┘     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  <data dir>/paradise_cart_v1.json                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! One writer at a time by construction. Two sessions sharing a data
//! directory are last-writer-wins; there is no locking and no merge.
//!
//! ## Usage
//!
//! ```rust
//! use paradise_core::Money;
//! use paradise_store::{CartStore, MemorySlot};
//!
//! let mut store = CartStore::new(MemorySlot::new());
//! let cart = store.load();
//! let cart = store.add_item(cart, "Burger", Money::from_cents(800), None);
//!
//! assert_eq!(store.load(), cart);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod slot;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use repository::cart::CartStore;
pub use slot::{FileSlot, KeyValueSlot, MemorySlot};
