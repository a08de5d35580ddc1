//! # Repository Module
//!
//! Persistence-aware wrappers around the pure core types.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Storefront command                                                    │
//! │       │                                                                 │
//! │       │  store.add_item(cart, "Burger", $8.00, None)                   │
//! │       ▼                                                                 │
//! │  CartStore                                                             │
//! │  ├── mutate via paradise_core::Cart                                    │
//! │  └── save to the slot (best-effort)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  KeyValueSlot                                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CartStore`](cart::CartStore) - Cart load/save and persisted mutations

pub mod cart;
