//! # State Module
//!
//! Manages storefront state for the command dispatcher.
//!
//! Two separate state types instead of one `AppState`:
//!
//! 1. **Separation of Concerns**: configuration is fixed at startup, the
//!    session changes with every command
//! 2. **Clearer Command Signatures**: commands declare exactly what they need
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Dispatcher loop                            │   │
//! │  │  owns: CheckoutSession, ConfigState                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                   │                          │                          │
//! │                   ▼                          ▼                          │
//! │  ┌───────────────────────────────┐  ┌──────────────────────────┐        │
//! │  │   CheckoutSession             │  │   ConfigState            │        │
//! │  │                               │  │                          │        │
//! │  │  Cart + CartStore             │  │  store_name              │        │
//! │  │  FulfillmentModeController    │  │  delivery_fee, tax       │        │
//! │  │  step, saved details, promo   │  │  data_dir, cart_key      │        │
//! │  └───────────────────────────────┘  └──────────────────────────┘        │
//! │                                                                         │
//! │  One command at a time: the session is borrowed `&mut` per command,    │
//! │  the config is read-only after startup.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{ConfigError, ConfigState, CONFIG_FILE_NAME, DEFAULT_FALLBACK_IMAGE};
pub use session::{CheckoutSession, CheckoutStep};
