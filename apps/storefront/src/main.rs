//! # Paradise Storefront Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Paradise Storefront                              │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Presentation Layer                            │  │
//! │  │  • Menu cards           • Cart panel                             │  │
//! │  │  • Checkout page        • Payment page                           │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                     {"command": ...} per line                           │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Rust Backend (this crate)                     │  │
//! │  │                                                                  │  │
//! │  │  main.rs ────► Hands off to lib.rs                               │  │
//! │  │  lib.rs ─────► Logging, config, session, request loop            │  │
//! │  │  commands/ ──► add_to_cart, set_fulfillment_mode, complete_order │  │
//! │  │  state/ ─────► CheckoutSession, ConfigState                      │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         Cart Slot                                │  │
//! │  │  paradise_cart_v1.json (one file, rewritten on every change)     │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    paradise_storefront_lib::run()
}
