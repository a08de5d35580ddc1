//! # Store Error Types
//!
//! Error types for slot reads and writes.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error / quota                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartStore logs it at WARN and carries on:                             │
//! │    read failure  → empty cart                                          │
//! │    write failure → in-memory cart stays authoritative                  │
//! │                                                                         │
//! │  Nothing here ever reaches the customer.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Slot operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored value is not a valid cart.
    ///
    /// ## When This Occurs
    /// - Truncated or hand-edited file
    /// - Record with quantity 0 or a negative quantity
    /// - Non-numeric price
    #[error("Stored cart is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The slot refused a write because it is full.
    #[error("Storage quota exceeded: {needed} bytes needed, {capacity} available")]
    QuotaExceeded { needed: usize, capacity: usize },

    /// No platform data directory could be determined.
    #[error("No data directory available")]
    NoDataDir,
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
