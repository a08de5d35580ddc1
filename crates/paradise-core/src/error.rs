//! # Error Types
//!
//! Domain-specific error types for paradise-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  paradise-core errors (this file)                                      │
//! │  ├── CoreError        - Parsing of modes, methods, money               │
//! │  └── ValidationError  - Item input and checkout field failures         │
//! │                                                                         │
//! │  paradise-store errors (separate crate)                                │
//! │  └── StoreError       - Slot read/write failures (always swallowed     │
//! │                         by CartStore, never shown to the user)         │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── ApiError         - What the presentation layer sees (serialized)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. The `Display` text of a [`ValidationError`] is the exact message shown
//!    to the customer
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// None of these terminate a session: they are returned to the command
/// layer, which turns them into a correction prompt.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Fulfillment mode string is not `delivery` or `pickup`.
    #[error("Unknown fulfillment mode: '{0}'. Valid options: delivery, pickup")]
    UnknownFulfillmentMode(String),

    /// A money amount could not be parsed.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The checkout-form variants carry the customer-facing wording; the
/// item-input variants guard what the presentation layer may add to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Email does not look like `local@domain.tld`.
    #[error("Please enter a valid email address")]
    InvalidEmail,

    /// Phone has characters other than digits, spaces, hyphens, parentheses,
    /// or fewer than 10 digits.
    #[error("Please enter a valid phone number")]
    InvalidPhone,

    /// Card number left blank with card payment selected.
    #[error("Card number is required")]
    CardNumberRequired,

    /// Card expiry left blank with card payment selected.
    #[error("Expiration date is required")]
    CardExpiryRequired,

    /// CVV blank or shorter than three characters.
    #[error("CVV is required (3 digits)")]
    CvvRequired,

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Amount must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Amount is above the accepted ceiling.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: Money },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "First Name".to_string(),
        };
        assert_eq!(err.to_string(), "First Name is required");
        assert_eq!(
            ValidationError::InvalidEmail.to_string(),
            "Please enter a valid email address"
        );
        assert_eq!(
            ValidationError::CvvRequired.to_string(),
            "CVV is required (3 digits)"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::InvalidPhone.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(
            core_err.to_string(),
            "Validation error: Please enter a valid phone number"
        );
    }
}
