//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Presentation                 Rust Backend                              │
//! │  ────────────                 ────────────                              │
//! │                                                                         │
//! │  {"command":"complete_order", ...}                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Dispatcher                                                      │  │
//! │  │  Malformed JSON? ─── serde_json::Error ─────────────┐            │  │
//! │  │         │                                            │            │  │
//! │  │         ▼                                            ▼            │  │
//! │  │  Command Function                                                 │  │
//! │  │  Result<T, ApiError>                                              │  │
//! │  │         │                                                         │  │
//! │  │         ▼                                                         │  │
//! │  │  Empty cart? ───────── ApiError::cart ──────────── ApiError ────►│  │
//! │  │         │                                                         │  │
//! │  │         ▼                                                         │  │
//! │  │  Validation Error? ─── CoreError::Validation ──────────┘          │  │
//! │  │         │                                                         │  │
//! │  │         ▼                                                         │  │
//! │  │  Success ───────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  {"ok":false,"error":{"code":"CART_ERROR","message":"Your cart is      │
//! │   empty."}}                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage failures never show up here: the cart store logs and swallows
//! them, so the in-memory cart stays authoritative.

use paradise_core::{CoreError, ValidationError};
use serde::{Deserialize, Serialize};

/// API error returned from storefront commands.
///
/// ## Serialization
/// This is what the presentation layer receives when a command fails:
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Please enter a valid email address"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (form fields, item input, unknown mode)
    ValidationError,

    /// Cart operation refused (e.g. ordering with an empty cart)
    CartError,

    /// The request itself could not be understood
    BadRequest,

    /// Internal error
    Internal,
}

/// Result type for command handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// The cart is empty and the command needs items.
    pub fn empty_cart() -> Self {
        ApiError::cart("Your cart is empty.")
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownFulfillmentMode(_) | CoreError::InvalidAmount(_) => {
                ApiError::validation(err.to_string())
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

/// Validation errors already carry customer-facing wording.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// A request line that is not a known command.
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::bad_request(format!("Malformed request: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::empty_cart();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": "CART_ERROR", "message": "Your cart is empty."})
        );
    }

    #[test]
    fn test_from_validation_error_keeps_wording() {
        let err: ApiError = ValidationError::InvalidEmail.into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Please enter a valid email address");
    }

    #[test]
    fn test_from_core_error() {
        let err: ApiError = CoreError::Validation(ValidationError::CvvRequired).into();
        assert_eq!(err.message, "CVV is required (3 digits)");

        let err: ApiError = CoreError::UnknownFulfillmentMode("drone".into()).into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("drone"));
    }

    #[test]
    fn test_from_serde_error_is_bad_request() {
        let json_err = serde_json::from_str::<u8>("{").unwrap_err();
        let err: ApiError = json_err.into();
        assert_eq!(err.code, ErrorCode::BadRequest);
        assert!(err.message.starts_with("Malformed request"));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ApiError::internal("boom").to_string(),
            "[Internal] boom"
        );
    }
}
