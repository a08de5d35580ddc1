//! # Validation Module
//!
//! Checkout form rules and item input checks.
//!
//! ## Required-Field Set
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   required_fields(mode, method)                         │
//! │                                                                         │
//! │  Always:            First Name, Last Name, Email, Phone                 │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  mode == Delivery:  + Street Address, City, Postal Code                 │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  method == Card:    + Card Number, Expiry, CVV                          │
//! │                                                                         │
//! │  The SAME list drives the validator and which inputs the presentation  │
//! │  layer marks as mandatory.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Validation Algorithm
//! Walk the required fields in declared order. For each, check presence, then
//! format. Collect every failure in that order; the first one is the primary
//! error shown to the customer.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{FulfillmentMode, PaymentMethod};
use crate::{MAX_ITEM_NAME_LEN, MAX_ITEM_PRICE_CENTS};

/// Result type for single-value validators.
pub type FieldResult<T> = Result<T, ValidationError>;

/// Shown when validation fails without a more specific message.
pub const FALLBACK_ERROR_MESSAGE: &str = "Please fill in all required fields.";

/// Minimum CVV length.
pub const MIN_CVV_LEN: usize = 3;

/// Minimum digits in a phone number once punctuation is stripped.
pub const MIN_PHONE_DIGITS: usize = 10;

// =============================================================================
// Form Fields
// =============================================================================

/// A checkout form input that can be required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Phone,
    Street,
    City,
    Postal,
    CardNumber,
    Expiry,
    Cvv,
}

impl FormField {
    /// Required for every order.
    pub const BASE: [FormField; 4] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Phone,
    ];

    /// Required for delivery orders.
    pub const ADDRESS: [FormField; 3] = [FormField::Street, FormField::City, FormField::Postal];

    /// Required for card payment.
    pub const CARD: [FormField; 3] = [FormField::CardNumber, FormField::Expiry, FormField::Cvv];

    /// The input `name` attribute on the payment form.
    pub fn key(&self) -> &'static str {
        match self {
            FormField::FirstName => "firstName",
            FormField::LastName => "lastName",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Street => "street",
            FormField::City => "city",
            FormField::Postal => "postal",
            FormField::CardNumber => "cardNumber",
            FormField::Expiry => "expiry",
            FormField::Cvv => "cvv",
        }
    }

    /// Human-readable label used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::FirstName => "First Name",
            FormField::LastName => "Last Name",
            FormField::Email => "Email",
            FormField::Phone => "Phone",
            FormField::Street => "Street Address",
            FormField::City => "City",
            FormField::Postal => "Postal Code",
            FormField::CardNumber => "Card Number",
            FormField::Expiry => "Expiration Date",
            FormField::Cvv => "CVV",
        }
    }
}

/// Computes the required-field set for a mode and payment method.
///
/// ## Example
/// ```rust
/// use paradise_core::{required_fields, FormField, FulfillmentMode, PaymentMethod};
///
/// let pickup = required_fields(FulfillmentMode::Pickup, PaymentMethod::Other);
/// assert_eq!(pickup, FormField::BASE.to_vec());
///
/// let full = required_fields(FulfillmentMode::Delivery, PaymentMethod::Card);
/// assert_eq!(full.len(), 10);
/// ```
pub fn required_fields(mode: FulfillmentMode, method: PaymentMethod) -> Vec<FormField> {
    let mut fields = FormField::BASE.to_vec();
    if mode == FulfillmentMode::Delivery {
        fields.extend(FormField::ADDRESS);
    }
    if method.is_card() {
        fields.extend(FormField::CARD);
    }
    fields
}

// =============================================================================
// Checkout Form
// =============================================================================

/// Values typed into the payment form. Missing keys deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub postal: String,
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
}

impl CheckoutForm {
    /// Returns the raw value of `field`.
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Street => &self.street,
            FormField::City => &self.city,
            FormField::Postal => &self.postal,
            FormField::CardNumber => &self.card_number,
            FormField::Expiry => &self.expiry,
            FormField::Cvv => &self.cvv,
        }
    }
}

// =============================================================================
// Validation Result
// =============================================================================

/// Outcome of validating the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Failure messages in declared field order; `errors[0]` is primary.
    pub errors: Vec<String>,
    /// Fields to flag, parallel to `errors`.
    pub invalid_fields: Vec<FormField>,
}

impl ValidationResult {
    /// The headline message, if any failure occurred.
    pub fn primary_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }

    /// The headline message, falling back to a generic prompt.
    pub fn primary_message(&self) -> &str {
        self.primary_error().unwrap_or(FALLBACK_ERROR_MESSAGE)
    }
}

/// Validates the form against the fields required for `mode` and `method`.
///
/// ## User Workflow
/// ```text
/// Customer clicks "Complete Payment"
///      │
///      ▼
/// validate(form, Delivery, Card) ← THIS FUNCTION
///      │
///      ├── is_valid == false → toast errors[0], flag invalid_fields
///      │
///      └── is_valid == true  → order may complete
/// ```
pub fn validate(form: &CheckoutForm, mode: FulfillmentMode, method: PaymentMethod) -> ValidationResult {
    let mut errors = Vec::new();
    let mut invalid_fields = Vec::new();

    for field in required_fields(mode, method) {
        if let Err(err) = check_field(field, form.value(field)) {
            errors.push(err.to_string());
            invalid_fields.push(field);
        }
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        invalid_fields,
    }
}

/// Presence then format check for one required field.
pub fn check_field(field: FormField, raw: &str) -> FieldResult<()> {
    let value = raw.trim();

    match field {
        FormField::CardNumber if value.is_empty() => Err(ValidationError::CardNumberRequired),
        FormField::Expiry if value.is_empty() => Err(ValidationError::CardExpiryRequired),
        FormField::Cvv if value.chars().count() < MIN_CVV_LEN => Err(ValidationError::CvvRequired),
        FormField::CardNumber | FormField::Expiry | FormField::Cvv => Ok(()),
        _ if value.is_empty() => Err(ValidationError::Required {
            field: field.label().to_string(),
        }),
        FormField::Email if !is_valid_email(value) => Err(ValidationError::InvalidEmail),
        FormField::Phone if !is_valid_phone(value) => Err(ValidationError::InvalidPhone),
        _ => Ok(()),
    }
}

// =============================================================================
// Format Rules
// =============================================================================

/// `local@domain.tld`: exactly one `@`, no whitespace, and a `.` in the domain
/// with at least one character on each side.
///
/// ## Example
/// ```rust
/// use paradise_core::validation::is_valid_email;
///
/// assert!(is_valid_email("sam@example.com"));
/// assert!(!is_valid_email("sam@example"));
/// assert!(!is_valid_email("sam smith@example.com"));
/// ```
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Digits, whitespace, hyphens and parentheses only, with at least 10 digits.
pub fn is_valid_phone(value: &str) -> bool {
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '(' | ')'));
    let digits = value.chars().filter(char::is_ascii_digit).count();

    !value.is_empty() && allowed && digits >= MIN_PHONE_DIGITS
}

// =============================================================================
// Item Input Validators
// =============================================================================

/// Validates a menu item name before it enters the cart.
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
pub fn validate_item_name(name: &str) -> FieldResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Zero is allowed (free items)
/// - Not negative
/// - At most $1,000,000.00
pub fn validate_price(price: Money) -> FieldResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    let max = Money::from_cents(MAX_ITEM_PRICE_CENTS);
    if price > max {
        return Err(ValidationError::TooLarge {
            field: "price".to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> CheckoutForm {
        CheckoutForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "(555) 123-4567".into(),
            street: "1 Analytical Way".into(),
            city: "London".into(),
            postal: "N1 9GU".into(),
            card_number: "4111111111111111".into(),
            expiry: "12/29".into(),
            cvv: "123".into(),
        }
    }

    #[test]
    fn test_required_fields_pickup_other() {
        let fields = required_fields(FulfillmentMode::Pickup, PaymentMethod::Other);
        assert_eq!(fields, FormField::BASE.to_vec());
    }

    #[test]
    fn test_required_fields_delivery_card_order() {
        let fields = required_fields(FulfillmentMode::Delivery, PaymentMethod::Card);
        let mut expected = FormField::BASE.to_vec();
        expected.extend(FormField::ADDRESS);
        expected.extend(FormField::CARD);
        assert_eq!(fields, expected);
    }

    #[test]
    fn test_required_fields_pickup_card() {
        let fields = required_fields(FulfillmentMode::Pickup, PaymentMethod::Card);
        assert_eq!(fields.len(), 7);
        assert!(!fields.contains(&FormField::Street));
        assert!(fields.contains(&FormField::Cvv));
    }

    #[test]
    fn test_complete_form_is_valid() {
        let result = validate(&complete_form(), FulfillmentMode::Delivery, PaymentMethod::Card);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.primary_error(), None);
        assert_eq!(result.primary_message(), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_bad_email_only_form() {
        let form = CheckoutForm {
            email: "bad".into(),
            ..CheckoutForm::default()
        };
        let result = validate(&form, FulfillmentMode::Delivery, PaymentMethod::Other);

        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                "First Name is required",
                "Last Name is required",
                "Please enter a valid email address",
                "Phone is required",
                "Street Address is required",
                "City is required",
                "Postal Code is required",
            ]
        );
        assert_eq!(result.primary_error(), Some("First Name is required"));
        assert_eq!(result.invalid_fields[2], FormField::Email);
    }

    #[test]
    fn test_pickup_ignores_address() {
        let form = CheckoutForm {
            street: String::new(),
            city: String::new(),
            postal: String::new(),
            ..complete_form()
        };
        let pickup = validate(&form, FulfillmentMode::Pickup, PaymentMethod::Card);
        assert!(pickup.is_valid);

        let delivery = validate(&form, FulfillmentMode::Delivery, PaymentMethod::Card);
        assert_eq!(
            delivery.invalid_fields,
            vec![FormField::Street, FormField::City, FormField::Postal]
        );
    }

    #[test]
    fn test_card_messages() {
        let form = CheckoutForm {
            card_number: "   ".into(),
            expiry: String::new(),
            cvv: "12".into(),
            ..complete_form()
        };
        let result = validate(&form, FulfillmentMode::Delivery, PaymentMethod::Card);
        assert_eq!(
            result.errors,
            vec![
                "Card number is required",
                "Expiration date is required",
                "CVV is required (3 digits)",
            ]
        );

        let other = validate(&form, FulfillmentMode::Delivery, PaymentMethod::Other);
        assert!(other.is_valid);
    }

    #[test]
    fn test_values_are_trimmed() {
        let form = CheckoutForm {
            first_name: "   ".into(),
            email: "  ada@example.com  ".into(),
            ..complete_form()
        };
        let result = validate(&form, FulfillmentMode::Pickup, PaymentMethod::Other);
        assert_eq!(result.errors, vec!["First Name is required"]);
    }

    #[test]
    fn test_email_rules() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(!is_valid_email("bad"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@example."));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("a@exa mple.com"));
    }

    #[test]
    fn test_phone_rules() {
        assert!(is_valid_phone("5551234567"));
        assert!(is_valid_phone("(555) 123-4567"));
        assert!(!is_valid_phone("+1 555 123 4567"));
        assert!(!is_valid_phone("555-1234"));
        assert!(!is_valid_phone("555.123.4567"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Burger").is_ok());
        assert!(validate_item_name("  ").is_err());
        assert!(validate_item_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(899)).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());

        assert!(validate_price(Money::from_cents(MAX_ITEM_PRICE_CENTS)).is_ok());
        let err = validate_price(Money::from_cents(MAX_ITEM_PRICE_CENTS + 1)).unwrap_err();
        assert_eq!(err.to_string(), "price must be at most $1000000.00");
    }

    #[test]
    fn test_form_deserializes_partial() {
        let form: CheckoutForm = serde_json::from_str(r#"{"email":"bad","cardNumber":"4111"}"#).unwrap();
        assert_eq!(form.email, "bad");
        assert_eq!(form.card_number, "4111");
        assert!(form.first_name.is_empty());
    }
}
