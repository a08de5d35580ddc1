//! # Checkout Commands
//!
//! Fulfillment selection, payment-form validation and order completion.
//!
//! ## Payment Page Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Payment Page                                         │
//! │                                                                         │
//! │  [ Delivery | Pickup ]  ──────► set_fulfillment_mode                    │
//! │  Payment: [ card ▾ ]    ──────► set_payment_method                      │
//! │                                                                         │
//! │  First Name  Last Name   Email   Phone        (always)                  │
//! │  Street      City        Postal               (delivery only)           │
//! │  Card Number Expiry      CVV                  (card only)               │
//! │                                                                         │
//! │  [ Save Details ]       ──────► save_payment_details                    │
//! │  [ Complete Payment ]   ──────► complete_order                          │
//! │      (label is "Place Pickup Order" for pickup)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mode or method change returns the full form descriptor so the
//! presentation layer never re-derives which rows are shown or required.

use chrono::{DateTime, Utc};
use paradise_core::{
    CartItem, CheckoutForm, FormField, FulfillmentMode, PaymentMethod, Totals, ValidationResult,
};
use paradise_store::KeyValueSlot;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::commands::cart::TotalsDisplay;
use crate::error::{ApiError, ApiResult};
use crate::state::{CheckoutSession, CheckoutStep, ConfigState};

/// Toast shown after payment details are saved.
pub const DETAILS_SAVED_MESSAGE: &str = "Your delivery and payment preferences have been saved.";

// =============================================================================
// Response Types
// =============================================================================

/// A required input on the payment form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub field: FormField,
    /// Input `name` attribute
    pub key: String,
    pub label: String,
}

impl From<FormField> for FieldDescriptor {
    fn from(field: FormField) -> Self {
        FieldDescriptor {
            field,
            key: field.key().to_string(),
            label: field.label().to_string(),
        }
    }
}

/// Everything the payment page needs to lay itself out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutFormResponse {
    pub mode: FulfillmentMode,
    pub payment_method: PaymentMethod,
    /// Required inputs in validation order
    pub required_fields: Vec<FieldDescriptor>,
    pub shows_address_fields: bool,
    pub shows_card_fields: bool,
    pub shipping_label: String,
    pub submit_label: String,
    pub totals: Totals,
    pub display: TotalsDisplay,
    pub step: CheckoutStep,
    /// Details from the last successful save (card data excluded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_details: Option<CheckoutForm>,
}

impl CheckoutFormResponse {
    pub fn from_session<S: KeyValueSlot>(session: &CheckoutSession<S>, config: &ConfigState) -> Self {
        let controller = session.controller();
        let totals = session.totals();

        CheckoutFormResponse {
            mode: controller.mode(),
            payment_method: controller.payment_method(),
            required_fields: controller
                .required_fields()
                .into_iter()
                .map(FieldDescriptor::from)
                .collect(),
            shows_address_fields: controller.shows_address_fields(),
            shows_card_fields: controller.shows_card_fields(),
            shipping_label: controller.shipping_label().to_string(),
            submit_label: controller.submit_label().to_string(),
            display: TotalsDisplay::new(&totals, config),
            totals,
            step: session.step(),
            saved_details: session.saved_details().cloned(),
        }
    }
}

/// Validation outcome plus the headline message to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    #[serde(flatten)]
    pub result: ValidationResult,
    /// `errors[0]`, present only when invalid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_message: Option<String>,
}

impl From<ValidationResult> for ValidationResponse {
    fn from(result: ValidationResult) -> Self {
        let primary_message = (!result.is_valid).then(|| result.primary_message().to_string());
        ValidationResponse {
            result,
            primary_message,
        }
    }
}

/// A plain acknowledgement with a toast message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
}

/// Result of leaving the cart page for the payment page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub step: CheckoutStep,
    pub totals: Totals,
    pub display: TotalsDisplay,
}

/// Confirmation returned once an order is complete.
///
/// ## Example
/// ```json
/// {
///   "orderId": "6f1c…",
///   "placedAt": "2024-05-01T12:00:00Z",
///   "mode": "pickup",
///   "paymentMethod": "other",
///   "items": [{"name": "Burger", "price": "8.00", "quantity": 2}],
///   "totals": {"subtotal": "16.00", "fee": "0.00", "tax": "2.88", "total": "18.88"},
///   "message": "Your pickup order has been placed! We’ll have it ready shortly."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub mode: FulfillmentMode,
    pub payment_method: PaymentMethod,
    pub items: Vec<CartItem>,
    pub totals: Totals,
    pub display: TotalsDisplay,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
    pub message: String,
}

// =============================================================================
// Commands
// =============================================================================

/// Switches between delivery and pickup.
///
/// ## Arguments
/// * `mode` - `"delivery"` or `"pickup"` (case-insensitive)
///
/// Typed field values are untouched; only what is required and shown
/// changes, along with the fee.
pub fn set_fulfillment_mode<S: KeyValueSlot>(
    session: &mut CheckoutSession<S>,
    config: &ConfigState,
    mode: &str,
) -> ApiResult<CheckoutFormResponse> {
    debug!(mode = %mode, "set_fulfillment_mode command");
    let mode: FulfillmentMode = mode.parse()?;
    session.set_mode(mode);
    Ok(CheckoutFormResponse::from_session(session, config))
}

/// Changes the payment method. Any value other than `"card"` is `Other`.
pub fn set_payment_method<S: KeyValueSlot>(
    session: &mut CheckoutSession<S>,
    config: &ConfigState,
    method: &str,
) -> CheckoutFormResponse {
    debug!(method = %method, "set_payment_method command");
    session.set_payment_method(PaymentMethod::from_form_value(method));
    CheckoutFormResponse::from_session(session, config)
}

/// Gets the current form layout, labels and totals.
pub fn get_checkout_form<S: KeyValueSlot>(
    session: &CheckoutSession<S>,
    config: &ConfigState,
) -> CheckoutFormResponse {
    debug!("get_checkout_form command");
    CheckoutFormResponse::from_session(session, config)
}

/// Validates the form without side effects.
///
/// Always succeeds; an invalid form is reported in the response, with the
/// offending fields listed for highlighting.
pub fn validate_payment<S: KeyValueSlot>(
    session: &CheckoutSession<S>,
    form: &CheckoutForm,
) -> ValidationResponse {
    debug!("validate_payment command");
    session.validate(form).into()
}

/// Saves the customer's delivery and payment preferences.
///
/// ## Errors
/// `VALIDATION_ERROR` carrying the primary message if the form is invalid.
pub fn save_payment_details<S: KeyValueSlot>(
    session: &mut CheckoutSession<S>,
    form: CheckoutForm,
) -> ApiResult<MessageResponse> {
    debug!("save_payment_details command");

    let result = session.validate(&form);
    if !result.is_valid {
        return Err(ApiError::validation(result.primary_message()));
    }

    session.save_details(form);
    Ok(MessageResponse {
        message: DETAILS_SAVED_MESSAGE.to_string(),
    })
}

/// Moves from the cart page to the payment page.
///
/// ## Errors
/// `CART_ERROR` if the cart is empty.
pub fn place_order<S: KeyValueSlot>(
    session: &mut CheckoutSession<S>,
    config: &ConfigState,
) -> ApiResult<PlaceOrderResponse> {
    debug!("place_order command");

    if session.cart().is_empty() {
        return Err(ApiError::empty_cart());
    }

    session.begin_payment();
    let totals = session.totals();
    Ok(PlaceOrderResponse {
        step: session.step(),
        display: TotalsDisplay::new(&totals, config),
        totals,
    })
}

/// Completes the order.
///
/// ## Flow
/// ```text
/// cart empty? ──yes──► CART_ERROR "Your cart is empty."
///      │ no
///      ▼
/// form valid? ──no───► VALIDATION_ERROR (primary message)
///      │ yes
///      ▼
/// snapshot lines + totals ──► clear cart (persisted) ──► confirmation
/// ```
pub fn complete_order<S: KeyValueSlot>(
    session: &mut CheckoutSession<S>,
    config: &ConfigState,
    form: &CheckoutForm,
) -> ApiResult<OrderConfirmation> {
    debug!("complete_order command");

    if session.cart().is_empty() {
        return Err(ApiError::empty_cart());
    }

    let result = session.validate(form);
    if !result.is_valid {
        return Err(ApiError::validation(result.primary_message()));
    }

    let controller = *session.controller();
    let totals = session.totals();
    let confirmation = OrderConfirmation {
        order_id: Uuid::new_v4(),
        placed_at: Utc::now(),
        mode: controller.mode(),
        payment_method: controller.payment_method(),
        items: session.cart().items().to_vec(),
        display: TotalsDisplay::new(&totals, config),
        totals,
        promo_code: session.promo_code().map(str::to_string),
        message: controller.success_message().to_string(),
    };

    session.finish_order();
    info!(
        order_id = %confirmation.order_id,
        mode = %confirmation.mode,
        total = %confirmation.totals.total,
        "Order completed"
    );

    Ok(confirmation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::error::ErrorCode;
    use paradise_core::Money;
    use paradise_store::{CartStore, MemorySlot};

    fn setup() -> (CheckoutSession<MemorySlot>, ConfigState) {
        let config = ConfigState::default();
        let session = CheckoutSession::open(
            CartStore::new(MemorySlot::new()),
            config.pricing_policy(),
        );
        (session, config)
    }

    fn contact_form() -> CheckoutForm {
        CheckoutForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "(555) 123-4567".into(),
            ..CheckoutForm::default()
        }
    }

    fn full_form() -> CheckoutForm {
        CheckoutForm {
            street: "1 Analytical Way".into(),
            city: "London".into(),
            postal: "N1 9GU".into(),
            card_number: "4111 1111 1111 1111".into(),
            expiry: "12/30".into(),
            cvv: "123".into(),
            ..contact_form()
        }
    }

    fn add_burgers(session: &mut CheckoutSession<MemorySlot>, config: &ConfigState) {
        add_to_cart(session, config, "Burger", Money::from_cents(800), None).unwrap();
        add_to_cart(session, config, "Burger", Money::from_cents(800), None).unwrap();
    }

    #[test]
    fn test_default_form_layout() {
        let (session, config) = setup();
        let form = get_checkout_form(&session, &config);

        assert_eq!(form.mode, FulfillmentMode::Delivery);
        assert_eq!(form.payment_method, PaymentMethod::Card);
        assert_eq!(form.required_fields.len(), 10);
        assert_eq!(form.required_fields[4].label, "Street Address");
        assert!(form.shows_address_fields);
        assert!(form.shows_card_fields);
        assert_eq!(form.submit_label, "Complete Payment");
        assert_eq!(form.step, CheckoutStep::Cart);
    }

    #[test]
    fn test_pickup_other_requires_base_fields_only() {
        let (mut session, config) = setup();
        set_fulfillment_mode(&mut session, &config, "pickup").unwrap();
        let form = set_payment_method(&mut session, &config, "cash");

        let keys: Vec<&str> = form.required_fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, ["firstName", "lastName", "email", "phone"]);
        assert!(!form.shows_address_fields);
        assert!(!form.shows_card_fields);
        assert_eq!(form.shipping_label, "Pickup");
        assert_eq!(form.submit_label, "Place Pickup Order");
    }

    #[test]
    fn test_mode_switch_waives_fee() {
        let (mut session, config) = setup();
        add_burgers(&mut session, &config);

        let form = set_fulfillment_mode(&mut session, &config, "Pickup").unwrap();
        assert_eq!(form.display.fee, "$0.00");
        assert_eq!(form.display.total, "$18.88");

        let form = set_fulfillment_mode(&mut session, &config, "delivery").unwrap();
        assert_eq!(form.display.total, "$23.87");
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let (mut session, config) = setup();
        let err = set_fulfillment_mode(&mut session, &config, "drone").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(session.controller().mode(), FulfillmentMode::Delivery);
    }

    #[test]
    fn test_validate_payment_bad_email() {
        let (mut session, config) = setup();
        set_payment_method(&mut session, &config, "other");
        let form = CheckoutForm {
            email: "bad".into(),
            ..CheckoutForm::default()
        };

        let response = validate_payment(&session, &form);
        assert!(!response.result.is_valid);
        assert_eq!(
            response.primary_message.as_deref(),
            Some("First Name is required")
        );
        assert!(response
            .result
            .errors
            .contains(&"Please enter a valid email address".to_string()));
        assert!(response.result.invalid_fields.contains(&FormField::Email));
    }

    #[test]
    fn test_validate_payment_serialized_shape() {
        let (session, _config) = setup();
        let json = serde_json::to_value(validate_payment(&session, &full_form())).unwrap();

        assert_eq!(json["isValid"], true);
        assert_eq!(json["errors"], serde_json::json!([]));
        assert!(json.get("primaryMessage").is_none());
    }

    #[test]
    fn test_save_payment_details() {
        let (mut session, _config) = setup();

        let err = save_payment_details(&mut session, contact_form()).unwrap_err();
        assert_eq!(err.message, "Street Address is required");
        assert!(session.saved_details().is_none());

        let ok = save_payment_details(&mut session, full_form()).unwrap();
        assert_eq!(ok.message, DETAILS_SAVED_MESSAGE);
        assert_eq!(session.saved_details().unwrap().city, "London");
    }

    #[test]
    fn test_place_order_requires_items() {
        let (mut session, config) = setup();
        let err = place_order(&mut session, &config).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(err.message, "Your cart is empty.");

        add_burgers(&mut session, &config);
        let response = place_order(&mut session, &config).unwrap();
        assert_eq!(response.step, CheckoutStep::Payment);
        assert_eq!(response.display.total, "$23.87");
    }

    #[test]
    fn test_complete_order_empty_cart() {
        let (mut session, config) = setup();
        let err = complete_order(&mut session, &config, &full_form()).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_complete_order_invalid_form_keeps_cart() {
        let (mut session, config) = setup();
        add_burgers(&mut session, &config);

        let form = CheckoutForm {
            cvv: "12".into(),
            ..full_form()
        };
        let err = complete_order(&mut session, &config, &form).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "CVV is required (3 digits)");
        assert_eq!(session.cart().total_quantity(), 2);
    }

    #[test]
    fn test_complete_delivery_order() {
        let (mut session, config) = setup();
        add_burgers(&mut session, &config);
        place_order(&mut session, &config).unwrap();

        let confirmation = complete_order(&mut session, &config, &full_form()).unwrap();
        assert_eq!(confirmation.message, "Payment successful! Your order is on its way.");
        assert_eq!(confirmation.items.len(), 1);
        assert_eq!(confirmation.items[0].quantity, 2);
        assert_eq!(confirmation.display.total, "$23.87");

        assert!(session.cart().is_empty());
        assert!(session.store().load().is_empty());
        assert_eq!(session.step(), CheckoutStep::Cart);
    }

    #[test]
    fn test_complete_pickup_order_without_card() {
        let (mut session, config) = setup();
        add_burgers(&mut session, &config);
        set_fulfillment_mode(&mut session, &config, "pickup").unwrap();
        set_payment_method(&mut session, &config, "cash");

        let confirmation = complete_order(&mut session, &config, &contact_form()).unwrap();
        assert_eq!(confirmation.mode, FulfillmentMode::Pickup);
        assert_eq!(confirmation.payment_method, PaymentMethod::Other);
        assert_eq!(confirmation.totals.total, Money::from_cents(1888));
        assert_eq!(
            confirmation.message,
            "Your pickup order has been placed! We’ll have it ready shortly."
        );
    }

    #[test]
    fn test_order_ids_are_unique() {
        let (mut session, config) = setup();
        add_burgers(&mut session, &config);
        let first = complete_order(&mut session, &config, &full_form()).unwrap();
        add_burgers(&mut session, &config);
        let second = complete_order(&mut session, &config, &full_form()).unwrap();

        assert_ne!(first.order_id, second.order_id);
    }
}
