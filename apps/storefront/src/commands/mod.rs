//! # Commands Module
//!
//! All commands exposed to the presentation layer, plus the dispatcher that
//! routes JSON requests to them.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (Request, Response, dispatch)
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── checkout.rs  ◄─── Fulfillment, payment form, orders
//! ├── promo.rs     ◄─── Promo codes
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Presentation layer                                                     │
//! │  ──────────────────                                                     │
//! │  {"command":"add_to_cart","name":"Burger","price":"8.00"}               │
//! │         │                                                               │
//! │         │ (one JSON object per line)                                    │
//! │         ▼                                                               │
//! │  handle_line()                                                          │
//! │  ├── serde_json::from_str::<Request>  ── bad JSON ──► BAD_REQUEST       │
//! │  └── dispatch(session, config, request)                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  fn add_to_cart(                                                        │
//! │      session: &mut CheckoutSession<S>,  ◄── owned by the loop           │
//! │      config: &ConfigState,              ◄── read-only                   │
//! │      name, price, image,                ◄── from the request            │
//! │  ) -> ApiResult<AddToCartResponse>                                      │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  {"ok":true,"data":{...}}  or  {"ok":false,"error":{...}}               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod checkout;
pub mod config;
pub mod promo;

use paradise_core::{CheckoutForm, Money};
use paradise_store::KeyValueSlot;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ApiError, ApiResult};
use crate::state::{CheckoutSession, ConfigState};

/// A request from the presentation layer.
///
/// ## Wire Format
/// ```json
/// {"command": "update_quantity", "index": 0, "delta": -1}
/// {"command": "set_fulfillment_mode", "mode": "pickup"}
/// {"command": "complete_order", "form": {"firstName": "Ada", ...}}
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Request {
    GetCart,
    AddToCart {
        name: String,
        price: Money,
        #[serde(default)]
        image: Option<String>,
    },
    UpdateQuantity {
        index: usize,
        delta: i64,
    },
    ClearCart,
    SetFulfillmentMode {
        mode: String,
    },
    SetPaymentMethod {
        method: String,
    },
    GetCheckoutForm,
    ValidatePayment {
        #[serde(default)]
        form: CheckoutForm,
    },
    SavePaymentDetails {
        #[serde(default)]
        form: CheckoutForm,
    },
    PlaceOrder,
    CompleteOrder {
        #[serde(default)]
        form: CheckoutForm,
    },
    ApplyPromoCode {
        #[serde(default)]
        code: String,
    },
    GetConfig,
}

impl Request {
    /// The wire name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Request::GetCart => "get_cart",
            Request::AddToCart { .. } => "add_to_cart",
            Request::UpdateQuantity { .. } => "update_quantity",
            Request::ClearCart => "clear_cart",
            Request::SetFulfillmentMode { .. } => "set_fulfillment_mode",
            Request::SetPaymentMethod { .. } => "set_payment_method",
            Request::GetCheckoutForm => "get_checkout_form",
            Request::ValidatePayment { .. } => "validate_payment",
            Request::SavePaymentDetails { .. } => "save_payment_details",
            Request::PlaceOrder => "place_order",
            Request::CompleteOrder { .. } => "complete_order",
            Request::ApplyPromoCode { .. } => "apply_promo_code",
            Request::GetConfig => "get_config",
        }
    }
}

/// Envelope written back for every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl Response {
    pub fn success(data: serde_json::Value) -> Self {
        Response {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: ApiError) -> Self {
        Response {
            ok: false,
            data: None,
            error: Some(error),
        }
    }
}

impl From<ApiResult<serde_json::Value>> for Response {
    fn from(result: ApiResult<serde_json::Value>) -> Self {
        match result {
            Ok(data) => Response::success(data),
            Err(error) => Response::failure(error),
        }
    }
}

fn to_json<T: Serialize>(value: T) -> ApiResult<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|e| ApiError::internal(format!("Failed to serialize response: {}", e)))
}

/// Runs one request against the session.
pub fn dispatch<S: KeyValueSlot>(
    session: &mut CheckoutSession<S>,
    config: &ConfigState,
    request: Request,
) -> ApiResult<serde_json::Value> {
    match request {
        Request::GetCart => to_json(cart::get_cart(session, config)),
        Request::AddToCart { name, price, image } => {
            to_json(cart::add_to_cart(session, config, &name, price, image)?)
        }
        Request::UpdateQuantity { index, delta } => {
            to_json(cart::update_quantity(session, config, index, delta))
        }
        Request::ClearCart => to_json(cart::clear_cart(session, config)),
        Request::SetFulfillmentMode { mode } => {
            to_json(checkout::set_fulfillment_mode(session, config, &mode)?)
        }
        Request::SetPaymentMethod { method } => {
            to_json(checkout::set_payment_method(session, config, &method))
        }
        Request::GetCheckoutForm => to_json(checkout::get_checkout_form(session, config)),
        Request::ValidatePayment { form } => to_json(checkout::validate_payment(session, &form)),
        Request::SavePaymentDetails { form } => {
            to_json(checkout::save_payment_details(session, form)?)
        }
        Request::PlaceOrder => to_json(checkout::place_order(session, config)?),
        Request::CompleteOrder { form } => {
            to_json(checkout::complete_order(session, config, &form)?)
        }
        Request::ApplyPromoCode { code } => to_json(promo::apply_promo_code(session, &code)),
        Request::GetConfig => to_json(config::get_config(config)),
    }
}

/// Parses and runs one request line. Never panics on bad input.
pub fn handle_line<S: KeyValueSlot>(
    session: &mut CheckoutSession<S>,
    config: &ConfigState,
    line: &str,
) -> Response {
    let result = serde_json::from_str::<Request>(line)
        .map_err(ApiError::from)
        .and_then(|request| {
            let name = request.name();
            dispatch(session, config, request).map_err(|e| {
                warn!(command = name, code = ?e.code, message = %e.message, "Command failed");
                e
            })
        });

    result.into()
}
