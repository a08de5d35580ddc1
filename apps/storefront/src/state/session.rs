//! # Checkout Session
//!
//! The single owner of everything that changes during a visit: the cart,
//! the cart store, the fulfillment controller and the saved checkout details.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Session Operations                          │
//! │                                                                         │
//! │  Presentation Action      Command                 Session Change        │
//! │  ───────────────────      ───────                 ──────────────        │
//! │                                                                         │
//! │  Click "Add" ────────────► add_to_cart() ───────► merge or append, save│
//! │                                                                         │
//! │  Click +/- ──────────────► update_quantity() ───► qty += delta, save   │
//! │                                                                         │
//! │  Toggle pickup ──────────► set_fulfillment_mode() ► mode replaced      │
//! │                                                                         │
//! │  Click "Place Order" ────► place_order() ───────► step = Payment       │
//! │                                                                         │
//! │  Click "Complete" ───────► complete_order() ────► cart cleared, saved  │
//! │                                                                         │
//! │  NOTE: Totals are never stored; every read recomputes them from the    │
//! │        cart and the current mode.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! Commands run one at a time and receive `&mut CheckoutSession`. The cart is
//! moved into the store for each mutation and the returned cart replaces it,
//! so there is no ambient cart anywhere else.

use paradise_core::{
    validate, Cart, CheckoutForm, FulfillmentMode, FulfillmentModeController, Money,
    PaymentMethod, PricingPolicy, Totals, ValidationResult,
};
use paradise_store::{CartStore, KeyValueSlot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Where the customer is in the checkout flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    /// Browsing the menu and reviewing the cart.
    #[default]
    Cart,
    /// On the payment page.
    Payment,
}

/// Per-visit checkout state.
pub struct CheckoutSession<S> {
    store: CartStore<S>,
    cart: Cart,
    controller: FulfillmentModeController,
    policy: PricingPolicy,
    step: CheckoutStep,
    saved_details: Option<CheckoutForm>,
    promo_code: Option<String>,
}

impl<S: KeyValueSlot> CheckoutSession<S> {
    /// Opens a session, restoring the cart from the store.
    pub fn open(store: CartStore<S>, policy: PricingPolicy) -> Self {
        let cart = store.load();
        info!(
            key = store.key(),
            lines = cart.line_count(),
            "Checkout session opened"
        );

        CheckoutSession {
            store,
            cart,
            controller: FulfillmentModeController::new(),
            policy,
            step: CheckoutStep::Cart,
            saved_details: None,
            promo_code: None,
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn controller(&self) -> &FulfillmentModeController {
        &self.controller
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Contact and address details from the last successful save.
    pub fn saved_details(&self) -> Option<&CheckoutForm> {
        self.saved_details.as_ref()
    }

    pub fn promo_code(&self) -> Option<&str> {
        self.promo_code.as_deref()
    }

    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// Totals for the current cart and mode, recomputed on every call.
    pub fn totals(&self) -> Totals {
        self.policy.compute_totals(&self.cart, self.controller.mode())
    }

    /// Validates `form` against the current mode and payment method.
    pub fn validate(&self, form: &CheckoutForm) -> ValidationResult {
        validate(form, self.controller.mode(), self.controller.payment_method())
    }

    // -------------------------------------------------------------------------
    // Cart mutations (each one is persisted)
    // -------------------------------------------------------------------------

    pub fn add_item(&mut self, name: &str, price: Money, image: Option<String>) {
        let cart = std::mem::take(&mut self.cart);
        self.cart = self.store.add_item(cart, name, price, image);
    }

    pub fn update_quantity(&mut self, index: usize, delta: i64) {
        let cart = std::mem::take(&mut self.cart);
        self.cart = self.store.update_quantity(cart, index, delta);
    }

    pub fn clear_cart(&mut self) {
        let cart = std::mem::take(&mut self.cart);
        self.cart = self.store.clear(cart);
    }

    // -------------------------------------------------------------------------
    // Fulfillment
    // -------------------------------------------------------------------------

    /// Returns true if the mode changed.
    pub fn set_mode(&mut self, mode: FulfillmentMode) -> bool {
        let changed = self.controller.set_mode(mode);
        if changed {
            debug!(%mode, "Fulfillment mode changed");
        }
        changed
    }

    /// Returns true if the method changed.
    pub fn set_payment_method(&mut self, method: PaymentMethod) -> bool {
        let changed = self.controller.set_payment_method(method);
        if changed {
            debug!(%method, "Payment method changed");
        }
        changed
    }

    // -------------------------------------------------------------------------
    // Checkout flow
    // -------------------------------------------------------------------------

    /// Keeps the customer's details for the rest of the visit.
    ///
    /// Card number, expiry and CVV are dropped; only preferences, contact
    /// and address details are kept.
    pub fn save_details(&mut self, mut form: CheckoutForm) {
        form.card_number.clear();
        form.expiry.clear();
        form.cvv.clear();
        self.saved_details = Some(form);
    }

    pub fn set_promo_code(&mut self, code: Option<String>) {
        self.promo_code = code;
    }

    /// Moves to the payment step.
    pub fn begin_payment(&mut self) {
        self.step = CheckoutStep::Payment;
    }

    /// Ends a completed order: empties (and persists) the cart and returns
    /// to the cart step.
    pub fn finish_order(&mut self) {
        self.clear_cart();
        self.step = CheckoutStep::Cart;
        self.promo_code = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paradise_core::CART_STORAGE_KEY;
    use paradise_store::MemorySlot;

    fn session() -> CheckoutSession<MemorySlot> {
        CheckoutSession::open(CartStore::new(MemorySlot::new()), PricingPolicy::default())
    }

    fn burger() -> Money {
        Money::from_cents(800)
    }

    #[test]
    fn test_open_restores_cart() {
        let mut slot = MemorySlot::new();
        slot.insert_raw(
            CART_STORAGE_KEY,
            r#"[{"name":"Burger","price":"8.00","quantity":2}]"#,
        );
        let session = CheckoutSession::open(CartStore::new(slot), PricingPolicy::default());

        assert_eq!(session.cart().total_quantity(), 2);
        assert_eq!(session.totals().total, Money::from_cents(2387));
    }

    #[test]
    fn test_mutations_are_persisted() {
        let mut session = session();
        session.add_item("Burger", burger(), None);
        session.add_item("Burger", burger(), None);
        session.update_quantity(0, 1);

        assert_eq!(session.cart().items()[0].quantity, 3);
        assert_eq!(&session.store().load(), session.cart());
    }

    #[test]
    fn test_totals_follow_mode() {
        let mut session = session();
        session.add_item("Burger", burger(), None);
        session.add_item("Burger", burger(), None);

        assert_eq!(session.totals().fee, Money::from_cents(499));
        assert!(session.set_mode(FulfillmentMode::Pickup));
        assert_eq!(session.totals().fee, Money::zero());
        assert_eq!(session.totals().total, Money::from_cents(1888));
        assert!(!session.set_mode(FulfillmentMode::Pickup));
    }

    #[test]
    fn test_validate_uses_current_mode_and_method() {
        let mut session = session();
        let form = CheckoutForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "555-123-4567".into(),
            ..CheckoutForm::default()
        };

        assert!(!session.validate(&form).is_valid);

        session.set_mode(FulfillmentMode::Pickup);
        session.set_payment_method(PaymentMethod::Other);
        assert!(session.validate(&form).is_valid);
    }

    #[test]
    fn test_save_details_drops_card_data() {
        let mut session = session();
        session.save_details(CheckoutForm {
            email: "ada@example.com".into(),
            card_number: "4111111111111111".into(),
            expiry: "12/30".into(),
            cvv: "123".into(),
            ..CheckoutForm::default()
        });

        let saved = session.saved_details().unwrap();
        assert_eq!(saved.email, "ada@example.com");
        assert!(saved.card_number.is_empty());
        assert!(saved.expiry.is_empty());
        assert!(saved.cvv.is_empty());
    }

    #[test]
    fn test_finish_order_resets_flow() {
        let mut session = session();
        session.add_item("Burger", burger(), None);
        session.set_promo_code(Some("PARADISE10".into()));
        session.begin_payment();
        assert_eq!(session.step(), CheckoutStep::Payment);

        session.finish_order();
        assert!(session.cart().is_empty());
        assert!(session.store().load().is_empty());
        assert_eq!(session.step(), CheckoutStep::Cart);
        assert_eq!(session.promo_code(), None);
    }
}
