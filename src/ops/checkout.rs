//! Checkout: cash with SMS verification, or card.
//!
//! Cash orders walk `None -> Sending -> Verifying -> complete`; a failed send
//! drops back to `None`, a failed verify stays in `Verifying` so the code can
//! be retyped. Card orders have no steps beyond `is_processing`. A successful
//! order clears the cart; any failure leaves it untouched.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use miette::Diagnostic as MietteDiagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::{ApiError, ApiReply, CustomerInfo, OrderBackend, OrderSubmission};
use crate::core::cart::Cart;
use crate::core::money::Money;
use crate::ops::ledger::{CartLedger, CartStore};
use crate::ops::pickup::{BusinessHours, PickupError, PickupTime};

/// Card surcharge applied when no other is configured.
pub const DEFAULT_CARD_FEE_PERCENT: u32 = 4;

/// Length of the SMS verification code.
pub const SMS_CODE_LEN: usize = 6;

pub const MADE_TO_ORDER_ESTIMATE: &str = "~7-10 mins";
pub const QUICK_ESTIMATE: &str = "~3-7 mins";

#[derive(Debug, Error, MietteDiagnostic)]
pub enum CheckoutError {
    #[error("Phone Required: please enter your phone number first")]
    #[diagnostic(code(griddle::checkout::phone_required))]
    PhoneRequired,

    #[error("Invalid Code: please enter a valid {SMS_CODE_LEN}-digit verification code")]
    #[diagnostic(code(griddle::checkout::invalid_code))]
    InvalidCode,

    #[error("no verification code has been sent for this order")]
    #[diagnostic(
        code(griddle::checkout::wrong_step),
        help("send a verification code first")
    )]
    NotVerifying,

    #[error("your cart is empty")]
    #[diagnostic(
        code(griddle::checkout::empty_cart),
        help("add something with `griddle add` first")
    )]
    EmptyCart,

    #[error("{0}")]
    #[diagnostic(code(griddle::checkout::rejected))]
    Rejected(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Pickup(#[from] PickupError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => f.write_str("cash"),
            PaymentMethod::Card => f.write_str("card"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            other => Err(format!("unknown payment method `{}` (expected cash or card)", other)),
        }
    }
}

/// Where a cash order is in SMS verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CashStep {
    #[default]
    None,
    Sending,
    Verifying,
}

/// What the customer sees once an order is placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub message: String,
    pub estimate: &'static str,
    pub amount: Money,
    pub payment: PaymentMethod,
}

/// Preparation estimate for the lines in a cart.
pub fn estimate_for(cart: &Cart) -> &'static str {
    if cart.lines().iter().any(|l| l.item_type.is_made_to_order()) {
        MADE_TO_ORDER_ESTIMATE
    } else {
        QUICK_ESTIMATE
    }
}

/// One checkout attempt.
#[derive(Debug, Clone)]
pub struct Checkout {
    customer: CustomerInfo,
    pickup: PickupTime,
    payment: PaymentMethod,
    card_fee_percent: u32,
    hours: BusinessHours,
    step: CashStep,
    sms_message: Option<String>,
    processing: bool,
    completed: Option<OrderConfirmation>,
    clock: fn() -> DateTime<Local>,
}

impl Checkout {
    pub fn new(customer: CustomerInfo, payment: PaymentMethod) -> Self {
        Checkout {
            customer,
            pickup: PickupTime::Asap,
            payment,
            card_fee_percent: DEFAULT_CARD_FEE_PERCENT,
            hours: BusinessHours::default(),
            step: CashStep::None,
            sms_message: None,
            processing: false,
            completed: None,
            clock: Local::now,
        }
    }

    pub fn with_pickup(mut self, pickup: PickupTime) -> Self {
        self.pickup = pickup;
        self
    }

    pub fn with_hours(mut self, hours: BusinessHours) -> Self {
        self.hours = hours;
        self
    }

    pub fn with_card_fee(mut self, percent: u32) -> Self {
        self.card_fee_percent = percent;
        self
    }

    /// Replace the source of "now" used for pickup checks.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    pub fn pickup(&self) -> PickupTime {
        self.pickup
    }

    pub fn payment(&self) -> PaymentMethod {
        self.payment
    }

    pub fn step(&self) -> CashStep {
        self.step
    }

    /// Message from the backend after a code was sent.
    pub fn sms_message(&self) -> Option<&str> {
        self.sms_message.as_deref()
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn completed(&self) -> Option<&OrderConfirmation> {
        self.completed.as_ref()
    }

    /// What the customer pays with the chosen method.
    pub fn amount_due(&self, cart: &Cart) -> Money {
        match self.payment {
            PaymentMethod::Cash => cart.total(),
            PaymentMethod::Card => cart.subtotal_with_fee(self.card_fee_percent),
        }
    }

    /// Difference between paying by card and paying cash.
    pub fn card_fee(&self, cart: &Cart) -> Money {
        cart.total().percent(self.card_fee_percent)
    }

    /// Checkout is only reachable with something to order, unless an order
    /// has just been placed or a submission is still running.
    pub fn ensure_reachable(&self, cart: &Cart) -> Result<(), CheckoutError> {
        if cart.is_empty() && self.completed.is_none() && !self.processing {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(())
    }

    /// Validate the pickup time and assemble the form for the backend.
    pub fn submission(&self, cart: &Cart) -> Result<OrderSubmission, CheckoutError> {
        let now = (self.clock)();
        self.hours.check(&self.pickup, now.naive_local())?;
        Ok(OrderSubmission::from_cart(
            &self.customer,
            cart,
            self.amount_due(cart),
            Some(self.pickup.wire_value(now)),
        ))
    }

    /// Ask for an SMS code for a cash order.
    pub fn send_sms<B, S>(
        &mut self,
        backend: &B,
        ledger: &CartLedger<S>,
    ) -> Result<&str, CheckoutError>
    where
        B: OrderBackend + ?Sized,
        S: CartStore,
    {
        if self.customer.phone.trim().is_empty() {
            return Err(CheckoutError::PhoneRequired);
        }
        self.ensure_not_empty(ledger.cart())?;
        self.payment = PaymentMethod::Cash;
        let submission = self.submission(ledger.cart())?;

        self.step = CashStep::Sending;
        tracing::debug!("sending verification code to {}", submission.phone_number);
        match backend.send_sms_verification(&submission) {
            Ok(ApiReply {
                success: true,
                message,
            }) => {
                self.step = CashStep::Verifying;
                self.sms_message = Some(
                    message.unwrap_or_else(|| "SMS verification code sent successfully".to_string()),
                );
                Ok(self.sms_message.as_deref().unwrap_or_default())
            }
            Ok(reply) => {
                self.step = CashStep::None;
                Err(CheckoutError::Rejected(reply.message.unwrap_or_else(|| {
                    "Failed to send SMS verification. Please try again.".to_string()
                })))
            }
            Err(e) => {
                self.step = CashStep::None;
                Err(e.into())
            }
        }
    }

    /// Submit the SMS code; success places the cash order.
    pub fn verify<B, S>(
        &mut self,
        backend: &B,
        ledger: &mut CartLedger<S>,
        code: &str,
    ) -> Result<&OrderConfirmation, CheckoutError>
    where
        B: OrderBackend + ?Sized,
        S: CartStore,
    {
        let code = code.trim();
        if code.len() != SMS_CODE_LEN || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(CheckoutError::InvalidCode);
        }
        if self.step != CashStep::Verifying {
            return Err(CheckoutError::NotVerifying);
        }
        self.ensure_not_empty(ledger.cart())?;
        let submission = self.submission(ledger.cart())?;

        self.processing = true;
        let result = backend.verify_sms(&submission, code);
        self.processing = false;

        let message = accepted(result, "Invalid verification code. Please try again.")?;
        self.step = CashStep::None;
        self.sms_message = None;
        Ok(self.complete(ledger, submission.order_price, message))
    }

    /// Start the cash path over, dropping any sent code.
    pub fn resend(&mut self) {
        self.step = CashStep::None;
        self.sms_message = None;
    }

    /// Pay by card with a payment-method id.
    pub fn pay_by_card<B, S>(
        &mut self,
        backend: &B,
        ledger: &mut CartLedger<S>,
        payment_method_id: &str,
    ) -> Result<&OrderConfirmation, CheckoutError>
    where
        B: OrderBackend + ?Sized,
        S: CartStore,
    {
        self.ensure_not_empty(ledger.cart())?;
        self.payment = PaymentMethod::Card;
        let submission = self.submission(ledger.cart())?;

        self.processing = true;
        let result = backend.confirm_payment(&submission, payment_method_id);
        self.processing = false;

        let message = accepted(result, "Payment confirmation failed")?;
        Ok(self.complete(ledger, submission.order_price, message))
    }

    fn ensure_not_empty(&self, cart: &Cart) -> Result<(), CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(())
    }

    fn complete<S: CartStore>(
        &mut self,
        ledger: &mut CartLedger<S>,
        amount: Money,
        message: String,
    ) -> &OrderConfirmation {
        let estimate = estimate_for(ledger.cart());
        tracing::info!("order placed ({}, {})", self.payment, amount);
        // The order exists on the backend now; a failed local clear must not
        // turn it into an error.
        if let Err(e) = ledger.clear() {
            tracing::warn!("order placed but the cart could not be cleared: {:#}", e);
        }
        self.completed.insert(OrderConfirmation {
            message,
            estimate,
            amount,
            payment: self.payment,
        })
    }
}

/// The success message of a reply, or the error that stops the checkout.
fn accepted(result: Result<ApiReply, ApiError>, fallback: &str) -> Result<String, CheckoutError> {
    match result? {
        ApiReply {
            success: true,
            message,
        } => Ok(message.unwrap_or_else(|| "Your order has been successfully placed.".to_string())),
        ApiReply { message, .. } => Err(CheckoutError::Rejected(
            message.unwrap_or_else(|| fallback.to_string()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Category;
    use crate::ops::pickup::PickupTime;
    use crate::test_support::{cart_line, hotdog_line, MemoryCartStore, MockBackend, MockCall};
    use chrono::{NaiveDateTime, TimeZone};

    fn ledger_with(lines: &[(&str, u64)]) -> CartLedger<MemoryCartStore> {
        let mut ledger = CartLedger::load(MemoryCartStore::new());
        for (name, cents) in lines {
            ledger.add(hotdog_line(name, *cents)).unwrap();
        }
        ledger
    }

    fn customer() -> CustomerInfo {
        CustomerInfo::new("Sam", "5551234567")
    }

    // Monday 2024-06-03, 08:00 local.
    fn monday_morning() -> DateTime<Local> {
        let at = NaiveDateTime::parse_from_str("2024-06-03 08:00", "%Y-%m-%d %H:%M").unwrap();
        Local.from_local_datetime(&at).earliest().unwrap()
    }

    fn cash() -> Checkout {
        Checkout::new(customer(), PaymentMethod::Cash).with_clock(monday_morning)
    }

    // =========================================================================
    // Amounts
    // =========================================================================

    #[test]
    fn test_card_pays_fee_cash_does_not() {
        let ledger = ledger_with(&[("Beef (100%)", 500), ("Turkey", 450)]);
        let cart = ledger.cart();

        assert_eq!(cash().amount_due(cart), Money::from_cents(950));
        let card = Checkout::new(customer(), PaymentMethod::Card);
        assert_eq!(card.amount_due(cart), Money::from_cents(988));
        assert_eq!(card.card_fee(cart), Money::from_cents(38));
    }

    #[test]
    fn test_estimate_depends_on_made_to_order_lines() {
        let ledger = ledger_with(&[("Beef (100%)", 500)]);
        assert_eq!(estimate_for(ledger.cart()), QUICK_ESTIMATE);

        let mut cart = ledger.cart().clone();
        cart.add(cart_line(Category::Sandwich));
        assert_eq!(estimate_for(&cart), MADE_TO_ORDER_ESTIMATE);
    }

    // =========================================================================
    // Cash path
    // =========================================================================

    #[test]
    fn test_cash_happy_path() {
        let backend = MockBackend::new();
        let mut ledger = ledger_with(&[("Beef (100%)", 500)]);
        let mut checkout = cash();

        checkout.send_sms(&backend, &ledger).unwrap();
        assert_eq!(checkout.step(), CashStep::Verifying);
        assert!(checkout.sms_message().is_some());

        let confirmation = checkout.verify(&backend, &mut ledger, "123456").unwrap();
        assert_eq!(confirmation.amount, Money::from_cents(500));
        assert_eq!(confirmation.estimate, QUICK_ESTIMATE);
        assert!(ledger.is_empty());
        assert!(checkout.completed().is_some());
        assert_eq!(checkout.step(), CashStep::None);

        let calls = backend.calls();
        assert!(matches!(calls[0], MockCall::SendSms(_)));
        match &calls[1] {
            MockCall::VerifySms(order, code) => {
                assert_eq!(code, "123456");
                assert_eq!(order.order_price, Money::from_cents(500));
                assert!(order.pickup_at.is_some());
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn test_send_requires_phone() {
        let backend = MockBackend::new();
        let ledger = ledger_with(&[("Beef (100%)", 500)]);
        let mut checkout = Checkout::new(CustomerInfo::new("Sam", "  "), PaymentMethod::Cash);

        assert!(matches!(
            checkout.send_sms(&backend, &ledger),
            Err(CheckoutError::PhoneRequired)
        ));
        assert_eq!(checkout.step(), CashStep::None);
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_send_failure_returns_to_none() {
        let backend = MockBackend::new();
        backend.push_sms_reply(Err(ApiError::from_status(500, r#"{"error": "boom"}"#)));
        let ledger = ledger_with(&[("Beef (100%)", 500)]);
        let mut checkout = cash();

        let err = checkout.send_sms(&backend, &ledger).unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(checkout.step(), CashStep::None);
    }

    #[test]
    fn test_send_rejected_reply_returns_to_none() {
        let backend = MockBackend::new();
        backend.push_sms_reply(Ok(ApiReply::rejected("nope")));
        let ledger = ledger_with(&[("Beef (100%)", 500)]);
        let mut checkout = cash();

        assert!(matches!(
            checkout.send_sms(&backend, &ledger),
            Err(CheckoutError::Rejected(m)) if m == "nope"
        ));
        assert_eq!(checkout.step(), CashStep::None);
    }

    #[test]
    fn test_verify_requires_six_digits() {
        let backend = MockBackend::new();
        let mut ledger = ledger_with(&[("Beef (100%)", 500)]);
        let mut checkout = cash();
        checkout.send_sms(&backend, &ledger).unwrap();

        for code in ["12345", "1234567", "12a456", ""] {
            assert!(matches!(
                checkout.verify(&backend, &mut ledger, code),
                Err(CheckoutError::InvalidCode)
            ));
        }
        assert_eq!(checkout.step(), CashStep::Verifying);
        assert_eq!(backend.calls().len(), 1);
    }

    #[test]
    fn test_verify_requires_verifying_step() {
        let backend = MockBackend::new();
        let mut ledger = ledger_with(&[("Beef (100%)", 500)]);
        let mut checkout = cash();

        assert!(matches!(
            checkout.verify(&backend, &mut ledger, "123456"),
            Err(CheckoutError::NotVerifying)
        ));
    }

    #[test]
    fn test_verify_failure_stays_verifying_and_keeps_cart() {
        let backend = MockBackend::new();
        backend.push_verify_reply(Err(ApiError::from_status(
            400,
            r#"{"error": "Failed to verify SMS code"}"#,
        )));
        let mut ledger = ledger_with(&[("Beef (100%)", 500)]);
        let mut checkout = cash();
        checkout.send_sms(&backend, &ledger).unwrap();

        let err = checkout.verify(&backend, &mut ledger, "000000").unwrap_err();
        assert_eq!(err.to_string(), "Failed to verify SMS code");
        assert_eq!(checkout.step(), CashStep::Verifying);
        assert!(!checkout.is_processing());
        assert_eq!(ledger.lines().len(), 1);
        assert!(checkout.completed().is_none());
    }

    #[test]
    fn test_resend_resets_step() {
        let backend = MockBackend::new();
        let ledger = ledger_with(&[("Beef (100%)", 500)]);
        let mut checkout = cash();
        checkout.send_sms(&backend, &ledger).unwrap();

        checkout.resend();
        assert_eq!(checkout.step(), CashStep::None);
        assert!(checkout.sms_message().is_none());
    }

    // =========================================================================
    // Card path
    // =========================================================================

    #[test]
    fn test_card_success_clears_cart() {
        let backend = MockBackend::new();
        let mut ledger = ledger_with(&[("Beef (100%)", 500)]);
        let mut checkout = Checkout::new(customer(), PaymentMethod::Card).with_clock(monday_morning);

        let confirmation = checkout
            .pay_by_card(&backend, &mut ledger, "pm_card_visa")
            .unwrap();
        assert_eq!(confirmation.amount, Money::from_cents(520));
        assert_eq!(confirmation.payment, PaymentMethod::Card);
        assert!(ledger.is_empty());

        match &backend.calls()[0] {
            MockCall::ConfirmPayment(order, pm) => {
                assert_eq!(pm, "pm_card_visa");
                assert_eq!(order.order_price, Money::from_cents(520));
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn test_card_failure_keeps_cart() {
        let backend = MockBackend::new();
        backend.push_payment_reply(Ok(ApiReply {
            success: false,
            message: None,
        }));
        let mut ledger = ledger_with(&[("Beef (100%)", 500)]);
        let mut checkout = Checkout::new(customer(), PaymentMethod::Card).with_clock(monday_morning);

        let err = checkout
            .pay_by_card(&backend, &mut ledger, "pm_card_visa")
            .unwrap_err();
        assert_eq!(err.to_string(), "Payment confirmation failed");
        assert_eq!(ledger.lines().len(), 1);
        assert!(checkout.completed().is_none());
        assert!(!checkout.is_processing());
    }

    // =========================================================================
    // Guards
    // =========================================================================

    #[test]
    fn test_empty_cart_is_unreachable_until_completed() {
        let backend = MockBackend::new();
        let mut ledger = ledger_with(&[]);
        let mut checkout = cash();

        assert!(matches!(
            checkout.ensure_reachable(ledger.cart()),
            Err(CheckoutError::EmptyCart)
        ));
        assert!(matches!(
            checkout.pay_by_card(&backend, &mut ledger, "pm"),
            Err(CheckoutError::EmptyCart)
        ));
        assert!(backend.calls().is_empty());

        let mut ledger = ledger_with(&[("Beef (100%)", 500)]);
        checkout.send_sms(&backend, &ledger).unwrap();
        checkout.verify(&backend, &mut ledger, "123456").unwrap();
        assert!(ledger.is_empty());
        assert!(checkout.ensure_reachable(ledger.cart()).is_ok());
    }

    #[test]
    fn test_invalid_pickup_blocks_submission() {
        let backend = MockBackend::new();
        let ledger = ledger_with(&[("Beef (100%)", 500)]);
        let late = NaiveDateTime::parse_from_str("2024-06-03 19:00", "%Y-%m-%d %H:%M").unwrap();
        let mut checkout = cash().with_pickup(PickupTime::At(late));

        assert!(matches!(
            checkout.send_sms(&backend, &ledger),
            Err(CheckoutError::Pickup(PickupError::OutsideHours { .. }))
        ));
        assert_eq!(checkout.step(), CashStep::None);
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!("Card".parse::<PaymentMethod>(), Ok(PaymentMethod::Card));
        assert_eq!(" cash ".parse::<PaymentMethod>(), Ok(PaymentMethod::Cash));
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }
}
