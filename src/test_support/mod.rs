//! Test utilities and mocks for griddle unit tests.
//!
//! This module provides in-memory stand-ins for the two seams that touch the
//! outside world: cart storage and the order backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use griddle::test_support::{hotdog_line, MemoryCartStore, MockBackend};
//!
//! #[test]
//! fn test_example() {
//!     let backend = MockBackend::new();
//!     backend.push_sms_reply(Ok(ApiReply::rejected("store closed")));
//!
//!     let mut ledger = CartLedger::load(MemoryCartStore::new());
//!     ledger.add(hotdog_line("Beef (100%)", 500)).unwrap();
//!     // Drive a checkout against the mock...
//! }
//! ```

pub mod fixtures;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::NaiveDate;

use crate::api::{ApiError, ApiReply, OrderBackend, OrderLookup, OrderSubmission};
use crate::core::cart::CartLine;
use crate::core::line::{HotdogLine, LineDetails, OrderLine};
use crate::core::menu::Menu;
use crate::core::money::Money;
use crate::core::option::OptionSchema;
use crate::core::Category;
use crate::ops::customize::CustomizeSession;
use crate::ops::identify::identify;
use crate::ops::ledger::CartStore;

// Re-export fixtures for convenience
pub use fixtures::*;

/// Cart store kept in memory.
///
/// Clones share the same snapshot, so a test can hand one clone to a
/// ledger and inspect what was saved through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStore {
    snapshot: Arc<Mutex<Option<String>>>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        MemoryCartStore::default()
    }

    /// A store that already holds `snapshot`.
    pub fn with_snapshot(snapshot: &str) -> Self {
        MemoryCartStore {
            snapshot: Arc::new(Mutex::new(Some(snapshot.to_string()))),
        }
    }

    /// The last saved snapshot.
    pub fn snapshot(&self) -> Option<String> {
        self.snapshot.lock().unwrap().clone()
    }
}

impl CartStore for MemoryCartStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.snapshot())
    }

    fn save(&self, snapshot: &str) -> Result<()> {
        *self.snapshot.lock().unwrap() = Some(snapshot.to_string());
        Ok(())
    }
}

/// A call the mock backend received.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Categories,
    Menu,
    Options(Category),
    ClosedDates,
    SendSms(OrderSubmission),
    VerifySms(OrderSubmission, String),
    ConfirmPayment(OrderSubmission, String),
    Order(u64),
}

#[derive(Debug, Default)]
struct MockState {
    sms_replies: VecDeque<Result<ApiReply, ApiError>>,
    verify_replies: VecDeque<Result<ApiReply, ApiError>>,
    payment_replies: VecDeque<Result<ApiReply, ApiError>>,
    calls: Vec<MockCall>,
}

/// Scripted order backend.
///
/// Catalog calls answer from the fixtures. Checkout calls answer with
/// queued replies, falling back to success once a queue is empty. Every
/// call is recorded.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        MockBackend::default()
    }

    /// Queue the reply for the next `send_sms_verification`.
    pub fn push_sms_reply(&self, reply: Result<ApiReply, ApiError>) {
        self.state.lock().unwrap().sms_replies.push_back(reply);
    }

    /// Queue the reply for the next `verify_sms`.
    pub fn push_verify_reply(&self, reply: Result<ApiReply, ApiError>) {
        self.state.lock().unwrap().verify_replies.push_back(reply);
    }

    /// Queue the reply for the next `confirm_payment`.
    pub fn push_payment_reply(&self, reply: Result<ApiReply, ApiError>) {
        self.state.lock().unwrap().payment_replies.push_back(reply);
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: MockCall) {
        self.state.lock().unwrap().calls.push(call);
    }
}

impl OrderBackend for MockBackend {
    fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.record(MockCall::Categories);
        Ok(Category::ALL.to_vec())
    }

    fn menu(&self) -> Result<Menu, ApiError> {
        self.record(MockCall::Menu);
        Ok(menu())
    }

    fn options(&self, category: Category) -> Result<OptionSchema, ApiError> {
        self.record(MockCall::Options(category));
        Ok(raw_schema(category))
    }

    fn closed_dates(&self) -> Result<Vec<NaiveDate>, ApiError> {
        self.record(MockCall::ClosedDates);
        Ok(Vec::new())
    }

    fn send_sms_verification(&self, order: &OrderSubmission) -> Result<ApiReply, ApiError> {
        self.record(MockCall::SendSms(order.clone()));
        let queued = self.state.lock().unwrap().sms_replies.pop_front();
        queued.unwrap_or_else(|| Ok(ApiReply::ok("Verification code sent")))
    }

    fn verify_sms(&self, order: &OrderSubmission, code: &str) -> Result<ApiReply, ApiError> {
        self.record(MockCall::VerifySms(order.clone(), code.to_string()));
        let queued = self.state.lock().unwrap().verify_replies.pop_front();
        queued.unwrap_or_else(|| Ok(ApiReply::ok("Order placed")))
    }

    fn confirm_payment(
        &self,
        order: &OrderSubmission,
        payment_method_id: &str,
    ) -> Result<ApiReply, ApiError> {
        self.record(MockCall::ConfirmPayment(
            order.clone(),
            payment_method_id.to_string(),
        ));
        let queued = self.state.lock().unwrap().payment_replies.pop_front();
        queued.unwrap_or_else(|| Ok(ApiReply::ok("Payment confirmed")))
    }

    fn order(&self, id: u64) -> Result<OrderLookup, ApiError> {
        self.record(MockCall::Order(id));
        Ok(OrderLookup {
            success: true,
            order: Some(serde_json::json!({ "id": id })),
        })
    }
}

/// A plain hotdog line at a fixed unit price.
pub fn hotdog_line(name: &str, cents: u64) -> CartLine {
    let data = OrderLine::new(LineDetails::Hotdog(HotdogLine {
        dog_type: name.to_string(),
        toppings: None,
    }));
    CartLine {
        id: identify(&data),
        price: Money::from_cents(cents),
        item_type: Category::Hotdog,
        data,
    }
}

/// A valid line for `category`, built through a customization session.
pub fn cart_line(category: Category) -> CartLine {
    let (item, picks) = match category {
        Category::Hotdog => ("Beef (100%)", vec![]),
        Category::Sandwich => (
            "Ham",
            vec![("Size", "Regular"), ("Bread", "White"), ("Bread Prep", "Toasted")],
        ),
        Category::EggSandwich => (
            "Egg Sandwich",
            vec![("Egg", "Fried"), ("Bread", "White"), ("Bread Prep", "Neither")],
        ),
        Category::Salad => ("Chef Salad - Ham & Turkey", vec![("Toppings", "Lettuce")]),
        Category::Side => ("French Fries", vec![("Size", "Regular")]),
        Category::Drink => ("Coke", vec![("Size", "Regular")]),
        Category::Combo => ("Combo", vec![("Side", "Slaw"), ("Drink", "Coke")]),
    };

    let menu_item = menu()
        .find(category, item)
        .cloned()
        .unwrap_or_else(|| panic!("fixture menu has no {} `{}`", category, item));
    let mut session = CustomizeSession::open(category, menu_item, raw_schema(category));
    for (key, value) in picks {
        session
            .choose(key, value)
            .unwrap_or_else(|e| panic!("fixture pick {}={} failed: {}", key, value, e));
    }
    session
        .build()
        .unwrap_or_else(|e| panic!("fixture {} line is invalid: {}", category, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_a_valid_line() {
        for category in Category::ALL {
            let line = cart_line(category);
            assert_eq!(line.item_type, category);
            assert!(line.price > Money::ZERO);
        }
    }

    #[test]
    fn test_memory_store_clones_share_snapshot() {
        let store = MemoryCartStore::new();
        let other = store.clone();
        store.save("[]").unwrap();
        assert_eq!(other.load().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_mock_backend_replays_queue_then_succeeds() {
        let backend = MockBackend::new();
        backend.push_sms_reply(Ok(ApiReply::rejected("closed")));
        let order = OrderSubmission {
            customer_name: "Sam".to_string(),
            phone_number: "5551234567".to_string(),
            order_items: Vec::new(),
            order_price: Money::ZERO,
            pickup_at: None,
        };

        assert!(!backend.send_sms_verification(&order).unwrap().success);
        assert!(backend.send_sms_verification(&order).unwrap().success);
        assert_eq!(backend.calls().len(), 2);
    }
}
