//! High-level operations.
//!
//! Everything between a raw option schema and a placed order: selection,
//! validation, pricing, line building, the persisted cart and checkout.

pub mod checkout;
pub mod customize;
pub mod identify;
pub mod ledger;
pub mod normalize;
pub mod pickup;
pub mod pricing;
pub mod select;
pub mod validate;

pub use checkout::{CashStep, Checkout, CheckoutError, OrderConfirmation, PaymentMethod};
pub use customize::{BuildError, CustomizeSession};
pub use identify::identify;
pub use ledger::{CartLedger, CartStore, FileCartStore};
pub use normalize::{normalize, NormalizeError};
pub use pickup::{BusinessHours, PickupError, PickupTime};
pub use pricing::price;
pub use validate::{validate, ValidationError, Violation};
