//! The order backend.
//!
//! [`OrderBackend`] is the seam between the ordering core and the network:
//! the CLI talks to [`HttpBackend`], tests script a mock.

pub mod client;
pub mod types;

use chrono::NaiveDate;

use crate::core::menu::Menu;
use crate::core::option::OptionSchema;
use crate::core::Category;

pub use client::HttpBackend;
pub use types::{ApiError, ApiReply, CustomerInfo, OrderLookup, OrderSubmission};

/// Catalog and checkout endpoints of the order backend.
pub trait OrderBackend {
    /// Categories the store currently sells.
    fn categories(&self) -> Result<Vec<Category>, ApiError>;

    /// The full menu with base prices.
    fn menu(&self) -> Result<Menu, ApiError>;

    /// Option schema for one category.
    fn options(&self, category: Category) -> Result<OptionSchema, ApiError>;

    /// Upcoming dates on which the store is closed.
    fn closed_dates(&self) -> Result<Vec<NaiveDate>, ApiError>;

    /// Ask the backend to text a verification code for a cash order.
    fn send_sms_verification(&self, order: &OrderSubmission) -> Result<ApiReply, ApiError>;

    /// Submit the code; on success the cash order is placed.
    fn verify_sms(&self, order: &OrderSubmission, code: &str) -> Result<ApiReply, ApiError>;

    /// Pay by card with a payment-method id from the payment provider.
    fn confirm_payment(
        &self,
        order: &OrderSubmission,
        payment_method_id: &str,
    ) -> Result<ApiReply, ApiError>;

    /// Look up a placed order.
    fn order(&self, id: u64) -> Result<OrderLookup, ApiError>;
}
