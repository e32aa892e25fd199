//! Wire types exchanged with the order backend.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::cart::{Cart, CartLine};
use crate::core::money::Money;

/// Errors talking to the order backend.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum ApiError {
    #[error("request to {url} failed")]
    #[diagnostic(
        code(griddle::api::transport),
        help("check that the order backend is running and reachable")
    )]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(griddle::api::status))]
    Status { status: u16, message: String },

    #[error("unexpected response from {url}: {reason}")]
    #[diagnostic(code(griddle::api::decode))]
    Decode { url: String, reason: String },

    #[error("invalid backend URL `{0}`")]
    #[diagnostic(code(griddle::api::url))]
    InvalidUrl(String),
}

impl ApiError {
    /// Build a status error from a non-2xx response body.
    ///
    /// The backend reports failures as `{"error": "..."}`; anything else
    /// falls back to the bare status.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| format!("HTTP error! status: {}", status));
        ApiError::Status { status, message }
    }
}

/// Who is placing the order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
}

impl CustomerInfo {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        CustomerInfo {
            name: name.into(),
            phone: phone.into(),
        }
    }
}

/// Everything posted to a checkout endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSubmission {
    pub customer_name: String,
    pub phone_number: String,
    pub order_items: Vec<Value>,
    pub order_price: Money,
    pub pickup_at: Option<String>,
}

impl OrderSubmission {
    pub fn from_cart(
        customer: &CustomerInfo,
        cart: &Cart,
        order_price: Money,
        pickup_at: Option<String>,
    ) -> Self {
        OrderSubmission {
            customer_name: customer.name.trim().to_string(),
            phone_number: customer.phone.trim().to_string(),
            order_items: cart.lines().iter().map(order_item).collect(),
            order_price,
            pickup_at,
        }
    }

    /// Form fields shared by every checkout call, in submission order.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("customer_name", self.customer_name.clone()),
            ("phone_number", self.phone_number.clone()),
            ("order_items", Value::Array(self.order_items.clone()).to_string()),
            ("order_price", self.order_price.to_decimal_string()),
        ];
        if let Some(pickup_at) = &self.pickup_at {
            fields.push(("pickup_at", pickup_at.clone()));
        }
        fields
    }
}

/// One cart line as the backend expects it: `{"type": ..., ...line}`.
fn order_item(line: &CartLine) -> Value {
    let mut item = Map::new();
    item.insert("type".to_string(), Value::String(line.item_type.to_string()));
    if let Value::Object(fields) = line.data.to_json() {
        item.extend(fields);
    }
    Value::Object(item)
}

/// `{success, message}` body returned by the checkout endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiReply {
    pub fn ok(message: impl Into<String>) -> Self {
        ApiReply {
            success: true,
            message: Some(message.into()),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        ApiReply {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Body of `GET /api/checkout/order/<id>`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OrderLookup {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub order: Option<Value>,
}

/// Body of `GET /get_store_close_date`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CloseDates {
    #[serde(default)]
    pub close_dates: Vec<String>,
}
