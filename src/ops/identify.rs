//! Content-derived line identifiers.
//!
//! Two lines that differ only in quantity get the same id; that is what lets
//! the cart merge repeat adds of one configuration.

use serde_json::Value;

use crate::core::line::OrderLine;
use crate::util::hash::{canonical_json, sha256_str};

pub const ID_PREFIX: &str = "item_";

/// Hex characters of the digest kept in an id.
pub const ID_DIGEST_LEN: usize = 12;

/// Derive the stable id of a line.
pub fn identify(line: &OrderLine) -> String {
    let mut value = line.to_json();
    if let Value::Object(map) = &mut value {
        map.remove("quantity");
    }
    let digest = sha256_str(&canonical_json(&value));
    format!("{}{}", ID_PREFIX, &digest[..ID_DIGEST_LEN])
}
