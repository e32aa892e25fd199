//! Griddle - the ordering core of a walk-up restaurant counter.
//!
//! This crate provides the core library functionality for Griddle,
//! including menu customization, pricing, the persisted cart, and
//! checkout against the order backend.

pub mod api;
pub mod core;
pub mod ops;
pub mod rules;
pub mod util;

/// Test utilities and mocks for griddle unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides an in-memory cart store, a scripted order
/// backend and catalog fixtures.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{Cart, CartLine, Category, Menu, MenuItem, Money, OptionSchema, OrderLine};

pub use api::{HttpBackend, OrderBackend};
pub use ops::{CartLedger, Checkout, CustomizeSession};
pub use util::context::GlobalContext;
