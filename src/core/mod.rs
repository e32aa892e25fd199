//! Core data structures for griddle.
//!
//! This module contains the ordering vocabulary shared by every operation:
//! - Categories, menu items and catalog prices
//! - Option schemas decoded from the backend
//! - Selection state of one customization session
//! - Normalized order lines and the cart

pub mod cart;
pub mod category;
pub mod line;
pub mod menu;
pub mod money;
pub mod option;
pub mod selection;
pub mod vocab;

pub use cart::{AddOutcome, Cart, CartLine, QuantityChange};
pub use category::Category;
pub use line::{Extension, LineDetails, OrderLine};
pub use menu::{Menu, MenuItem};
pub use money::Money;
pub use option::{Cardinality, OptionField, OptionSchema, OptionValue, PriceSpec};
pub use selection::{Choice, SelectionError, SelectionState};
