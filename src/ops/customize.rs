//! One customization session: open an item, make choices, get a cart line.
//!
//! The session owns the prepared schema and the selection state for a
//! single item. Nothing here touches the cart; `build` hands back a priced,
//! identified line for the ledger to add.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::cart::CartLine;
use crate::core::line::MAX_INSTRUCTIONS_LEN;
use crate::core::menu::MenuItem;
use crate::core::money::Money;
use crate::core::option::OptionSchema;
use crate::core::selection::{SelectionError, SelectionState};
use crate::core::Category;
use crate::ops::identify::identify;
use crate::ops::normalize::{normalize, NormalizeError};
use crate::ops::validate::{self, ValidationError, Violation};
use crate::ops::{pricing, select};
use crate::rules::{rules_for, ItemContext};

#[derive(Debug, Error, MietteDiagnostic)]
pub enum BuildError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Invalid(#[from] ValidationError),

    #[error("could not build the order line: {0}")]
    #[diagnostic(code(griddle::customize::normalize))]
    Normalize(#[from] NormalizeError),
}

/// State of one open customization dialog.
#[derive(Debug, Clone)]
pub struct CustomizeSession {
    category: Category,
    item: MenuItem,
    schema: OptionSchema,
    state: SelectionState,
    quantity: u32,
    instructions: String,
}

impl CustomizeSession {
    /// Start customizing `item` with the category schema from the backend.
    pub fn open(category: Category, item: MenuItem, schema: OptionSchema) -> Self {
        let schema = rules_for(category).prepare_schema(&item.name, schema);
        let state = SelectionState::for_schema(&schema);
        tracing::debug!(
            "customizing {} `{}` ({} option fields)",
            category,
            item.name,
            schema.len()
        );
        CustomizeSession {
            category,
            item,
            schema,
            state,
            quantity: 1,
            instructions: String::new(),
        }
    }

    pub fn context(&self) -> ItemContext<'_> {
        ItemContext::new(self.category, &self.item.name, &self.schema)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn item(&self) -> &MenuItem {
        &self.item
    }

    pub fn schema(&self) -> &OptionSchema {
        &self.schema
    }

    pub fn selections(&self) -> &SelectionState {
        &self.state
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn is_optional(&self, key: &str) -> bool {
        self.context().is_optional(key)
    }

    /// Toggle a single-select field.
    pub fn select(&mut self, key: &str, value: &str) -> Result<(), SelectionError> {
        self.state = select::select(&self.context(), &self.state, key, value)?;
        Ok(())
    }

    /// Toggle a value of a multi-select field.
    pub fn select_multi(&mut self, key: &str, value: &str) -> Result<(), SelectionError> {
        self.state = select::select_multi(&self.context(), &self.state, key, value)?;
        Ok(())
    }

    /// Apply a choice to whichever kind of field `key` is.
    pub fn choose(&mut self, key: &str, value: &str) -> Result<(), SelectionError> {
        self.state = select::choose(&self.context(), &self.state, key, value)?;
        Ok(())
    }

    /// Choose `value` unless it is already chosen.
    pub fn pick(&mut self, key: &str, value: &str) -> Result<(), SelectionError> {
        self.state = select::pick(&self.context(), &self.state, key, value)?;
        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
    }

    pub fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Decrease the quantity, never below one.
    pub fn decrement(&mut self) {
        self.quantity = self.quantity.saturating_sub(1).max(1);
    }

    /// Set special instructions, truncated to the allowed length.
    pub fn set_instructions(&mut self, text: &str) {
        self.instructions = text.chars().take(MAX_INSTRUCTIONS_LEN).collect();
    }

    pub fn violations(&self) -> Vec<Violation> {
        validate::validate(&self.context(), &self.state)
    }

    pub fn is_form_valid(&self) -> bool {
        validate::is_form_valid(&self.context(), &self.state)
    }

    /// Price of one unit with the current choices.
    pub fn unit_price(&self) -> Money {
        pricing::price(&self.context(), &self.item, &self.state)
    }

    /// Unit price times the current quantity.
    pub fn total_price(&self) -> Money {
        self.unit_price().times(self.quantity)
    }

    /// Validate, normalize, price and identify the current configuration.
    pub fn build(&self) -> Result<CartLine, BuildError> {
        let ctx = self.context();
        validate::ensure_valid(&ctx, &self.state)?;
        let data = normalize(&ctx, &self.state, self.quantity, &self.instructions)?;
        let id = identify(&data);

        Ok(CartLine {
            id,
            price: self.unit_price(),
            item_type: self.category,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{menu, raw_schema};

    fn open(category: Category, name: &str) -> CustomizeSession {
        let item = menu().find(category, name).cloned().unwrap();
        CustomizeSession::open(category, item, raw_schema(category))
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    #[test]
    fn test_open_prepares_schema() {
        let session = open(Category::Side, "Chips");
        let keys: Vec<&str> = session.schema().keys().collect();
        assert_eq!(keys, vec!["Chips"]);
        assert!(!session.is_optional("Chips"));
    }

    #[test]
    fn test_hotdog_without_options_builds() {
        let session = open(Category::Hotdog, "Beef (100%)");
        assert!(session.is_form_valid());

        let line = session.build().unwrap();
        assert_eq!(line.price, Money::from_cents(500));
        assert_eq!(line.item_type, Category::Hotdog);
        assert_eq!(line.data.quantity, 1);
        assert!(line.id.starts_with("item_"));
    }

    #[test]
    fn test_invalid_session_does_not_build() {
        let session = open(Category::Sandwich, "Ham");
        assert!(!session.is_form_valid());
        match session.build() {
            Err(BuildError::Invalid(err)) => {
                assert_eq!(err.violations, session.violations());
                assert_eq!(err.item, "Ham");
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_quantity_never_below_one() {
        let mut session = open(Category::Hotdog, "Beef (100%)");
        session.decrement();
        assert_eq!(session.quantity(), 1);
        session.increment();
        session.increment();
        assert_eq!(session.quantity(), 3);
        session.set_quantity(0);
        assert_eq!(session.quantity(), 1);
    }

    #[test]
    fn test_instructions_truncated() {
        let mut session = open(Category::Hotdog, "Beef (100%)");
        session.set_instructions(&"a".repeat(300));
        assert_eq!(session.instructions().chars().count(), MAX_INSTRUCTIONS_LEN);
    }

    // =========================================================================
    // Identity and pricing through the session
    // =========================================================================

    #[test]
    fn test_quantity_does_not_affect_id_or_unit_price() {
        let mut one = open(Category::Hotdog, "Beef (100%)");
        one.select_multi("Toppings", "Mustard").unwrap();
        let mut three = one.clone();
        three.set_quantity(3);

        let a = one.build().unwrap();
        let b = three.build().unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(a.price, b.price);
        assert_eq!(three.total_price(), Money::from_cents(1500));
    }

    #[test]
    fn test_click_order_does_not_affect_id() {
        let mut first = open(Category::Hotdog, "Beef (100%)");
        first.select_multi("Toppings", "Mustard").unwrap();
        first.select_multi("Toppings", "Onions").unwrap();

        let mut second = open(Category::Hotdog, "Beef (100%)");
        second.select_multi("Toppings", "Onions").unwrap();
        second.select_multi("Toppings", "Mustard").unwrap();

        assert_eq!(first.build().unwrap().id, second.build().unwrap().id);
    }

    #[test]
    fn test_full_combo() {
        let mut session = open(Category::Combo, "Combo");
        session.choose("Side", "Chips").unwrap();
        session.choose("Chip Type", "Lays BBQ").unwrap();
        session.choose("Drink", "Coke").unwrap();
        session.choose("Drink Size", "Large").unwrap();

        let line = session.build().unwrap();
        let base = session.item().base_price(None);
        assert_eq!(line.price, base + Money::from_cents(50));
        assert!(line.data.extensions.is_empty());
    }

    #[test]
    fn test_picking_coupled_defaults_explicitly() {
        let mut session = open(Category::Combo, "Combo");
        session.pick("Side", "Chips").unwrap();
        session.pick("Chip Type", "Lays Plain").unwrap();
        session.pick("Drink", "Coke").unwrap();
        session.pick("Drink Size", "Regular").unwrap();

        assert!(session.violations().is_empty());
        assert!(session.is_form_valid());
        let line = session.build().unwrap();
        assert_eq!(line.price, session.item().base_price(None));
    }

    #[test]
    fn test_bottled_soda_drink() {
        let session = open(Category::Drink, "Bottled Soda");
        assert!(session.schema().is_empty());
        let line = session.build().unwrap();
        assert_eq!(line.data.to_json()["size"], "Bottle");
    }
}
