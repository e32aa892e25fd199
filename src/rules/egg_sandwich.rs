//! Breakfast egg sandwiches. Adding a meat carries a surcharge.

use crate::core::line::{EggSandwichLine, LineDetails};
use crate::core::money::Money;
use crate::core::selection::SelectionState;
use crate::core::vocab::field;
use crate::core::Category;
use crate::ops::normalize::NormalizeError;
use crate::rules::{bread_prep, list, optional, required, CategoryRules, ItemContext};

/// Charged when any meat is added to an egg sandwich.
pub const MEAT_SURCHARGE: Money = Money::from_cents(175);

pub struct EggSandwichRules;

impl CategoryRules for EggSandwichRules {
    fn category(&self) -> Category {
        Category::EggSandwich
    }

    fn price_modifiers(&self, state: &SelectionState) -> Money {
        if state.is_set(field::MEAT) {
            MEAT_SURCHARGE
        } else {
            Money::ZERO
        }
    }

    fn mapped_fields(&self) -> &'static [&'static str] {
        &[
            field::EGG,
            field::BREAD,
            field::BREAD_PREP,
            field::MEAT,
            field::CHEESE,
            field::TOPPINGS,
            field::ADD_ONS,
        ]
    }

    fn normalize(&self, ctx: &ItemContext<'_>, state: &SelectionState) -> Result<LineDetails, NormalizeError> {
        let (toasted, grilled) = bread_prep(state);
        Ok(LineDetails::EggSandwich(EggSandwichLine {
            bread: required(state, field::BREAD)?,
            egg: required(state, field::EGG)?,
            toasted,
            grilled,
            meat: optional(state, field::MEAT),
            cheese: optional(state, field::CHEESE),
            toppings: list(ctx, state, field::TOPPINGS),
            add_ons: list(ctx, state, field::ADD_ONS),
        }))
    }
}
