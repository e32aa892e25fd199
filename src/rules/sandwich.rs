//! Deli sandwiches: sized, with bread, prep, cheese, toppings and add-ons.

use crate::core::line::{LineDetails, SandwichLine};
use crate::core::selection::SelectionState;
use crate::core::vocab::field;
use crate::core::Category;
use crate::ops::normalize::NormalizeError;
use crate::rules::{bread_prep, list, optional, required, CategoryRules, ItemContext};

pub struct SandwichRules;

impl CategoryRules for SandwichRules {
    fn category(&self) -> Category {
        Category::Sandwich
    }

    fn mapped_fields(&self) -> &'static [&'static str] {
        &[
            field::SIZE,
            field::BREAD,
            field::BREAD_PREP,
            field::CHEESE,
            field::TOPPINGS,
            field::ADD_ONS,
        ]
    }

    fn normalize(&self, ctx: &ItemContext<'_>, state: &SelectionState) -> Result<LineDetails, NormalizeError> {
        let (toasted, grilled) = bread_prep(state);
        Ok(LineDetails::Sandwich(SandwichLine {
            meat: ctx.item.to_string(),
            size: required(state, field::SIZE)?,
            bread: required(state, field::BREAD)?,
            toasted,
            grilled,
            cheese: optional(state, field::CHEESE),
            toppings: list(ctx, state, field::TOPPINGS),
            add_ons: list(ctx, state, field::ADD_ONS),
        }))
    }
}
