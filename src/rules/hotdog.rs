//! Hotdogs: the item is the dog, the only option is toppings.

use crate::core::line::{HotdogLine, LineDetails};
use crate::core::selection::SelectionState;
use crate::core::vocab::field;
use crate::core::Category;
use crate::ops::normalize::NormalizeError;
use crate::rules::{list, CategoryRules, ItemContext};

pub struct HotdogRules;

impl CategoryRules for HotdogRules {
    fn category(&self) -> Category {
        Category::Hotdog
    }

    fn mapped_fields(&self) -> &'static [&'static str] {
        &[field::TOPPINGS]
    }

    fn normalize(&self, ctx: &ItemContext<'_>, state: &SelectionState) -> Result<LineDetails, NormalizeError> {
        Ok(LineDetails::Hotdog(HotdogLine {
            dog_type: ctx.item.to_string(),
            toppings: list(ctx, state, field::TOPPINGS),
        }))
    }
}
