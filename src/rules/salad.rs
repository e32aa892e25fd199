//! Salads. Toppings are mandatory; the veggie salad never offers bacon.

use crate::core::line::{LineDetails, SaladLine};
use crate::core::option::OptionSchema;
use crate::core::selection::SelectionState;
use crate::core::vocab::{field, value};
use crate::core::Category;
use crate::ops::normalize::NormalizeError;
use crate::rules::{list, optional, CategoryRules, ItemContext};

pub struct SaladRules;

impl CategoryRules for SaladRules {
    fn category(&self) -> Category {
        Category::Salad
    }

    fn prepare_schema(&self, item: &str, mut schema: OptionSchema) -> OptionSchema {
        if item == value::GARDEN_SALAD {
            if let Some(toppings) = schema.get_mut(field::TOPPINGS) {
                toppings.values.retain(|v| v.name() != value::BACON);
            }
        }
        schema
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &[field::TOPPINGS]
    }

    fn mapped_fields(&self) -> &'static [&'static str] {
        &[field::TOPPINGS, field::DRESSING, field::ADD_ONS]
    }

    fn normalize(&self, ctx: &ItemContext<'_>, state: &SelectionState) -> Result<LineDetails, NormalizeError> {
        let toppings = list(ctx, state, field::TOPPINGS).ok_or_else(|| NormalizeError::Missing {
            field: field::TOPPINGS.to_string(),
        })?;
        Ok(LineDetails::Salad(SaladLine {
            choice: ctx.item.to_string(),
            toppings,
            dressing: optional(state, field::DRESSING),
            add_ons: list(ctx, state, field::ADD_ONS),
        }))
    }
}
