//! Drinks. Fountain drinks are sized; the bottled soda has no options.

use crate::core::line::{DrinkLine, LineDetails};
use crate::core::option::OptionSchema;
use crate::core::selection::SelectionState;
use crate::core::vocab::{field, value};
use crate::core::Category;
use crate::ops::normalize::NormalizeError;
use crate::rules::{required, CategoryRules, ItemContext};

pub struct DrinkRules;

impl CategoryRules for DrinkRules {
    fn category(&self) -> Category {
        Category::Drink
    }

    fn prepare_schema(&self, item: &str, schema: OptionSchema) -> OptionSchema {
        if item == value::BOTTLED_SODA {
            OptionSchema::default()
        } else {
            schema
        }
    }

    fn mapped_fields(&self) -> &'static [&'static str] {
        &[field::SIZE]
    }

    fn keeps_extensions(&self, item: &str) -> bool {
        item != value::BOTTLED_SODA
    }

    fn normalize(&self, ctx: &ItemContext<'_>, state: &SelectionState) -> Result<LineDetails, NormalizeError> {
        let size = if ctx.item == value::BOTTLED_SODA {
            value::BOTTLE.to_string()
        } else {
            required(state, field::SIZE)?
        };
        Ok(LineDetails::Drink(DrinkLine {
            name: ctx.item.to_string(),
            size,
        }))
    }
}
