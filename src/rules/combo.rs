//! Combos: a side plus either a fountain drink or a bottled soda.
//!
//! Two companion fields ride along with the backend schema: "Drink Size"
//! for the fountain drink and "Chip Type" for a chips side. Choosing one
//! drink kind clears the other, and changing the side resets the chip type.

use crate::core::line::{ComboDrink, ComboLine, LineDetails, SideLine};
use crate::core::money::Money;
use crate::core::option::{OptionField, OptionSchema};
use crate::core::selection::SelectionState;
use crate::core::vocab::{field, value, CHIP_TYPES, FOUNTAIN_SIZES};
use crate::core::Category;
use crate::ops::normalize::NormalizeError;
use crate::ops::validate::Violation;
use crate::rules::{optional, required, CategoryRules, ItemContext};

/// Upcharge for a large fountain drink.
pub const LARGE_DRINK_SURCHARGE: Money = Money::from_cents(50);

/// Upcharge for swapping the fountain drink for a bottled soda.
pub const BOTTLED_SODA_SURCHARGE: Money = Money::from_cents(50);

pub struct ComboRules;

impl CategoryRules for ComboRules {
    fn category(&self) -> Category {
        Category::Combo
    }

    fn prepare_schema(&self, _item: &str, mut schema: OptionSchema) -> OptionSchema {
        if schema.contains(field::DRINK) {
            schema.push(OptionField::plain(field::DRINK_SIZE, &FOUNTAIN_SIZES));
        }
        if schema.contains(field::SIDE) {
            schema.push(OptionField::plain(field::CHIP_TYPE, &CHIP_TYPES));
        }
        schema
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &[field::SIDE]
    }

    fn couple(&self, key: &str, chosen: Option<&str>, mut state: SelectionState) -> SelectionState {
        match (key, chosen) {
            (field::DRINK, Some(_)) => {
                state.clear(field::BOTTLED_SODA);
                if state.is_empty(field::DRINK_SIZE) {
                    state.set(field::DRINK_SIZE, value::REGULAR);
                }
            }
            (field::DRINK, None) => state.clear(field::DRINK_SIZE),
            (field::BOTTLED_SODA, Some(_)) => {
                state.clear(field::DRINK);
                state.clear(field::DRINK_SIZE);
            }
            (field::SIDE, side) => {
                state.clear(field::CHIP_TYPE);
                if side == Some(value::CHIPS) {
                    state.set(field::CHIP_TYPE, value::LAYS_PLAIN);
                }
            }
            _ => {}
        }
        state
    }

    fn check(&self, state: &SelectionState) -> Vec<Violation> {
        let drink = state.is_set(field::DRINK);
        let bottled = state.is_set(field::BOTTLED_SODA);

        let mut violations = Vec::new();
        match (drink, bottled) {
            (false, false) => violations.push(Violation::ComboDrinkMissing),
            (true, true) => violations.push(Violation::ComboDrinkConflict),
            _ => {}
        }
        if drink && state.is_empty(field::DRINK_SIZE) {
            violations.push(Violation::FountainSizeMissing);
        }
        violations
    }

    fn price_modifiers(&self, state: &SelectionState) -> Money {
        let mut extra = Money::ZERO;
        if state.single(field::DRINK_SIZE) == Some(value::LARGE) {
            extra += LARGE_DRINK_SURCHARGE;
        }
        if state.is_set(field::BOTTLED_SODA) {
            extra += BOTTLED_SODA_SURCHARGE;
        }
        extra
    }

    fn mapped_fields(&self) -> &'static [&'static str] {
        &[
            field::SIDE,
            field::CHIP_TYPE,
            field::DRINK,
            field::DRINK_SIZE,
            field::BOTTLED_SODA,
        ]
    }

    fn keeps_extensions(&self, _item: &str) -> bool {
        false
    }

    fn normalize(&self, _ctx: &ItemContext<'_>, state: &SelectionState) -> Result<LineDetails, NormalizeError> {
        let side_name = required(state, field::SIDE)?;
        let side = if side_name == value::CHIPS {
            SideLine {
                name: side_name,
                size: None,
                chips_type: Some(required(state, field::CHIP_TYPE)?),
            }
        } else {
            SideLine {
                name: side_name,
                size: Some(value::REGULAR.to_string()),
                chips_type: None,
            }
        };

        let drink = match (optional(state, field::DRINK), optional(state, field::BOTTLED_SODA)) {
            (Some(name), _) => ComboDrink {
                name,
                size: Some(required(state, field::DRINK_SIZE)?),
            },
            (None, Some(name)) => ComboDrink { name, size: None },
            (None, None) => {
                return Err(NormalizeError::Missing {
                    field: field::DRINK.to_string(),
                })
            }
        };

        Ok(LineDetails::Combo(ComboLine { side, drink }))
    }
}
