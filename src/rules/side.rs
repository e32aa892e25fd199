//! Sides. Chips are chosen by flavour, every other side by size.

use crate::core::line::{LineDetails, SideLine};
use crate::core::option::OptionSchema;
use crate::core::selection::SelectionState;
use crate::core::vocab::{field, value};
use crate::core::Category;
use crate::ops::normalize::NormalizeError;
use crate::rules::{required, CategoryRules, ItemContext};

pub struct SideRules;

impl CategoryRules for SideRules {
    fn category(&self) -> Category {
        Category::Side
    }

    fn prepare_schema(&self, item: &str, mut schema: OptionSchema) -> OptionSchema {
        let keep = if item == value::CHIPS {
            field::CHIPS
        } else {
            field::SIZE
        };
        schema.retain(|f| f.key == keep);
        schema
    }

    fn mapped_fields(&self) -> &'static [&'static str] {
        &[field::SIZE, field::CHIPS]
    }

    fn normalize(&self, ctx: &ItemContext<'_>, state: &SelectionState) -> Result<LineDetails, NormalizeError> {
        let line = if ctx.item == value::CHIPS {
            SideLine {
                name: ctx.item.to_string(),
                size: None,
                chips_type: Some(required(state, field::CHIPS)?),
            }
        } else {
            SideLine {
                name: ctx.item.to_string(),
                size: Some(required(state, field::SIZE)?),
                chips_type: None,
            }
        };
        Ok(LineDetails::Side(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::option::OptionField;

    fn schema() -> OptionSchema {
        OptionSchema::new(vec![
            OptionField::plain("Size", &["Regular", "Large"]),
            OptionField::plain("Chips", &["Lays Plain", "Lays BBQ"]),
        ])
    }

    #[test]
    fn test_chips_keep_only_flavour() {
        let prepared = SideRules.prepare_schema("Chips", schema());
        let keys: Vec<&str> = prepared.keys().collect();
        assert_eq!(keys, vec!["Chips"]);

        let prepared = SideRules.prepare_schema("Slaw", schema());
        let keys: Vec<&str> = prepared.keys().collect();
        assert_eq!(keys, vec!["Size"]);
    }

    #[test]
    fn test_chips_line_carries_flavour_not_size() {
        let prepared = SideRules.prepare_schema("Chips", schema());
        let ctx = ItemContext::new(Category::Side, "Chips", &prepared);
        let mut state = SelectionState::for_schema(&prepared);
        state.set("Chips", "Lays BBQ");

        assert_eq!(
            SideRules.normalize(&ctx, &state).unwrap(),
            LineDetails::Side(SideLine {
                name: "Chips".to_string(),
                size: None,
                chips_type: Some("Lays BBQ".to_string()),
            })
        );
    }
}
