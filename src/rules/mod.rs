//! Per-category ordering rules.
//!
//! Each category gets one [`CategoryRules`] implementation that knows how to
//! trim the backend schema for an item, which fields it requires, how its
//! fields are coupled, what it charges on top of the catalog price and how a
//! finished selection becomes an order line. Rules shared by every category
//! (always-required fields, premium bread, priced add-ons, chips sides) live
//! in the ops that consume them.

mod combo;
mod drink;
mod egg_sandwich;
mod hotdog;
mod salad;
mod sandwich;
mod side;

pub use combo::ComboRules;
pub use drink::DrinkRules;
pub use egg_sandwich::EggSandwichRules;
pub use hotdog::HotdogRules;
pub use salad::SaladRules;
pub use sandwich::SandwichRules;
pub use side::SideRules;

use crate::core::line::LineDetails;
use crate::core::money::Money;
use crate::core::option::OptionSchema;
use crate::core::selection::SelectionState;
use crate::core::vocab::{field, value};
use crate::core::Category;
use crate::ops::normalize::NormalizeError;
use crate::ops::validate::Violation;

/// The item being customized: its category, name and prepared schema.
#[derive(Debug, Clone, Copy)]
pub struct ItemContext<'a> {
    pub category: Category,
    pub item: &'a str,
    pub schema: &'a OptionSchema,
}

impl<'a> ItemContext<'a> {
    pub fn new(category: Category, item: &'a str, schema: &'a OptionSchema) -> Self {
        ItemContext {
            category,
            item,
            schema,
        }
    }

    pub fn rules(&self) -> &'static dyn CategoryRules {
        rules_for(self.category)
    }

    /// Whether `key` may be left empty for this item.
    pub fn is_optional(&self, key: &str) -> bool {
        if field::ALWAYS_REQUIRED.contains(&key) {
            return false;
        }
        if key == field::CHIPS && self.item == value::CHIPS {
            return false;
        }
        !self.rules().required_fields().contains(&key)
    }
}

/// Ordering behaviour of one category.
pub trait CategoryRules: Send + Sync {
    fn category(&self) -> Category;

    /// Fit the category schema to one item (drop, filter or add fields).
    fn prepare_schema(&self, _item: &str, schema: OptionSchema) -> OptionSchema {
        schema
    }

    /// Fields this category requires on top of the universal ones.
    fn required_fields(&self) -> &'static [&'static str] {
        &[]
    }

    /// Rewrite dependent fields after `key` changed to `chosen`
    /// (`None` when the field was cleared).
    fn couple(&self, _key: &str, _chosen: Option<&str>, state: SelectionState) -> SelectionState {
        state
    }

    /// Cross-field rules beyond "required field is empty".
    fn check(&self, _state: &SelectionState) -> Vec<Violation> {
        Vec::new()
    }

    /// Category surcharges added to the catalog price.
    fn price_modifiers(&self, _state: &SelectionState) -> Money {
        Money::ZERO
    }

    /// Option keys mapped onto typed line fields.
    fn mapped_fields(&self) -> &'static [&'static str];

    /// Whether leftover fields are kept in the line's extension bag.
    fn keeps_extensions(&self, _item: &str) -> bool {
        true
    }

    /// Build the typed part of the order line.
    fn normalize(&self, ctx: &ItemContext<'_>, state: &SelectionState) -> Result<LineDetails, NormalizeError>;
}

static HOTDOG: HotdogRules = HotdogRules;
static SANDWICH: SandwichRules = SandwichRules;
static EGG_SANDWICH: EggSandwichRules = EggSandwichRules;
static SALAD: SaladRules = SaladRules;
static SIDE: SideRules = SideRules;
static DRINK: DrinkRules = DrinkRules;
static COMBO: ComboRules = ComboRules;

/// Select the rule set for a category.
pub fn rules_for(category: Category) -> &'static dyn CategoryRules {
    match category {
        Category::Hotdog => &HOTDOG,
        Category::Sandwich => &SANDWICH,
        Category::EggSandwich => &EGG_SANDWICH,
        Category::Salad => &SALAD,
        Category::Side => &SIDE,
        Category::Drink => &DRINK,
        Category::Combo => &COMBO,
    }
}

// -----------------------------------------------------------------------------
// Helpers shared by the normalizers
// -----------------------------------------------------------------------------

pub(crate) fn required(state: &SelectionState, key: &str) -> Result<String, NormalizeError> {
    state
        .single(key)
        .map(str::to_string)
        .ok_or_else(|| NormalizeError::Missing {
            field: key.to_string(),
        })
}

pub(crate) fn optional(state: &SelectionState, key: &str) -> Option<String> {
    state.single(key).map(str::to_string)
}

/// Multi-select values in schema order; `None` when nothing is chosen.
pub(crate) fn list(ctx: &ItemContext<'_>, state: &SelectionState, key: &str) -> Option<Vec<String>> {
    let mut values = state.multi(key).to_vec();
    if values.is_empty() {
        return None;
    }
    if let Some(domain) = ctx.schema.get(key) {
        values.sort_by_key(|v| domain.position(v).unwrap_or(usize::MAX));
    }
    Some(values)
}

/// Map "Bread Prep" onto the `toasted` / `grilled` flags.
pub(crate) fn bread_prep(state: &SelectionState) -> (Option<bool>, Option<bool>) {
    match state.single(field::BREAD_PREP) {
        Some(prep) => (Some(prep == value::TOASTED), Some(prep == value::GRILLED)),
        None => (None, None),
    }
}
