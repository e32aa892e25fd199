//! Unit price of a customized item.
//!
//! The running total starts at the catalog price for the selected size and
//! then adds, in order: the premium bread surcharge, the category's own
//! modifiers (egg sandwich meat, combo drink upgrades) and every priced
//! add-on. Quantity is never applied here.

use crate::core::menu::MenuItem;
use crate::core::money::Money;
use crate::core::selection::SelectionState;
use crate::core::vocab::{field, value};
use crate::rules::ItemContext;

/// Surcharge for the premium bread.
pub const PREMIUM_BREAD_SURCHARGE: Money = Money::from_cents(75);

/// Price one unit of `item` with the current selections.
pub fn price(ctx: &ItemContext<'_>, item: &MenuItem, state: &SelectionState) -> Money {
    let size = state.single(field::SIZE);
    let mut total = item.base_price(size);

    if state.single(field::BREAD) == Some(value::CROISSANT) {
        total += PREMIUM_BREAD_SURCHARGE;
    }

    total += ctx.rules().price_modifiers(state);
    total += add_ons(ctx, state, size.unwrap_or(value::REGULAR));

    tracing::debug!("priced {} at {}", ctx.item, total);
    total
}

/// Sum of the selected add-ons; unpriced or unknown add-ons cost nothing.
fn add_ons(ctx: &ItemContext<'_>, state: &SelectionState, size: &str) -> Money {
    let Some(catalog) = ctx.schema.get(field::ADD_ONS) else {
        return Money::ZERO;
    };

    state
        .multi(field::ADD_ONS)
        .iter()
        .filter_map(|name| catalog.value(name))
        .filter_map(|add_on| add_on.price())
        .map(|price| price.for_size(size))
        .sum()
}
