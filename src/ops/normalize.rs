//! Turning a validated selection into an order line.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::core::line::{Extension, OrderLine};
use crate::core::selection::{Choice, SelectionState};
use crate::core::vocab;
use crate::rules::ItemContext;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("missing selection for `{field}`")]
    Missing { field: String },
}

/// Build the order line for one customized item.
///
/// Fields the category maps are typed; any other non-empty field is kept in
/// the extension bag under its slug so new backend options are not lost.
pub fn normalize(
    ctx: &ItemContext<'_>,
    state: &SelectionState,
    quantity: u32,
    instructions: &str,
) -> Result<OrderLine, NormalizeError> {
    let rules = ctx.rules();
    let details = rules.normalize(ctx, state)?;

    let mut line = OrderLine::new(details)
        .with_quantity(quantity)
        .with_instructions(instructions);

    if rules.keeps_extensions(ctx.item) {
        line.extensions = extensions(state, rules.mapped_fields(), &line.to_json());
    }

    Ok(line)
}

fn extensions(
    state: &SelectionState,
    mapped: &[&str],
    typed: &Value,
) -> BTreeMap<String, Extension> {
    let mut bag = BTreeMap::new();
    for (key, choice) in state.entries() {
        if mapped.contains(&key) || choice.is_empty() {
            continue;
        }
        let slug = vocab::slug(key);
        if typed.get(&slug).is_some() {
            tracing::warn!("dropping option `{}`: `{}` is already a line field", key, slug);
            continue;
        }
        let ext = match choice {
            Choice::Single(Some(value)) => Extension::Text(value.clone()),
            Choice::Multi(values) => Extension::List(values.clone()),
            Choice::Single(None) => continue,
        };
        tracing::debug!("carrying unmapped option `{}` as `{}`", key, slug);
        bag.insert(slug, ext);
    }
    bag
}
