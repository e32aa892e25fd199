//! Selection transitions.
//!
//! `select` and `select_multi` take the current state and return the next
//! one; the input is never modified, so a rejected choice leaves the session
//! exactly as it was. Category coupling rules run after every accepted
//! single-select change.

use crate::core::selection::{SelectionError, SelectionState};
use crate::rules::ItemContext;

/// Toggle a single-select field.
///
/// Re-selecting the current value clears an optional field and is a no-op
/// for a required one.
pub fn select(
    ctx: &ItemContext<'_>,
    state: &SelectionState,
    key: &str,
    value: &str,
) -> Result<SelectionState, SelectionError> {
    let field = ctx.schema.get(key).ok_or_else(|| SelectionError::UnknownField {
        field: key.to_string(),
    })?;
    if field.is_multi() {
        return Err(SelectionError::NotSingleSelect {
            field: key.to_string(),
        });
    }
    if !field.contains(value) {
        return Err(SelectionError::UnknownValue {
            field: key.to_string(),
            value: value.to_string(),
        });
    }

    let mut next = state.clone();
    let chosen = if state.single(key) == Some(value) {
        if !ctx.is_optional(key) {
            tracing::debug!("`{}` is required, keeping `{}`", key, value);
            return Ok(next);
        }
        next.clear(key);
        None
    } else {
        next.set(key, value);
        Some(value)
    };

    tracing::debug!("selected {} = {:?}", key, chosen);
    Ok(ctx.rules().couple(key, chosen, next))
}

/// Toggle membership of `value` in a multi-select field.
///
/// Values stay in the order the schema lists them.
pub fn select_multi(
    ctx: &ItemContext<'_>,
    state: &SelectionState,
    key: &str,
    value: &str,
) -> Result<SelectionState, SelectionError> {
    let field = ctx.schema.get(key).ok_or_else(|| SelectionError::UnknownField {
        field: key.to_string(),
    })?;
    if !field.is_multi() {
        return Err(SelectionError::NotMultiSelect {
            field: key.to_string(),
        });
    }
    if !field.contains(value) {
        return Err(SelectionError::UnknownValue {
            field: key.to_string(),
            value: value.to_string(),
        });
    }

    let mut values = state.multi(key).to_vec();
    match values.iter().position(|v| v == value) {
        Some(index) => {
            values.remove(index);
        }
        None => {
            values.push(value.to_string());
            values.sort_by_key(|v| field.position(v).unwrap_or(usize::MAX));
        }
    }

    tracing::debug!("toggled {} -> {:?}", key, values);
    let mut next = state.clone();
    next.set_multi(key, values);
    Ok(next)
}

/// Apply a choice to whichever kind of field `key` is.
pub fn choose(
    ctx: &ItemContext<'_>,
    state: &SelectionState,
    key: &str,
    value: &str,
) -> Result<SelectionState, SelectionError> {
    match ctx.schema.get(key) {
        Some(field) if field.is_multi() => select_multi(ctx, state, key, value),
        _ => select(ctx, state, key, value),
    }
}

/// Make sure `value` is chosen, without toggling it off if it already is.
///
/// Used for declarative input such as `--pick "Drink Size=Regular"` after a
/// coupling rule has already filled that field in.
pub fn pick(
    ctx: &ItemContext<'_>,
    state: &SelectionState,
    key: &str,
    value: &str,
) -> Result<SelectionState, SelectionError> {
    let held = state.single(key) == Some(value) || state.multi(key).iter().any(|v| v == value);
    if held {
        tracing::debug!("{} already holds `{}`", key, value);
        return Ok(state.clone());
    }
    choose(ctx, state, key, value)
}
