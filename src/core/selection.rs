//! Selections made in one customization session.
//!
//! The state only stores choices. The transitions that change it (toggle
//! semantics, requiredness and coupling between fields) live in
//! `ops::select`, and always return a fresh state.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::option::{Cardinality, OptionSchema};

/// The current choice for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Single(Option<String>),
    Multi(Vec<String>),
}

impl Choice {
    pub fn is_empty(&self) -> bool {
        match self {
            Choice::Single(value) => value.as_deref().map_or(true, str::is_empty),
            Choice::Multi(values) => values.is_empty(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("`{field}` is not an option for this item")]
    UnknownField { field: String },

    #[error("`{value}` is not a valid choice for `{field}`")]
    UnknownValue { field: String, value: String },

    #[error("`{field}` takes a single value")]
    NotMultiSelect { field: String },

    #[error("`{field}` takes several values; toggle them one at a time")]
    NotSingleSelect { field: String },
}

/// Field key to choice, with an entry for every key of the active schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    entries: BTreeMap<String, Choice>,
}

impl SelectionState {
    /// An empty selection with one entry per schema field.
    pub fn for_schema(schema: &OptionSchema) -> Self {
        let entries = schema
            .fields()
            .iter()
            .map(|field| {
                let empty = match field.cardinality {
                    Cardinality::Single => Choice::Single(None),
                    Cardinality::Multi => Choice::Multi(Vec::new()),
                };
                (field.key.clone(), empty)
            })
            .collect();
        SelectionState { entries }
    }

    pub fn get(&self, field: &str) -> Option<&Choice> {
        self.entries.get(field)
    }

    /// The chosen value of a single-select field, if any.
    pub fn single(&self, field: &str) -> Option<&str> {
        match self.entries.get(field) {
            Some(Choice::Single(Some(value))) if !value.is_empty() => Some(value),
            _ => None,
        }
    }

    /// The chosen values of a multi-select field (empty when unset).
    pub fn multi(&self, field: &str) -> &[String] {
        match self.entries.get(field) {
            Some(Choice::Multi(values)) => values,
            _ => &[],
        }
    }

    /// True when the field has no entry or an empty one.
    pub fn is_empty(&self, field: &str) -> bool {
        self.entries.get(field).map_or(true, Choice::is_empty)
    }

    pub fn is_set(&self, field: &str) -> bool {
        !self.is_empty(field)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Choice)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Set a single value. Used by transitions and coupling rules.
    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.entries
            .insert(field.to_string(), Choice::Single(Some(value.into())));
    }

    /// Clear a field, keeping its entry.
    pub fn clear(&mut self, field: &str) {
        let cleared = match self.entries.get(field) {
            Some(Choice::Multi(_)) => Choice::Multi(Vec::new()),
            _ => Choice::Single(None),
        };
        self.entries.insert(field.to_string(), cleared);
    }

    /// Replace the values of a multi-select field.
    pub fn set_multi(&mut self, field: &str, values: Vec<String>) {
        self.entries.insert(field.to_string(), Choice::Multi(values));
    }
}
