//! Selection validation.
//!
//! There is exactly one rule source: [`violations`]. `validate` collects its
//! messages and `is_form_valid` only asks whether it yields anything, so the
//! two can never disagree.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::selection::{Choice, SelectionState};
use crate::core::vocab::{field, value};
use crate::rules::ItemContext;
use crate::util::diagnostic::Diagnostic;

/// One reason a selection cannot be ordered yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    MissingSelection { field: String },
    NotOffered { field: String, value: String },
    ComboDrinkMissing,
    ComboDrinkConflict,
    FountainSizeMissing,
    ChipTypeMissing,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingSelection { field } => write!(f, "Please select {}", field),
            Violation::NotOffered { field, value } => {
                write!(f, "`{}` is not offered for {}", value, field)
            }
            Violation::ComboDrinkMissing => {
                f.write_str("Please select either a Drink or Bottled Soda for your combo")
            }
            Violation::ComboDrinkConflict => {
                f.write_str("Please select only one drink option (either Drink or Bottled Soda)")
            }
            Violation::FountainSizeMissing => {
                f.write_str("Please select a size for your fountain drink (Regular or Large)")
            }
            Violation::ChipTypeMissing => {
                f.write_str("Please select a chip type when choosing chips as your side")
            }
        }
    }
}

/// A selection that failed validation.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("`{item}` is not ready to order")]
#[diagnostic(
    code(griddle::validate::incomplete),
    help("pick the missing options with `--pick \"Field=Value\"`")
)]
pub struct ValidationError {
    pub item: String,
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.to_string());
        for violation in &self.violations {
            diag = diag.with_context(violation.to_string());
        }
        diag.with_suggestion(format!(
            "Run `griddle options \"{}\"` to see what can be chosen",
            self.item
        ))
    }
}

/// Every rule violated by `state`, in a stable order.
pub fn violations<'a>(
    ctx: &'a ItemContext<'a>,
    state: &'a SelectionState,
) -> impl Iterator<Item = Violation> + 'a {
    let missing = ctx
        .schema
        .fields()
        .iter()
        .filter(move |f| !ctx.is_optional(&f.key) && state.is_empty(&f.key))
        .map(|f| Violation::MissingSelection {
            field: f.key.clone(),
        });

    let not_offered = state.entries().flat_map(move |(key, choice)| {
        let chosen: Vec<&str> = match choice {
            Choice::Single(Some(v)) if !v.is_empty() => vec![v.as_str()],
            Choice::Multi(vs) => vs.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        };
        let domain = ctx.schema.get(key);
        chosen
            .into_iter()
            .filter(move |v| domain.is_some_and(|d| !d.contains(v)))
            .map(move |v| Violation::NotOffered {
                field: key.to_string(),
                value: v.to_string(),
            })
            .collect::<Vec<_>>()
    });

    let chips = (state.single(field::SIDE) == Some(value::CHIPS)
        && state.is_empty(field::CHIP_TYPE))
    .then_some(Violation::ChipTypeMissing);

    missing
        .chain(not_offered)
        .chain(ctx.rules().check(state))
        .chain(chips)
}

/// Collect the violations of `state`.
pub fn validate(ctx: &ItemContext<'_>, state: &SelectionState) -> Vec<Violation> {
    violations(ctx, state).collect()
}

/// Whether `state` can be added to the cart.
pub fn is_form_valid(ctx: &ItemContext<'_>, state: &SelectionState) -> bool {
    violations(ctx, state).next().is_none()
}

/// Validate, turning violations into an error.
pub fn ensure_valid(ctx: &ItemContext<'_>, state: &SelectionState) -> Result<(), ValidationError> {
    let violations = validate(ctx, state);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError {
            item: ctx.item.to_string(),
            violations,
        })
    }
}
