//! Command implementations

pub mod add;
pub mod cart;
pub mod checkout;
pub mod clear;
pub mod completions;
pub mod hours;
pub mod menu;
pub mod options;
pub mod order;
pub mod remove;
pub mod update;

use anyhow::Result;

use griddle::core::menu::{Menu, MenuItem};
use griddle::core::Category;
use griddle::util::diagnostic::suggestions;
use griddle::util::{Diagnostic, Shell, Status};
use griddle::OrderBackend;

/// Parse an optional `--category` flag.
pub fn parse_category(raw: Option<&str>) -> Result<Option<Category>> {
    raw.map(|c| c.parse::<Category>().map_err(anyhow::Error::from))
        .transpose()
}

/// Fetch the menu behind a spinner.
pub fn fetch_menu(shell: &Shell, backend: &dyn OrderBackend) -> Result<Menu> {
    Ok(shell.spin(Status::Fetching, "menu", || backend.menu())?)
}

/// Find a menu item by name, using the category to settle ties.
pub fn find_item(menu: &Menu, name: &str, category: Option<Category>) -> Result<(Category, MenuItem)> {
    let mut matches = menu.lookup(name.trim());
    if let Some(category) = category {
        matches.retain(|(c, _)| *c == category);
    }

    match matches.as_slice() {
        [(category, item)] => Ok((*category, (*item).clone())),
        [] => Err(Diagnostic::error(format!("`{}` is not on the menu", name))
            .with_suggestion(suggestions::ITEM_NOT_FOUND)
            .into()),
        several => {
            let mut diag =
                Diagnostic::error(format!("`{}` is on the menu more than once", name));
            for (category, _) in several {
                diag = diag.with_context(format!("{} `{}`", category, name));
            }
            Err(diag
                .with_suggestion(format!(
                    "Pass `--category` with one of: {}",
                    several
                        .iter()
                        .map(|(c, _)| c.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
                .into())
        }
    }
}
