//! `griddle menu` command

use anyhow::Result;

use super::{fetch_menu, parse_category};
use crate::cli::MenuArgs;
use crate::GlobalOptions;
use griddle::core::menu::Menu;
use griddle::core::Category;

pub fn execute(args: MenuArgs, global_opts: &GlobalOptions) -> Result<()> {
    let only = parse_category(args.category.as_deref())?;
    let backend = global_opts.backend()?;
    let menu = fetch_menu(&global_opts.shell, &backend)?;

    print!("{}", render(&menu, only));
    Ok(())
}

/// Menu listing, one section per category.
fn render(menu: &Menu, only: Option<Category>) -> String {
    let mut out = String::new();
    let categories: Vec<Category> = menu
        .categories()
        .filter(|c| only.map_or(true, |o| o == *c))
        .collect();

    let width = categories
        .iter()
        .flat_map(|c| menu.items(*c))
        .map(|item| item.name.chars().count())
        .max()
        .unwrap_or(0);

    for category in categories {
        out.push_str(&format!("{}\n", category));
        for item in menu.items(category) {
            out.push_str(&format!(
                "  {:<width$}  {}\n",
                item.name,
                item.price,
                width = width
            ));
        }
    }
    out
}
