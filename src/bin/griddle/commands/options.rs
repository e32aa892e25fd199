//! `griddle options` command
//!
//! Shows the fields an item can be customized with, after the item's own
//! adjustments (a chips side only asks for the chip type, and so on).

use anyhow::Result;

use super::{fetch_menu, find_item, parse_category};
use crate::cli::OptionsArgs;
use crate::GlobalOptions;
use griddle::core::option::{OptionField, OptionValue};
use griddle::util::Status;
use griddle::{CustomizeSession, OrderBackend};

pub fn execute(args: OptionsArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let category = parse_category(args.category.as_deref())?;
    let backend = global_opts.backend()?;

    let menu = fetch_menu(shell, &backend)?;
    let (category, item) = find_item(&menu, &args.item, category)?;
    let schema = shell.spin(Status::Fetching, format!("{} options", category), || {
        backend.options(category)
    })?;

    let session = CustomizeSession::open(category, item, schema);
    print!("{}", render(&session));
    Ok(())
}

fn render(session: &CustomizeSession) -> String {
    let item = session.item();
    let mut out = format!("{} ({})  {}\n", item.name, session.category(), item.price);

    if session.schema().is_empty() {
        out.push_str("  no choices to make\n");
        return out;
    }
    for field in session.schema().fields() {
        out.push_str(&format!(
            "  {} ({}): {}\n",
            field.key,
            describe(field, session.is_optional(&field.key)),
            field
                .values
                .iter()
                .map(value_label)
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    out
}

fn describe(field: &OptionField, optional: bool) -> &'static str {
    match (field.is_multi(), optional) {
        (true, true) => "any, optional",
        (true, false) => "at least one",
        (false, true) => "one, optional",
        (false, false) => "one",
    }
}

fn value_label(value: &OptionValue) -> String {
    match value.price() {
        Some(price) => format!("{} (+{})", value.name(), price),
        None => value.name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OptionsArgs;
    use clap::Parser;
    use griddle::core::menu::MenuItem;
    use griddle::core::option::{OptionSchema, PriceSpec};
    use griddle::core::{Category, Money};

    fn parse_options_args(args: &[&str]) -> OptionsArgs {
        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            options: OptionsArgs,
        }
        TestCli::parse_from(args).options
    }

    #[test]
    fn test_options_args() {
        let args = parse_options_args(&["test", "Chips", "--category", "side"]);
        assert_eq!(args.item, "Chips");
        assert_eq!(args.category.as_deref(), Some("side"));
    }

    #[test]
    fn test_render_marks_optional_fields() {
        let schema = OptionSchema::new(vec![
            OptionField::plain("Toppings", &["Mustard", "Chili"]),
            OptionField::new(
                "Add Ons",
                vec![OptionValue::priced(
                    "Cheese",
                    PriceSpec::Flat(Money::from_cents(50)),
                )],
            ),
        ]);
        let item = MenuItem::new("Turkey", PriceSpec::Flat(Money::from_cents(450)));
        let session = CustomizeSession::open(Category::Hotdog, item, schema);

        let out = render(&session);
        assert!(out.starts_with("Turkey (Hotdog)  $4.50\n"));
        assert!(out.contains("  Toppings (any, optional): Mustard, Chili\n"));
        assert!(out.contains("Cheese (+$0.50)"));
    }

    #[test]
    fn test_render_without_choices() {
        let item = MenuItem::new("Bottled Soda", PriceSpec::Flat(Money::from_cents(200)));
        let session = CustomizeSession::open(Category::Drink, item, OptionSchema::default());
        assert!(render(&session).ends_with("no choices to make\n"));
    }
}
