//! `griddle cart` command

use anyhow::{Context, Result};

use crate::cli::CartArgs;
use crate::GlobalOptions;
use griddle::core::Cart;

pub fn execute(args: CartArgs, global_opts: &GlobalOptions) -> Result<()> {
    let ledger = global_opts.ledger();

    if args.json {
        let json =
            serde_json::to_string_pretty(ledger.cart()).context("failed to serialize cart")?;
        println!("{}", json);
        return Ok(());
    }

    if ledger.is_empty() {
        global_opts.shell.note("your cart is empty");
        return Ok(());
    }
    print!(
        "{}",
        render(ledger.cart(), global_opts.config.card_fee_percent())
    );
    Ok(())
}

/// Cart listing with the amounts due for each way of paying.
fn render(cart: &Cart, card_fee_percent: u32) -> String {
    let mut out = String::new();
    let width = cart
        .lines()
        .iter()
        .map(|line| line.display_name().chars().count())
        .max()
        .unwrap_or(0);

    for line in cart.lines() {
        out.push_str(&format!(
            "{}  {:>2} x {:<width$}  {:>8}\n",
            line.id,
            line.quantity(),
            line.display_name(),
            line.line_total().to_string(),
            width = width
        ));
        if let Some(note) = &line.data.special_instructions {
            out.push_str(&format!("{:>18}note: {}\n", "", note));
        }
    }

    out.push_str(&format!("\n{} item(s), total {}\n", cart.item_count(), cart.total()));
    if card_fee_percent > 0 {
        out.push_str(&format!(
            "paying by card: {} (includes {}% card fee)\n",
            cart.subtotal_with_fee(card_fee_percent),
            card_fee_percent
        ));
    } else {
        out.push_str("paying by card: no card fee\n");
    }
    out
}
