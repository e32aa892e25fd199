//! `griddle clear` command

use anyhow::Result;

use crate::GlobalOptions;
use griddle::util::Status;

pub fn execute(global_opts: &GlobalOptions) -> Result<()> {
    let mut ledger = global_opts.ledger();
    let count = ledger.cart().item_count();
    ledger.clear()?;
    global_opts
        .shell
        .status(Status::Cleared, format!("{} item(s) from the cart", count));
    Ok(())
}
