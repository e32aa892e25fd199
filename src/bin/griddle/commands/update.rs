//! `griddle update` command

use anyhow::Result;

use super::remove::line_not_found;
use crate::cli::UpdateArgs;
use crate::GlobalOptions;
use griddle::core::cart::QuantityChange;
use griddle::util::Status;

pub fn execute(args: UpdateArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let mut ledger = global_opts.ledger();

    let name = ledger
        .cart()
        .get(&args.id)
        .map(|line| line.display_name())
        .unwrap_or_default();

    match ledger.update_quantity(&args.id, args.delta)? {
        QuantityChange::Updated { quantity } => {
            shell.status(Status::Updated, format!("{} x {}", quantity, name));
        }
        QuantityChange::Removed => shell.status(Status::Removed, name),
        QuantityChange::NotFound => return Err(line_not_found(&args.id).into()),
    }
    shell.note(format!("cart total {}", ledger.total()));
    Ok(())
}
