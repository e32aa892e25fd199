//! `griddle remove` command

use anyhow::Result;

use crate::cli::RemoveArgs;
use crate::GlobalOptions;
use griddle::core::cart::QuantityChange;
use griddle::util::diagnostic::suggestions;
use griddle::util::{Diagnostic, Status};

pub fn execute(args: RemoveArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let mut ledger = global_opts.ledger();

    let name = ledger
        .cart()
        .get(&args.id)
        .map(|line| line.display_name())
        .unwrap_or_default();

    match ledger.remove(&args.id)? {
        QuantityChange::Updated { quantity } => {
            shell.status(Status::Removed, format!("one {} ({} left)", name, quantity));
        }
        QuantityChange::Removed => shell.status(Status::Removed, name),
        QuantityChange::NotFound => return Err(line_not_found(&args.id).into()),
    }
    Ok(())
}

/// Error for an id that is not in the cart.
pub fn line_not_found(id: &str) -> Diagnostic {
    Diagnostic::error(format!("no cart line with id `{}`", id))
        .with_suggestion(suggestions::LINE_NOT_FOUND)
}
