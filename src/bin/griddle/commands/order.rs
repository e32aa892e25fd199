//! `griddle order` command

use anyhow::{bail, Context, Result};

use crate::cli::OrderArgs;
use crate::GlobalOptions;
use griddle::util::Status;
use griddle::OrderBackend;

pub fn execute(args: OrderArgs, global_opts: &GlobalOptions) -> Result<()> {
    let backend = global_opts.backend()?;
    let lookup = global_opts
        .shell
        .spin(Status::Fetching, format!("order #{}", args.id), || {
            backend.order(args.id)
        })?;

    match lookup.order {
        Some(order) if lookup.success => {
            let json = serde_json::to_string_pretty(&order).context("failed to format order")?;
            println!("{}", json);
            Ok(())
        }
        _ => bail!("order #{} was not found", args.id),
    }
}
