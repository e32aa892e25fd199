//! `griddle add` command

use anyhow::{Context, Result};

use super::{fetch_menu, find_item, parse_category};
use crate::cli::AddArgs;
use crate::GlobalOptions;
use griddle::core::cart::AddOutcome;
use griddle::ops::customize::BuildError;
use griddle::util::{Diagnostic, Status};
use griddle::{CustomizeSession, OrderBackend};

pub fn execute(args: AddArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let picks = args
        .picks
        .iter()
        .map(|raw| parse_pick(raw))
        .collect::<Result<Vec<_>>>()?;
    let category = parse_category(args.category.as_deref())?;

    let backend = global_opts.backend()?;
    let menu = fetch_menu(shell, &backend)?;
    let (category, item) = find_item(&menu, &args.item, category)?;
    let schema = shell.spin(Status::Fetching, format!("{} options", category), || {
        backend.options(category)
    })?;

    let mut session = CustomizeSession::open(category, item, schema);
    for (key, value) in &picks {
        session.pick(key, value).map_err(|e| {
            Diagnostic::error(e.to_string()).with_suggestion(format!(
                "Run `griddle options \"{}\"` to see what can be chosen",
                session.item().name
            ))
        })?;
    }
    session.set_quantity(args.quantity);
    if let Some(note) = &args.note {
        session.set_instructions(note);
    }

    let line = session.build().map_err(|e| match e {
        BuildError::Invalid(invalid) => anyhow::Error::new(invalid),
        other => anyhow::Error::new(other),
    })?;
    let label = format!(
        "{} x {} ({} each)",
        line.quantity(),
        line.display_name(),
        line.price
    );

    if args.dry_run {
        shell.status(Status::Info, format!("Would add {}", label));
        println!("{}", line.id);
        return Ok(());
    }

    let mut ledger = global_opts.ledger();
    match ledger.add(line).context("failed to update the cart")? {
        AddOutcome::Inserted => shell.status(Status::Added, label),
        AddOutcome::Merged { quantity } => shell.status(
            Status::Updated,
            format!("{} (now {} in cart)", label, quantity),
        ),
    }
    shell.note(format!("cart total {}", ledger.total()));
    Ok(())
}

/// Split a `--pick "Field=Value"` argument.
fn parse_pick(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() && !value.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(Diagnostic::error(format!("invalid pick `{}`", raw))
            .with_context("picks look like \"Field=Value\", e.g. \"Bread=Wheat\"")
            .into()),
    }
}
