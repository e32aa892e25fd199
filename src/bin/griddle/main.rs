//! Griddle CLI - order from the counter without standing at it

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use griddle::api::{ApiError, HttpBackend};
use griddle::ops::checkout::CheckoutError;
use griddle::ops::ledger::{CartLedger, FileCartStore};
use griddle::ops::validate::ValidationError;
use griddle::util::diagnostic::{emit, suggestions};
use griddle::util::{Config, Diagnostic, GlobalContext, Shell};

/// Options shared by every command.
pub struct GlobalOptions {
    pub shell: Shell,
    pub ctx: GlobalContext,
    pub config: Config,
}

impl GlobalOptions {
    /// Client for the configured order backend.
    pub fn backend(&self) -> Result<HttpBackend> {
        Ok(HttpBackend::from_config(&self.config.api)?)
    }

    /// The persisted cart.
    pub fn ledger(&self) -> CartLedger<FileCartStore> {
        CartLedger::load(self.ctx.cart_store(&self.config))
    }
}

fn main() {
    let cli = Cli::parse();
    let shell = Shell::from_flags(cli.quiet, cli.verbose);
    let color = shell.use_color();

    if let Err(e) = run(cli, shell) {
        report(&e, color);
        std::process::exit(1);
    }
}

fn run(cli: Cli, shell: Shell) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("griddle=debug")
    } else if cli.quiet {
        EnvFilter::new("griddle=error")
    } else {
        EnvFilter::new("griddle=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let mut ctx = GlobalContext::new()?;
    ctx.set_verbose(cli.verbose);
    ctx.set_color(shell.use_color());

    let mut config = ctx.load_config();
    if let Some(url) = cli.api_url {
        config.api.menu_url = Some(url);
    }
    if let Some(url) = cli.checkout_url {
        config.api.checkout_url = Some(url);
    }

    let global_opts = GlobalOptions { shell, ctx, config };

    // Execute command
    match cli.command {
        Commands::Menu(args) => commands::menu::execute(args, &global_opts),
        Commands::Options(args) => commands::options::execute(args, &global_opts),
        Commands::Add(args) => commands::add::execute(args, &global_opts),
        Commands::Cart(args) => commands::cart::execute(args, &global_opts),
        Commands::Remove(args) => commands::remove::execute(args, &global_opts),
        Commands::Update(args) => commands::update::execute(args, &global_opts),
        Commands::Clear => commands::clear::execute(&global_opts),
        Commands::Hours(args) => commands::hours::execute(args, &global_opts),
        Commands::Checkout(args) => commands::checkout::execute(args, &global_opts),
        Commands::Order(args) => commands::order::execute(args, &global_opts),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Print a failed command's error, with hints for the ones a user can fix.
fn report(err: &anyhow::Error, color: bool) {
    if let Some(diag) = err.downcast_ref::<Diagnostic>() {
        emit(diag, color);
        return;
    }
    if let Some(invalid) = err.downcast_ref::<ValidationError>() {
        emit(&invalid.to_diagnostic(), color);
        return;
    }

    let api = err.downcast_ref::<ApiError>().or_else(|| match err.downcast_ref::<CheckoutError>() {
        Some(CheckoutError::Api(api)) => Some(api),
        _ => None,
    });
    let mut diag = Diagnostic::error(format!("{:#}", err));
    match (api, err.downcast_ref::<CheckoutError>()) {
        (Some(ApiError::Transport { .. }) | Some(ApiError::InvalidUrl(_)), _) => {
            diag = diag.with_suggestion(suggestions::BACKEND_UNREACHABLE);
        }
        (_, Some(CheckoutError::EmptyCart)) => {
            diag = diag.with_suggestion(suggestions::EMPTY_CART);
        }
        _ => {}
    }
    emit(&diag, color);
}
