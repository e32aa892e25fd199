//! Centralized shell output and progress management.
//!
//! Every status line the CLI prints goes through [`Shell`]:
//! - Status messages with a right-aligned, coloured status word
//! - A spinner (via indicatif) while a backend call is in flight
//!
//! Results a user may want to pipe (menus, cart listings) go to stdout from
//! the commands themselves; the shell writes to stderr.

use std::fmt::Display;
use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// --quiet: errors only, no spinner
    Quiet,
    /// Default: status messages + spinner
    #[default]
    Normal,
    /// --verbose: status messages, debug logs, no spinner
    Verbose,
}

/// Status types for output messages.
///
/// Shell handles all formatting - callers just specify the semantic status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    // Success statuses (green)
    Added,
    Updated,
    Removed,
    Cleared,
    Ordered,

    // In-progress statuses (cyan)
    Fetching,
    Sending,
    Verifying,
    Paying,

    // Info statuses (blue/default)
    Info,

    // Warning statuses (yellow)
    Warning,

    // Error status (red)
    Error,
}

impl Status {
    /// Get the display text for this status.
    fn as_str(&self) -> &'static str {
        match self {
            Status::Added => "Added",
            Status::Updated => "Updated",
            Status::Removed => "Removed",
            Status::Cleared => "Cleared",
            Status::Ordered => "Ordered",
            Status::Fetching => "Fetching",
            Status::Sending => "Sending",
            Status::Verifying => "Verifying",
            Status::Paying => "Paying",
            Status::Info => "Info",
            Status::Warning => "Warning",
            Status::Error => "error",
        }
    }

    /// Get the ANSI color code for this status.
    fn color_code(&self) -> &'static str {
        match self {
            // Success: bold green
            Status::Added | Status::Updated | Status::Removed | Status::Cleared | Status::Ordered => {
                "\x1b[1;32m"
            }
            // In-progress: bold cyan
            Status::Fetching | Status::Sending | Status::Verifying | Status::Paying => "\x1b[1;36m",
            // Info: bold blue
            Status::Info => "\x1b[1;34m",
            // Warning: bold yellow
            Status::Warning => "\x1b[1;33m",
            // Error: bold red
            Status::Error => "\x1b[1;31m",
        }
    }
}

/// Width status words are right-aligned to.
const STATUS_WIDTH: usize = 12;

/// Central shell for all CLI output.
#[derive(Debug)]
pub struct Shell {
    verbosity: Verbosity,
    use_color: bool,
}

impl Shell {
    pub fn new(verbosity: Verbosity, use_color: bool) -> Self {
        Shell {
            verbosity,
            use_color,
        }
    }

    /// Create a shell from CLI flags; quiet wins over verbose.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        Shell::new(verbosity, io::stderr().is_terminal())
    }

    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    /// Check if colors are enabled.
    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Print a status message.
    ///
    /// Format: `{status:>12} {message}`
    ///
    /// In quiet mode, only Error status is printed.
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.is_quiet() && status != Status::Error {
            return;
        }
        eprintln!("{} {}", self.format_status(status), msg);
    }

    /// Print an info message.
    pub fn note(&self, msg: impl Display) {
        self.status(Status::Info, msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: impl Display) {
        self.status(Status::Warning, msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: impl Display) {
        self.status(Status::Error, msg);
    }

    /// Format a status prefix with optional color.
    fn format_status(&self, status: Status) -> String {
        let text = status.as_str();
        if self.use_color {
            format!(
                "{}{:>width$}\x1b[0m",
                status.color_code(),
                text,
                width = STATUS_WIDTH
            )
        } else {
            format!("{:>width$}", text, width = STATUS_WIDTH)
        }
    }

    /// Run `f` behind a spinner labelled with `status` and `msg`.
    ///
    /// Quiet and verbose shells print a plain status line instead (or
    /// nothing), so debug logs are not interleaved with spinner frames.
    pub fn spin<T>(&self, status: Status, msg: impl Display, f: impl FnOnce() -> T) -> T {
        let msg = msg.to_string();
        if self.is_quiet() {
            return f();
        }
        if self.is_verbose() || !io::stderr().is_terminal() {
            self.status(status, &msg);
            return f();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("{} {}", status.as_str(), msg));
        pb.enable_steady_tick(Duration::from_millis(100));
        let result = f();
        pb.finish_and_clear();
        result
    }
}

impl Default for Shell {
    fn default() -> Self {
        Shell::new(Verbosity::Normal, false)
    }
}
