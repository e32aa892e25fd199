//! Global context for griddle operations.
//!
//! Provides centralized access to configuration, paths, and environment.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};

use crate::ops::ledger::FileCartStore;
use crate::util::config::{load_config, project_config_path, Config};

/// Environment variable that relocates the griddle home directory.
pub const HOME_ENV: &str = "GRIDDLE_HOME";

/// Project directories for griddle
static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("com", "griddle", "griddle"));

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for griddle data (config, cart)
    home: PathBuf,

    /// Whether to use verbose output
    verbose: bool,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext, honouring `GRIDDLE_HOME`.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let home = match std::env::var_os(HOME_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => default_home(),
        };

        Ok(GlobalContext {
            cwd,
            home,
            verbose: false,
            color: true,
        })
    }

    /// Create a GlobalContext rooted at explicit directories.
    pub fn with_paths(cwd: PathBuf, home: PathBuf) -> Self {
        GlobalContext {
            cwd,
            home,
            verbose: false,
            color: true,
        }
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the griddle home directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Get the project configuration file path (.griddle/config.toml).
    pub fn project_config_path(&self) -> PathBuf {
        project_config_path(&self.cwd)
    }

    /// Directory holding cart snapshots.
    pub fn cart_dir(&self) -> PathBuf {
        self.home.join("cart")
    }

    /// Load global and project configuration, project winning.
    pub fn load_config(&self) -> Config {
        load_config(&self.config_path(), &self.project_config_path())
    }

    /// The file store for the configured cart.
    pub fn cart_store(&self, config: &Config) -> FileCartStore {
        FileCartStore::for_key(&self.cart_dir(), config.storage_key())
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }
}

fn default_home() -> PathBuf {
    if let Some(dirs) = PROJECT_DIRS.as_ref() {
        dirs.data_dir().to_path_buf()
    } else {
        // Fallback to ~/.griddle
        BaseDirs::new()
            .map(|b| b.home_dir().join(".griddle"))
            .unwrap_or_else(|| PathBuf::from(".griddle"))
    }
}
