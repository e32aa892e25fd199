//! Configuration file support for griddle.
//!
//! Two configuration file locations are read:
//! - Global: `<griddle home>/config.toml` - User-wide defaults
//! - Project: `.griddle/config.toml` - Overrides for the current directory
//!
//! Project config takes precedence over global config; command-line flags
//! and environment variables take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::ops::checkout::{PaymentMethod, DEFAULT_CARD_FEE_PERCENT};
use crate::ops::ledger::DEFAULT_STORAGE_KEY;
use crate::ops::pickup::BusinessHours;

pub const DEFAULT_MENU_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_CHECKOUT_URL: &str = "http://localhost:5000";

/// griddle configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Order backend endpoints
    pub api: ApiConfig,

    /// Cart storage
    pub cart: CartConfig,

    /// Checkout defaults
    pub checkout: CheckoutConfig,

    /// Store opening hours
    pub hours: HoursConfig,
}

/// Order backend settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the catalog endpoints (`get_menu`, `get_<category>`)
    pub menu_url: Option<String>,

    /// Base URL of the checkout endpoints (`api/checkout/...`)
    pub checkout_url: Option<String>,

    /// Request timeout in seconds (None = wait indefinitely)
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub fn menu_url(&self) -> &str {
        self.menu_url.as_deref().unwrap_or(DEFAULT_MENU_URL)
    }

    pub fn checkout_url(&self) -> &str {
        self.checkout_url.as_deref().unwrap_or(DEFAULT_CHECKOUT_URL)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Name the cart snapshot is stored under
    pub storage_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Card surcharge in percent
    pub card_fee_percent: Option<u32>,

    /// Default payment method (cash, card)
    pub payment: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HoursConfig {
    /// Opening time, `HH:MM`
    pub open: Option<String>,

    /// Closing time, `HH:MM`
    pub close: Option<String>,

    /// Weekday the store is closed
    pub closed_day: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        // API settings
        if other.api.menu_url.is_some() {
            self.api.menu_url = other.api.menu_url;
        }
        if other.api.checkout_url.is_some() {
            self.api.checkout_url = other.api.checkout_url;
        }
        if other.api.timeout_secs.is_some() {
            self.api.timeout_secs = other.api.timeout_secs;
        }

        if other.cart.storage_key.is_some() {
            self.cart.storage_key = other.cart.storage_key;
        }

        // Checkout settings
        if other.checkout.card_fee_percent.is_some() {
            self.checkout.card_fee_percent = other.checkout.card_fee_percent;
        }
        if other.checkout.payment.is_some() {
            self.checkout.payment = other.checkout.payment;
        }

        // Hours
        if other.hours.open.is_some() {
            self.hours.open = other.hours.open;
        }
        if other.hours.close.is_some() {
            self.hours.close = other.hours.close;
        }
        if other.hours.closed_day.is_some() {
            self.hours.closed_day = other.hours.closed_day;
        }
    }

    pub fn storage_key(&self) -> &str {
        self.cart.storage_key.as_deref().unwrap_or(DEFAULT_STORAGE_KEY)
    }

    pub fn card_fee_percent(&self) -> u32 {
        self.checkout
            .card_fee_percent
            .unwrap_or(DEFAULT_CARD_FEE_PERCENT)
    }

    /// Parse the default payment method from config string.
    pub fn payment(&self) -> Option<PaymentMethod> {
        self.checkout.payment.as_ref().and_then(|s| s.parse().ok())
    }

    /// Opening hours, with unset fields taken from the defaults.
    pub fn business_hours(&self) -> Result<BusinessHours> {
        let mut hours = BusinessHours::default();
        if let Some(open) = &self.hours.open {
            hours.open = parse_time(open).context("invalid `hours.open`")?;
        }
        if let Some(close) = &self.hours.close {
            hours.close = parse_time(close).context("invalid `hours.close`")?;
        }
        if let Some(day) = &self.hours.closed_day {
            hours.closed_day = day
                .trim()
                .parse::<Weekday>()
                .map_err(|_| anyhow::anyhow!("invalid `hours.closed_day`: `{}`", day))?;
        }
        anyhow::ensure!(
            hours.open < hours.close,
            "opening time {} is not before closing time {}",
            hours.open,
            hours.close
        );
        Ok(hours)
    }
}

fn parse_time(text: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M")
        .with_context(|| format!("expected HH:MM, got `{}`", text))
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.griddle/config.toml)
/// 2. Global config (<griddle home>/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    // Project config overrides global
    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Get the project config path (.griddle/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".griddle").join("config.toml")
}
