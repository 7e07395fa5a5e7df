//! # Configuration
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--no-vat`, `--currency`)
//! 2. Environment variables (`PRICEDESK_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after startup. The VAT toggle the user flips
//! in the shell lives in [`Session`](super::Session), seeded from here.

use std::path::PathBuf;

use pricedesk_core::CalculationOptions;
use pricedesk_io::DEFAULT_EXPORT_FILE;
use serde::Serialize;
use tracing::warn;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Apply VAT when a session starts.
    /// Default: true
    pub include_vat: bool,

    /// Where `export` writes when no path is given.
    /// Default: `discount_calculations.csv`
    pub export_file: PathBuf,

    /// Currency symbol for tables.
    /// Default: `£`
    pub currency_symbol: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            include_vat: true,
            export_file: PathBuf::from(DEFAULT_EXPORT_FILE),
            currency_symbol: "£".to_string(),
        }
    }
}

impl AppConfig {
    /// Creates an AppConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `PRICEDESK_INCLUDE_VAT`: `true/false`, `yes/no`, `on/off`, `1/0`
    /// - `PRICEDESK_EXPORT_FILE`: default export path
    /// - `PRICEDESK_CURRENCY_SYMBOL`: symbol shown in tables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(raw) = lookup("PRICEDESK_INCLUDE_VAT") {
            match parse_switch(&raw) {
                Some(include_vat) => config.include_vat = include_vat,
                None => warn!(value = %raw, "ignoring unrecognised PRICEDESK_INCLUDE_VAT"),
            }
        }

        if let Some(path) = lookup("PRICEDESK_EXPORT_FILE").filter(|p| !p.trim().is_empty()) {
            config.export_file = PathBuf::from(path);
        }

        if let Some(symbol) = lookup("PRICEDESK_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        config
    }

    /// Calculation options for a new session.
    pub fn options(&self) -> CalculationOptions {
        CalculationOptions {
            include_vat: self.include_vat,
        }
    }
}

/// Reads an on/off word. Shared by the env config and the `vat` command.
pub fn parse_switch(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
