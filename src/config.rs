//! Storefront configuration.
//!
//! Defaults match the shop as it runs today. Every field can be overridden from the
//! environment:
//!
//! | Variable | Field | Default |
//! |---|---|---|
//! | `BOUTIQUE_ADMIN_EMAILS` | `admin_emails` (comma-separated) | `admin@favored.com` |
//! | `BOUTIQUE_CHANNEL_BUFFER` | `channel_buffer` | `32` |
//! | `BOUTIQUE_DEFAULT_STOCK` | `default_stock` | `10` |
//! | `BOUTIQUE_MIN_PASSWORD_LEN` | `min_password_len` | `6` |
//! | `BOUTIQUE_CURRENCY` | `currency_symbol` | `₱` |
//! | `RUST_LOG` | `log_filter` | `info` |

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Emails that receive the admin role when their profile is created.
    #[serde(default = "default_admin_emails")]
    pub admin_emails: Vec<String>,

    /// Request channel capacity of every collection actor.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer: usize,

    /// Stock given to products added from the admin console.
    #[serde(default = "default_stock")]
    pub default_stock: u32,

    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,

    /// Shown in front of prices.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Tracing filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_admin_emails() -> Vec<String> {
    vec!["admin@favored.com".to_string()]
}

fn default_channel_buffer() -> usize {
    32
}

fn default_stock() -> u32 {
    10
}

fn default_min_password_len() -> usize {
    6
}

fn default_currency_symbol() -> String {
    "₱".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            admin_emails: default_admin_emails(),
            channel_buffer: default_channel_buffer(),
            default_stock: default_stock(),
            min_password_len: default_min_password_len(),
            currency_symbol: default_currency_symbol(),
            log_filter: default_log_filter(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

fn parse<T: FromStr>(key: &str, raw: String) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{key}={raw:?}")))
}

impl StorefrontConfig {
    /// Loads configuration from the process environment and validates it.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from any key lookup, starting from the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("BOUTIQUE_ADMIN_EMAILS") {
            config.admin_emails = raw
                .split(',')
                .map(|e| e.trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect();
        }
        if let Some(raw) = lookup("BOUTIQUE_CHANNEL_BUFFER") {
            config.channel_buffer = parse("BOUTIQUE_CHANNEL_BUFFER", raw)?;
        }
        if let Some(raw) = lookup("BOUTIQUE_DEFAULT_STOCK") {
            config.default_stock = parse("BOUTIQUE_DEFAULT_STOCK", raw)?;
        }
        if let Some(raw) = lookup("BOUTIQUE_MIN_PASSWORD_LEN") {
            config.min_password_len = parse("BOUTIQUE_MIN_PASSWORD_LEN", raw)?;
        }
        if let Some(raw) = lookup("BOUTIQUE_CURRENCY") {
            config.currency_symbol = raw;
        }
        if let Some(raw) = lookup("RUST_LOG") {
            config.log_filter = raw;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_buffer == 0 {
            return Err(ConfigError::Invalid(
                "channel_buffer must be greater than 0".to_string(),
            ));
        }
        if self.admin_emails.is_empty() {
            return Err(ConfigError::MissingField("admin_emails".to_string()));
        }
        if self.min_password_len < 6 {
            return Err(ConfigError::Invalid(
                "min_password_len must be at least 6".to_string(),
            ));
        }
        Ok(())
    }

    /// Formats a price for display, e.g. `₱1,250.00`.
    pub fn format_price(&self, price: f64) -> String {
        let cents = (price * 100.0).round() as i64;
        let (whole, frac) = (cents.abs() / 100, cents.abs() % 100);
        let digits = whole.to_string();
        let mut grouped = String::new();
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if cents < 0 { "-" } else { "" };
        format!("{sign}{}{grouped}.{frac:02}", self.currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.admin_emails, vec!["admin@favored.com"]);
        assert_eq!(config.default_stock, 10);
        assert_eq!(config.channel_buffer, 32);
    }

    #[test]
    fn environment_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("BOUTIQUE_ADMIN_EMAILS", "Owner@Shop.test, staff@shop.test,"),
            ("BOUTIQUE_DEFAULT_STOCK", "25"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.admin_emails, vec!["owner@shop.test", "staff@shop.test"]);
        assert_eq!(config.default_stock, 25);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            StorefrontConfig::from_lookup(lookup(&[("BOUTIQUE_CHANNEL_BUFFER", "0")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            StorefrontConfig::from_lookup(lookup(&[("BOUTIQUE_DEFAULT_STOCK", "lots")])),
            Err(ConfigError::Invalid(_))
        ));
        assert_eq!(
            StorefrontConfig::from_lookup(lookup(&[("BOUTIQUE_ADMIN_EMAILS", " , ")])).unwrap_err(),
            ConfigError::MissingField("admin_emails".into())
        );
    }

    #[test]
    fn prices_use_currency_symbol() {
        let config = StorefrontConfig::default();
        assert_eq!(config.format_price(1000.0), "₱1,000.00");
        assert_eq!(config.format_price(99.5), "₱99.50");
        assert_eq!(config.format_price(1234567.891), "₱1,234,567.89");
    }
}
