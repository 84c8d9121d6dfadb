//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`OFICINA_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::time::Duration;

use oficina_core::SHOP_NAME;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Shown in the banner and on the summary.
    pub shop_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Digit group separator (`.` in pt-BR)
    pub thousands_separator: char,

    /// Decimal separator (`,` in pt-BR)
    pub decimal_separator: char,

    /// How often the work timer advances one second, in milliseconds.
    /// Only shortened for demos and tests.
    pub tick_interval_ms: u64,
}

impl Default for ConfigState {
    /// Returns the configuration the workshop runs with.
    ///
    /// ## Default Values
    /// - Shop: "Blackouts Mecânica"
    /// - Currency: R$, pt-BR separators (`R$ 1.100,00`)
    /// - Timer: one tick per 1000 ms
    fn default() -> Self {
        ConfigState {
            shop_name: SHOP_NAME.to_string(),
            currency_symbol: "R$".to_string(),
            currency_decimals: 2,
            thousands_separator: '.',
            decimal_separator: ',',
            tick_interval_ms: 1000,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `OFICINA_SHOP_NAME`: Override shop name
    /// - `OFICINA_CURRENCY_SYMBOL`: Override currency symbol
    /// - `OFICINA_TICK_MS`: Override the timer tick interval (ms, > 0)
    pub fn from_env() -> Self {
        let mut config = ConfigState::default();

        if let Ok(shop_name) = std::env::var("OFICINA_SHOP_NAME") {
            config.shop_name = shop_name;
        }

        if let Ok(symbol) = std::env::var("OFICINA_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Ok(tick_str) = std::env::var("OFICINA_TICK_MS") {
            match tick_str.parse::<u64>() {
                Ok(ms) if ms > 0 => config.tick_interval_ms = ms,
                _ => warn!(value = %tick_str, "Ignoring invalid OFICINA_TICK_MS"),
            }
        }

        config
    }

    /// The timer tick period.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Formats a centavo amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use oficina_console_lib::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(110_000), "R$ 1.100,00");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = (cents / divisor).unsigned_abs();
        let frac = (cents % divisor).unsigned_abs();

        let mut out = String::new();
        if cents < 0 {
            out.push('-');
        }
        out.push_str(&self.currency_symbol);
        out.push(' ');
        out.push_str(&group_digits(whole, self.thousands_separator));

        if self.currency_decimals > 0 {
            out.push(self.decimal_separator);
            out.push_str(&format!(
                "{:0width$}",
                frac,
                width = self.currency_decimals as usize
            ));
        }

        out
    }
}

/// `1234567` → `1.234.567`
fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_positive() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(1234), "R$ 12,34");
        assert_eq!(config.format_currency(100), "R$ 1,00");
        assert_eq!(config.format_currency(1), "R$ 0,01");
        assert_eq!(config.format_currency(0), "R$ 0,00");
    }

    #[test]
    fn test_format_currency_groups_thousands() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(99_000), "R$ 990,00");
        assert_eq!(config.format_currency(1_800_000), "R$ 18.000,00");
        assert_eq!(config.format_currency(123_456_789), "R$ 1.234.567,89");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(-330_000), "-R$ 3.300,00");
        assert_eq!(config.format_currency(-50), "-R$ 0,50");
    }

    #[test]
    fn test_tick_interval() {
        let config = ConfigState {
            tick_interval_ms: 250,
            ..ConfigState::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        assert_eq!(ConfigState::default().tick_interval(), Duration::from_secs(1));
    }
}
