//! Runtime configuration for the dashboard pipelines.
//!
//! Values come from the environment, then CLI flags override them through the
//! `with_*` builders.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TICKBOARD_ALPHAVANTAGE_API_KEY` | `demo` |
//! | `TICKBOARD_BASE_URL` | `https://www.alphavantage.co/query` |
//! | `TICKBOARD_SYMBOLS` | `AAPL,MSFT,GOOGL,AMZN,META` |
//! | `TICKBOARD_TIMEOUT_MS` | `10000` |

use std::env;

use crate::alphavantage::DEFAULT_BASE_URL;
use crate::domain::DEFAULT_SERIES_WINDOW;
use crate::http_client::DEFAULT_TIMEOUT_MS;
use crate::{Symbol, ValidationError};

pub const API_KEY_VAR: &str = "TICKBOARD_ALPHAVANTAGE_API_KEY";
pub const BASE_URL_VAR: &str = "TICKBOARD_BASE_URL";
pub const SYMBOLS_VAR: &str = "TICKBOARD_SYMBOLS";
pub const TIMEOUT_MS_VAR: &str = "TICKBOARD_TIMEOUT_MS";

pub const DEFAULT_SYMBOLS: [&str; 5] = ["AAPL", "MSFT", "GOOGL", "AMZN", "META"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub api_key: String,
    pub base_url: String,
    pub symbols: Vec<Symbol>,
    pub timeout_ms: u64,
    pub series_window: usize,
    /// Cap on concurrent quote requests; `None` fans out to every symbol at once.
    pub max_in_flight: Option<usize>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_key: String::from("demo"),
            base_url: String::from(DEFAULT_BASE_URL),
            symbols: default_symbols(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            series_window: DEFAULT_SERIES_WINDOW,
            max_in_flight: None,
        }
    }
}

impl DashboardConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(api_key) = lookup(API_KEY_VAR).filter(|value| !value.trim().is_empty()) {
            config.api_key = api_key.trim().to_owned();
        }
        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|value| !value.trim().is_empty()) {
            config = config.with_base_url(base_url)?;
        }
        if let Some(symbols) = lookup(SYMBOLS_VAR) {
            config.symbols = parse_symbol_list(&symbols)?;
        }
        if let Some(timeout) = lookup(TIMEOUT_MS_VAR) {
            let timeout_ms = timeout.trim().parse::<u64>().map_err(|_| invalid(
                TIMEOUT_MS_VAR,
                format!("expected milliseconds, got '{timeout}'"),
            ))?;
            config = config.with_timeout_ms(timeout_ms)?;
        }

        Ok(config)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ValidationError> {
        let base_url = base_url.into();
        let base_url = base_url.trim().trim_end_matches('?');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(invalid("base_url", format!("'{base_url}' is not an http(s) URL")));
        }
        self.base_url = base_url.to_owned();
        Ok(self)
    }

    pub fn with_symbols(mut self, symbols: Vec<Symbol>) -> Result<Self, ValidationError> {
        if symbols.is_empty() {
            return Err(invalid("symbols", String::from("at least one symbol is required")));
        }
        self.symbols = symbols;
        Ok(self)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Result<Self, ValidationError> {
        if timeout_ms == 0 {
            return Err(invalid("timeout_ms", String::from("must be greater than zero")));
        }
        self.timeout_ms = timeout_ms;
        Ok(self)
    }

    pub fn with_series_window(mut self, window: usize) -> Result<Self, ValidationError> {
        if window == 0 {
            return Err(invalid("series_window", String::from("must be greater than zero")));
        }
        self.series_window = window;
        Ok(self)
    }

    pub fn with_max_in_flight(mut self, limit: Option<usize>) -> Result<Self, ValidationError> {
        if limit == Some(0) {
            return Err(invalid("max_in_flight", String::from("must be greater than zero")));
        }
        self.max_in_flight = limit;
        Ok(self)
    }
}

/// Split a comma/whitespace separated list such as `"aapl, msft"`.
pub fn parse_symbol_list(raw: &str) -> Result<Vec<Symbol>, ValidationError> {
    let symbols = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(Symbol::parse)
        .collect::<Result<Vec<_>, _>>()?;

    if symbols.is_empty() {
        return Err(invalid(SYMBOLS_VAR, String::from("no symbols listed")));
    }
    Ok(symbols)
}

fn default_symbols() -> Vec<Symbol> {
    DEFAULT_SYMBOLS
        .iter()
        .filter_map(|raw| Symbol::parse(raw).ok())
        .collect()
}

fn invalid(key: &'static str, reason: String) -> ValidationError {
    ValidationError::InvalidConfig { key, reason }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_cover_the_five_dashboard_symbols() {
        let config = DashboardConfig::from_lookup(|_| None).expect("defaults are valid");
        let symbols = config
            .symbols
            .iter()
            .map(Symbol::as_str)
            .collect::<Vec<_>>();
        assert_eq!(symbols, DEFAULT_SYMBOLS);
        assert_eq!(config.api_key, "demo");
        assert_eq!(config.series_window, 30);
        assert_eq!(config.max_in_flight, None);
    }

    #[test]
    fn environment_overrides_are_applied() {
        let config = DashboardConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, " secret "),
            (BASE_URL_VAR, "http://localhost:8080/query?"),
            (SYMBOLS_VAR, "nvda, tsla\nibm"),
            (TIMEOUT_MS_VAR, "2500"),
        ]))
        .expect("valid overrides");

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url, "http://localhost:8080/query");
        assert_eq!(config.symbols.len(), 3);
        assert_eq!(config.symbols[2].as_str(), "IBM");
        assert_eq!(config.timeout_ms, 2500);
    }

    #[test]
    fn bad_timeout_is_reported_by_variable_name() {
        let err = DashboardConfig::from_lookup(lookup_from(&[(TIMEOUT_MS_VAR, "soon")]))
            .expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::InvalidConfig { key: TIMEOUT_MS_VAR, .. }
        ));
    }

    #[test]
    fn empty_symbol_list_is_rejected() {
        assert!(parse_symbol_list(" , ").is_err());
        assert!(DashboardConfig::default().with_symbols(Vec::new()).is_err());
    }

    #[test]
    fn zero_limits_are_rejected() {
        let config = DashboardConfig::default();
        assert!(config.clone().with_series_window(0).is_err());
        assert!(config.clone().with_max_in_flight(Some(0)).is_err());
        assert!(config.with_max_in_flight(Some(2)).is_ok());
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        assert!(DashboardConfig::default().with_base_url("ftp://example.test").is_err());
    }
}
