//! Alpha Vantage endpoint URLs and payload normalization.
//!
//! The provider answers throttled or unknown-symbol requests with HTTP 200 and
//! a body like `{"Note": "..."}` or `{"Information": "..."}`. Those bodies are
//! soft errors: they become errored [`Quote`]s or an empty series here and never
//! reach the caller as failures.

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::Deserialize;

use crate::domain::FALLBACK_ERROR_MESSAGE;
use crate::{PricePoint, Quote, Symbol, TimeSeries, TradingDate};

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

const API_KEY_PARAM: &str = "apikey=";

pub fn global_quote_url(base_url: &str, symbol: &Symbol, api_key: &str) -> String {
    format!(
        "{base_url}?function=GLOBAL_QUOTE&symbol={}&apikey={}",
        urlencoding::encode(symbol.as_str()),
        urlencoding::encode(api_key)
    )
}

pub fn daily_series_url(base_url: &str, symbol: &Symbol, api_key: &str) -> String {
    format!(
        "{base_url}?function=TIME_SERIES_DAILY&symbol={}&outputsize=compact&apikey={}",
        urlencoding::encode(symbol.as_str()),
        urlencoding::encode(api_key)
    )
}

/// Copy of `text` safe to write to logs: every `apikey=` value is masked.
///
/// Works on bare URLs and on error messages that embed one.
pub fn redact_api_key(text: &str) -> String {
    let mut redacted = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(API_KEY_PARAM) {
        let value_start = start + API_KEY_PARAM.len();
        let value_end = rest[value_start..]
            .find(|c: char| c == '&' || c == ')' || c == '"' || c.is_whitespace())
            .map_or(rest.len(), |offset| value_start + offset);
        redacted.push_str(&rest[..value_start]);
        redacted.push_str("***");
        rest = &rest[value_end..];
    }
    redacted.push_str(rest);
    redacted
}

#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote", default)]
    quote: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(rename = "Note", default)]
    note: Option<String>,
    #[serde(rename = "Information", default)]
    information: Option<String>,
    #[serde(rename = "Error Message", default)]
    error_message: Option<String>,
}

impl GlobalQuoteResponse {
    fn provider_message(&self) -> Option<&str> {
        [&self.note, &self.information, &self.error_message]
            .into_iter()
            .filter_map(|message| message.as_deref())
            .find(|message| !message.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct GlobalQuoteFields {
    #[serde(rename = "01. symbol")]
    symbol: String,
    #[serde(rename = "05. price")]
    price: String,
    #[serde(rename = "06. volume")]
    volume: String,
    #[serde(rename = "07. latest trading day")]
    latest_trading_day: String,
    #[serde(rename = "08. previous close")]
    previous_close: String,
    #[serde(rename = "09. change")]
    change: String,
    #[serde(rename = "10. change percent")]
    change_percent: String,
}

impl GlobalQuoteFields {
    fn into_quote(self) -> Result<Quote, String> {
        let symbol = Symbol::parse(&self.symbol).map_err(|e| e.to_string())?;
        let price = parse_decimal("05. price", &self.price)?;
        let previous_close = parse_decimal("08. previous close", &self.previous_close)?;
        let change = parse_decimal("09. change", &self.change)?;
        let change_percent = parse_percent(&self.change_percent)?;
        let volume = self
            .volume
            .trim()
            .parse::<u64>()
            .map_err(|_| format!("field '06. volume' is not an integer: '{}'", self.volume))?;

        Quote::valid(
            symbol,
            price,
            previous_close,
            change,
            change_percent,
            self.latest_trading_day,
            volume,
        )
        .map_err(|e| e.to_string())
    }
}

/// Map one `GLOBAL_QUOTE` body to a quote for `requested`.
///
/// Anything short of a complete quote object yields an errored quote keyed by
/// the requested symbol, since error bodies do not echo the symbol back.
pub fn normalize_global_quote(requested: &Symbol, body: &str) -> Quote {
    let response: GlobalQuoteResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(e) => {
            warn!("{requested}: unreadable quote payload: {e}");
            return Quote::errored(requested.clone(), FALLBACK_ERROR_MESSAGE);
        }
    };

    let message = response
        .provider_message()
        .unwrap_or(FALLBACK_ERROR_MESSAGE)
        .to_owned();

    let fields = match response.quote {
        Some(quote) if !quote.is_empty() => quote,
        _ => {
            warn!("{requested}: no quote in payload: {message}");
            return Quote::errored(requested.clone(), message);
        }
    };

    match serde_json::from_value::<GlobalQuoteFields>(serde_json::Value::Object(fields))
        .map_err(|e| e.to_string())
        .and_then(GlobalQuoteFields::into_quote)
    {
        Ok(quote) => quote,
        Err(reason) => {
            warn!("{requested}: malformed quote object: {reason}");
            Quote::errored(requested.clone(), message)
        }
    }
}

#[derive(Debug, Deserialize)]
struct DailySeriesResponse {
    #[serde(rename = "Time Series (Daily)", default)]
    series: Option<BTreeMap<String, DailyRecord>>,
}

#[derive(Debug, Deserialize)]
struct DailyRecord {
    #[serde(rename = "4. close", default)]
    close: Option<String>,
}

/// Map a `TIME_SERIES_DAILY` body to the newest `window` closes.
///
/// Returns `None` when the body carries no usable series.
pub fn normalize_daily_series(symbol: &Symbol, body: &str, window: usize) -> Option<TimeSeries> {
    let response: DailySeriesResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(e) => {
            debug!("{symbol}: unreadable series payload: {e}");
            return None;
        }
    };

    let records = response.series?;
    let points = records
        .into_iter()
        .filter_map(|(date, record)| {
            let point = TradingDate::parse(&date).ok().and_then(|date| {
                let close = record.close.as_deref()?.trim().parse::<f64>().ok()?;
                PricePoint::new(date, close).ok()
            });
            if point.is_none() {
                debug!("{symbol}: skipping unusable series entry for '{date}'");
            }
            point
        })
        .collect::<Vec<_>>();

    Some(TimeSeries::from_points(symbol.clone(), points, window))
}

fn parse_decimal(field: &str, text: &str) -> Result<f64, String> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        // Fold -0.0 into 0.0.
        .map(|value| if value == 0.0 { 0.0 } else { value })
        .ok_or_else(|| format!("field '{field}' is not numeric: '{text}'"))
}

/// `"-0.50%"` -> `-0.5`.
pub fn parse_percent(text: &str) -> Result<f64, String> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed);
    parse_decimal("10. change percent", number)
}
