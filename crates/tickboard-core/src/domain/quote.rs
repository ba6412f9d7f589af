use serde::{Deserialize, Serialize};

use crate::{Symbol, TradingDate, ValidationError};

/// Message used when an errored payload carries no provider text.
pub const FALLBACK_ERROR_MESSAGE: &str = "Unable to fetch data";

/// Latest snapshot of one symbol, or a placeholder for a symbol the provider
/// could not quote.
///
/// Build with [`Quote::valid`] or [`Quote::errored`]; the two constructors keep
/// the record in exactly one of those two shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: Symbol,
    pub price: f64,
    pub previous_price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub last_updated: String,
    pub volume: u64,
    #[serde(default)]
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Quote {
    pub fn valid(
        symbol: Symbol,
        price: f64,
        previous_price: f64,
        change: f64,
        change_percent: f64,
        last_updated: impl Into<String>,
        volume: u64,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("price", price)?;
        validate_non_negative("previous_price", previous_price)?;
        validate_finite("change", change)?;
        validate_finite("change_percent", change_percent)?;

        Ok(Self {
            symbol,
            price,
            previous_price,
            change,
            change_percent,
            last_updated: last_updated.into(),
            volume,
            error: false,
            error_message: None,
        })
    }

    /// Placeholder for a symbol with no usable quote, stamped with today's date.
    pub fn errored(symbol: Symbol, message: impl Into<String>) -> Self {
        Self::errored_on(symbol, message, TradingDate::today())
    }

    pub fn errored_on(symbol: Symbol, message: impl Into<String>, as_of: TradingDate) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            String::from(FALLBACK_ERROR_MESSAGE)
        } else {
            message
        };

        Self {
            symbol,
            price: 0.0,
            previous_price: 0.0,
            change: 0.0,
            change_percent: 0.0,
            last_updated: as_of.to_string(),
            volume: 0,
            error: true,
            error_message: Some(message),
        }
    }

    pub const fn is_error(&self) -> bool {
        self.error
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFiniteValue { field })
    }
}

pub(crate) fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    validate_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
