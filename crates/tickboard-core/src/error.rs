use thiserror::Error;

use crate::http_client::HttpErrorKind;

/// Validation errors raised while building domain values and configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("trading date must be YYYY-MM-DD: '{value}'")]
    InvalidTradingDate { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("config value '{key}' is invalid: {reason}")]
    InvalidConfig { key: &'static str, reason: String },
}

/// Hard failures of a fetch operation.
///
/// Provider-level soft errors (throttling notes, empty payloads) never show up
/// here; they are carried as errored [`Quote`](crate::Quote) records instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("quote batch must include at least one symbol")]
    EmptyBatch,

    #[error("transport error ({kind}) for {symbol}: {message}")]
    Transport {
        symbol: String,
        kind: HttpErrorKind,
        message: String,
    },

    #[error("upstream returned status {status} for {symbol}")]
    Status { symbol: String, status: u16 },
}

impl FetchError {
    /// Symbol whose request failed, when the failure is tied to one.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::EmptyBatch => None,
            Self::Transport { symbol, .. } | Self::Status { symbol, .. } => Some(symbol),
        }
    }
}
