//! # Domain Models
//!
//! Typed records produced by the fetch pipelines.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated uppercase ticker |
//! | [`Quote`] | Latest snapshot, or an errored placeholder |
//! | [`TradingDate`] | Calendar day keyed `YYYY-MM-DD` |
//! | [`PricePoint`] | One daily close |
//! | [`TimeSeries`] | Newest closes for one symbol, oldest first |
//!
//! A [`Quote`] is either valid or errored, never something in between:
//!
//! ```rust
//! use tickboard_core::{Quote, Symbol};
//!
//! let symbol = Symbol::parse("aapl")?;
//! let placeholder = Quote::errored(symbol, "");
//! assert!(placeholder.is_error());
//! assert_eq!(placeholder.error_message(), Some("Unable to fetch data"));
//! # Ok::<(), tickboard_core::ValidationError>(())
//! ```

mod date;
mod quote;
mod series;
mod symbol;

pub use date::TradingDate;
pub use quote::{Quote, FALLBACK_ERROR_MESSAGE};
pub use series::{PricePoint, TimeSeries, DEFAULT_SERIES_WINDOW};
pub use symbol::Symbol;
