//! # Tickboard Core
//!
//! Data pipeline behind the tickboard stock dashboard.
//!
//! ## Overview
//!
//! - **Quote batches**: one Alpha Vantage `GLOBAL_QUOTE` request per symbol,
//!   joined into an index-aligned [`Quote`] list
//! - **Daily history**: the newest closes for one symbol as a [`TimeSeries`]
//! - **Table view**: pure search and sort over the current batch
//! - **Session controller**: view state plus sequence-tagged requests
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`alphavantage`] | Endpoint URLs and payload normalization |
//! | [`config`] | Environment-driven configuration |
//! | [`dashboard`] | Session controller |
//! | [`domain`] | Symbols, quotes, dates, price series |
//! | [`error`] | Validation and fetch errors |
//! | [`fetch`] | Quote batch and time-series fetchers |
//! | [`http_client`] | HTTP transport seam |
//! | [`view`] | Table projection and sort state |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickboard_core::{DashboardConfig, QuoteBatchFetcher, ReqwestHttpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DashboardConfig::from_env()?;
//!     let fetcher = QuoteBatchFetcher::new(Arc::new(ReqwestHttpClient::new()), &config);
//!
//!     for quote in fetcher.fetch_quotes(&config.symbols).await? {
//!         match quote.error_message() {
//!             Some(message) => println!("{}: {message}", quote.symbol),
//!             None => println!("{}: ${:.2}", quote.symbol, quote.price),
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Only transport failures of a quote batch surface as [`FetchError`].
//! Throttling notes and malformed payloads become errored quotes, and the
//! time-series fetcher degrades every failure to an empty series.

pub mod alphavantage;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod http_client;
pub mod view;

pub use config::DashboardConfig;
pub use dashboard::{Dashboard, RequestSequence, RequestTicket};
pub use domain::{PricePoint, Quote, Symbol, TimeSeries, TradingDate};
pub use error::{FetchError, ValidationError};
pub use fetch::{QuoteBatchFetcher, TimeSeriesFetcher};
pub use http_client::{
    HttpClient, HttpError, HttpErrorKind, HttpRequest, HttpResponse, ReqwestHttpClient,
};
pub use view::{project, SortConfig, SortDirection, SortKey, ViewState};
