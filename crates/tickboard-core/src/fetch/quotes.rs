use std::sync::Arc;

use futures::future::join_all;
use futures::stream::{self, StreamExt};
use log::{debug, info};

use super::Upstream;
use crate::alphavantage::{global_quote_url, normalize_global_quote};
use crate::http_client::HttpClient;
use crate::{DashboardConfig, FetchError, Quote, Symbol};

/// Fetches one `GLOBAL_QUOTE` per symbol and joins them into a batch.
#[derive(Clone)]
pub struct QuoteBatchFetcher {
    upstream: Upstream,
    max_in_flight: Option<usize>,
}

impl QuoteBatchFetcher {
    pub fn new(http_client: Arc<dyn HttpClient>, config: &DashboardConfig) -> Self {
        Self {
            upstream: Upstream::new(http_client, config),
            max_in_flight: config.max_in_flight,
        }
    }

    /// Quote every symbol, index-aligned with `symbols`.
    ///
    /// All requests settle before anything is returned. Provider soft errors
    /// become errored quotes; any transport failure or non-2xx status fails
    /// the whole batch with the first such error in input order.
    pub async fn fetch_quotes(&self, symbols: &[Symbol]) -> Result<Vec<Quote>, FetchError> {
        if symbols.is_empty() {
            return Err(FetchError::EmptyBatch);
        }

        let requests = symbols.iter().map(|symbol| self.fetch_one(symbol));
        let settled = match self.max_in_flight {
            None => join_all(requests).await,
            // `buffered` keeps output order even when responses arrive out of order.
            Some(limit) => stream::iter(requests).buffered(limit).collect::<Vec<_>>().await,
        };

        let quotes = settled.into_iter().collect::<Result<Vec<_>, _>>()?;
        let errored = quotes.iter().filter(|quote| quote.is_error()).count();
        info!(
            "quote batch settled: {} symbols, {} errored",
            quotes.len(),
            errored
        );
        Ok(quotes)
    }

    async fn fetch_one(&self, symbol: &Symbol) -> Result<Quote, FetchError> {
        let url = global_quote_url(&self.upstream.base_url, symbol, &self.upstream.api_key);
        let response = self.upstream.get(symbol, url).await?;
        let quote = normalize_global_quote(symbol, &response.body);
        debug!("{symbol}: quote settled (error={})", quote.is_error());
        Ok(quote)
    }
}
