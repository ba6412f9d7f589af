use std::sync::Arc;

use log::{info, warn};

use super::Upstream;
use crate::alphavantage::{daily_series_url, normalize_daily_series};
use crate::http_client::HttpClient;
use crate::{DashboardConfig, Symbol, TimeSeries};

/// Fetches the compact daily series for one symbol.
#[derive(Clone)]
pub struct TimeSeriesFetcher {
    upstream: Upstream,
    window: usize,
}

impl TimeSeriesFetcher {
    pub fn new(http_client: Arc<dyn HttpClient>, config: &DashboardConfig) -> Self {
        Self {
            upstream: Upstream::new(http_client, config),
            window: config.series_window,
        }
    }

    /// Newest closes for `symbol`, oldest first.
    ///
    /// Never fails: transport errors, bad statuses, throttling notes and
    /// malformed bodies all yield an empty series.
    pub async fn fetch_time_series(&self, symbol: &Symbol) -> TimeSeries {
        let url = daily_series_url(&self.upstream.base_url, symbol, &self.upstream.api_key);
        let response = match self.upstream.get(symbol, url).await {
            Ok(response) => response,
            Err(error) => {
                warn!("{symbol}: series request failed: {error}");
                return TimeSeries::empty(symbol.clone());
            }
        };

        match normalize_daily_series(symbol, &response.body, self.window) {
            Some(series) => {
                info!("{symbol}: loaded {} daily closes", series.len());
                series
            }
            None => {
                warn!("{symbol}: no usable daily series in response");
                TimeSeries::empty(symbol.clone())
            }
        }
    }
}
