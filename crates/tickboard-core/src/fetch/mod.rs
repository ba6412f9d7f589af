//! Fetch pipelines: one quote per symbol, and one daily series for the
//! selected symbol.

mod quotes;
mod series;

pub use quotes::QuoteBatchFetcher;
pub use series::TimeSeriesFetcher;

use std::sync::Arc;

use log::debug;

use crate::alphavantage::redact_api_key;
use crate::http_client::{HttpClient, HttpRequest, HttpResponse};
use crate::{DashboardConfig, FetchError, Symbol};

/// Provider connection settings shared by both fetchers.
#[derive(Clone)]
struct Upstream {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    api_key: String,
    timeout_ms: u64,
}

impl Upstream {
    fn new(http_client: Arc<dyn HttpClient>, config: &DashboardConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            timeout_ms: config.timeout_ms,
        }
    }

    /// Issue a GET and require a 2xx status. The body is not inspected.
    async fn get(&self, symbol: &Symbol, url: String) -> Result<HttpResponse, FetchError> {
        debug!("GET {}", redact_api_key(&url));
        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| FetchError::Transport {
                symbol: symbol.to_string(),
                kind: error.kind(),
                message: redact_api_key(error.message()),
            })?;

        if !response.is_success() {
            return Err(FetchError::Status {
                symbol: symbol.to_string(),
                status: response.status,
            });
        }

        Ok(response)
    }
}
