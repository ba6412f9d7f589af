//! Session controller for the dashboard.
//!
//! Owns the view state and the data handed back by the fetchers. Every fetch
//! is tagged with a [`RequestTicket`]; a response is applied only if its
//! ticket is still the newest one issued for that pipeline, so a slow reply
//! to an older request cannot overwrite fresher data.

use log::{debug, warn};

use crate::fetch::{QuoteBatchFetcher, TimeSeriesFetcher};
use crate::view::{project, SortConfig, SortKey, ViewState};
use crate::{FetchError, Quote, Symbol, TimeSeries};

pub const FETCH_FAILED_BANNER: &str = "Failed to fetch stock data. Please try again later.";
pub const NO_MATCHES_MESSAGE: &str = "No matching stocks found";
pub const NO_STOCKS_MESSAGE: &str = "No stocks available";

/// Sequence number attached to an in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Monotonic ticket source for one pipeline.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }
}

#[derive(Debug, Default)]
pub struct Dashboard {
    view: ViewState,
    quotes: Vec<Quote>,
    quotes_loading: bool,
    banner: Option<String>,
    series: Option<TimeSeries>,
    series_loading: bool,
    refreshes: RequestSequence,
    series_requests: RequestSequence,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Current batch in fetch order.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn is_loading_quotes(&self) -> bool {
        self.quotes_loading
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn selected(&self) -> Option<&Symbol> {
        self.view.selected.as_ref()
    }

    /// Series for the selected symbol once it has arrived.
    pub fn series(&self) -> Option<&TimeSeries> {
        self.series.as_ref()
    }

    pub fn is_loading_series(&self) -> bool {
        self.series_loading
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.view.search_term = term.into();
    }

    pub fn request_sort(&mut self, key: SortKey) {
        self.view.sort.request_sort(key);
    }

    pub fn set_sort(&mut self, sort: SortConfig) {
        self.view.sort = sort;
    }

    /// Rows to render right now.
    pub fn visible_quotes(&self) -> Vec<Quote> {
        project(&self.quotes, &self.view.search_term, self.view.sort)
    }

    /// Placeholder text for an empty table.
    pub fn empty_message(&self) -> &'static str {
        if self.view.search_term.is_empty() {
            NO_STOCKS_MESSAGE
        } else {
            NO_MATCHES_MESSAGE
        }
    }

    pub fn begin_refresh(&mut self) -> RequestTicket {
        self.quotes_loading = true;
        self.banner = None;
        self.refreshes.issue()
    }

    /// Apply a batch result. Returns `false` if `ticket` was superseded.
    ///
    /// A successful batch replaces the previous one wholesale; a failed one
    /// leaves it in place and raises the banner.
    pub fn finish_refresh(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<Quote>, FetchError>,
    ) -> bool {
        if !self.refreshes.is_current(ticket) {
            debug!("discarding stale quote batch #{}", ticket.get());
            return false;
        }

        self.quotes_loading = false;
        match result {
            Ok(quotes) => {
                self.quotes = quotes;
                self.banner = None;
            }
            Err(error) => {
                warn!("quote refresh failed: {error}");
                self.banner = Some(String::from(FETCH_FAILED_BANNER));
            }
        }
        true
    }

    /// Change the selection. Returns a ticket for the series fetch to start,
    /// or `None` when `symbol` is already selected.
    pub fn select(&mut self, symbol: Symbol) -> Option<RequestTicket> {
        if self.view.selected.as_ref() == Some(&symbol) {
            return None;
        }

        self.view.selected = Some(symbol);
        self.series = None;
        self.series_loading = true;
        Some(self.series_requests.issue())
    }

    /// Apply a fetched series. Returns `false` if `ticket` was superseded.
    pub fn finish_series(&mut self, ticket: RequestTicket, series: TimeSeries) -> bool {
        if !self.series_requests.is_current(ticket) {
            debug!(
                "discarding stale {} series #{}",
                series.symbol,
                ticket.get()
            );
            return false;
        }

        self.series_loading = false;
        self.series = Some(series);
        true
    }

    /// Fetch `symbols` and apply the result.
    pub async fn refresh(&mut self, fetcher: &QuoteBatchFetcher, symbols: &[Symbol]) -> bool {
        let ticket = self.begin_refresh();
        let result = fetcher.fetch_quotes(symbols).await;
        self.finish_refresh(ticket, result)
    }

    /// Select `symbol` and load its series if the selection changed.
    pub async fn select_and_load(&mut self, fetcher: &TimeSeriesFetcher, symbol: Symbol) -> bool {
        let Some(ticket) = self.select(symbol.clone()) else {
            return false;
        };
        let series = fetcher.fetch_time_series(&symbol).await;
        self.finish_series(ticket, series)
    }
}
