use std::sync::Arc;

use tickboard_core::{DashboardConfig, HttpClient, Symbol, TimeSeriesFetcher};

use crate::cli::HistoryArgs;
use crate::error::CliError;
use crate::output::{HistoryReport, Report};

use super::CommandResult;

pub async fn run(
    args: &HistoryArgs,
    config: &DashboardConfig,
    http_client: Arc<dyn HttpClient>,
) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let config = match args.window {
        Some(window) => config.clone().with_series_window(window)?,
        None => config.clone(),
    };

    let fetcher = TimeSeriesFetcher::new(http_client, &config);
    let series = fetcher.fetch_time_series(&symbol).await;

    Ok(CommandResult::ok(Report {
        quotes: None,
        history: Some(HistoryReport { series }),
        hint: None,
    }))
}
