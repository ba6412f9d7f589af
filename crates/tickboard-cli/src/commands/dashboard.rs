use std::sync::Arc;

use log::info;
use tickboard_core::{
    Dashboard, DashboardConfig, HttpClient, QuoteBatchFetcher, Symbol, TimeSeriesFetcher,
};

use crate::cli::DashboardArgs;
use crate::error::CliError;
use crate::output::{Report, SELECT_HINT};

use super::{history_report, quote_table, CommandResult};

pub async fn run(
    args: &DashboardArgs,
    config: &DashboardConfig,
    http_client: Arc<dyn HttpClient>,
) -> Result<CommandResult, CliError> {
    let selection = args.select.as_deref().map(Symbol::parse).transpose()?;

    let quotes = QuoteBatchFetcher::new(Arc::clone(&http_client), config);
    let series = TimeSeriesFetcher::new(http_client, config);

    let mut dashboard = Dashboard::new();
    dashboard.set_search_term(args.table.search.as_str());
    dashboard.set_sort(args.table.sort_config());
    dashboard.refresh(&quotes, &config.symbols).await;

    if let Some(symbol) = selection {
        if !dashboard.quotes().iter().any(|quote| quote.symbol == symbol) {
            info!("{symbol} is not in the quote table; charting it anyway");
        }
        dashboard.select_and_load(&series, symbol).await;
    }

    let table = quote_table(&dashboard);
    let history = history_report(&dashboard);
    let hint = history.is_none().then_some(SELECT_HINT);

    Ok(CommandResult {
        fetch_failed: table.banner.is_some(),
        report: Report {
            quotes: Some(table),
            history,
            hint,
        },
    })
}
