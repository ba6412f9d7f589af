use std::sync::Arc;

use tickboard_core::{Dashboard, DashboardConfig, HttpClient, QuoteBatchFetcher};

use crate::cli::QuotesArgs;
use crate::error::CliError;
use crate::output::Report;

use super::{parse_symbols, quote_table, CommandResult};

pub async fn run(
    args: &QuotesArgs,
    config: &DashboardConfig,
    http_client: Arc<dyn HttpClient>,
) -> Result<CommandResult, CliError> {
    let symbols = if args.symbols.is_empty() {
        config.symbols.clone()
    } else {
        parse_symbols(&args.symbols)?
    };

    let fetcher = QuoteBatchFetcher::new(http_client, config);
    let mut dashboard = Dashboard::new();
    dashboard.set_search_term(args.table.search.as_str());
    dashboard.set_sort(args.table.sort_config());
    dashboard.refresh(&fetcher, &symbols).await;

    let table = quote_table(&dashboard);
    Ok(CommandResult {
        fetch_failed: table.banner.is_some(),
        report: Report {
            quotes: Some(table),
            history: None,
            hint: None,
        },
    })
}
