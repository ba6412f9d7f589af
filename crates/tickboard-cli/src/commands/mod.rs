mod dashboard;
mod history;
mod quotes;

use std::sync::Arc;

use time::OffsetDateTime;
use tickboard_core::{Dashboard, DashboardConfig, HttpClient, ReqwestHttpClient, Symbol};

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output::{last_updated_label, HistoryReport, QuoteTable, Report};

pub struct CommandResult {
    pub report: Report,
    pub fetch_failed: bool,
}

impl CommandResult {
    fn ok(report: Report) -> Self {
        Self {
            report,
            fetch_failed: false,
        }
    }
}

pub async fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    let config = build_config(cli)?;
    let http_client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());

    match &cli.command {
        Command::Quotes(args) => quotes::run(args, &config, http_client).await,
        Command::History(args) => history::run(args, &config, http_client).await,
        Command::Dashboard(args) => dashboard::run(args, &config, http_client).await,
    }
}

/// Environment first, then any global flags on top.
fn build_config(cli: &Cli) -> Result<DashboardConfig, CliError> {
    let mut config = DashboardConfig::from_env()?;
    if let Some(api_key) = &cli.api_key {
        config = config.with_api_key(api_key.as_str());
    }
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.as_str())?;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms)?;
    }
    if cli.max_in_flight.is_some() {
        config = config.with_max_in_flight(cli.max_in_flight)?;
    }
    Ok(config)
}

fn parse_symbols(raw: &[String]) -> Result<Vec<Symbol>, CliError> {
    raw.iter()
        .map(|value| Symbol::parse(value).map_err(CliError::from))
        .collect()
}

/// Snapshot of the quote side of a session, ready for rendering.
fn quote_table(dashboard: &Dashboard) -> QuoteTable {
    let rows = dashboard.visible_quotes();
    let empty_message = rows.is_empty().then(|| dashboard.empty_message());
    QuoteTable {
        rows,
        sort: dashboard.view().sort,
        empty_message,
        banner: dashboard.banner().map(String::from),
        last_updated: last_updated_label(OffsetDateTime::now_utc()),
    }
}

fn history_report(dashboard: &Dashboard) -> Option<HistoryReport> {
    dashboard.series().map(|series| HistoryReport {
        series: series.clone(),
    })
}
