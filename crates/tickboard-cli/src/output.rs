//! Rendering of command results as plain text or JSON.

use std::io::{self, Write};

use serde::Serialize;
use time::macros::format_description;
use time::OffsetDateTime;
use tickboard_core::{Quote, SortConfig, SortKey, TimeSeries};

use crate::cli::OutputFormat;
use crate::error::CliError;

pub const SELECT_HINT: &str = "Select a stock to view its price history";

const ERROR_PRICE: &str = "Error";
const ERROR_CHANGE: &str = "API Limit";
const BAR_WIDTH: usize = 40;

#[derive(Debug, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quotes: Option<QuoteTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<HistoryReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct QuoteTable {
    pub rows: Vec<Quote>,
    pub sort: SortConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    pub last_updated: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryReport {
    pub series: TimeSeries,
}

pub fn render(report: &Report, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => {
            let json = if pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            };
            writeln!(out, "{json}")?;
        }
        OutputFormat::Table => write_text(&mut out, report)?,
    }
    out.flush()?;
    Ok(())
}

fn write_text(out: &mut impl Write, report: &Report) -> io::Result<()> {
    if let Some(table) = &report.quotes {
        write_quote_table(out, table)?;
    }
    if let Some(history) = &report.history {
        if report.quotes.is_some() {
            writeln!(out)?;
        }
        write_history(out, &history.series)?;
    }
    if let Some(hint) = report.hint {
        writeln!(out)?;
        writeln!(out, "{hint}")?;
    }
    Ok(())
}

fn write_quote_table(out: &mut impl Write, table: &QuoteTable) -> io::Result<()> {
    if let Some(banner) = &table.banner {
        writeln!(out, "! {banner}")?;
        writeln!(out)?;
    }

    writeln!(
        out,
        "{:<10} {:>12} {:>12}",
        header("Symbol", SortKey::Symbol, table.sort),
        header("Price", SortKey::Price, table.sort),
        header("Change %", SortKey::ChangePercent, table.sort),
    )?;

    if let Some(message) = table.empty_message {
        writeln!(out, "{message}")?;
    }

    for quote in &table.rows {
        let (price, change) = if quote.is_error() {
            (String::from(ERROR_PRICE), String::from(ERROR_CHANGE))
        } else {
            (format!("${:.2}", quote.price), signed_percent(quote.change_percent))
        };
        writeln!(out, "{:<10} {:>12} {:>12}", quote.symbol, price, change)?;
    }

    let errors = table
        .rows
        .iter()
        .filter_map(|quote| quote.error_message().map(|message| (&quote.symbol, message)))
        .collect::<Vec<_>>();
    if !errors.is_empty() {
        writeln!(out)?;
        for (symbol, message) in errors {
            writeln!(out, "{symbol}: {message}")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Last updated: {}", table.last_updated)?;
    Ok(())
}

/// Footer timestamp for the quote table, e.g. `2025-01-15 14:30:05 UTC`.
pub fn last_updated_label(now: OffsetDateTime) -> String {
    now.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second] UTC"
    ))
    .unwrap_or_else(|_| now.date().to_string())
}

fn header(label: &str, key: SortKey, sort: SortConfig) -> String {
    match sort.indicator(key) {
        Some(arrow) => format!("{label} {arrow}"),
        None => String::from(label),
    }
}

fn signed_percent(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.2}%", value.abs())
    } else {
        format!("{value:.2}%")
    }
}

fn write_history(out: &mut impl Write, series: &TimeSeries) -> io::Result<()> {
    let Some((low, high)) = series.price_range() else {
        writeln!(out, "No price history available for {}", series.symbol)?;
        return Ok(());
    };

    writeln!(
        out,
        "{} price history ({} trading days)",
        series.symbol,
        series.len()
    )?;
    for point in &series.points {
        writeln!(
            out,
            "{:>5}  {:>10}  {}",
            point.date.short_label(),
            format!("${:.2}", point.price),
            "#".repeat(bar_length(point.price, low, high))
        )?;
    }
    Ok(())
}

/// Bar length for `price` on a scale from `low` (1 cell) to `high` (full width).
fn bar_length(price: f64, low: f64, high: f64) -> usize {
    let spread = high - low;
    if spread <= 0.0 {
        return BAR_WIDTH;
    }
    let scaled = (price - low) / spread * (BAR_WIDTH - 1) as f64;
    1 + scaled.round().clamp(0.0, (BAR_WIDTH - 1) as f64) as usize
}
