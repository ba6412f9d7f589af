//! Scripted transport shared by the behavior tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use time::{Date, Month};
use tickboard_core::{HttpClient, HttpError, HttpRequest, HttpResponse};

#[derive(Debug, Clone)]
enum Reply {
    Respond(HttpResponse),
    Fail(HttpError),
}

#[derive(Debug, Clone)]
struct Route {
    reply: Reply,
    delay: Duration,
}

/// Answers by the `symbol=` query parameter and records every request.
#[derive(Debug, Default)]
pub struct ScriptedHttpClient {
    routes: HashMap<String, Route>,
    requests: Mutex<Vec<HttpRequest>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, symbol: &str, body: impl Into<String>) -> Self {
        self.respond_after(symbol, body, Duration::ZERO)
    }

    pub fn respond_after(mut self, symbol: &str, body: impl Into<String>, delay: Duration) -> Self {
        self.routes.insert(
            symbol.to_owned(),
            Route {
                reply: Reply::Respond(HttpResponse::ok_json(body)),
                delay,
            },
        );
        self
    }

    pub fn status(mut self, symbol: &str, status: u16) -> Self {
        self.routes.insert(
            symbol.to_owned(),
            Route {
                reply: Reply::Respond(HttpResponse::with_status(status, "")),
                delay: Duration::ZERO,
            },
        );
        self
    }

    pub fn fail(mut self, symbol: &str, message: &str) -> Self {
        self.routes.insert(
            symbol.to_owned(),
            Route {
                reply: Reply::Fail(HttpError::connect(message)),
                delay: Duration::ZERO,
            },
        );
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request log should not be poisoned")
            .clone()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let route = symbol_param(&request.url).and_then(|symbol| self.routes.get(symbol).cloned());
        self.requests
            .lock()
            .expect("request log should not be poisoned")
            .push(request);

        Box::pin(async move {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

            let route = route.unwrap_or(Route {
                reply: Reply::Respond(HttpResponse::ok_json("{}")),
                delay: Duration::ZERO,
            });
            if !route.delay.is_zero() {
                tokio::time::sleep(route.delay).await;
            }

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            match route.reply {
                Reply::Respond(response) => Ok(response),
                Reply::Fail(error) => Err(error),
            }
        })
    }
}

fn symbol_param(url: &str) -> Option<&str> {
    let start = url.find("symbol=")? + "symbol=".len();
    let rest = &url[start..];
    Some(rest.split('&').next().unwrap_or(rest))
}

pub fn global_quote_body(symbol: &str, price: f64, change_percent: f64) -> String {
    let previous = price - 1.0;
    serde_json::json!({
        "Global Quote": {
            "01. symbol": symbol,
            "02. open": format!("{previous:.4}"),
            "05. price": format!("{price:.4}"),
            "06. volume": "1200300",
            "07. latest trading day": "2025-01-15",
            "08. previous close": format!("{previous:.4}"),
            "09. change": "1.0000",
            "10. change percent": format!("{change_percent:.4}%"),
        }
    })
    .to_string()
}

pub const THROTTLE_NOTE: &str = "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute and 500 calls per day.";

pub fn throttle_body() -> String {
    serde_json::json!({ "Note": THROTTLE_NOTE }).to_string()
}

/// `days` consecutive calendar days starting at `start`. Close on day `i` is
/// `100 + i`.
pub fn daily_series_body(start: Date, days: usize) -> String {
    let mut series = serde_json::Map::new();
    let mut date = start;
    for index in 0..days {
        series.insert(
            format_date(date),
            serde_json::json!({
                "1. open": "1.0",
                "4. close": format!("{:.2}", 100.0 + index as f64),
                "5. volume": "1000",
            }),
        );
        date = date.next_day().expect("test dates stay in range");
    }
    serde_json::json!({
        "Meta Data": { "1. Information": "Daily Prices" },
        "Time Series (Daily)": series,
    })
    .to_string()
}

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("valid test date")
}

fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}
