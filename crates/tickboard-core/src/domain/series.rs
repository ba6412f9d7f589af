use serde::{Deserialize, Serialize};

use super::quote::validate_non_negative;
use crate::{Symbol, TradingDate, ValidationError};

/// Number of trading days kept for the history chart.
pub const DEFAULT_SERIES_WINDOW: usize = 30;

/// Closing price for one trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: TradingDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: TradingDate, price: f64) -> Result<Self, ValidationError> {
        validate_non_negative("price", price)?;
        Ok(Self { date, price })
    }
}

/// Most recent daily closes for a symbol, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub symbol: Symbol,
    pub points: Vec<PricePoint>,
}

impl TimeSeries {
    pub fn empty(symbol: Symbol) -> Self {
        Self {
            symbol,
            points: Vec::new(),
        }
    }

    /// Sort `points` by calendar date and keep only the newest `window` of them.
    ///
    /// The sort is stable, so two points on the same day keep their input order.
    pub fn from_points(symbol: Symbol, mut points: Vec<PricePoint>, window: usize) -> Self {
        points.sort_by_key(|point| point.date);
        if points.len() > window {
            points = points.split_off(points.len() - window);
        }
        Self { symbol, points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Lowest and highest close, used to scale the chart axis.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |range, point| match range {
            None => Some((point.price, point.price)),
            Some((low, high)) => Some((low.min(point.price), high.max(point.price))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, price: f64) -> PricePoint {
        PricePoint::new(TradingDate::parse(date).expect("valid date"), price).expect("valid point")
    }

    fn msft() -> Symbol {
        Symbol::parse("MSFT").expect("valid")
    }

    #[test]
    fn keeps_newest_window_in_ascending_order() {
        let points = vec![
            point("2025-01-03", 3.0),
            point("2024-12-31", 1.0),
            point("2025-01-02", 2.0),
        ];
        let series = TimeSeries::from_points(msft(), points, 2);
        let dates = series
            .points
            .iter()
            .map(|p| p.date.to_string())
            .collect::<Vec<_>>();
        assert_eq!(dates, vec!["2025-01-02", "2025-01-03"]);
    }

    #[test]
    fn short_input_is_kept_whole() {
        let series = TimeSeries::from_points(msft(), vec![point("2025-01-02", 2.0)], 30);
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn price_range_spans_all_points() {
        let series = TimeSeries::from_points(
            msft(),
            vec![point("2025-01-02", 2.0), point("2025-01-03", 5.5), point("2025-01-06", 1.25)],
            30,
        );
        assert_eq!(series.price_range(), Some((1.25, 5.5)));
        assert_eq!(TimeSeries::empty(msft()).price_range(), None);
    }

    #[test]
    fn rejects_negative_close() {
        let date = TradingDate::parse("2025-01-02").expect("valid");
        assert!(PricePoint::new(date, -0.01).is_err());
    }
}
