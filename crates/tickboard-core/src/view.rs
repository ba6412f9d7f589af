//! Filtered and sorted projection of the quote table.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{Quote, Symbol};

/// Sortable table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Symbol,
    Price,
    ChangePercent,
}

impl SortKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Symbol => "symbol",
            Self::Price => "price",
            Self::ChangePercent => "change_percent",
        }
    }

    fn compare(self, left: &Quote, right: &Quote) -> Ordering {
        match self {
            Self::Symbol => left.symbol.cmp(&right.symbol),
            Self::Price => compare_values(left.price, right.price),
            Self::ChangePercent => compare_values(left.change_percent, right.change_percent),
        }
    }
}

/// Numeric order where `-0.0 == 0.0`, so equal values keep their input order.
/// Quote values are validated finite, so no NaN reaches here.
fn compare_values(left: f64, right: f64) -> Ordering {
    left.partial_cmp(&right).unwrap_or(Ordering::Equal)
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    const fn arrow(self) -> char {
        match self {
            Self::Ascending => '↑',
            Self::Descending => '↓',
        }
    }
}

/// Active sort column, if any, and its direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortConfig {
    pub const fn by(key: SortKey, direction: SortDirection) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }

    /// Column-header click: the active column flips direction, any other
    /// column starts ascending.
    pub fn request_sort(&mut self, key: SortKey) {
        self.direction = if self.key == Some(key) && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        self.key = Some(key);
    }

    /// Header arrow for `key`, or `None` when another column is active.
    pub fn indicator(&self, key: SortKey) -> Option<char> {
        (self.key == Some(key)).then(|| self.direction.arrow())
    }
}

/// Rows to display for the given search term and sort.
///
/// Sorting is stable, so quotes with equal keys keep their batch order. The
/// filter is a case-insensitive substring match on the symbol.
pub fn project(quotes: &[Quote], filter: &str, sort: SortConfig) -> Vec<Quote> {
    let mut rows = quotes.to_vec();

    if let Some(key) = sort.key {
        rows.sort_by(|left, right| {
            let ordering = key.compare(left, right);
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    if !filter.is_empty() {
        rows.retain(|quote| quote.symbol.contains_ignore_case(filter));
    }

    rows
}

/// Session view state owned by the dashboard controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub search_term: String,
    pub sort: SortConfig,
    pub selected: Option<Symbol>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(symbol: &str, price: f64, change_percent: f64) -> Quote {
        Quote::valid(
            Symbol::parse(symbol).expect("valid"),
            price,
            price,
            0.0,
            change_percent,
            "2025-01-15",
            100,
        )
        .expect("valid quote")
    }

    fn symbols(rows: &[Quote]) -> Vec<&str> {
        rows.iter().map(|q| q.symbol.as_str()).collect()
    }

    fn sample() -> Vec<Quote> {
        vec![
            quote("AAPL", 150.0, 1.2),
            quote("MSFT", 90.0, -0.5),
            quote("GOOGL", 120.0, 0.3),
        ]
    }

    #[test]
    fn price_ascending_orders_cheapest_first() {
        let rows = project(&sample(), "", SortConfig::by(SortKey::Price, SortDirection::Ascending));
        assert_eq!(symbols(&rows), vec!["MSFT", "GOOGL", "AAPL"]);
    }

    #[test]
    fn change_percent_descending_puts_losers_last() {
        let rows = project(
            &sample(),
            "",
            SortConfig::by(SortKey::ChangePercent, SortDirection::Descending),
        );
        assert_eq!(symbols(&rows), vec!["AAPL", "GOOGL", "MSFT"]);
    }

    #[test]
    fn negative_zero_ties_with_zero_and_keeps_input_order() {
        let rows = vec![
            quote("AAPL", 10.0, 0.0),
            quote("IBM", 20.0, -0.0),
            Quote::errored(Symbol::parse("AMZN").expect("valid"), ""),
        ];

        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let sorted = project(&rows, "", SortConfig::by(SortKey::ChangePercent, direction));
            assert_eq!(symbols(&sorted), vec!["AAPL", "IBM", "AMZN"]);
        }
    }

    #[test]
    fn symbol_sort_is_lexicographic() {
        let rows = project(&sample(), "", SortConfig::by(SortKey::Symbol, SortDirection::Ascending));
        assert_eq!(symbols(&rows), vec!["AAPL", "GOOGL", "MSFT"]);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let rows = project(&sample(), "ap", SortConfig::default());
        assert_eq!(symbols(&rows), vec!["AAPL"]);
        assert!(project(&sample(), "xyz", SortConfig::default()).is_empty());
    }

    #[test]
    fn no_sort_and_no_filter_is_identity() {
        let input = sample();
        assert_eq!(project(&input, "", SortConfig::default()), input);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let input = vec![
            quote("AMZN", 100.0, 0.0),
            quote("META", 100.0, 0.0),
            quote("IBM", 50.0, 0.0),
            quote("NVDA", 100.0, 0.0),
        ];
        let rows = project(&input, "", SortConfig::by(SortKey::Price, SortDirection::Descending));
        assert_eq!(symbols(&rows), vec!["AMZN", "META", "NVDA", "IBM"]);
    }

    #[test]
    fn request_sort_toggles_on_same_key_and_resets_on_new_key() {
        let mut sort = SortConfig::default();
        sort.request_sort(SortKey::Price);
        assert_eq!(sort, SortConfig::by(SortKey::Price, SortDirection::Ascending));
        sort.request_sort(SortKey::Price);
        assert_eq!(sort.direction, SortDirection::Descending);
        sort.request_sort(SortKey::Symbol);
        assert_eq!(sort, SortConfig::by(SortKey::Symbol, SortDirection::Ascending));
    }

    #[test]
    fn double_toggle_restores_ascending_order() {
        let mut sort = SortConfig::default();
        sort.request_sort(SortKey::Price);
        let first = project(&sample(), "", sort);
        sort.request_sort(SortKey::Price);
        sort.request_sort(SortKey::Price);
        assert_eq!(sort.direction, SortDirection::Ascending);
        assert_eq!(project(&sample(), "", sort), first);
    }

    #[test]
    fn indicator_only_marks_active_column() {
        let mut sort = SortConfig::default();
        assert_eq!(sort.indicator(SortKey::Price), None);
        sort.request_sort(SortKey::Price);
        assert_eq!(sort.indicator(SortKey::Price), Some('↑'));
        assert_eq!(sort.indicator(SortKey::Symbol), None);
        sort.request_sort(SortKey::Price);
        assert_eq!(sort.indicator(SortKey::Price), Some('↓'));
    }
}
