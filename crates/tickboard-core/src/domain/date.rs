use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::ValidationError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar trading day, written `YYYY-MM-DD` on the wire.
///
/// Ordering follows the calendar, so series keyed by it sort correctly across
/// month and year boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradingDate(Date);

impl TradingDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidTradingDate {
                value: input.to_owned(),
            })
    }

    pub fn today() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }

    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    /// Short `M/D` axis label used by the history chart.
    pub fn short_label(self) -> String {
        format!("{}/{}", u8::from(self.0.month()), self.0.day())
    }
}

impl Display for TradingDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let formatted = self.0.format(DATE_FORMAT).map_err(|_| std::fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl Serialize for TradingDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TradingDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_calendar_across_year_boundary() {
        let december = TradingDate::parse("2024-12-31").expect("valid");
        let january = TradingDate::parse("2025-01-02").expect("valid");
        assert!(december < january);
    }

    #[test]
    fn displays_zero_padded() {
        let date = TradingDate::parse("2025-03-07").expect("valid");
        assert_eq!(date.to_string(), "2025-03-07");
        assert_eq!(date.short_label(), "3/7");
    }

    #[test]
    fn rejects_non_calendar_values() {
        assert!(TradingDate::parse("2025-02-30").is_err());
        assert!(TradingDate::parse("03/07/2025").is_err());
        assert!(TradingDate::parse("").is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let date = TradingDate::parse("2025-01-15").expect("valid");
        let json = serde_json::to_string(&date).expect("serialize");
        assert_eq!(json, "\"2025-01-15\"");
        let back: TradingDate = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, date);
    }
}
