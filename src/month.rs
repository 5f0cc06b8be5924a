//! Calendar helpers shared by validation and aggregation.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, Month, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// The only date format accepted for records, e.g. "2025-10-01".
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse a `YYYY-MM-DD` date string, returning `None` if it is malformed.
pub fn parse_date(text: &str) -> Option<Date> {
    Date::parse(text, DATE_FORMAT).ok()
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// A calendar month, e.g. October 2025.
///
/// Orders chronologically and displays as the `YYYY-MM` key used for monthly
/// totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u8,
}

impl YearMonth {
    /// Create a month from a year in 1-9999 and a month number in 1-12.
    pub fn new(year: i32, month: u8) -> Option<Self> {
        if (1..=9999).contains(&year) && (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month that `date` falls in.
    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month().into(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u8 {
        self.month
    }

    /// The `YYYY-MM` prefix that dates in this month start with.
    pub fn prefix(self) -> String {
        self.to_string()
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMonth(s.to_owned());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;

        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;

        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// The date exactly `months` calendar months before `date`.
///
/// The month counter is decremented and borrows from the year, so six months
/// before 2025-10-15 is 2025-04-15 rather than "180 days ago". When the target
/// month is shorter than `date`'s day, the day is clamped to the last day of
/// that month (e.g. one month before 2025-03-31 is 2025-02-28).
pub fn months_before(date: Date, months: u32) -> Date {
    let total = date.year() as i64 * 12 + (u8::from(date.month()) as i64 - 1) - months as i64;
    let year = total.div_euclid(12);
    let month_number = (total.rem_euclid(12) + 1) as u8;

    let Ok(year) = i32::try_from(year) else {
        return Date::MIN;
    };
    let Ok(month) = Month::try_from(month_number) else {
        return Date::MIN;
    };

    (1..=date.day())
        .rev()
        .find_map(|day| Date::from_calendar_date(year, month, day).ok())
        .unwrap_or(Date::MIN)
}
