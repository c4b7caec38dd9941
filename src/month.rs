// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month selections and the month range filter.

use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month. `month` is zero based (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "MonthParts")]
pub struct MonthSelection {
    // Field order gives chronological Ord.
    year: i32,
    month: u32,
}

/// Unchecked wire form; deserializing goes through [`MonthSelection::new`].
#[derive(Deserialize)]
struct MonthParts {
    year: i32,
    month: u32,
}

impl TryFrom<MonthParts> for MonthSelection {
    type Error = Error;

    fn try_from(p: MonthParts) -> Result<Self> {
        Self::new(p.month, p.year)
    }
}

impl MonthSelection {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if month > 11 {
            return Err(Error::InvalidMonth(month.to_string()));
        }
        Ok(Self { year, month })
    }

    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    /// Parses `YYYY-MM` (month one based, as written by humans).
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidMonth(s.to_string());
        let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Self::new(month - 1, year)
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month_name(self) -> &'static str {
        MONTH_NAMES[self.month as usize]
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn next(self) -> Self {
        if self.month == 11 {
            Self {
                year: self.year + 1,
                month: 0,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 0 {
            Self {
                year: self.year - 1,
                month: 11,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl fmt::Display for MonthSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month + 1)
    }
}

/// Whether `date` lies in `[first day of start, last day of end]`.
///
/// `show_all_time` admits everything, undated records included. Otherwise an
/// undated record never matches, and an inverted range matches nothing.
pub fn is_in_month_range(
    date: Option<NaiveDate>,
    start: MonthSelection,
    end: MonthSelection,
    show_all_time: bool,
) -> bool {
    if show_all_time {
        return true;
    }
    match date {
        Some(d) => start.first_day() <= d && d <= end.last_day(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(month: u32, year: i32) -> MonthSelection {
        MonthSelection::new(month, year).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, day)
    }

    #[test]
    fn deserializing_checks_the_month() {
        let ok: MonthSelection = serde_json::from_str(r#"{"year":2025,"month":11}"#).unwrap();
        assert_eq!(ok, ym(11, 2025));
        assert_eq!(ok.month_name(), "December");
        assert!(serde_json::from_str::<MonthSelection>(r#"{"year":2025,"month":12}"#).is_err());
    }

    #[test]
    fn bounds_are_inclusive() {
        let jan = ym(0, 2025);
        let mar = ym(2, 2025);
        assert!(is_in_month_range(d(2025, 1, 1), jan, mar, false));
        assert!(is_in_month_range(d(2025, 3, 31), jan, mar, false));
        assert!(!is_in_month_range(d(2024, 12, 31), jan, mar, false));
        assert!(!is_in_month_range(d(2025, 4, 1), jan, mar, false));
    }

    #[test]
    fn leap_february_ends_on_29th() {
        let feb = ym(1, 2024);
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(is_in_month_range(d(2024, 2, 29), feb, feb, false));
        assert_eq!(ym(1, 2025).last_day().day(), 28);
    }

    #[test]
    fn undated_only_passes_all_time() {
        let m = ym(5, 2025);
        assert!(!is_in_month_range(None, m, m, false));
        assert!(is_in_month_range(None, m, m, true));
        assert!(is_in_month_range(d(1999, 1, 1), m, m, true));
    }

    #[test]
    fn inverted_range_is_empty() {
        let start = ym(6, 2025);
        let end = ym(3, 2025);
        for month in 1..=12 {
            assert!(!is_in_month_range(d(2025, month, 15), start, end, false));
        }
    }

    #[test]
    fn december_rolls_over() {
        let dec = ym(11, 2024);
        assert_eq!(dec.next(), ym(0, 2025));
        assert_eq!(ym(0, 2025).prev(), dec);
        assert_eq!(dec.last_day(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn parse_and_display_use_one_based_months() {
        let m = MonthSelection::parse("2025-03").unwrap();
        assert_eq!(m.month(), 2);
        assert_eq!(m.month_name(), "March");
        assert_eq!(m.to_string(), "2025-03");
        assert!(MonthSelection::parse("2025-13").is_err());
        assert!(MonthSelection::parse("2025-00").is_err());
        assert!(MonthSelection::parse("march").is_err());
        assert!(MonthSelection::new(12, 2025).is_err());
    }
}
