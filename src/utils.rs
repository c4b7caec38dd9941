// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::models::Currency;

const UA: &str = concat!("fintrack/", env!("CARGO_PKG_VERSION"));

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_time(s: &str) -> Result<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .with_context(|| format!("Invalid time '{}', expected HH:MM", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: Decimal, ccy: Currency) -> String {
    format!("{}{:.2}", ccy.symbol(), d.round_dp(2))
}

/// `dd/mm/yyyy hh:mm`, or just the date when no time was recorded.
pub fn fmt_date_time(date: Option<NaiveDate>, time: Option<NaiveTime>) -> String {
    match (date, time) {
        (Some(d), Some(t)) => format!("{} {}", d.format("%d/%m/%Y"), t.format("%H:%M")),
        (Some(d), None) => d.format("%d/%m/%Y").to_string(),
        (None, _) => String::new(),
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_times_with_and_without_seconds() {
        assert_eq!(
            parse_time("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert_eq!(
            parse_time("09:30:15").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 15).unwrap()
        );
        assert!(parse_time("9.30").is_err());
    }

    #[test]
    fn formats_money_and_dates() {
        assert_eq!(fmt_money(Decimal::new(-1999, 2), Currency::Gbp), "£-19.99");
        let d = NaiveDate::from_ymd_opt(2025, 3, 7);
        let t = NaiveTime::from_hms_opt(18, 5, 59);
        assert_eq!(fmt_date_time(d, t), "07/03/2025 18:05");
        assert_eq!(fmt_date_time(d, None), "07/03/2025");
        assert_eq!(fmt_date_time(None, t), "");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_decimal("12,50").is_err());
        assert_eq!(parse_decimal(" 12.50 ").unwrap(), Decimal::new(1250, 2));
    }
}
