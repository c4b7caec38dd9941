// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::commands::month_range;
use crate::fx::fmt_base;
use crate::report::{CategoryBreakdown, MonthlyReport, monthly_report};
use crate::store::TransactionStore;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle<S: TransactionStore>(store: &S, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let report = build(store, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    let period = match (report.start, report.end) {
        (Some(s), Some(e)) if s == e => format!("{} {}", s.month_name(), s.year()),
        (Some(s), Some(e)) => format!("{} to {}", s, e),
        _ => "All time".to_string(),
    };
    println!("{} ({} transactions)", period, report.transactions);

    let totals = &report.totals;
    let rows = vec![
        vec![
            "Internal".to_string(),
            fmt_base(totals.internal.expenses),
            fmt_base(totals.internal.revenues),
            fmt_base(totals.internal.profit),
        ],
        vec![
            "External".to_string(),
            fmt_base(totals.external.expenses),
            fmt_base(totals.external.revenues),
            fmt_base(totals.external.profit),
        ],
    ];
    println!(
        "{}",
        pretty_table(&["Accounting", "Expenses", "Revenues", "Profit"], rows)
    );

    print_breakdown("Internal", &report.internal_categories);
    print_breakdown("External", &report.external_categories);
    Ok(())
}

/// The report for the range selected on the command line.
pub fn build<S: TransactionStore>(store: &S, sub: &clap::ArgMatches) -> Result<MonthlyReport> {
    let all = store.fetch_all()?;
    let (start, end, all_time) = month_range(sub)?;
    Ok(monthly_report(&all, start, end, all_time))
}

fn print_breakdown(label: &str, b: &CategoryBreakdown) {
    for (kind, items) in [("expenses", &b.expenses), ("revenues", &b.revenues)] {
        if items.is_empty() {
            continue;
        }
        let total: Decimal = items.iter().map(|(_, v)| *v).sum();
        let rows: Vec<Vec<String>> = items
            .iter()
            .map(|(cat, v)| vec![cat.clone(), fmt_base(*v), share(*v, total)])
            .collect();
        println!("{} {} by category", label, kind);
        println!("{}", pretty_table(&["Category", "Amount", "Share"], rows));
    }
}

fn share(part: Decimal, total: Decimal) -> String {
    if total.is_zero() {
        return "-".to_string();
    }
    format!("{:.1}%", (part / total * Decimal::ONE_HUNDRED).round_dp(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_are_percentages() {
        assert_eq!(share(Decimal::new(25, 0), Decimal::new(100, 0)), "25.0%");
        assert_eq!(share(Decimal::ONE, Decimal::new(3, 0)), "33.3%");
        assert_eq!(share(Decimal::ONE, Decimal::ZERO), "-");
    }
}
