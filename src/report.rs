// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Report totals and category breakdowns.
//!
//! Every figure here is in the base currency, taken from the stored
//! `base_amount`. A record counts as an expense when its amount is negative
//! and as revenue when positive; zero amounts count for neither.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{AccountingType, Transaction};
use crate::month::{MonthSelection, is_in_month_range};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub expenses: Decimal,
    pub revenues: Decimal,
    pub profit: Decimal,
}

/// Totals for one accounting partition.
pub fn aggregate<'a, I>(list: I, accounting_type: AccountingType) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut expenses = Decimal::ZERO;
    let mut revenues = Decimal::ZERO;
    for t in list
        .into_iter()
        .filter(|t| t.accounting_type == accounting_type)
    {
        if t.amount < Decimal::ZERO {
            expenses += t.base_amount.abs();
        } else if t.amount > Decimal::ZERO {
            revenues += t.base_amount;
        }
    }
    Totals {
        expenses,
        revenues,
        profit: revenues - expenses,
    }
}

/// Internal and external totals, kept apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Report {
    pub internal: Totals,
    pub external: Totals,
}

impl Report {
    pub fn build(list: &[&Transaction]) -> Self {
        Self {
            internal: aggregate(list.iter().copied(), AccountingType::Internal),
            external: aggregate(list.iter().copied(), AccountingType::External),
        }
    }

    pub fn totals(&self, accounting_type: AccountingType) -> Totals {
        match accounting_type {
            AccountingType::Internal => self.internal,
            AccountingType::External => self.external,
        }
    }
}

/// Per-category sums ordered for charting: largest first, ties by name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CategoryBreakdown {
    pub expenses: Vec<(String, Decimal)>,
    pub revenues: Vec<(String, Decimal)>,
}

pub fn category_breakdown(list: &[&Transaction], accounting_type: AccountingType) -> CategoryBreakdown {
    let mut expenses: HashMap<&str, Decimal> = HashMap::new();
    let mut revenues: HashMap<&str, Decimal> = HashMap::new();
    for t in list.iter().filter(|t| t.accounting_type == accounting_type) {
        if t.amount < Decimal::ZERO {
            *expenses.entry(t.category.as_str()).or_insert(Decimal::ZERO) += t.base_amount.abs();
        } else if t.amount > Decimal::ZERO {
            *revenues.entry(t.category.as_str()).or_insert(Decimal::ZERO) += t.base_amount;
        }
    }
    CategoryBreakdown {
        expenses: ranked(expenses),
        revenues: ranked(revenues),
    }
}

fn ranked(map: HashMap<&str, Decimal>) -> Vec<(String, Decimal)> {
    let mut items: Vec<(String, Decimal)> =
        map.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    items
}

/// Everything the report view shows for a month range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyReport {
    /// `None` for an all-time report.
    pub start: Option<MonthSelection>,
    pub end: Option<MonthSelection>,
    pub transactions: usize,
    pub totals: Report,
    pub internal_categories: CategoryBreakdown,
    pub external_categories: CategoryBreakdown,
}

pub fn monthly_report(
    list: &[Transaction],
    start: MonthSelection,
    end: MonthSelection,
    show_all_time: bool,
) -> MonthlyReport {
    let in_range: Vec<&Transaction> = list
        .iter()
        .filter(|t| is_in_month_range(t.transaction_date, start, end, show_all_time))
        .collect();
    let (start, end) = if show_all_time {
        (None, None)
    } else {
        (Some(start), Some(end))
    };
    MonthlyReport {
        start,
        end,
        transactions: in_range.len(),
        totals: Report::build(&in_range),
        internal_categories: category_breakdown(&in_range, AccountingType::Internal),
        external_categories: category_breakdown(&in_range, AccountingType::External),
    }
}
