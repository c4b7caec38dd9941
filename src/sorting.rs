// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Column sorting for the history view.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Date,
    Amount,
    /// Sorts on the accounting type (internal/external), not expense/revenue.
    Type,
}

impl FromStr for SortField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(SortField::Date),
            "amount" => Ok(SortField::Amount),
            "type" => Ok(SortField::Type),
            other => Err(anyhow::anyhow!(
                "Unknown sort field '{}', expected date|amount|type",
                other
            )),
        }
    }
}

/// Tri-state column direction. Clicking a column header cycles
/// `Unsorted -> Asc -> Desc -> Unsorted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Unsorted,
    Asc,
    Desc,
}

impl SortDirection {
    pub fn next(self) -> Self {
        match self {
            SortDirection::Unsorted => SortDirection::Asc,
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Unsorted,
        }
    }
}

impl FromStr for SortDirection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            "none" | "unsorted" => Ok(SortDirection::Unsorted),
            other => Err(anyhow::anyhow!(
                "Unknown sort direction '{}', expected asc|desc|none",
                other
            )),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Unsorted => "none",
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            field: SortField::Date,
            direction: SortDirection::Desc,
        }
    }
}

impl SortConfig {
    /// Header click on `field`: advances the direction for the active field,
    /// starts at ascending for any other.
    pub fn toggle(self, field: SortField) -> Self {
        let direction = if self.field == field {
            self.direction.next()
        } else {
            SortDirection::Asc
        };
        Self { field, direction }
    }
}

/// Returns a sorted copy; `Unsorted` keeps the input order. The sort is
/// stable, so equal keys keep their relative order in both directions.
pub fn sort_transactions<'a>(list: &[&'a Transaction], config: SortConfig) -> Vec<&'a Transaction> {
    let mut out = list.to_vec();
    let ascending = match config.direction {
        SortDirection::Unsorted => return out,
        SortDirection::Asc => true,
        SortDirection::Desc => false,
    };
    out.sort_by(|a, b| {
        let ord = compare(a, b, config.field);
        if ascending { ord } else { ord.reverse() }
    });
    out
}

fn compare(a: &Transaction, b: &Transaction, field: SortField) -> Ordering {
    match field {
        SortField::Date => date_key(a).cmp(&date_key(b)),
        SortField::Amount => a.amount.cmp(&b.amount),
        SortField::Type => a.accounting_type.as_str().cmp(b.accounting_type.as_str()),
    }
}

// Undated records sort as the Unix epoch (NaiveDate's default).
fn date_key(t: &Transaction) -> NaiveDate {
    t.transaction_date.unwrap_or_default()
}
