// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod classify;
pub mod exporter;
pub mod payment_methods;
pub mod reports;
pub mod transactions;

use anyhow::Result;
use dialoguer::{Confirm, theme::ColorfulTheme};

use crate::month::MonthSelection;

/// Asks before a destructive change. `assume_yes` skips the prompt.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

/// Reads `--month`, `--from/--to` and `--all`. Returns `(start, end, all_time)`.
///
/// Defaults to the current month. `--to` defaults to `--from`. An inverted
/// range is passed through as is and matches nothing.
pub fn month_range(sub: &clap::ArgMatches) -> Result<(MonthSelection, MonthSelection, bool)> {
    let current = MonthSelection::current();
    if sub.get_flag("all") {
        return Ok((current, current, true));
    }
    if let Some(m) = sub.get_one::<String>("month") {
        let m = MonthSelection::parse(m)?;
        return Ok((m, m, false));
    }
    let from = sub
        .get_one::<String>("from")
        .map(|s| MonthSelection::parse(s))
        .transpose()?;
    let to = sub
        .get_one::<String>("to")
        .map(|s| MonthSelection::parse(s))
        .transpose()?;
    let start = from.unwrap_or(current);
    let end = to.unwrap_or(start);
    if start > end {
        log::warn!("range {} to {} is inverted and matches nothing", start, end);
    }
    Ok((start, end, false))
}
