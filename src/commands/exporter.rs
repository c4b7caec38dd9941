// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{Result, bail};

use crate::models::Transaction;
use crate::store::TransactionStore;

pub fn handle<S: TransactionStore>(store: &S, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    let out = sub
        .get_one::<String>("out")
        .ok_or_else(|| anyhow::anyhow!("--out is required"))?;
    let n = export_transactions(store, &fmt, Path::new(out))?;
    println!("Exported {} transactions to {}", n, out);
    Ok(())
}

/// Writes every transaction of the store's user, oldest first. Returns the
/// number of records written.
pub fn export_transactions<S: TransactionStore>(
    store: &S,
    fmt: &str,
    out: &Path,
) -> Result<usize> {
    let mut items = store.fetch_all()?;
    items.sort_by(|a, b| {
        a.transaction_date
            .cmp(&b.transaction_date)
            .then(a.id.cmp(&b.id))
    });

    match fmt {
        "csv" => write_csv(&items, out)?,
        "json" => std::fs::write(out, serde_json::to_string_pretty(&items)?)?,
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    log::info!("exported {} transactions to {}", items.len(), out.display());
    Ok(items.len())
}

fn write_csv(items: &[Transaction], out: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record([
        "id",
        "date",
        "time",
        "description",
        "category",
        "payment_method",
        "accounting_type",
        "amount",
        "currency",
        "exchange_rate",
        "base_amount",
        "has_receipt",
    ])?;
    for t in items {
        wtr.write_record([
            t.id.to_string(),
            t.transaction_date.map(|d| d.to_string()).unwrap_or_default(),
            t.transaction_time
                .map(|tm| tm.format("%H:%M").to_string())
                .unwrap_or_default(),
            t.description.clone(),
            t.category.clone(),
            t.payment_method.clone(),
            t.accounting_type.to_string(),
            t.amount.to_string(),
            t.currency.to_string(),
            t.exchange_rate.to_string(),
            t.base_amount.to_string(),
            t.has_receipt.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
