// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::categorize::{Classifier, categorize};
use crate::commands::{confirm, month_range};
use crate::models::{Currency, Transaction, TransactionDraft};
use crate::month::{MonthSelection, is_in_month_range};
use crate::search::{filter_currency, filter_payment_methods, search_transactions};
use crate::sorting::{SortConfig, sort_transactions};
use crate::store::{Store, TransactionStore};
use crate::utils::{
    fmt_date_time, fmt_money, maybe_print_json, parse_date, parse_decimal, parse_time,
    pretty_table,
};

pub fn handle<S: Store>(
    store: &mut S,
    classifier: Option<&dyn Classifier>,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let t = add(store, classifier, sub)?;
            println!(
                "Recorded {} {} '{}' in {} (id {})",
                t.kind(),
                fmt_money(t.amount, t.currency),
                t.description,
                t.category,
                t.id
            );
        }
        Some(("edit", sub)) => {
            if let Some(t) = edit(store, sub)? {
                println!("Updated transaction {}", t.id);
            }
        }
        Some(("rm", sub)) => remove(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("suggest", sub)) => {
            let text = sub.get_one::<String>("text").map(String::as_str).unwrap_or("");
            let limit = *sub.get_one::<usize>("limit").unwrap_or(&5);
            for s in store.description_suggestions(text, limit)? {
                println!("{}", s);
            }
        }
        _ => {}
    }
    Ok(())
}

/// Applies the fields given on the command line over `d`.
fn apply_args(sub: &clap::ArgMatches, mut d: TransactionDraft) -> Result<TransactionDraft> {
    if let Some(a) = sub.get_one::<String>("amount") {
        d.amount = parse_decimal(a)?;
    }
    if let Some(k) = sub.get_one::<String>("kind") {
        d.kind = k.parse()?;
    }
    let rate = sub
        .get_one::<String>("rate")
        .map(|r| parse_decimal(r))
        .transpose()?;
    if let Some(c) = sub.get_one::<String>("currency") {
        let currency: Currency = c.parse()?;
        if rate.is_none() {
            if currency.is_base() {
                d.exchange_rate = Decimal::ONE;
            } else if currency != d.currency {
                bail!("--rate is required when switching to {}", currency);
            }
        }
        d.currency = currency;
    }
    if let Some(r) = rate {
        d.exchange_rate = r;
    }
    if let Some(m) = sub.get_one::<String>("method") {
        d.payment_method = m.trim().to_string();
    }
    if let Some(r) = sub.get_one::<bool>("receipt") {
        d.has_receipt = *r;
    }
    if let Some(desc) = sub.get_one::<String>("description") {
        d.description = desc.trim().to_string();
    }
    if let Some(a) = sub.get_one::<String>("accounting") {
        d.accounting_type = a.parse()?;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        d.category = c.trim().to_string();
    }
    if let Some(date) = sub.get_one::<String>("date") {
        d.transaction_date = Some(parse_date(date)?);
    }
    if let Some(time) = sub.get_one::<String>("time") {
        d.transaction_time = Some(parse_time(time)?);
    }
    if d.amount.is_zero() {
        bail!("Amount must not be zero");
    }
    Ok(d)
}

fn selected_month(sub: &clap::ArgMatches) -> Result<MonthSelection> {
    match sub.get_one::<String>("month") {
        Some(m) => Ok(MonthSelection::parse(m)?),
        None => Ok(MonthSelection::current()),
    }
}

/// Category and payment method must be ones the user can pick from.
fn check_choices<S: Store>(store: &S, d: &TransactionDraft) -> Result<()> {
    if !store.categories()?.contains(&d.category) {
        bail!(
            "Unknown category '{}'; add it with `fintrack category add`",
            d.category
        );
    }
    if !store.payment_methods()?.contains(&d.payment_method) {
        bail!(
            "Unknown payment method '{}'; add it with `fintrack method add`",
            d.payment_method
        );
    }
    Ok(())
}

pub fn add<S: Store>(
    store: &mut S,
    classifier: Option<&dyn Classifier>,
    sub: &clap::ArgMatches,
) -> Result<Transaction> {
    let mut draft = apply_args(sub, TransactionDraft::default())?;
    if sub.get_one::<String>("category").is_none() {
        draft.category = categorize(&draft.description, classifier);
        log::info!("suggested category '{}'", draft.category);
    }
    check_choices(store, &draft)?;
    let record = draft.into_record(selected_month(sub)?)?;
    Ok(store.insert(record)?)
}

/// Returns `None` when the user declines the confirmation.
pub fn edit<S: Store>(store: &mut S, sub: &clap::ArgMatches) -> Result<Option<Transaction>> {
    let id = *sub
        .get_one::<i64>("id")
        .ok_or_else(|| anyhow::anyhow!("--id is required"))?;
    let existing = store.get(id)?;
    let draft = apply_args(sub, existing.to_draft())?;
    check_choices(store, &draft)?;
    let record = draft.into_record(selected_month(sub)?)?;
    if !confirm(&format!("Save changes to transaction {}?", id), sub.get_flag("yes"))? {
        println!("Aborted");
        return Ok(None);
    }
    Ok(Some(store.update(id, record)?))
}

fn remove<S: Store>(store: &mut S, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub
        .get_one::<i64>("id")
        .ok_or_else(|| anyhow::anyhow!("--id is required"))?;
    let t = store.get(id)?;
    let prompt = format!(
        "Delete '{}' ({}) from {}?",
        t.description,
        fmt_money(t.amount, t.currency),
        fmt_date_time(t.transaction_date, None)
    );
    if !confirm(&prompt, sub.get_flag("yes"))? {
        println!("Aborted");
        return Ok(());
    }
    store.delete(id)?;
    println!("Deleted transaction {}", id);
    Ok(())
}

fn list<S: TransactionStore>(store: &S, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.description.clone(),
                    r.category.clone(),
                    r.payment_method.clone(),
                    r.accounting_type.clone(),
                    fmt_money(r.amount, r.currency),
                    fmt_money(r.base_amount, Currency::BASE),
                    if r.has_receipt { "yes".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID",
                    "Date",
                    "Description",
                    "Category",
                    "Method",
                    "Accounting",
                    "Amount",
                    "EUR",
                    "Receipt",
                ],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub category: String,
    pub payment_method: String,
    pub accounting_type: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub base_amount: Decimal,
    pub has_receipt: bool,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id,
            date: fmt_date_time(t.transaction_date, t.transaction_time),
            description: t.description.clone(),
            category: t.category.clone(),
            payment_method: t.payment_method.clone(),
            accounting_type: t.accounting_type.to_string(),
            amount: t.amount,
            currency: t.currency,
            base_amount: t.base_amount,
            has_receipt: t.has_receipt,
        }
    }
}

/// The history view: month range, payment methods, display currency, search,
/// then sort.
pub fn query_rows<S: TransactionStore>(
    store: &S,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let all = store.fetch_all()?;
    let (start, end, all_time) = month_range(sub)?;
    let in_range: Vec<&Transaction> = all
        .iter()
        .filter(|t| is_in_month_range(t.transaction_date, start, end, all_time))
        .collect();

    let methods: Vec<String> = sub
        .get_many::<String>("method")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();
    let display = match sub.get_one::<String>("currency") {
        Some(c) => c.parse()?,
        None => Currency::BASE,
    };
    let term = sub.get_one::<String>("search").map(String::as_str).unwrap_or("");

    let filtered = filter_currency(&filter_payment_methods(&in_range, &methods), display);
    let searched = search_transactions(&filtered, term);

    let mut config = SortConfig::default();
    if let Some(f) = sub.get_one::<String>("sort") {
        config.field = f.parse()?;
    }
    if let Some(d) = sub.get_one::<String>("dir") {
        config.direction = d.parse()?;
    }
    let sorted = sort_transactions(&searched, config);

    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    Ok(sorted.into_iter().take(limit).map(TransactionRow::from).collect())
}
