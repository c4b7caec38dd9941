// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fx;
use crate::month::MonthSelection;

pub const OTHER_CATEGORY: &str = "Other";
pub const DEFAULT_PAYMENT_METHOD: &str = "Cash";

/// Built-in categories. The first ten are the classifier vocabulary; `Other`
/// is the fallback and the reassignment target when a user category is removed.
pub const DEFAULT_CATEGORIES: [&str; 11] = [
    "Grocery Shopping",
    "Meals Out",
    "Transportation",
    "Housing",
    "Utilities",
    "Healthcare",
    "Entertainment",
    "Office Costs",
    "Professional Services",
    "Income",
    OTHER_CATEGORY,
];

pub const DEFAULT_PAYMENT_METHODS: [&str; 4] =
    [DEFAULT_PAYMENT_METHOD, "Bank Transfer", "Debit Card", "Credit Card"];

pub fn is_default_category(name: &str) -> bool {
    DEFAULT_CATEGORIES.contains(&name)
}

pub fn is_default_payment_method(name: &str) -> bool {
    DEFAULT_PAYMENT_METHODS.contains(&name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Usd,
    Gbp,
}

impl Currency {
    /// The reporting currency every total is normalized to.
    pub const BASE: Currency = Currency::Eur;

    pub fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Usd => "$",
            Currency::Gbp => "£",
        }
    }

    pub fn is_base(self) -> bool {
        self == Self::BASE
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            "GBP" => Ok(Currency::Gbp),
            _ => Err(Error::UnknownCurrency(s.to_string())),
        }
    }
}

/// Reporting partition chosen by the user, independent of expense/revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountingType {
    Internal,
    External,
}

impl AccountingType {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountingType::Internal => "internal",
            AccountingType::External => "external",
        }
    }
}

impl fmt::Display for AccountingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountingType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "internal" => Ok(AccountingType::Internal),
            "external" => Ok(AccountingType::External),
            _ => Err(Error::UnknownAccountingType(s.to_string())),
        }
    }
}

/// Expense or revenue. Only used as form input and display label; the sign of
/// [`Transaction::amount`] is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Expense,
    Revenue,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Expense => "expense",
            EntryKind::Revenue => "revenue",
        }
    }

    /// Applies this kind's sign to an amount, ignoring the amount's own sign.
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            EntryKind::Expense => -amount.abs(),
            EntryKind::Revenue => amount.abs(),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(EntryKind::Expense),
            "revenue" => Ok(EntryKind::Revenue),
            _ => Err(Error::UnknownEntryKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: Decimal,
    pub currency: Currency,
    pub exchange_rate: Decimal,
    pub base_amount: Decimal,
    pub payment_method: String,
    pub has_receipt: bool,
    pub description: String,
    pub accounting_type: AccountingType,
    pub category: String,
    pub transaction_date: Option<NaiveDate>,
    pub transaction_time: Option<NaiveTime>,
    pub created_at: NaiveDateTime,
}

impl Transaction {
    pub fn kind(&self) -> EntryKind {
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            EntryKind::Expense
        } else {
            EntryKind::Revenue
        }
    }

    /// The draft that reproduces this record, as loaded into the edit form.
    pub fn to_draft(&self) -> TransactionDraft {
        TransactionDraft {
            amount: self.amount.abs(),
            kind: self.kind(),
            currency: self.currency,
            exchange_rate: self.exchange_rate,
            payment_method: self.payment_method.clone(),
            has_receipt: self.has_receipt,
            description: self.description.clone(),
            accounting_type: self.accounting_type,
            category: self.category.clone(),
            transaction_date: self.transaction_date,
            transaction_time: self.transaction_time,
        }
    }
}

/// Submitted form state for creating or replacing a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    /// Magnitude; the sign comes from `kind`.
    pub amount: Decimal,
    pub kind: EntryKind,
    pub currency: Currency,
    pub exchange_rate: Decimal,
    pub payment_method: String,
    pub has_receipt: bool,
    pub description: String,
    pub accounting_type: AccountingType,
    pub category: String,
    pub transaction_date: Option<NaiveDate>,
    pub transaction_time: Option<NaiveTime>,
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self {
            amount: Decimal::ZERO,
            kind: EntryKind::Expense,
            currency: Currency::BASE,
            exchange_rate: Decimal::ONE,
            payment_method: DEFAULT_PAYMENT_METHOD.to_string(),
            has_receipt: false,
            description: String::new(),
            accounting_type: AccountingType::Internal,
            category: OTHER_CATEGORY.to_string(),
            transaction_date: None,
            transaction_time: None,
        }
    }
}

impl TransactionDraft {
    /// Signs the amount, defaults the date to the first day of `selected` and
    /// fixes the base-currency amount at the submitted rate.
    pub fn into_record(self, selected: MonthSelection) -> Result<NewTransaction> {
        fx::validate_rate(self.currency, self.exchange_rate)?;
        let amount = self.kind.signed(self.amount);
        Ok(NewTransaction {
            amount,
            currency: self.currency,
            exchange_rate: self.exchange_rate,
            base_amount: fx::base_amount(amount, self.exchange_rate),
            payment_method: self.payment_method,
            has_receipt: self.has_receipt,
            description: self.description,
            accounting_type: self.accounting_type,
            category: self.category,
            transaction_date: Some(self.transaction_date.unwrap_or(selected.first_day())),
            transaction_time: self.transaction_time,
        })
    }
}

/// A fully built record, ready to be inserted or to replace an existing one.
/// Storage assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub currency: Currency,
    pub exchange_rate: Decimal,
    pub base_amount: Decimal,
    pub payment_method: String,
    pub has_receipt: bool,
    pub description: String,
    pub accounting_type: AccountingType,
    pub category: String,
    pub transaction_date: Option<NaiveDate>,
    pub transaction_time: Option<NaiveTime>,
}

impl NewTransaction {
    pub fn with_identity(self, id: i64, created_at: NaiveDateTime) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            currency: self.currency,
            exchange_rate: self.exchange_rate,
            base_amount: self.base_amount,
            payment_method: self.payment_method,
            has_receipt: self.has_receipt,
            description: self.description,
            accounting_type: self.accounting_type,
            category: self.category,
            transaction_date: self.transaction_date,
            transaction_time: self.transaction_time,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn expense_draft_is_stored_negative() {
        let draft = TransactionDraft {
            amount: Decimal::new(1250, 2),
            currency: Currency::Usd,
            exchange_rate: Decimal::new(90, 2),
            ..Default::default()
        };
        let rec = draft
            .into_record(MonthSelection::new(2, 2025).unwrap())
            .unwrap();
        assert_eq!(rec.amount, Decimal::new(-1250, 2));
        assert_eq!(rec.base_amount, Decimal::new(-11250, 3));
        assert_eq!(rec.transaction_date, NaiveDate::from_ymd_opt(2025, 3, 1));
    }

    #[test]
    fn revenue_draft_drops_negative_input_sign() {
        let draft = TransactionDraft {
            amount: Decimal::new(-300, 0),
            kind: EntryKind::Revenue,
            ..Default::default()
        };
        let rec = draft
            .into_record(MonthSelection::new(0, 2024).unwrap())
            .unwrap();
        assert_eq!(rec.amount, Decimal::new(300, 0));
    }

    #[test]
    fn explicit_date_wins_over_selected_month() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 19);
        let draft = TransactionDraft {
            amount: Decimal::ONE,
            transaction_date: date,
            ..Default::default()
        };
        let rec = draft
            .into_record(MonthSelection::new(0, 2020).unwrap())
            .unwrap();
        assert_eq!(rec.transaction_date, date);
    }

    #[test]
    fn kind_follows_amount_sign() {
        let rec = TransactionDraft {
            amount: Decimal::TEN,
            ..Default::default()
        }
        .into_record(MonthSelection::new(0, 2024).unwrap())
        .unwrap()
        .with_identity(1, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(rec.kind(), EntryKind::Expense);
        assert_eq!(rec.to_draft().amount, Decimal::TEN);
    }

    #[test]
    fn parses_enums_case_insensitively() {
        assert_eq!("gbp".parse::<Currency>().unwrap(), Currency::Gbp);
        assert_eq!(
            " External ".parse::<AccountingType>().unwrap(),
            AccountingType::External
        );
        assert!("JPY".parse::<Currency>().is_err());
    }
}
