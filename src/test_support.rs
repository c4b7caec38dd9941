// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{AccountingType, Currency, Transaction};

/// An internal EUR transaction dated 2025-01-15.
pub fn tx(id: i64, amount: Decimal, description: &str, category: &str) -> Transaction {
    let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    Transaction {
        id,
        amount,
        currency: Currency::Eur,
        exchange_rate: Decimal::ONE,
        base_amount: amount,
        payment_method: "Cash".to_string(),
        has_receipt: false,
        description: description.to_string(),
        accounting_type: AccountingType::Internal,
        category: category.to_string(),
        transaction_date: Some(date),
        transaction_time: None,
        created_at: date.and_hms_opt(12, 0, 0).unwrap(),
    }
}
