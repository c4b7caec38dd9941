// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use super::{
    CategoryStore, PaymentMethodStore, TransactionStore, check_new_category,
    check_new_payment_method, check_user_category, check_user_payment_method,
};
use crate::error::{Error, Result};
use crate::models::{DEFAULT_PAYMENT_METHOD, NewTransaction, OTHER_CATEGORY, Transaction};

const COLUMNS: &str = "id, amount, currency, exchange_rate, base_amount, payment_method, has_receipt, description, accounting_type, category, transaction_date, transaction_time, created_at";

/// SQLite backed store for one user.
pub struct SqliteStore<'c> {
    conn: &'c Connection,
    user: String,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection, user: &str) -> Self {
        Self {
            conn,
            user: user.to_string(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }
}

/// Column values as stored, before decoding.
struct RawRow {
    id: i64,
    amount: String,
    currency: String,
    exchange_rate: String,
    base_amount: String,
    payment_method: String,
    has_receipt: bool,
    description: String,
    accounting_type: String,
    category: String,
    transaction_date: Option<String>,
    transaction_time: Option<String>,
    created_at: String,
}

impl RawRow {
    fn from_row(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: r.get(0)?,
            amount: r.get(1)?,
            currency: r.get(2)?,
            exchange_rate: r.get(3)?,
            base_amount: r.get(4)?,
            payment_method: r.get(5)?,
            has_receipt: r.get(6)?,
            description: r.get(7)?,
            accounting_type: r.get(8)?,
            category: r.get(9)?,
            transaction_date: r.get(10)?,
            transaction_time: r.get(11)?,
            created_at: r.get(12)?,
        })
    }

    fn decode(self) -> Result<Transaction> {
        Ok(Transaction {
            id: self.id,
            amount: decimal("amount", &self.amount)?,
            currency: self.currency.parse()?,
            exchange_rate: decimal("exchange_rate", &self.exchange_rate)?,
            base_amount: decimal("base_amount", &self.base_amount)?,
            payment_method: self.payment_method,
            has_receipt: self.has_receipt,
            description: self.description,
            accounting_type: self.accounting_type.parse()?,
            category: self.category,
            transaction_date: self
                .transaction_date
                .map(|s| date("transaction_date", &s))
                .transpose()?,
            transaction_time: self
                .transaction_time
                .map(|s| time("transaction_time", &s))
                .transpose()?,
            created_at: timestamp("created_at", &self.created_at)?,
        })
    }
}

fn corrupt(column: &'static str, value: &str) -> Error {
    Error::Corrupt {
        column,
        value: value.to_string(),
    }
}

fn decimal(column: &'static str, s: &str) -> Result<Decimal> {
    s.parse::<Decimal>().map_err(|_| corrupt(column, s))
}

fn date(column: &'static str, s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| corrupt(column, s))
}

fn time(column: &'static str, s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| corrupt(column, s))
}

fn timestamp(column: &'static str, s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").map_err(|_| corrupt(column, s))
}

fn date_text(d: Option<NaiveDate>) -> Option<String> {
    d.map(|d| d.format("%Y-%m-%d").to_string())
}

fn time_text(t: Option<NaiveTime>) -> Option<String> {
    t.map(|t| t.format("%H:%M:%S").to_string())
}

impl TransactionStore for SqliteStore<'_> {
    fn fetch_all(&self) -> Result<Vec<Transaction>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM transactions WHERE user_id=?1
             ORDER BY transaction_date IS NULL, transaction_date DESC, id DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![self.user], RawRow::from_row)?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?.decode()?);
        }
        log::debug!("fetched {} transactions for {}", data.len(), self.user);
        Ok(data)
    }

    fn get(&self, id: i64) -> Result<Transaction> {
        let sql = format!("SELECT {COLUMNS} FROM transactions WHERE id=?1 AND user_id=?2");
        let raw = self
            .conn
            .query_row(&sql, params![id, self.user], RawRow::from_row)
            .optional()?
            .ok_or(Error::NotFound(id))?;
        raw.decode()
    }

    fn insert(&mut self, record: NewTransaction) -> Result<Transaction> {
        self.conn.execute(
            "INSERT INTO transactions(user_id, amount, currency, exchange_rate, base_amount, payment_method, has_receipt, description, accounting_type, category, transaction_date, transaction_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                self.user,
                record.amount.to_string(),
                record.currency.code(),
                record.exchange_rate.to_string(),
                record.base_amount.to_string(),
                record.payment_method,
                record.has_receipt,
                record.description,
                record.accounting_type.as_str(),
                record.category,
                date_text(record.transaction_date),
                time_text(record.transaction_time),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        log::info!("inserted transaction {} for {}", id, self.user);
        self.get(id)
    }

    fn update(&mut self, id: i64, record: NewTransaction) -> Result<Transaction> {
        let changed = self.conn.execute(
            "UPDATE transactions SET amount=?1, currency=?2, exchange_rate=?3, base_amount=?4, payment_method=?5, has_receipt=?6, description=?7, accounting_type=?8, category=?9, transaction_date=?10, transaction_time=?11
             WHERE id=?12 AND user_id=?13",
            params![
                record.amount.to_string(),
                record.currency.code(),
                record.exchange_rate.to_string(),
                record.base_amount.to_string(),
                record.payment_method,
                record.has_receipt,
                record.description,
                record.accounting_type.as_str(),
                record.category,
                date_text(record.transaction_date),
                time_text(record.transaction_time),
                id,
                self.user,
            ],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        log::info!("updated transaction {} for {}", id, self.user);
        self.get(id)
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        let changed = self.conn.execute(
            "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
            params![id, self.user],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        log::info!("deleted transaction {} for {}", id, self.user);
        Ok(())
    }

    fn description_suggestions(&self, text: &str, limit: usize) -> Result<Vec<String>> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        // SQLite's LIKE folds ASCII only, so matching happens here.
        let mut stmt = self.conn.prepare(
            "SELECT description FROM transactions WHERE user_id=?1
             GROUP BY description ORDER BY MAX(id) DESC",
        )?;
        let rows = stmt.query_map(params![self.user], |r| r.get::<_, String>(0))?;
        let mut out = Vec::new();
        for row in rows {
            if out.len() == limit {
                break;
            }
            let description = row?;
            if description.to_lowercase().contains(&needle) {
                out.push(description);
            }
        }
        Ok(out)
    }
}

impl CategoryStore for SqliteStore<'_> {
    fn user_categories(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT category FROM user_categories WHERE user_id=?1 ORDER BY category")?;
        let rows = stmt.query_map(params![self.user], |r| r.get::<_, String>(0))?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn add_category(&mut self, name: &str) -> Result<()> {
        let name = check_new_category(&self.user_categories()?, name)?;
        self.conn.execute(
            "INSERT INTO user_categories(user_id, category) VALUES (?1, ?2)",
            params![self.user, name],
        )?;
        log::info!("added category '{}' for {}", name, self.user);
        Ok(())
    }

    fn rename_category(&mut self, old: &str, new: &str) -> Result<usize> {
        let existing = self.user_categories()?;
        check_user_category(&existing, old)?;
        let new = check_new_category(&existing, new)?;
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "UPDATE user_categories SET category=?1 WHERE user_id=?2 AND category=?3",
            params![new, self.user, old],
        )?;
        let moved = tx.execute(
            "UPDATE transactions SET category=?1 WHERE user_id=?2 AND category=?3",
            params![new, self.user, old],
        )?;
        tx.commit()?;
        log::info!(
            "renamed category '{}' to '{}' for {} ({} transactions)",
            old,
            new,
            self.user,
            moved
        );
        Ok(moved)
    }

    fn remove_category(&mut self, name: &str) -> Result<usize> {
        check_user_category(&self.user_categories()?, name)?;
        let tx = self.conn.unchecked_transaction()?;
        let moved = tx.execute(
            "UPDATE transactions SET category=?1 WHERE user_id=?2 AND category=?3",
            params![OTHER_CATEGORY, self.user, name],
        )?;
        tx.execute(
            "DELETE FROM user_categories WHERE user_id=?1 AND category=?2",
            params![self.user, name],
        )?;
        tx.commit()?;
        log::info!(
            "removed category '{}' for {} ({} transactions moved to {})",
            name,
            self.user,
            moved,
            OTHER_CATEGORY
        );
        Ok(moved)
    }
}

impl PaymentMethodStore for SqliteStore<'_> {
    fn user_payment_methods(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM payment_methods WHERE user_id=?1 ORDER BY name")?;
        let rows = stmt.query_map(params![self.user], |r| r.get::<_, String>(0))?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn add_payment_method(&mut self, name: &str) -> Result<()> {
        let name = check_new_payment_method(&self.user_payment_methods()?, name)?;
        self.conn.execute(
            "INSERT INTO payment_methods(user_id, name) VALUES (?1, ?2)",
            params![self.user, name],
        )?;
        log::info!("added payment method '{}' for {}", name, self.user);
        Ok(())
    }

    fn remove_payment_method(&mut self, name: &str) -> Result<usize> {
        check_user_payment_method(&self.user_payment_methods()?, name)?;
        let tx = self.conn.unchecked_transaction()?;
        let moved = tx.execute(
            "UPDATE transactions SET payment_method=?1 WHERE user_id=?2 AND payment_method=?3",
            params![DEFAULT_PAYMENT_METHOD, self.user, name],
        )?;
        tx.execute(
            "DELETE FROM payment_methods WHERE user_id=?1 AND name=?2",
            params![self.user, name],
        )?;
        tx.commit()?;
        log::info!(
            "removed payment method '{}' for {} ({} transactions moved to {})",
            name,
            self.user,
            moved,
            DEFAULT_PAYMENT_METHOD
        );
        Ok(moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_time_with_or_without_seconds() {
        assert_eq!(
            time("t", "08:15").unwrap(),
            NaiveTime::from_hms_opt(8, 15, 0).unwrap()
        );
        assert!(time("t", "8h15").is_err());
        assert!(timestamp("c", "2025-01-01 10:00:00.123").is_ok());
        assert!(timestamp("c", "2025-01-01 10:00:00").is_ok());
    }
}
