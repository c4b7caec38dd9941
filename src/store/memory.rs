// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDateTime, Utc};

use super::{
    CategoryStore, PaymentMethodStore, TransactionStore, check_new_category,
    check_new_payment_method, check_user_category, check_user_payment_method,
};
use crate::error::{Error, Result};
use crate::models::{DEFAULT_PAYMENT_METHOD, NewTransaction, OTHER_CATEGORY, Transaction};

/// In-memory store for a single user. Used as the fake in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    transactions: Vec<Transaction>,
    categories: Vec<String>,
    payment_methods: Vec<String>,
    next_id: i64,
    clock: Option<NaiveDateTime>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps every new record with `at` instead of the current UTC time.
    pub fn with_clock(at: NaiveDateTime) -> Self {
        Self {
            clock: Some(at),
            ..Self::default()
        }
    }

    fn now(&self) -> NaiveDateTime {
        self.clock.unwrap_or_else(|| Utc::now().naive_utc())
    }

    fn position(&self, id: i64) -> Result<usize> {
        self.transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::NotFound(id))
    }
}

impl TransactionStore for MemoryStore {
    fn fetch_all(&self) -> Result<Vec<Transaction>> {
        let mut out = self.transactions.clone();
        out.sort_by(|a, b| match (a.transaction_date, b.transaction_date) {
            (Some(x), Some(y)) => y.cmp(&x).then(b.id.cmp(&a.id)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => b.id.cmp(&a.id),
        });
        Ok(out)
    }

    fn get(&self, id: i64) -> Result<Transaction> {
        Ok(self.transactions[self.position(id)?].clone())
    }

    fn insert(&mut self, record: NewTransaction) -> Result<Transaction> {
        self.next_id += 1;
        let t = record.with_identity(self.next_id, self.now());
        self.transactions.push(t.clone());
        Ok(t)
    }

    fn update(&mut self, id: i64, record: NewTransaction) -> Result<Transaction> {
        let idx = self.position(id)?;
        let created_at = self.transactions[idx].created_at;
        let t = record.with_identity(id, created_at);
        self.transactions[idx] = t.clone();
        Ok(t)
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        let idx = self.position(id)?;
        self.transactions.remove(idx);
        Ok(())
    }

    fn description_suggestions(&self, text: &str, limit: usize) -> Result<Vec<String>> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let mut out: Vec<String> = Vec::new();
        for t in self.transactions.iter().rev() {
            if out.len() == limit {
                break;
            }
            if t.description.to_lowercase().contains(&needle) && !out.contains(&t.description) {
                out.push(t.description.clone());
            }
        }
        Ok(out)
    }
}

impl CategoryStore for MemoryStore {
    fn user_categories(&self) -> Result<Vec<String>> {
        let mut out = self.categories.clone();
        out.sort();
        Ok(out)
    }

    fn add_category(&mut self, name: &str) -> Result<()> {
        let name = check_new_category(&self.categories, name)?;
        self.categories.push(name);
        Ok(())
    }

    fn rename_category(&mut self, old: &str, new: &str) -> Result<usize> {
        check_user_category(&self.categories, old)?;
        let new = check_new_category(&self.categories, new)?;
        for c in self.categories.iter_mut().filter(|c| c.as_str() == old) {
            *c = new.clone();
        }
        let mut moved = 0;
        for t in self.transactions.iter_mut().filter(|t| t.category == old) {
            t.category = new.clone();
            moved += 1;
        }
        Ok(moved)
    }

    fn remove_category(&mut self, name: &str) -> Result<usize> {
        check_user_category(&self.categories, name)?;
        self.categories.retain(|c| c != name);
        let mut moved = 0;
        for t in self.transactions.iter_mut().filter(|t| t.category == name) {
            t.category = OTHER_CATEGORY.to_string();
            moved += 1;
        }
        Ok(moved)
    }
}

impl PaymentMethodStore for MemoryStore {
    fn user_payment_methods(&self) -> Result<Vec<String>> {
        let mut out = self.payment_methods.clone();
        out.sort();
        Ok(out)
    }

    fn add_payment_method(&mut self, name: &str) -> Result<()> {
        let name = check_new_payment_method(&self.payment_methods, name)?;
        self.payment_methods.push(name);
        Ok(())
    }

    fn remove_payment_method(&mut self, name: &str) -> Result<usize> {
        check_user_payment_method(&self.payment_methods, name)?;
        self.payment_methods.retain(|m| m != name);
        let mut moved = 0;
        for t in self
            .transactions
            .iter_mut()
            .filter(|t| t.payment_method == name)
        {
            t.payment_method = DEFAULT_PAYMENT_METHOD.to_string();
            moved += 1;
        }
        Ok(moved)
    }
}
