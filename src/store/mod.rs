// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The storage boundary.
//!
//! Every store is scoped to a single user: it never returns or touches
//! another user's records. Category and payment method removal are atomic
//! with the reassignment of the affected transactions.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::{Error, Result};
use crate::models::{
    DEFAULT_CATEGORIES, DEFAULT_PAYMENT_METHODS, NewTransaction, Transaction, is_default_category,
    is_default_payment_method,
};

/// Handles the creation and retrieval of transactions.
pub trait TransactionStore {
    /// All of the user's transactions, newest date first, undated last.
    fn fetch_all(&self) -> Result<Vec<Transaction>>;

    fn get(&self, id: i64) -> Result<Transaction>;

    /// Stores a new record; the store assigns `id` and `created_at`.
    fn insert(&mut self, record: NewTransaction) -> Result<Transaction>;

    /// Replaces every mutable field of `id`, keeping `id` and `created_at`.
    fn update(&mut self, id: i64, record: NewTransaction) -> Result<Transaction>;

    fn delete(&mut self, id: i64) -> Result<()>;

    /// Distinct past descriptions containing `text`, most recent first.
    fn description_suggestions(&self, text: &str, limit: usize) -> Result<Vec<String>>;
}

/// User-defined categories on top of [`DEFAULT_CATEGORIES`].
pub trait CategoryStore {
    fn user_categories(&self) -> Result<Vec<String>>;

    fn add_category(&mut self, name: &str) -> Result<()>;

    /// Renames a user category and every transaction that uses it.
    /// Returns the number of transactions updated.
    fn rename_category(&mut self, old: &str, new: &str) -> Result<usize>;

    /// Deletes a user category and moves its transactions to `Other`.
    /// Returns the number of transactions reassigned.
    fn remove_category(&mut self, name: &str) -> Result<usize>;

    /// Defaults first, then the user's categories by name.
    fn categories(&self) -> Result<Vec<String>> {
        let mut all: Vec<String> = DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect();
        all.extend(self.user_categories()?);
        Ok(all)
    }
}

/// User-defined payment methods on top of [`DEFAULT_PAYMENT_METHODS`].
pub trait PaymentMethodStore {
    fn user_payment_methods(&self) -> Result<Vec<String>>;

    fn add_payment_method(&mut self, name: &str) -> Result<()>;

    /// Deletes a user payment method and moves its transactions to `Cash`.
    fn remove_payment_method(&mut self, name: &str) -> Result<usize>;

    fn payment_methods(&self) -> Result<Vec<String>> {
        let mut all: Vec<String> = DEFAULT_PAYMENT_METHODS
            .iter()
            .map(|m| m.to_string())
            .collect();
        all.extend(self.user_payment_methods()?);
        Ok(all)
    }
}

/// Everything the command layer needs from storage.
pub trait Store: TransactionStore + CategoryStore + PaymentMethodStore {}

impl<T: TransactionStore + CategoryStore + PaymentMethodStore> Store for T {}

/// Trims `name` and checks it can be added next to `existing`.
pub(crate) fn check_new_category(existing: &[String], name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    if is_default_category(name) || existing.iter().any(|c| c == name) {
        return Err(Error::DuplicateCategory(name.to_string()));
    }
    Ok(name.to_string())
}

/// Checks `name` is a user category that may be renamed or removed.
pub(crate) fn check_user_category(existing: &[String], name: &str) -> Result<()> {
    if is_default_category(name) {
        return Err(Error::DefaultCategory(name.to_string()));
    }
    if !existing.iter().any(|c| c == name) {
        return Err(Error::UnknownCategory(name.to_string()));
    }
    Ok(())
}

pub(crate) fn check_new_payment_method(existing: &[String], name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    if is_default_payment_method(name) {
        return Err(Error::DefaultPaymentMethod(name.to_string()));
    }
    if existing.iter().any(|m| m == name) {
        return Err(Error::DuplicatePaymentMethod(name.to_string()));
    }
    Ok(name.to_string())
}

pub(crate) fn check_user_payment_method(existing: &[String], name: &str) -> Result<()> {
    if is_default_payment_method(name) {
        return Err(Error::DefaultPaymentMethod(name.to_string()));
    }
    if !existing.iter().any(|m| m == name) {
        return Err(Error::UnknownPaymentMethod(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_category_rules() {
        let existing = vec!["Pets".to_string()];
        assert_eq!(check_new_category(&existing, "  Gifts ").unwrap(), "Gifts");
        assert!(matches!(check_new_category(&existing, " "), Err(Error::EmptyName)));
        assert!(matches!(
            check_new_category(&existing, "Pets"),
            Err(Error::DuplicateCategory(_))
        ));
        assert!(matches!(
            check_new_category(&existing, "Other"),
            Err(Error::DuplicateCategory(_))
        ));
    }

    #[test]
    fn defaults_are_protected() {
        let existing = vec!["Pets".to_string()];
        assert!(matches!(
            check_user_category(&existing, "Housing"),
            Err(Error::DefaultCategory(_))
        ));
        assert!(matches!(
            check_user_category(&existing, "Travel"),
            Err(Error::UnknownCategory(_))
        ));
        assert!(check_user_category(&existing, "Pets").is_ok());
        assert!(matches!(
            check_new_payment_method(&[], "Cash"),
            Err(Error::DefaultPaymentMethod(_))
        ));
        assert!(matches!(
            check_user_payment_method(&[], "Cash"),
            Err(Error::DefaultPaymentMethod(_))
        ));
    }
}
