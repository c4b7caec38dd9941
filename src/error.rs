// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Library level error type.

use rust_decimal::Decimal;

/// The errors raised by the core and the storage boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No transaction with this id belongs to the current user.
    #[error("transaction {0} not found")]
    NotFound(i64),

    /// The user already has a category with this name.
    #[error("category '{0}' already exists")]
    DuplicateCategory(String),

    /// Default categories cannot be added, renamed or removed.
    #[error("'{0}' is a default category and cannot be changed")]
    DefaultCategory(String),

    /// No user category with this name exists.
    #[error("category '{0}' not found")]
    UnknownCategory(String),

    #[error("payment method '{0}' already exists")]
    DuplicatePaymentMethod(String),

    #[error("'{0}' is a default payment method and cannot be changed")]
    DefaultPaymentMethod(String),

    #[error("payment method '{0}' not found")]
    UnknownPaymentMethod(String),

    /// Exchange rates must be strictly positive, and exactly 1 for the base currency.
    #[error("invalid exchange rate {0}")]
    InvalidRate(Decimal),

    /// Months are numbered 0 to 11.
    #[error("invalid month '{0}'")]
    InvalidMonth(String),

    #[error("name cannot be empty")]
    EmptyName,

    #[error("unknown currency '{0}', expected EUR, USD or GBP")]
    UnknownCurrency(String),

    #[error("unknown accounting type '{0}', expected internal or external")]
    UnknownAccountingType(String),

    #[error("unknown entry kind '{0}', expected expense or revenue")]
    UnknownEntryKind(String),

    /// A stored value could not be decoded.
    #[error("corrupt value in column {column}: {value}")]
    Corrupt { column: &'static str, value: String },

    #[error(transparent)]
    Sql(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
