// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

use crate::config::Config;

const APP: (&str, &str, &str) = ("com.alphavelocity", "Fintrack", "fintrack");

pub fn db_path(config: &Config) -> Result<PathBuf> {
    if let Some(p) = &config.db_path {
        return Ok(p.clone());
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("fintrack.sqlite"))
}

pub fn open_or_init(config: &Config) -> Result<Connection> {
    let path = db_path(config)?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    log::debug!("opened database at {}", path.display());
    Ok(conn)
}

/// Creates the tables if missing. Safe to run on every start.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        amount TEXT NOT NULL,            -- signed, native currency
        currency TEXT NOT NULL CHECK(currency IN ('EUR','USD','GBP')),
        exchange_rate TEXT NOT NULL,
        base_amount TEXT NOT NULL,       -- amount * exchange_rate at write time
        payment_method TEXT NOT NULL,
        has_receipt INTEGER NOT NULL DEFAULT 0,
        description TEXT NOT NULL DEFAULT '',
        accounting_type TEXT NOT NULL CHECK(accounting_type IN ('internal','external')),
        category TEXT NOT NULL,
        transaction_date TEXT,
        transaction_time TEXT,
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f','now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_user_date
        ON transactions(user_id, transaction_date);

    CREATE TABLE IF NOT EXISTS user_categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        category TEXT NOT NULL,
        UNIQUE(user_id, category)
    );

    CREATE TABLE IF NOT EXISTS payment_methods(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        name TEXT NOT NULL,
        UNIQUE(user_id, name)
    );
    "#,
    )?;
    Ok(())
}
