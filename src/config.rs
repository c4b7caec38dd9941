// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Runtime configuration, read from the environment.
//!
//! - `FINTRACK_DB`               database path (default: platform data dir)
//! - `FINTRACK_USER`             user whose records are shown (default: `default`)
//! - `FINTRACK_OPENAI_API_KEY`   enables the remote classifier
//! - `FINTRACK_OPENAI_MODEL`     (default: `gpt-3.5-turbo`)
//! - `FINTRACK_OPENAI_BASE_URL`  (default: `https://api.openai.com/v1`)

use std::path::PathBuf;

pub const DEFAULT_USER: &str = "default";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub db_path: Option<PathBuf>,
    pub user: Option<String>,
    /// `None` when no API key is set; categorization then uses keywords only.
    pub classifier: Option<ClassifierConfig>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let classifier = get("FINTRACK_OPENAI_API_KEY").map(|api_key| ClassifierConfig {
            api_key,
            model: get("FINTRACK_OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: get("FINTRACK_OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        });
        Self {
            db_path: get("FINTRACK_DB").map(PathBuf::from),
            user: get("FINTRACK_USER"),
            classifier,
        }
    }

    /// `--user` beats `FINTRACK_USER`, which beats the default.
    pub fn user_or<'a>(&'a self, flag: Option<&'a str>) -> &'a str {
        flag.or(self.user.as_deref()).unwrap_or(DEFAULT_USER)
    }
}
