// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Category suggestions for new transactions.
//!
//! A remote classifier is asked first when one is configured. Its answer is
//! only accepted if it names a known category; any failure falls back to the
//! keyword table below. The result is a suggestion the user may override.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;
use crate::models::OTHER_CATEGORY;
use crate::utils::http_client;

/// Checked in order; the first category with a matching keyword wins.
pub const KEYWORDS: [(&str, &[&str]); 10] = [
    (
        "Grocery Shopping",
        &["pingo doce", "continente", "minipreco", "grocery", "supermarket", "food shopping"],
    ),
    ("Meals Out", &["restaurant", "cafe", "coffee", "lunch", "dinner", "meal"]),
    ("Transportation", &["uber", "taxi", "bus", "metro", "train", "fuel", "gas"]),
    ("Housing", &["rent", "mortgage", "housing"]),
    ("Utilities", &["electricity", "water", "gas", "internet", "phone"]),
    ("Healthcare", &["doctor", "hospital", "pharmacy", "medical", "health"]),
    ("Entertainment", &["cinema", "movie", "netflix", "spotify", "concert"]),
    ("Office Costs", &["office", "supplies", "equipment", "software"]),
    ("Professional Services", &["consulting", "legal", "accounting", "freelance"]),
    ("Income", &["salary", "dividend", "interest", "revenue", "payment received"]),
];

/// The closed vocabulary a classifier may answer with.
pub fn vocabulary() -> Vec<&'static str> {
    KEYWORDS.iter().map(|(name, _)| *name).collect()
}

pub fn categorize_by_keywords(description: &str) -> &'static str {
    let hay = description.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| hay.contains(w)))
        .map(|(name, _)| *name)
        .unwrap_or(OTHER_CATEGORY)
}

/// A remote service that maps free text to one of `vocabulary`.
pub trait Classifier {
    fn classify(&self, description: &str, vocabulary: &[&str]) -> Result<String>;
}

/// Suggests a category for `description`. Never fails.
pub fn categorize(description: &str, classifier: Option<&dyn Classifier>) -> String {
    let Some(classifier) = classifier else {
        return categorize_by_keywords(description).to_string();
    };
    let vocab = vocabulary();
    match classifier.classify(description, &vocab) {
        Ok(answer) => {
            let answer = answer.trim();
            if vocab.contains(&answer) {
                log::debug!("classifier suggested '{}' for '{}'", answer, description);
                return answer.to_string();
            }
            log::warn!(
                "classifier answered unknown category '{}', using keywords",
                answer
            );
        }
        Err(err) => log::warn!("classifier failed, using keywords: {:#}", err),
    }
    categorize_by_keywords(description).to_string()
}

/// Chat-completions classifier for OpenAI compatible endpoints.
pub struct OpenAiClassifier {
    http: reqwest::blocking::Client,
    config: ClassifierConfig,
}

impl OpenAiClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(anyhow!("Classifier API key is empty"));
        }
        Ok(Self {
            http: http_client()?,
            config,
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

impl Classifier for OpenAiClassifier {
    fn classify(&self, description: &str, vocabulary: &[&str]) -> Result<String> {
        let endpoint = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let system = format!(
            "You are a transaction categorizer. Given a transaction description, return only a single category name from this list: {}, {}. No explanation needed, just the category name.",
            vocabulary.join(", "),
            OTHER_CATEGORY
        );
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: system,
                },
                Message {
                    role: "user".to_string(),
                    content: description.to_string(),
                },
            ],
            temperature: 0.3,
            max_tokens: 10,
        };

        let response: ChatResponse = self
            .http
            .post(endpoint.as_str())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .with_context(|| format!("POST {endpoint} failed"))?
            .error_for_status()
            .with_context(|| format!("POST {endpoint} returned non-success status"))?
            .json()
            .with_context(|| format!("Failed to parse JSON response from {endpoint}"))?;

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| anyhow!("Classifier response had no choices"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Canned {
        answer: Result<&'static str, &'static str>,
        calls: Cell<usize>,
    }

    impl Canned {
        fn new(answer: Result<&'static str, &'static str>) -> Self {
            Self {
                answer,
                calls: Cell::new(0),
            }
        }
    }

    impl Classifier for Canned {
        fn classify(&self, _description: &str, vocabulary: &[&str]) -> Result<String> {
            assert!(vocabulary.contains(&"Meals Out"));
            self.calls.set(self.calls.get() + 1);
            self.answer
                .map(str::to_string)
                .map_err(|e| anyhow!(e))
        }
    }

    #[test]
    fn keyword_fallback_without_classifier() {
        assert_eq!(categorize("Lunch at restaurant", None), "Meals Out");
        assert_eq!(categorize("xyz unknown thing", None), "Other");
    }

    #[test]
    fn earlier_table_entries_win() {
        // "gas" is listed under both Transportation and Utilities.
        assert_eq!(categorize_by_keywords("GAS station"), "Transportation");
        assert_eq!(categorize_by_keywords("Monthly salary"), "Income");
        assert_eq!(categorize_by_keywords("Continente Matosinhos"), "Grocery Shopping");
    }

    #[test]
    fn accepts_known_answer() {
        let c = Canned::new(Ok(" Healthcare\n"));
        assert_eq!(categorize("lunch", Some(&c as &dyn Classifier)), "Healthcare");
        assert_eq!(c.calls.get(), 1);
    }

    #[test]
    fn unknown_answer_falls_back() {
        let c = Canned::new(Ok("Food"));
        assert_eq!(categorize("team lunch", Some(&c as &dyn Classifier)), "Meals Out");
    }

    #[test]
    fn error_falls_back() {
        let c = Canned::new(Err("insufficient_quota"));
        assert_eq!(categorize("uber to airport", Some(&c as &dyn Classifier)), "Transportation");
    }

    #[test]
    fn empty_key_is_rejected() {
        let cfg = ClassifierConfig {
            api_key: " ".into(),
            model: "gpt-3.5-turbo".into(),
            base_url: "https://api.openai.com/v1".into(),
        };
        assert!(OpenAiClassifier::new(cfg).is_err());
    }
}
