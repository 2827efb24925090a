//! # Response Table
//!
//! File: cli/src/session/responses.rs
//!
//! ## Overview
//!
//! The chatbot's entire knowledge: a fixed mapping from a question to its
//! answer. Lookups are exact after normalization (surrounding whitespace
//! trimmed, case folded), so `"  Phishing  "` and `"PHISHING"` find the same
//! entry while `"phish"` finds nothing.
//!
//! The table is built once, before the session starts, and is never mutated
//! afterwards. Construction rejects empty keys and keys that collide after
//! normalization.
//!
use crate::core::error::GuardianError;
use std::collections::HashMap;

/// The questions CyberGuardian knows out of the box, with their answers.
pub const BUILTIN_RESPONSES: &[(&str, &str)] = &[
    (
        "how are you",
        "I'm a bot, but I'm fully operational and ready to help you stay safe online!",
    ),
    (
        "what's your purpose",
        "My mission is to educate and empower you with cybersecurity knowledge.",
    ),
    (
        "what can i ask you about",
        "You can ask me about password safety, phishing, safe browsing, and general cybersecurity tips.",
    ),
    (
        "password safety",
        "Use long, unique passwords for each account. Consider using a password manager.",
    ),
    (
        "phishing",
        "Be cautious of emails asking for personal info. Always verify links before clicking.",
    ),
    (
        "safe browsing",
        "Avoid clicking unknown links, use HTTPS websites, and keep your browser up to date.",
    ),
];

/// Reduces a question to its lookup key: trimmed and lowercased.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Immutable question-to-answer table keyed by normalized question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseTable {
    entries: HashMap<String, String>,
}

impl ResponseTable {
    /// Builds a table from `(question, answer)` pairs.
    ///
    /// Questions are normalized before insertion. Returns
    /// `GuardianError::EmptyResponseKey` for a blank question and
    /// `GuardianError::DuplicateResponseKey` when two questions normalize to
    /// the same key.
    pub fn new<I, Q, A>(pairs: I) -> Result<Self, GuardianError>
    where
        I: IntoIterator<Item = (Q, A)>,
        Q: AsRef<str>,
        A: Into<String>,
    {
        let mut entries = HashMap::new();
        for (question, answer) in pairs {
            let key = normalize(question.as_ref());
            if key.is_empty() {
                return Err(GuardianError::EmptyResponseKey);
            }
            if entries.contains_key(&key) {
                return Err(GuardianError::DuplicateResponseKey { key });
            }
            entries.insert(key, answer.into());
        }
        Ok(Self { entries })
    }

    /// The built-in table with `overrides` applied on top.
    ///
    /// An override whose key matches a built-in question (after
    /// normalization) replaces that answer; any other override adds a new
    /// question. Overrides that collide with each other are rejected.
    pub fn with_overrides<'a, I>(overrides: I) -> Result<Self, GuardianError>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        // Validate the overrides on their own first so collisions between them surface.
        let extra = Self::new(overrides.into_iter().map(|(q, a)| (q.as_str(), a.clone())))?;
        let mut table = Self::default();
        table.entries.extend(extra.entries);
        Ok(table)
    }

    /// Looks up the answer for a raw user question.
    pub fn lookup(&self, question: &str) -> Option<&str> {
        self.entries.get(&normalize(question)).map(String::as_str)
    }
}

impl Default for ResponseTable {
    fn default() -> Self {
        let entries = BUILTIN_RESPONSES
            .iter()
            .map(|(q, a)| (normalize(q), (*a).to_string()))
            .collect();
        Self { entries }
    }
}
