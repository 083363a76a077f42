//! The validator boundary.
//!
//! A field never evaluates its own rules. It hands a single-key [`Record`] and
//! its [`RuleSet`] to a [`RuleValidator`] and only looks at the errors that
//! come back. [`RuleEngine`] is the built-in implementation.

use async_trait::async_trait;

use crate::error::RuleError;
use crate::rules::RuleSet;

/// A single `key -> value` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    pub key: String,
    pub value: String,
}

impl Record {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Checks a record against a rule set keyed identically.
///
/// An empty result means the record is valid. Implementations may suspend,
/// e.g. to consult a remote service; callers wait for them without a timeout.
#[async_trait]
pub trait RuleValidator: Send + Sync {
    /// Validates `record` against `rules`.
    async fn validate(&self, record: &Record, rules: &RuleSet) -> Vec<RuleError>;
}

/// The default validator: evaluates every rule in order and reports every failure.
///
/// A record whose key differs from the rule set key is treated as an absent
/// (empty) value.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine;

impl RuleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous evaluation, shared by the async entry point.
    pub fn check(&self, record: &Record, rules: &RuleSet) -> Vec<RuleError> {
        let value = if record.key == rules.key() {
            record.value.as_str()
        } else {
            ""
        };

        rules
            .rules()
            .iter()
            .filter_map(|rule| {
                rule.check(value)
                    .map(|message| RuleError::new(rules.key(), message, rule.code()))
            })
            .collect()
    }
}

#[async_trait]
impl RuleValidator for RuleEngine {
    async fn validate(&self, record: &Record, rules: &RuleSet) -> Vec<RuleError> {
        self.check(record, rules)
    }
}
