//! Validation error types

/// A structured error reported by a [`RuleValidator`](crate::validator::RuleValidator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleError {
    /// The record key the error belongs to.
    pub field: String,
    /// Human-readable validation error message.
    pub message: String,
    /// Short machine-readable code of the failed rule.
    pub code: &'static str,
}

impl RuleError {
    /// Creates a new rule error.
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: &'static str) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
        }
    }
}

impl std::fmt::Display for RuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.field, self.message, self.code)
    }
}

/// Rejection of [`Field::check_validity`](crate::field::Field::check_validity).
///
/// The same message is stored on the field itself, so presentation code can
/// read it from there instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct InvalidField {
    /// Result key of the field that failed.
    pub key: String,
    /// The error message now shown on the field.
    pub message: String,
}

impl InvalidField {
    /// Creates a new invalid field rejection.
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}
