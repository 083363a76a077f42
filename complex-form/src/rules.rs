//! Rule derivation.
//!
//! Rules are derived once from a [`FieldConfig`] and never change afterwards.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{FieldConfig, InputKind};

/// Message of the rule attached to `email` inputs.
pub const EMAIL_MESSAGE: &str = "This email is invalid";

/// Message of the rule attached to `password` inputs.
pub const PASSWORD_MESSAGE: &str =
    "Must be greater than 5 characters and lower than 20 characters";

/// Accepted password lengths, inclusive.
pub const PASSWORD_LENGTH: (usize, usize) = (5, 20);

static PASSWORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let (min, max) = PASSWORD_LENGTH;
    Regex::new(&format!("(?s)^.{{{min},{max}}}$")).expect("password pattern is valid")
});

/// A single constraint on a value.
#[derive(Debug, Clone)]
pub enum Rule {
    /// The value must not be empty.
    Required { message: String },
    /// The value must be a syntactically valid email address. Empty fails too.
    Email { message: String },
    /// The value must match `pattern`. Empty values fail only when `required`.
    Pattern {
        pattern: Regex,
        required: bool,
        message: String,
    },
}

impl Rule {
    /// Creates a presence rule.
    pub fn required(message: impl Into<String>) -> Self {
        Self::Required {
            message: message.into(),
        }
    }

    /// Creates an email rule.
    pub fn email(message: impl Into<String>) -> Self {
        Self::Email {
            message: message.into(),
        }
    }

    /// Creates a pattern rule from a compiled regex.
    pub fn pattern(pattern: Regex, required: bool, message: impl Into<String>) -> Self {
        Self::Pattern {
            pattern,
            required,
            message: message.into(),
        }
    }

    /// The rule attached to `password` inputs.
    pub fn password() -> Self {
        Self::pattern(PASSWORD_PATTERN.clone(), true, PASSWORD_MESSAGE)
    }

    /// Short code identifying the kind of rule.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Required { .. } => "required",
            Self::Email { .. } => "email",
            Self::Pattern { .. } => "pattern",
        }
    }

    /// The message reported when the rule fails.
    pub fn message(&self) -> &str {
        match self {
            Self::Required { message }
            | Self::Email { message }
            | Self::Pattern { message, .. } => message,
        }
    }

    /// Checks `value`, returning the failure message if the rule is violated.
    pub fn check(&self, value: &str) -> Option<&str> {
        let passed = match self {
            Self::Required { .. } => !value.is_empty(),
            Self::Email { .. } => {
                !value.is_empty() && email_address::EmailAddress::is_valid(value)
            }
            Self::Pattern {
                pattern, required, ..
            } => {
                if value.is_empty() {
                    !required
                } else {
                    pattern.is_match(value)
                }
            }
        };
        if passed { None } else { Some(self.message()) }
    }
}

/// Ordered rules for one record key.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    key: String,
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates an empty rule set for `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            rules: Vec::new(),
        }
    }

    /// Appends a rule.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Appends a rule, builder style.
    pub fn with(mut self, rule: Rule) -> Self {
        self.push(rule);
        self
    }

    /// The key the rules apply to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The rules, in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Derives the rule set of a field from its configuration.
///
/// The set is keyed by the field label. The match attribute adds no rule here;
/// it is resolved against sibling fields when the field is registered.
pub fn derive_rules(config: &FieldConfig) -> RuleSet {
    let mut rules = RuleSet::new(config.field_label());

    if config.required {
        let suffix = config.required_message.as_deref().unwrap_or_default();
        rules.push(Rule::required(format!("{} {}", config.field_label(), suffix)));
    }

    match config.kind() {
        InputKind::Email => rules.push(Rule::email(EMAIL_MESSAGE)),
        InputKind::Password => rules.push(Rule::password()),
        _ => {}
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_has_no_rules() {
        let rules = derive_rules(&FieldConfig::new(InputKind::Text).with_name("nickname"));
        assert_eq!(rules.key(), "nickname");
        assert!(rules.is_empty());
    }

    #[test]
    fn test_required_message_uses_label() {
        let config = FieldConfig::new(InputKind::Text)
            .with_name("username")
            .with_field_label("Username")
            .with_required("is required");
        let rules = derive_rules(&config);
        assert_eq!(rules.key(), "Username");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.rules()[0].message(), "Username is required");
    }

    #[test]
    fn test_rule_order_is_required_then_type() {
        let config = FieldConfig::new(InputKind::Email).with_required("is required");
        let codes: Vec<_> = derive_rules(&config).rules().iter().map(Rule::code).collect();
        assert_eq!(codes, ["required", "email"]);
    }

    #[test]
    fn test_email_rule() {
        let rule = Rule::email(EMAIL_MESSAGE);
        assert_eq!(rule.check("jane@example.com"), None);
        assert_eq!(rule.check("jane.example.com"), Some(EMAIL_MESSAGE));
        assert_eq!(rule.check(""), Some(EMAIL_MESSAGE));
    }

    #[test]
    fn test_password_length_bounds() {
        let rule = Rule::password();
        assert_eq!(rule.check(&"a".repeat(4)), Some(PASSWORD_MESSAGE));
        assert_eq!(rule.check(&"a".repeat(5)), None);
        assert_eq!(rule.check(&"a".repeat(20)), None);
        assert_eq!(rule.check(&"a".repeat(21)), Some(PASSWORD_MESSAGE));
        assert_eq!(rule.check(""), Some(PASSWORD_MESSAGE));
    }

    #[test]
    fn test_password_counts_characters_not_bytes() {
        assert_eq!(Rule::password().check("ééééé"), None);
        assert_eq!(Rule::password().check("pass\nword"), None);
    }

    #[test]
    fn test_optional_pattern_accepts_empty() {
        let rule = Rule::pattern(Regex::new("^[0-9]+$").unwrap(), false, "digits only");
        assert_eq!(rule.check(""), None);
        assert_eq!(rule.check("123"), None);
        assert_eq!(rule.check("12a"), Some("digits only"));
    }

    #[test]
    fn test_whitespace_counts_as_present() {
        assert_eq!(Rule::required("x").check(" "), None);
    }
}
