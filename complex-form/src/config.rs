//! Field configuration.
//!
//! A [`FieldConfig`] is the complete, immutable attribute set of a field. A
//! field's behaviour (its rules, its labels, its result key) is a pure
//! function of this struct, so it is checked once, eagerly, when the field is
//! built rather than observed live.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Semantic type of an input.
///
/// Only `email` and `password` carry validation rules; every other type is
/// kept verbatim so it can still act as a label and result key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InputKind {
    /// Plain text (the default).
    #[default]
    Text,
    /// An email address.
    Email,
    /// A password.
    Password,
    /// Any other input type, e.g. `tel` or `search`.
    Other(String),
}

impl InputKind {
    /// The type name as written in the `type` attribute.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for InputKind {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "text" => Self::Text,
            "email" => Self::Email,
            "password" => Self::Password,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for InputKind {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<InputKind> for String {
    fn from(kind: InputKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration of a single field.
///
/// Attribute names follow the host markup when deserialized
/// (`required-label`, `aria-type`, `match`, `field`).
///
/// # Example
///
/// ```
/// use complex_form::config::{FieldConfig, InputKind};
///
/// let config = FieldConfig::new(InputKind::Password)
///     .with_name("password")
///     .with_required("is required")
///     .with_field_label("Password");
///
/// assert_eq!(config.field_label(), "Password");
/// assert_eq!(config.result_key(), "password");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct FieldConfig {
    /// Placeholder text.
    pub placeholder: Option<String>,

    /// Input type.
    #[serde(rename = "type")]
    pub kind: InputKind,

    /// Overrides `kind` when set.
    pub aria_type: Option<InputKind>,

    /// Initial value.
    pub value: Option<String>,

    /// Whether the input is disabled. Has no effect on validation.
    pub disabled: bool,

    /// Whether an empty value is rejected.
    pub required: bool,

    /// Suffix appended to the label in the required message, e.g. `"is required"`.
    #[serde(rename = "required-label")]
    pub required_message: Option<String>,

    /// Field name, the default result key.
    pub name: Option<String>,

    /// Autocomplete hint passed through to the rendering layer.
    pub autocomplete: Option<String>,

    /// Name of a sibling field whose value this field must equal.
    #[serde(rename = "match")]
    pub match_target: Option<String>,

    /// Display name used in messages.
    #[serde(rename = "field")]
    pub field_label: Option<String>,
}

impl FieldConfig {
    /// Creates a config for the given input type with every other attribute unset.
    pub fn new(kind: impl Into<InputKind>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Parses a config from a JSON attribute object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds a config from raw `(attribute, value)` pairs.
    ///
    /// Boolean attributes (`required`, `disabled`) are set by presence, whatever
    /// their value. Unknown attributes are ignored.
    pub fn from_attributes<I, K, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();
        for (name, value) in attributes {
            let value = value.into();
            match name.as_ref().to_ascii_lowercase().as_str() {
                "placeholder" => config.placeholder = Some(value),
                "type" => config.kind = InputKind::from(value),
                "aria-type" => config.aria_type = Some(InputKind::from(value)),
                "value" => config.value = Some(value),
                "disabled" => config.disabled = true,
                "required" => config.required = true,
                "required-label" => config.required_message = Some(value),
                "name" => config.name = Some(value),
                "autocomplete" => config.autocomplete = Some(value),
                "match" => config.match_target = Some(value),
                "field" => config.field_label = Some(value),
                other => log::trace!("Ignoring unknown field attribute: {}", other),
            }
        }
        config
    }

    /// Sets the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets the `aria-type` override.
    pub fn with_aria_type(mut self, kind: impl Into<InputKind>) -> Self {
        self.aria_type = Some(kind.into());
        self
    }

    /// Sets the initial value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Marks the input disabled.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Marks the field required, with the suffix used in its message.
    pub fn with_required(mut self, message: impl Into<String>) -> Self {
        self.required = true;
        self.required_message = Some(message.into());
        self
    }

    /// Sets the field name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the autocomplete hint.
    pub fn with_autocomplete(mut self, autocomplete: impl Into<String>) -> Self {
        self.autocomplete = Some(autocomplete.into());
        self
    }

    /// Requires this field to equal the sibling field named `name`.
    pub fn with_match(mut self, name: impl Into<String>) -> Self {
        self.match_target = Some(name.into());
        self
    }

    /// Overrides the display label.
    pub fn with_field_label(mut self, label: impl Into<String>) -> Self {
        self.field_label = Some(label.into());
        self
    }

    /// The effective input type (`aria-type` wins over `type`).
    pub fn kind(&self) -> &InputKind {
        self.aria_type.as_ref().unwrap_or(&self.kind)
    }

    /// The field name, if set and non-empty.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// The match target name, if set and non-empty.
    pub fn match_target(&self) -> Option<&str> {
        self.match_target.as_deref().filter(|name| !name.is_empty())
    }

    /// Display label: the `field` attribute, else the name, else the type.
    pub fn field_label(&self) -> String {
        self.field_label
            .as_deref()
            .filter(|label| !label.is_empty())
            .or_else(|| self.name())
            .unwrap_or_else(|| self.kind().as_str())
            .to_string()
    }

    /// Key of this field in a form's merged values: the name, else the type.
    pub fn result_key(&self) -> String {
        self.name()
            .unwrap_or_else(|| self.kind().as_str())
            .to_string()
    }

    /// Checks the attribute pairings that cannot be expressed by the type system.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.required && self.required_message.is_none() {
            return Err(ConfigError::missing_required_message(self.field_label()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_falls_back_to_name_then_type() {
        let config = FieldConfig::new(InputKind::Email);
        assert_eq!(config.field_label(), "email");

        let config = config.with_name("work_email");
        assert_eq!(config.field_label(), "work_email");

        let config = config.with_field_label("Work email");
        assert_eq!(config.field_label(), "Work email");
        assert_eq!(config.result_key(), "work_email");
    }

    #[test]
    fn test_empty_name_is_unset() {
        let config = FieldConfig::new(InputKind::Text).with_name("");
        assert_eq!(config.name(), None);
        assert_eq!(config.result_key(), "text");
    }

    #[test]
    fn test_aria_type_overrides_type() {
        let config = FieldConfig::new(InputKind::Text).with_aria_type("password");
        assert_eq!(config.kind(), &InputKind::Password);
        assert_eq!(config.result_key(), "password");
    }

    #[test]
    fn test_required_without_message_is_rejected() {
        let config = FieldConfig {
            required: true,
            ..FieldConfig::new(InputKind::Text)
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingRequiredMessage { field }) if field == "text"
        ));
    }

    #[test]
    fn test_from_attributes_presence_flags() {
        let config = FieldConfig::from_attributes([
            ("type", "email"),
            ("name", "email"),
            ("required", ""),
            ("required-label", "is required"),
            ("disabled", "false"),
            ("data-test", "ignored"),
        ]);
        assert_eq!(config.kind(), &InputKind::Email);
        assert!(config.required);
        assert!(config.disabled);
        assert_eq!(config.required_message.as_deref(), Some("is required"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json() {
        let config = FieldConfig::from_json(
            r#"{"type": "password", "name": "confirm", "match": "password", "field": "Confirmation"}"#,
        )
        .unwrap();
        assert_eq!(config.kind(), &InputKind::Password);
        assert_eq!(config.match_target(), Some("password"));
        assert_eq!(config.field_label(), "Confirmation");
        assert!(!config.required);
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        assert!(matches!(
            FieldConfig::from_json("{\"type\": 3}"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_kind_is_kept() {
        let kind = InputKind::from("TEL");
        assert_eq!(kind, InputKind::Other("tel".into()));
        assert_eq!(kind.to_string(), "tel");
    }
}
