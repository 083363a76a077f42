//! Configuration errors raised while building fields and mounting forms.

/// Fatal setup error.
///
/// These surface while a form is being assembled, never during validation.
/// Nothing retries them.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A field is `required` but has no message suffix to build its message from.
    #[error("field '{field}' is required but has no \"required-label\" attribute")]
    MissingRequiredMessage { field: String },

    /// A `match` attribute names a field that is not part of the same form.
    #[error("field with name '{name}' was not found")]
    MatchTargetNotFound { name: String },

    /// The form has no descendant button of type submit.
    #[error("form should contain a submit button")]
    MissingSubmitControl,

    /// A field configuration could not be parsed.
    #[error("invalid field configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a missing required message error.
    pub fn missing_required_message(field: impl Into<String>) -> Self {
        Self::MissingRequiredMessage {
            field: field.into(),
        }
    }

    /// Creates a match target not found error.
    pub fn match_target_not_found(name: impl Into<String>) -> Self {
        Self::MatchTargetNotFound { name: name.into() }
    }
}
