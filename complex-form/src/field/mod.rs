//! Field: a single labeled input with its own validation rules.

mod state;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use log::{debug, trace, warn};

use crate::config::FieldConfig;
use crate::error::{ConfigError, InvalidField};
use crate::registry::FieldRegistry;
use crate::rules::{RuleSet, derive_rules};
use crate::signal::{Signal, SignalReceiver};
use crate::validator::{Record, RuleEngine, RuleValidator};

pub use state::{FieldEvent, FieldId, Validity};
use state::{FieldInner, MatchTarget};

/// A form field with reactive state.
///
/// `Field` is a cheap handle: clones share the value, the validation state
/// and the subscriber list. The configuration and the derived rule set are
/// fixed when the field is built.
///
/// # Example
///
/// ```
/// use complex_form::prelude::*;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), ConfigError> {
/// let email = Field::new(
///     FieldConfig::new(InputKind::Email)
///         .with_name("email")
///         .with_required("is required"),
/// )?;
///
/// email.input("jane@example.com");
/// let record = email.check_validity().await.expect("valid email");
/// assert_eq!(record, Record::new("email", "jane@example.com"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Field {
    id: FieldId,
    config: Arc<FieldConfig>,
    rules: Arc<RuleSet>,
    validator: Arc<dyn RuleValidator>,
    inner: Arc<RwLock<FieldInner>>,
    focus_requested: Arc<AtomicBool>,
    changes: Signal<FieldEvent>,
}

impl Field {
    /// Builds a field validated by the default [`RuleEngine`].
    pub fn new(config: FieldConfig) -> Result<Self, ConfigError> {
        Self::with_validator(config, Arc::new(RuleEngine))
    }

    /// Builds a field validated by `validator`.
    ///
    /// Fails if the configuration is inconsistent.
    pub fn with_validator(
        config: FieldConfig,
        validator: Arc<dyn RuleValidator>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let rules = derive_rules(&config);
        let inner = FieldInner {
            value: config.value.clone().unwrap_or_default(),
            ..Default::default()
        };

        Ok(Self {
            id: FieldId::new(),
            config: Arc::new(config),
            rules: Arc::new(rules),
            validator,
            inner: Arc::new(RwLock::new(inner)),
            focus_requested: Arc::new(AtomicBool::new(false)),
            changes: Signal::new(),
        })
    }

    /// Get the unique ID for this field
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// The configuration the field was built from.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// The rule set derived from the configuration.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The field name, if set and non-empty.
    pub fn name(&self) -> Option<&str> {
        self.config.name()
    }

    /// Display label used in messages.
    pub fn field_label(&self) -> String {
        self.config.field_label()
    }

    /// Key of this field in a form's merged values.
    pub fn result_key(&self) -> String {
        self.config.result_key()
    }

    /// Whether two handles refer to the same field.
    pub fn same_field(&self, other: &Field) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // -------------------------------------------------------------------------
    // Value
    // -------------------------------------------------------------------------

    /// Get the current value
    pub fn value(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.value.clone())
            .unwrap_or_default()
    }

    /// Replace the value programmatically. Emits no change signal.
    pub fn set_value(&self, value: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.value = value.into();
        }
    }

    /// Apply a user edit and emit [`FieldEvent::Change`].
    pub fn input(&self, value: impl Into<String>) {
        let value = value.into();
        self.set_value(value.clone());
        self.changes.emit(FieldEvent::Change(value));
    }

    /// Reset the value to empty. Validation state is left untouched.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.value.clear();
        }
    }

    /// The clear button: empties the value and requests focus.
    pub fn clear_action(&self) {
        self.clear();
        self.focus();
    }

    /// Subscribe to change signals.
    pub fn subscribe(&self) -> SignalReceiver<FieldEvent> {
        self.changes.subscribe()
    }

    // -------------------------------------------------------------------------
    // Focus control
    // -------------------------------------------------------------------------

    /// Request focus for this field
    pub fn focus(&self) {
        self.focus_requested.store(true, Ordering::SeqCst);
    }

    /// Check and clear the focus request (called by the rendering layer)
    pub fn take_focus_request(&self) -> bool {
        self.focus_requested.swap(false, Ordering::SeqCst)
    }

    // -------------------------------------------------------------------------
    // Presentation state
    // -------------------------------------------------------------------------

    /// Outcome of the last validation.
    pub fn validity(&self) -> Validity {
        self.inner
            .read()
            .map(|guard| guard.validity)
            .unwrap_or_default()
    }

    /// Whether the last validation failed.
    pub fn is_invalid(&self) -> bool {
        self.validity() == Validity::Invalid
    }

    /// Message of the last failed validation, if the field is invalid.
    pub fn error(&self) -> Option<String> {
        self.inner
            .read()
            .map(|guard| guard.error.clone())
            .unwrap_or(None)
    }

    fn mark_invalid(&self, message: String) -> InvalidField {
        if let Ok(mut guard) = self.inner.write() {
            guard.validity = Validity::Invalid;
            guard.error = Some(message.clone());
        }
        InvalidField::new(self.result_key(), message)
    }

    fn mark_valid(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.validity = Validity::Valid;
            guard.error = None;
        }
    }

    // -------------------------------------------------------------------------
    // Registration & validation
    // -------------------------------------------------------------------------

    /// Resolve the match attribute against the fields of the same form.
    ///
    /// Fields without a match attribute register trivially. Nothing is
    /// written to the field when resolution fails.
    pub fn register(&self, registry: &FieldRegistry) -> Result<(), ConfigError> {
        let resolved = self.resolve_match(registry)?;
        self.bind_match(resolved);
        Ok(())
    }

    /// Look up the match target without binding it.
    pub(crate) fn resolve_match(
        &self,
        registry: &FieldRegistry,
    ) -> Result<Option<MatchTarget>, ConfigError> {
        let Some(name) = self.config.match_target() else {
            return Ok(None);
        };

        let target = registry
            .get(name)
            .ok_or_else(|| ConfigError::match_target_not_found(name))?;

        debug!(
            "Field {} matches '{}' ({})",
            self.field_label(),
            name,
            target.id()
        );

        Ok(Some(MatchTarget {
            label: target.field_label(),
            state: Arc::downgrade(&target.inner),
        }))
    }

    /// Store a target returned by [`Field::resolve_match`].
    pub(crate) fn bind_match(&self, target: Option<MatchTarget>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.match_target = target;
        }
    }

    /// Label of the resolved match target, if any.
    pub fn match_label(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.match_target.as_ref().map(|t| t.label.clone()))
    }

    /// Validate the current value.
    ///
    /// Resolves with `{result_key: value}`. On rejection the field is marked
    /// invalid and its error message is set to the first failure.
    pub async fn check_validity(&self) -> Result<Record, InvalidField> {
        let value = self.value();
        let record = Record::new(self.rules.key(), value.clone());

        trace!("Validating field {} ({})", self.field_label(), self.id);
        let errors = self.validator.validate(&record, &self.rules).await;

        if let Some(first) = errors.into_iter().next() {
            return Err(self.mark_invalid(first.message));
        }

        if let Some(message) = self.match_failure(&value) {
            return Err(self.mark_invalid(message));
        }

        self.mark_valid();
        Ok(Record::new(self.result_key(), value))
    }

    /// Compare `value` against the live value of the match target.
    fn match_failure(&self, value: &str) -> Option<String> {
        let target = self
            .inner
            .read()
            .ok()
            .and_then(|guard| guard.match_target.clone());

        let Some(target) = target else {
            let name = self.config.match_target()?;
            warn!(
                "Field {} matches '{}' but was never registered with a form",
                self.field_label(),
                name
            );
            return Some(format!("{} do not match {}", self.field_label(), name));
        };

        let mismatch = format!("{} do not match {}", self.field_label(), target.label);

        let Some(state) = target.state.upgrade() else {
            warn!("Match target {} of {} was dropped", target.label, self.field_label());
            return Some(mismatch);
        };
        let target_value = state
            .read()
            .map(|guard| guard.value.clone())
            .unwrap_or_default();

        if target_value == value {
            None
        } else {
            Some(mismatch)
        }
    }
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("rules", &self.rules)
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
