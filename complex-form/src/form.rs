//! Form: aggregates the validation of its fields into one outcome.
//!
//! The set of fields is a snapshot taken at mount. Fields added to or
//! removed from the tree afterwards are not tracked; mount again to pick
//! them up.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use log::{debug, warn};
use tokio::task::JoinHandle;

use crate::error::{ConfigError, InvalidField};
use crate::field::Field;
use crate::registry::FieldRegistry;
use crate::signal::{Signal, SignalReceiver};
use crate::tree::{Button, Node};
use crate::validator::Record;

/// Merged `result_key -> value` mapping of a successful submission.
pub type FormValues = BTreeMap<String, String>;

/// Outcome of a submission, also emitted as a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Every field resolved.
    Success(FormValues),
    /// At least one field rejected. Details live on the fields themselves.
    Failure,
}

impl FormEvent {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The merged values, if the submission succeeded.
    pub fn values(&self) -> Option<&FormValues> {
        match self {
            Self::Success(values) => Some(values),
            Self::Failure => None,
        }
    }
}

/// State shared between the form and its submit listener.
#[derive(Debug)]
struct FormShared {
    fields: Vec<Field>,
    events: Signal<FormEvent>,
}

impl FormShared {
    async fn submit(&self) -> FormEvent {
        debug!("Submitting form with {} fields", self.fields.len());

        // All validations start before any is awaited, and all of them
        // settle even when one fails, so every field updates its own state.
        let outcomes = join_all(self.fields.iter().map(|field| field.check_validity())).await;

        let event = merge(outcomes);
        debug!("Form submission finished: success={}", event.is_success());
        self.events.emit(event.clone());
        event
    }
}

/// Combines field outcomes. Later fields overwrite earlier ones on key collision.
fn merge(outcomes: Vec<Result<Record, InvalidField>>) -> FormEvent {
    let mut values = FormValues::new();
    let mut failed = 0;

    for outcome in outcomes {
        match outcome {
            Ok(record) => {
                values.insert(record.key, record.value);
            }
            Err(invalid) => {
                debug!("Field '{}' rejected: {}", invalid.key, invalid.message);
                failed += 1;
            }
        }
    }

    if failed == 0 {
        FormEvent::Success(values)
    } else {
        FormEvent::Failure
    }
}

/// Finds the first submit button in document order.
fn resolve_submit_control(root: &Node) -> Result<Button, ConfigError> {
    root.buttons()
        .into_iter()
        .find(|button| button.is_submit())
        .cloned()
        .ok_or(ConfigError::MissingSubmitControl)
}

/// A mounted form.
///
/// # Example
///
/// ```
/// use complex_form::prelude::*;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), ConfigError> {
/// let name = Field::new(
///     FieldConfig::new(InputKind::Text)
///         .with_name("name")
///         .with_required("is required"),
/// )?;
/// let tree = Node::element("div", vec![name.clone().into(), Button::submit("Send").into()]);
///
/// let form = Form::mount(&tree)?;
/// assert_eq!(form.submit().await, FormEvent::Failure);
/// assert_eq!(name.error().as_deref(), Some("name is required"));
///
/// name.input("Ada");
/// assert!(form.submit().await.is_success());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Form {
    shared: Arc<FormShared>,
    registry: FieldRegistry,
    submit_control: Button,
    listener: Option<JoinHandle<()>>,
}

impl Form {
    /// Mounts a form on `root`.
    ///
    /// Discovers every descendant field, resolves match attributes through a
    /// name registry, and attaches a click listener to the first submit
    /// button. Fails if a match target is missing or there is no submit
    /// button.
    ///
    /// The listener is a Tokio task; outside a runtime none is attached and
    /// [`Form::submit`] must be called directly.
    pub fn mount(root: &Node) -> Result<Self, ConfigError> {
        let fields = root.fields();
        let registry = FieldRegistry::from_fields(&fields);
        debug!(
            "Discovered {} fields ({} named)",
            fields.len(),
            registry.len()
        );

        // Resolve everything before touching any field, so a failed mount
        // leaves no bindings behind.
        let targets = fields
            .iter()
            .map(|field| field.resolve_match(&registry))
            .collect::<Result<Vec<_>, _>>()?;
        let submit_control = resolve_submit_control(root)?;

        for (field, target) in fields.iter().zip(targets) {
            field.bind_match(target);
        }

        let shared = Arc::new(FormShared {
            fields,
            events: Signal::new(),
        });
        let listener = attach_listener(&shared, &submit_control);

        Ok(Self {
            shared,
            registry,
            submit_control,
            listener,
        })
    }

    /// The fields discovered at mount, in document order.
    pub fn fields(&self) -> &[Field] {
        &self.shared.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.registry.get(name)
    }

    /// Name lookup built at mount.
    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// The submit button the listener is attached to.
    pub fn submit_control(&self) -> &Button {
        &self.submit_control
    }

    /// Whether a click listener is attached.
    pub fn is_listening(&self) -> bool {
        self.listener.is_some()
    }

    /// Subscribe to submission outcomes.
    pub fn subscribe(&self) -> SignalReceiver<FormEvent> {
        self.shared.events.subscribe()
    }

    /// Validates every field concurrently and emits the outcome.
    ///
    /// Waits for every field; there is no timeout, so a validator that never
    /// settles stalls the submission.
    pub async fn submit(&self) -> FormEvent {
        self.shared.submit().await
    }

    /// Clears every field. Validation state is kept.
    pub fn reset(&self) {
        for field in self.fields() {
            field.clear();
        }
    }

    /// Detaches the click listener. Clicks after this are ignored.
    pub fn unmount(&mut self) {
        if let Some(listener) = self.listener.take() {
            debug!("Detaching submit listener");
            listener.abort();
        }
    }
}

impl Drop for Form {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn attach_listener(shared: &Arc<FormShared>, button: &Button) -> Option<JoinHandle<()>> {
    let runtime = match tokio::runtime::Handle::try_current() {
        Ok(runtime) => runtime,
        Err(_) => {
            warn!("No Tokio runtime, submit listener not attached");
            return None;
        }
    };

    let mut clicks = button.subscribe();
    let shared = Arc::clone(shared);
    Some(runtime.spawn(async move {
        while clicks.recv().await.is_some() {
            shared.submit().await;
        }
    }))
}
