use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{RwLock, Weak};

/// Unique identifier for a Field instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(usize);

impl FieldId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__field_{}", self.0)
    }
}

/// Signals emitted by a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// The user edited the value. Carries the new value.
    Change(String),
}

/// Last validation outcome of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validity {
    /// Never validated.
    #[default]
    Pristine,
    Valid,
    Invalid,
}

/// Resolved match target. Does not keep the target alive.
#[derive(Debug, Clone)]
pub(crate) struct MatchTarget {
    pub(crate) label: String,
    pub(crate) state: Weak<RwLock<FieldInner>>,
}

/// Mutable state shared by every clone of a Field
#[derive(Debug, Default)]
pub(crate) struct FieldInner {
    /// Current text value
    pub(crate) value: String,
    /// Outcome of the last validation
    pub(crate) validity: Validity,
    /// Message of the last failed validation
    pub(crate) error: Option<String>,
    /// Set when the field is registered with a form
    pub(crate) match_target: Option<MatchTarget>,
}
