//! Declarative form fields and a form container that aggregates their
//! asynchronous validation into a single outcome.
//!
//! A [`Field`](field::Field) derives its rules from its
//! [`FieldConfig`](config::FieldConfig) and validates itself through an
//! opaque [`RuleValidator`](validator::RuleValidator). A
//! [`Form`](form::Form) discovers the fields of an element tree at mount,
//! validates all of them concurrently on submit, and reports either the
//! merged values or a bare failure.

pub mod config;
pub mod error;
pub mod field;
pub mod form;
pub mod registry;
pub mod rules;
pub mod signal;
pub mod tree;
pub mod validator;

pub mod prelude {
    pub use crate::config::{FieldConfig, InputKind};
    pub use crate::error::{ConfigError, InvalidField, RuleError};
    pub use crate::field::{Field, FieldEvent, FieldId, Validity};
    pub use crate::form::{Form, FormEvent, FormValues};
    pub use crate::registry::FieldRegistry;
    pub use crate::rules::{Rule, RuleSet};
    pub use crate::tree::{Button, ButtonType, Node};
    pub use crate::validator::{Record, RuleEngine, RuleValidator};
}
