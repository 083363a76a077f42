//! Name lookup for the fields of one form.

use std::collections::HashMap;

use crate::field::Field;

/// Maps field names to fields.
///
/// Built by the form from the fields it discovered at mount and handed to
/// each field so it can resolve its match attribute. Unnamed fields are not
/// indexed; when two fields share a name, the first one wins.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    by_name: HashMap<String, Field>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes `fields` in order.
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = &'a Field>) -> Self {
        let mut registry = Self::new();
        for field in fields {
            registry.insert(field.clone());
        }
        registry
    }

    /// Indexes `field` unless its name is already taken. Returns whether it was added.
    pub fn insert(&mut self, field: Field) -> bool {
        let Some(name) = field.name().map(str::to_string) else {
            return false;
        };
        if self.by_name.contains_key(&name) {
            log::debug!("Field name '{}' already registered, keeping the first", name);
            return false;
        }
        self.by_name.insert(name, field);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.by_name.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldConfig, InputKind};

    fn field(name: Option<&str>) -> Field {
        let mut config = FieldConfig::new(InputKind::Text);
        config.name = name.map(str::to_string);
        Field::new(config).unwrap()
    }

    #[test]
    fn test_unnamed_fields_are_skipped() {
        let fields = [field(None), field(Some("")), field(Some("a"))];
        let registry = FieldRegistry::from_fields(&fields);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("a"));
    }

    #[test]
    fn test_first_name_wins() {
        let fields = [field(Some("a")), field(Some("a"))];
        let registry = FieldRegistry::from_fields(&fields);
        assert_eq!(registry.len(), 1);
        assert!(registry.get("a").unwrap().same_field(&fields[0]));
    }
}
