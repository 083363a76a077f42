//! The element tree a form is mounted on.
//!
//! Only what discovery needs is modeled: fields, buttons and plain
//! containers. Rendering is somebody else's job.

use crate::field::Field;
use crate::signal::{Signal, SignalReceiver};

/// The `type` of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonType {
    #[default]
    Submit,
    Reset,
    Button,
}

/// A clickable control. Clones share the click listeners.
#[derive(Debug, Clone)]
pub struct Button {
    label: String,
    kind: ButtonType,
    clicks: Signal<()>,
}

impl Button {
    pub fn new(kind: ButtonType, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind,
            clicks: Signal::new(),
        }
    }

    /// A submit button.
    pub fn submit(label: impl Into<String>) -> Self {
        Self::new(ButtonType::Submit, label)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> ButtonType {
        self.kind
    }

    pub fn is_submit(&self) -> bool {
        self.kind == ButtonType::Submit
    }

    /// Dispatch a click to every attached listener.
    pub fn click(&self) {
        self.clicks.emit(());
    }

    /// Attach a click listener. Dropping the receiver detaches it.
    pub fn subscribe(&self) -> SignalReceiver<()> {
        self.clicks.subscribe()
    }

    /// Number of attached click listeners.
    pub fn listener_count(&self) -> usize {
        self.clicks.subscriber_count()
    }
}

/// A node of the element tree.
#[derive(Debug, Clone)]
pub enum Node {
    Field(Field),
    Button(Button),
    /// Any other element, e.g. a `div` or a fieldset.
    Element { tag: String, children: Vec<Node> },
}

impl Node {
    pub fn element(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Element {
            tag: tag.into(),
            children,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Self::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Visits this node and all of its descendants in document order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// All fields in document order.
    pub fn fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        self.walk(&mut |node| {
            if let Node::Field(field) = node {
                fields.push(field.clone());
            }
        });
        fields
    }

    /// All buttons in document order.
    pub fn buttons(&self) -> Vec<&Button> {
        let mut buttons = Vec::new();
        self.walk(&mut |node| {
            if let Node::Button(button) = node {
                buttons.push(button);
            }
        });
        buttons
    }
}

impl From<Field> for Node {
    fn from(field: Field) -> Self {
        Self::Field(field)
    }
}

impl From<Button> for Node {
    fn from(button: Button) -> Self {
        Self::Button(button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldConfig, InputKind};

    fn text(name: &str) -> Node {
        Field::new(FieldConfig::new(InputKind::Text).with_name(name))
            .unwrap()
            .into()
    }

    #[test]
    fn test_fields_in_document_order() {
        let tree = Node::element(
            "div",
            vec![
                text("a"),
                Node::element("fieldset", vec![text("b"), text("c")]),
                text("d"),
            ],
        );
        let names: Vec<_> = tree
            .fields()
            .iter()
            .map(|f| f.name().unwrap_or_default().to_string())
            .collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_nested_buttons_are_found() {
        let tree = Node::element(
            "div",
            vec![
                Button::new(ButtonType::Reset, "Reset").into(),
                Node::element("footer", vec![Button::submit("Send").into()]),
            ],
        );
        let labels: Vec<_> = tree.buttons().iter().map(|b| b.label()).collect();
        assert_eq!(labels, ["Reset", "Send"]);
    }

    #[test]
    fn test_click_reaches_listener() {
        let button = Button::submit("Send");
        let mut rx = button.subscribe();
        button.clone().click();
        assert!(rx.try_recv().is_ok());
    }
}
