//! Inputs accepted by the expander.

use wong_core::SchemaNode;
use wong_dom::ElementId;

/// Anything that can be expanded into elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateInput {
    /// Source text for the active schema parser
    Markup(String),
    /// An element that already exists; passed through unchanged
    Element(ElementId),
    Schema(SchemaNode),
    /// Expanded member by member, results concatenated
    List(Vec<CreateInput>),
}

impl CreateInput {
    /// Input that expands to nothing.
    pub fn empty() -> Self {
        CreateInput::List(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CreateInput::Markup(source) => source.trim().is_empty(),
            CreateInput::List(items) => items.iter().all(CreateInput::is_empty),
            CreateInput::Element(_) | CreateInput::Schema(_) => false,
        }
    }
}

impl Default for CreateInput {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for CreateInput {
    fn from(source: &str) -> Self {
        CreateInput::Markup(source.to_string())
    }
}

impl From<String> for CreateInput {
    fn from(source: String) -> Self {
        CreateInput::Markup(source)
    }
}

impl From<ElementId> for CreateInput {
    fn from(el: ElementId) -> Self {
        CreateInput::Element(el)
    }
}

impl From<SchemaNode> for CreateInput {
    fn from(node: SchemaNode) -> Self {
        CreateInput::Schema(node)
    }
}

impl<T: Into<CreateInput>> From<Vec<T>> for CreateInput {
    fn from(items: Vec<T>) -> Self {
        CreateInput::List(items.into_iter().map(Into::into).collect())
    }
}
