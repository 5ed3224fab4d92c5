//! Schema tree produced by schema parsers.

use std::fmt;

use crate::attrs::AttributeSet;

/// A parsed element description, prior to any component resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchemaNode {
    /// Element or component name, trimmed and never empty
    pub name: String,
    /// Attributes from the node's attribute block, if it had any
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub attributes: Option<AttributeSet>,
    /// Child nodes in declaration order
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<SchemaNode>,
}

impl SchemaNode {
    /// Create a node with no attributes and no children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: None,
            children: Vec::new(),
        }
    }

    /// Set one attribute, creating the attribute set if needed.
    pub fn with_attribute(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.attributes
            .get_or_insert_with(AttributeSet::new)
            .set(name, value);
        self
    }

    /// Replace the attribute set.
    pub fn with_attributes(mut self, attributes: AttributeSet) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Append a child node.
    pub fn with_child(mut self, child: SchemaNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child nodes.
    pub fn with_children(mut self, children: impl IntoIterator<Item = SchemaNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Look up an attribute value. Aliases are accepted.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.as_ref().and_then(|attrs| attrs.get(name))
    }

    /// Check whether the node declares children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Renders the node back to markup.
///
/// Values that are empty or contain whitespace are quoted. Values containing `"` or
/// brackets cannot be expressed in markup and will not parse back to the same tree.
impl fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;

        if let Some(attrs) = self.attributes.as_ref().filter(|a| !a.is_empty()) {
            f.write_str("{")?;
            for (i, (name, value)) in attrs.iter().enumerate() {
                if i > 0 {
                    f.write_str("\n")?;
                }
                if value.is_empty() || value.contains(char::is_whitespace) {
                    write!(f, "{name} \"{value}\"")?;
                } else {
                    write!(f, "{name} {value}")?;
                }
            }
            f.write_str("}")?;
        }

        if self.has_children() {
            f.write_str("[")?;
            for (i, child) in self.children.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{child}")?;
            }
            f.write_str("]")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let node = SchemaNode::new("Card")
            .with_attribute("c", "card")
            .with_child(SchemaNode::new("Title"));

        assert_eq!(node.attribute("className"), Some("card"));
        assert_eq!(node.children.len(), 1);
        assert!(!node.children[0].has_children());
    }

    #[test]
    fn test_display_plain() {
        let node = SchemaNode::new("A")
            .with_attribute("k", "v")
            .with_child(SchemaNode::new("B").with_child(SchemaNode::new("C")));

        assert_eq!(node.to_string(), "A{key v}[B[C]]");
    }

    #[test]
    fn test_display_quotes_values_with_spaces() {
        let node = SchemaNode::new("Label")
            .with_attribute("t", "hello world")
            .with_attribute("title", "");

        assert_eq!(node.to_string(), "Label{innerText \"hello world\"\ntitle \"\"}");
    }
}
