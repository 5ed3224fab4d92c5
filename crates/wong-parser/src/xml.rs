//! XML schema source.
//!
//! Each XML element maps to one schema node: the local tag name becomes the name,
//! attributes go through the alias table, and element children become child nodes.
//! Namespaced attributes keep their prefix (`xlink:href`). Text, comments and
//! processing instructions are ignored.

use roxmltree::{Attribute, Document, Node};
use wong_core::{AttributeSet, ParseError, SchemaNode, SchemaParser};

use crate::grammar::MAX_NESTING_DEPTH;

/// Name of the synthetic root wrapped around parsed fragments.
const ROOT_TAG: &str = "xml";

/// Schema parser for XML fragments, backed by `roxmltree`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XmlParser;

impl XmlParser {
    pub fn new() -> Self {
        XmlParser
    }

    /// Convert the element children of an already parsed document's root.
    pub fn parse_document(&self, doc: &Document<'_>) -> Result<Vec<SchemaNode>, ParseError> {
        parse_children(doc.root_element(), 1, 0)
    }
}

impl SchemaParser for XmlParser {
    fn name(&self) -> &'static str {
        "xml"
    }

    /// The source may hold several top-level elements; it is wrapped in a synthetic
    /// root before parsing.
    fn parse(&self, source: &str) -> Result<Vec<SchemaNode>, ParseError> {
        if source.trim().is_empty() {
            return Ok(Vec::new());
        }

        let wrapped = format!("<{ROOT_TAG}>{source}</{ROOT_TAG}>");
        let doc = Document::parse(&wrapped).map_err(|e| ParseError::Document {
            message: e.to_string(),
        })?;

        let nodes = parse_children(doc.root_element(), 1, ROOT_TAG.len() + 2)?;
        tracing::trace!(nodes = nodes.len(), bytes = source.len(), "Parsed XML");
        Ok(nodes)
    }
}

/// `shift` is the length of any wrapper text in front of the caller's source.
fn parse_children(node: Node<'_, '_>, level: u32, shift: usize) -> Result<Vec<SchemaNode>, ParseError> {
    node.children()
        .filter(|child| child.is_element())
        .map(|child| parse_element(child, level, shift))
        .collect()
}

fn parse_element(node: Node<'_, '_>, level: u32, shift: usize) -> Result<SchemaNode, ParseError> {
    if level > MAX_NESTING_DEPTH {
        return Err(ParseError::NestingTooDeep {
            offset: node.range().start.saturating_sub(shift),
            limit: MAX_NESTING_DEPTH,
        });
    }

    let attributes = node
        .attributes()
        .map(|attr| (qualified_name(node, &attr), attr.value()))
        .collect::<AttributeSet>();

    Ok(SchemaNode {
        name: node.tag_name().name().to_string(),
        attributes: (!attributes.is_empty()).then_some(attributes),
        children: parse_children(node, level + 1, shift)?,
    })
}

fn qualified_name(node: Node<'_, '_>, attr: &Attribute<'_, '_>) -> String {
    match attr.namespace().and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{}", attr.name()),
        _ => attr.name().to_string(),
    }
}
