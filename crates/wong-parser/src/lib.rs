//! Schema parsers for the Wong engine.
//!
//! This crate turns schema sources into `SchemaNode` trees:
//! - [`MarkupParser`] for the bracketed Wong markup
//! - [`XmlParser`] for XML fragments (feature `xml`)

mod attributes;
mod grammar;
pub mod lexer;

#[cfg(feature = "xml")]
mod xml;

pub use attributes::parse_attribute_block;
pub use grammar::{parse, MarkupParser, MAX_NESTING_DEPTH};

#[cfg(feature = "xml")]
pub use xml::XmlParser;

use wong_core::{ParseError, SchemaNode};

/// Parse Wong markup from source text.
///
/// # Example
///
/// ```
/// use wong_parser::parse_markup;
///
/// let nodes = parse_markup(r#"
/// Card{c card}[
///   Title{t "Weekly report"}
///   Body
/// ]
/// "#).unwrap();
///
/// assert_eq!(nodes[0].name, "Card");
/// assert_eq!(nodes[0].children[0].attribute("innerText"), Some("Weekly report"));
/// ```
pub fn parse_markup(source: &str) -> Result<Vec<SchemaNode>, ParseError> {
    parse(source)
}
