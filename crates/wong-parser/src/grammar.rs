//! Grammar rules for Wong markup.
//!
//! ```text
//! elements   := element*
//! element    := NAME attrsBlock? innerBlock?
//! attrsBlock := '{' attrLine* '}'
//! innerBlock := '[' elements ']'
//! ```
//!
//! Input is first split into sibling segments (see [`crate::lexer`]), then each
//! segment is read by a small state machine. Inner blocks recurse into segmentation.

use wong_core::{ParseError, SchemaNode, SchemaParser};

use crate::attributes::parse_attribute_block;
use crate::lexer::{is_name_start, split_elements, Block, Segment};

/// Deepest element nesting the parsers accept; top-level elements are level 1.
pub const MAX_NESTING_DEPTH: u32 = 128;

/// Parse Wong markup into schema nodes.
pub fn parse(input: &str) -> Result<Vec<SchemaNode>, ParseError> {
    parse_elements(input, 0, 1)
}

/// The bracketed Wong markup parser.
///
/// Stateless; every value of this type behaves identically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkupParser;

impl MarkupParser {
    pub fn new() -> Self {
        MarkupParser
    }
}

impl SchemaParser for MarkupParser {
    fn name(&self) -> &'static str {
        "markup"
    }

    fn parse(&self, source: &str) -> Result<Vec<SchemaNode>, ParseError> {
        let nodes = parse(source)?;
        tracing::trace!(nodes = nodes.len(), bytes = source.len(), "Parsed markup");
        Ok(nodes)
    }
}

fn parse_elements(input: &str, base: usize, level: u32) -> Result<Vec<SchemaNode>, ParseError> {
    split_elements(input, base)?
        .into_iter()
        .map(|segment| parse_segment(segment, level))
        .collect()
}

/// What the segment reader is currently consuming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadState {
    /// The name, or whitespace between blocks once the name is known
    Name,
    Attrs,
    Inner,
}

impl ReadState {
    fn reading(block: Block) -> Self {
        match block {
            Block::Attrs => ReadState::Attrs,
            Block::Inner => ReadState::Inner,
        }
    }

    fn block(self) -> Option<Block> {
        match self {
            ReadState::Name => None,
            ReadState::Attrs => Some(Block::Attrs),
            ReadState::Inner => Some(Block::Inner),
        }
    }
}

/// Parse the raw text of a single element at nesting `level`.
fn parse_segment(segment: Segment<'_>, level: u32) -> Result<SchemaNode, ParseError> {
    let text = segment.text;
    let base = segment.offset;

    if level > MAX_NESTING_DEPTH {
        return Err(ParseError::NestingTooDeep {
            offset: base + (text.len() - text.trim_start().len()),
            limit: MAX_NESTING_DEPTH,
        });
    }

    let mut state = ReadState::Name;
    let mut depth = 0u32;
    let mut cursor = 0;
    let mut opened_at = 0;
    let mut name: Option<&str> = None;
    let mut node_attrs = None;
    let mut children = Vec::new();
    let mut seen_attrs = false;
    let mut seen_inner = false;

    for (i, c) in text.char_indices() {
        match state.block() {
            None => {
                if let Some(block) = Block::opened_by(c) {
                    match name {
                        None => name = Some(&text[..i]),
                        Some(_) => expect_blank(text, cursor, i, base)?,
                    }
                    let misplaced = match block {
                        Block::Attrs => seen_attrs || seen_inner,
                        Block::Inner => seen_inner,
                    };
                    if misplaced {
                        return Err(ParseError::UnexpectedBlock {
                            delimiter: c,
                            offset: base + i,
                        });
                    }
                    state = ReadState::reading(block);
                    depth = 1;
                    opened_at = i;
                    cursor = i + c.len_utf8();
                } else if Block::closed_by(c).is_some() {
                    return Err(ParseError::UnbalancedBracket {
                        found: c,
                        offset: base + i,
                    });
                }
            }
            Some(block) => {
                if c == block.open() {
                    depth += 1;
                } else if c == block.close() {
                    depth -= 1;
                    if depth == 0 {
                        let span = &text[cursor..i];
                        match block {
                            Block::Attrs => {
                                node_attrs = parse_attribute_block(span.trim())?;
                                seen_attrs = true;
                            }
                            Block::Inner => {
                                children = parse_elements(span, base + cursor, level + 1)?;
                                seen_inner = true;
                            }
                        }
                        state = ReadState::Name;
                        cursor = i + c.len_utf8();
                    }
                }
            }
        }
    }

    if let Some(block) = state.block() {
        return Err(ParseError::UnterminatedBlock {
            delimiter: block.open(),
            offset: base + opened_at,
        });
    }

    let raw_name = match name {
        Some(raw) => {
            expect_blank(text, cursor, text.len(), base)?;
            raw
        }
        None => text,
    };

    Ok(SchemaNode {
        name: validate_name(raw_name, base)?,
        attributes: node_attrs,
        children,
    })
}

/// Require `text[from..to]` to be whitespace.
fn expect_blank(text: &str, from: usize, to: usize, base: usize) -> Result<(), ParseError> {
    let between = &text[from..to];
    let trimmed = between.trim_start();
    if trimmed.is_empty() {
        return Ok(());
    }
    Err(ParseError::UnexpectedContent {
        found: trimmed.trim_end().to_string(),
        offset: base + from + (between.len() - trimmed.len()),
    })
}

fn validate_name(raw: &str, base: usize) -> Result<String, ParseError> {
    let offset = base + (raw.len() - raw.trim_start().len());
    let name = raw.trim();

    match name.chars().next() {
        None => Err(ParseError::EmptyName { offset }),
        Some(first) if !is_name_start(first) || name.contains(char::is_whitespace) => {
            Err(ParseError::InvalidName {
                name: name.to_string(),
                offset,
            })
        }
        Some(_) => Ok(name.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wong_core::AttributeSet;

    #[test]
    fn test_parse_empty() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_name_only() {
        let nodes = parse("  Button  ").unwrap();
        assert_eq!(nodes, vec![SchemaNode::new("Button")]);
        assert!(nodes[0].attributes.is_none());
    }

    #[test]
    fn test_parse_attrs_and_children() {
        let nodes = parse("A{k v}[B[C]]").unwrap();
        let expected = SchemaNode::new("A")
            .with_attributes(AttributeSet::new().with("k", "v"))
            .with_child(SchemaNode::new("B").with_child(SchemaNode::new("C")));

        assert_eq!(nodes, vec![expected]);
    }

    #[test]
    fn test_parse_quoted_attribute() {
        let nodes = parse(r#"A{label "hello world"}"#).unwrap();
        assert_eq!(nodes[0].attribute("label"), Some("hello world"));
    }

    #[test]
    fn test_alias_normalization() {
        let short = parse("A{c foo}").unwrap();
        let long = parse("A{className foo}").unwrap();

        assert_eq!(short, long);
        assert_eq!(short[0].attribute("className"), Some("foo"));
    }

    #[test]
    fn test_siblings() {
        let nodes = parse("A[x] B[y]").unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].name, "A");
        assert_eq!(nodes[0].children, vec![SchemaNode::new("x")]);
        assert_eq!(nodes[1].name, "B");
        assert_eq!(nodes[1].children, vec![SchemaNode::new("y")]);
    }

    #[test]
    fn test_sibling_directly_after_block() {
        let nodes = parse("A[x]B{k v}").unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].attribute("key"), Some("v"));
    }

    #[test]
    fn test_deep_nesting() {
        let nodes = parse("A[B[C{x y}]]").unwrap();
        assert_eq!(nodes.len(), 1);
        let c = &nodes[0].children[0].children[0];
        assert_eq!(c.name, "C");
        assert_eq!(c.attribute("x"), Some("y"));
    }

    #[test]
    fn test_multiline_markup() {
        let source = r#"
            Card{
                c card
                title "Weekly report"
            }[
                Header{t Summary}
                Body[
                    Row{k first} Row{k second}
                ]
            ]
            Footer
        "#;
        let nodes = parse(source).unwrap();

        assert_eq!(nodes.len(), 2);
        let card = &nodes[0];
        assert_eq!(card.attribute("className"), Some("card"));
        assert_eq!(card.attribute("title"), Some("Weekly report"));
        assert_eq!(card.children.len(), 2);
        assert_eq!(card.children[0].attribute("innerText"), Some("Summary"));
        let rows = &card.children[1].children;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].attribute("key"), Some("second"));
        assert_eq!(nodes[1], SchemaNode::new("Footer"));
    }

    fn nested(levels: usize) -> String {
        format!("{}leaf{}", "A[".repeat(levels - 1), "]".repeat(levels - 1))
    }

    #[test]
    fn test_nesting_limit() {
        let max = MAX_NESTING_DEPTH as usize;
        assert!(parse(&nested(max)).is_ok());

        let err = parse(&nested(max + 1)).unwrap_err();
        assert_eq!(
            err,
            ParseError::NestingTooDeep {
                offset: 2 * max,
                limit: MAX_NESTING_DEPTH
            }
        );
    }

    #[test]
    fn test_very_deep_input_fails_without_overflow() {
        let source = format!("{}{}", "A[".repeat(5_000), "]".repeat(5_000));
        assert!(matches!(
            parse(&source),
            Err(ParseError::NestingTooDeep { .. })
        ));
    }

    #[test]
    fn test_empty_blocks() {
        let nodes = parse("A{}[]").unwrap();
        assert_eq!(nodes, vec![SchemaNode::new("A")]);
    }

    #[test]
    fn test_ampersand_and_underscore_names() {
        let nodes = parse("&nbsp _private").unwrap();
        assert_eq!(nodes[0].name, "&nbsp");
        assert_eq!(nodes[1].name, "_private");
    }

    #[test]
    fn test_single_token_attribute_is_error() {
        assert!(matches!(
            parse("A{k}"),
            Err(ParseError::AttributeSyntax { .. })
        ));
    }

    #[test]
    fn test_unterminated_blocks() {
        assert!(matches!(
            parse("A{"),
            Err(ParseError::UnterminatedBlock { delimiter: '{', .. })
        ));
        assert!(matches!(
            parse("A[B[C]"),
            Err(ParseError::UnterminatedBlock { delimiter: '[', .. })
        ));
    }

    #[test]
    fn test_nested_unterminated_block_reports_absolute_offset() {
        // `{` does not count inside `[...]`, so the inner block closes and `B{k v` is
        // left with an open attribute block.
        let err = parse("A[B{k v]").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnterminatedBlock {
                delimiter: '{',
                offset: 3
            }
        );
        let err = parse("Outer[ Inner{ ]").unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedBlock { .. }));
    }

    #[test]
    fn test_missing_name() {
        assert_eq!(parse("{k v}"), Err(ParseError::EmptyName { offset: 0 }));
        assert!(matches!(parse("A[ [B] ]"), Err(ParseError::EmptyName { .. })));
    }

    #[test]
    fn test_invalid_name() {
        assert!(matches!(
            parse("A 42"),
            Err(ParseError::InvalidName { name, .. }) if name == "A 42"
        ));
        assert!(matches!(parse("9lives"), Err(ParseError::InvalidName { .. })));
    }

    #[test]
    fn test_block_order_enforced() {
        assert!(matches!(
            parse("A[B]{k v}"),
            Err(ParseError::UnexpectedBlock { delimiter: '{', offset: 4 })
        ));
        assert!(matches!(
            parse("A{k v}{x y}"),
            Err(ParseError::UnexpectedBlock { .. })
        ));
    }

    #[test]
    fn test_trailing_content() {
        assert_eq!(
            parse("A[B] 42"),
            Err(ParseError::UnexpectedContent {
                found: "42".to_string(),
                offset: 5
            })
        );
    }

    #[test]
    fn test_parser_trait() {
        let parser = MarkupParser::new();
        assert_eq!(parser.name(), "markup");
        assert_eq!(parser.parse("A B").unwrap().len(), 2);
    }
}
