//! Character classes and sibling segmentation for Wong markup.

use wong_core::ParseError;

/// Check whether `c` may start an element name.
pub fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '&' || c == '_'
}

/// Check whether `c` separates siblings.
pub fn is_separator(c: char) -> bool {
    c.is_whitespace()
}

/// The two bracketed blocks an element may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    /// `{ ... }` attribute lines
    Attrs,
    /// `[ ... ]` child elements
    Inner,
}

impl Block {
    /// The block opened by `c`, if any.
    pub fn opened_by(c: char) -> Option<Block> {
        match c {
            '{' => Some(Block::Attrs),
            '[' => Some(Block::Inner),
            _ => None,
        }
    }

    /// The block closed by `c`, if any.
    pub fn closed_by(c: char) -> Option<Block> {
        match c {
            '}' => Some(Block::Attrs),
            ']' => Some(Block::Inner),
            _ => None,
        }
    }

    pub fn open(self) -> char {
        match self {
            Block::Attrs => '{',
            Block::Inner => '[',
        }
    }

    pub fn close(self) -> char {
        match self {
            Block::Attrs => '}',
            Block::Inner => ']',
        }
    }
}

/// Raw text of one element, with its byte offset in the original source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub offset: usize,
}

/// Split markup into the raw text of each top-level element.
///
/// A new element starts at depth 0 on a name character that follows whitespace or a
/// closed block. Inside a block only brackets of the block's own kind are counted, so
/// `A{x [y}` is one attribute block and `A[B{c d}]` is one inner block.
///
/// `base` is the offset of `source` within the text originally handed to the parser.
pub fn split_elements(source: &str, base: usize) -> Result<Vec<Segment<'_>>, ParseError> {
    let leading = source.len() - source.trim_start().len();
    let input = source.trim();
    let base = base + leading;

    if input.is_empty() {
        return Ok(Vec::new());
    }

    let mut segments = Vec::new();
    let mut open: Option<(Block, usize)> = None;
    let mut depth = 0u32;
    let mut was_separator = false;
    let mut was_closed = false;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        if let Some((block, _)) = open {
            if c == block.open() {
                depth += 1;
            } else if c == block.close() {
                depth -= 1;
                was_closed = true;
                if depth == 0 {
                    open = None;
                }
            }
            continue;
        }

        if is_name_start(c) && (was_separator || was_closed) {
            segments.push(Segment {
                text: &input[start..i],
                offset: base + start,
            });
            start = i;
        }

        if let Some(block) = Block::opened_by(c) {
            open = Some((block, i));
            depth = 1;
        } else if Block::closed_by(c).is_some() {
            return Err(ParseError::UnbalancedBracket {
                found: c,
                offset: base + i,
            });
        }

        was_separator = is_separator(c);
        was_closed = false;
    }

    if let Some((block, at)) = open {
        return Err(ParseError::UnterminatedBlock {
            delimiter: block.open(),
            offset: base + at,
        });
    }

    segments.push(Segment {
        text: &input[start..],
        offset: base + start,
    });

    Ok(segments)
}
