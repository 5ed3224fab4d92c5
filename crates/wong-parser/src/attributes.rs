//! Attribute block parsing.
//!
//! An attribute block holds `key value` pairs, one bare pair per line. Values
//! containing whitespace are written in double quotes, `label "hello world"`, and may
//! span lines.

use nom::{
    branch::alt,
    bytes::complete::{take_till, take_while1},
    character::complete::{char, multispace0},
    combinator::map,
    multi::many0,
    sequence::{delimited, preceded},
    IResult, Offset,
};

use wong_core::{AttributeSet, ParseError};

/// A lexical token of an attribute block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Quoted(&'a str),
}

fn quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_till(|c: char| c == '"'), char('"'))(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && c != '"')(input)
}

fn token(input: &str) -> IResult<&str, Token<'_>> {
    alt((map(quoted, Token::Quoted), map(word, Token::Word)))(input)
}

fn tokens(input: &str) -> IResult<&str, Vec<Token<'_>>> {
    many0(preceded(multispace0, token))(input)
}

/// Parse the contents of an attribute block (delimiters already stripped).
///
/// Returns `None` for a blank block. Every `key "quoted"` pair in the block is taken
/// first; the bare words left over are then read line by line, and each line must
/// hold exactly one `key value` pair or nothing.
pub fn parse_attribute_block(block: &str) -> Result<Option<AttributeSet>, ParseError> {
    if block.trim().is_empty() {
        return Ok(None);
    }

    let (rest, tokens) = tokens(block).map_err(|_| ParseError::AttributeSyntax {
        line: block.trim().to_string(),
    })?;
    let rest = rest.trim_start();
    if !rest.is_empty() {
        return Err(ParseError::UnterminatedQuote {
            line: line_at(block, block.offset(rest)).1.to_string(),
        });
    }

    let mut attrs = AttributeSet::new();
    let mut plain = Vec::new();
    let mut iter = tokens.into_iter().peekable();

    while let Some(token) = iter.next() {
        match token {
            Token::Word(key) => {
                if let Some(Token::Quoted(value)) = iter.peek().copied() {
                    attrs.set(key, value);
                    iter.next();
                } else {
                    plain.push(key);
                }
            }
            Token::Quoted(value) => {
                return Err(ParseError::AttributeSyntax {
                    line: line_at(block, block.offset(value)).1.to_string(),
                });
            }
        }
    }

    let mut line: Vec<&str> = Vec::with_capacity(2);
    let mut line_start = None;

    for word in plain {
        let (start, _) = line_at(block, block.offset(word));
        if line_start.is_some_and(|current| current != start) {
            set_pair(block, &line, &mut attrs)?;
            line.clear();
        }
        line_start = Some(start);
        line.push(word);
    }
    if !line.is_empty() {
        set_pair(block, &line, &mut attrs)?;
    }

    Ok(Some(attrs))
}

/// Store the bare words of one line, which must form a single pair.
fn set_pair(block: &str, words: &[&str], attrs: &mut AttributeSet) -> Result<(), ParseError> {
    match words {
        [key, value] => {
            attrs.set(*key, *value);
            Ok(())
        }
        _ => Err(ParseError::AttributeSyntax {
            line: line_at(block, words.first().map_or(0, |w| block.offset(w)))
                .1
                .to_string(),
        }),
    }
}

/// Start offset and trimmed text of the line containing `offset`.
fn line_at(block: &str, offset: usize) -> (usize, &str) {
    let start = block[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = block[offset..].find('\n').map_or(block.len(), |i| offset + i);
    (start, block[start..end].trim())
}
