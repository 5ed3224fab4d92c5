//! Error types for the Wong engine.

use thiserror::Error;

/// Top-level error type for the Wong engine.
#[derive(Debug, Error)]
pub enum WongError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Expand(#[from] ExpandError),

    #[error(transparent)]
    Dom(#[from] DomError),
}

/// Errors while turning a schema source into schema nodes.
///
/// Offsets are byte offsets into the source passed to `parse`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unterminated '{delimiter}' block opened at offset {offset}")]
    UnterminatedBlock { delimiter: char, offset: usize },

    #[error("Unbalanced '{found}' at offset {offset}")]
    UnbalancedBracket { found: char, offset: usize },

    #[error("Unexpected '{delimiter}' block at offset {offset}: blocks must appear as attributes then children, each at most once")]
    UnexpectedBlock { delimiter: char, offset: usize },

    #[error("Unexpected content {found:?} at offset {offset}")]
    UnexpectedContent { found: String, offset: usize },

    #[error("Cannot parse element name at offset {offset}: name is empty")]
    EmptyName { offset: usize },

    #[error("Invalid element name {name:?} at offset {offset}")]
    InvalidName { name: String, offset: usize },

    #[error("Attribute syntax error: {line:?} (expected `key value` or `key \"quoted value\"`)")]
    AttributeSyntax { line: String },

    #[error("Unterminated quoted value in attribute line {line:?}")]
    UnterminatedQuote { line: String },

    #[error("Elements nested deeper than {limit} levels at offset {offset}")]
    NestingTooDeep { offset: usize, limit: u32 },

    #[error("Malformed document: {message}")]
    Document { message: String },
}

/// Errors while registering element classes.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Class already registered: {name}")]
    DuplicateClass { name: String },

    #[error("Invalid own schema for class {name}: {source}")]
    InvalidSchema {
        name: String,
        #[source]
        source: ParseError,
    },
}

/// An element class failed while constructing one of its instances.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to construct {class}: {message}")]
pub struct ConstructionError {
    pub class: String,
    pub message: String,
}

impl ConstructionError {
    pub fn new(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            message: message.into(),
        }
    }
}

/// Errors from the element document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("Unknown element #{index}")]
    UnknownElement { index: usize },

    #[error("Element #{index} has been removed")]
    Removed { index: usize },

    #[error("Element #{index} cannot be appended to itself")]
    SelfAppend { index: usize },

    #[error("Element #{child} is not a child of element #{parent}")]
    NotAChild { parent: usize, child: usize },
}

/// Errors during schema expansion.
#[derive(Debug, Error)]
pub enum ExpandError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("Circular component reference: {}", .cycle.join(" -> "))]
    CircularComponent { cycle: Vec<String> },

    #[error("Maximum element nesting depth ({depth}) exceeded")]
    MaxDepthExceeded { depth: u32 },
}
