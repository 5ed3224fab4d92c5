//! Engine configuration.

use std::sync::Arc;

use wong_core::SchemaParser;
use wong_expander::DEFAULT_MAX_DEPTH;
use wong_parser::{MarkupParser, XmlParser};

/// The built-in schema parsers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ParserKind {
    #[default]
    Markup,
    Xml,
}

impl ParserKind {
    pub fn build(self) -> Arc<dyn SchemaParser> {
        match self {
            ParserKind::Markup => Arc::new(MarkupParser::new()),
            ParserKind::Xml => Arc::new(XmlParser::new()),
        }
    }
}

/// Options an [`Engine`](crate::Engine) is created with.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Parser used for class schemas and markup input
    pub parser: ParserKind,
    /// Deepest element nesting a single create may produce
    pub max_depth: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parser: ParserKind::Markup,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parser(mut self, parser: ParserKind) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }
}
