//! The schema source abstraction.

use std::fmt::Debug;

use crate::{ast::SchemaNode, errors::ParseError};

/// Trait for schema sources.
///
/// Implement this trait to feed the expander from a new source format. Parsers are
/// stateless, so one shared instance serves every registry.
pub trait SchemaParser: Debug + Send + Sync {
    /// Get the source format name (e.g. "markup", "xml").
    fn name(&self) -> &'static str;

    /// Parse source text into top-level schema nodes.
    ///
    /// Blank input yields an empty list. Malformed input fails the whole call.
    fn parse(&self, source: &str) -> Result<Vec<SchemaNode>, ParseError>;
}
