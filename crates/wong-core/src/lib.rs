//! Core types for the Wong UI-construction engine.
//!
//! This crate provides the foundational types shared by the other wong crates:
//! - `SchemaNode`, the parser-agnostic tree produced from markup
//! - `AttributeSet` with its alias table
//! - the `SchemaParser` trait implemented by every schema source
//! - Error types

pub mod ast;
pub mod attrs;
pub mod errors;
pub mod parser;

pub use ast::*;
pub use attrs::*;
pub use errors::*;
pub use parser::*;
