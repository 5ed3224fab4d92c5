//! In-memory element document for the Wong engine.
//!
//! Stands in for the platform DOM: every constructed element lives in a [`Dom`] and is
//! addressed by an [`ElementId`]. The document also keeps the wrapper bookkeeping the
//! expander relies on:
//! - insertion-ordered children and a key index per element
//! - parent back-references
//! - the document-wide `id` registry (first claim wins)

mod document;
mod element;

pub use document::{Checkpoint, Dom};
pub use element::ElementId;
