//! Component expansion for Wong schemas.
//!
//! This crate handles:
//! - Element class registration
//! - Schema expansion into DOM elements
//! - Dynamic children and creation hooks
//! - Circular reference detection

mod class;
mod expander;
mod input;
mod registry;

pub use class::{ElementClass, ElementInit, GenericElement};
pub use expander::{create, Expander, DEFAULT_MAX_DEPTH};
pub use input::CreateInput;
pub use registry::{ClassRecord, ClassRegistry};
