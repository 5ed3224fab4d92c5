//! Wong: a markup parser and schema expansion engine.
//!
//! Classes register a name and an own schema; markup referring to those names expands
//! into a document tree.
//!
//! ## Example
//!
//! ```
//! use wong::{ElementClass, Engine};
//!
//! struct Card;
//!
//! impl ElementClass for Card {
//!     fn schema(&self) -> &str {
//!         "Header{c card-header} Body"
//!     }
//! }
//!
//! let mut engine = Engine::new();
//! engine.register(Card).unwrap();
//!
//! let roots = engine.create(r#"Card{i main}[Footer{t "See more"}]"#).unwrap();
//! let card = roots[0];
//!
//! assert_eq!(engine.element_by_id("main"), Some(card));
//! assert_eq!(engine.dom().children(card).len(), 3);
//! ```

mod config;
mod engine;
pub mod logging;

pub use config::{EngineConfig, ParserKind};
pub use engine::Engine;

pub use wong_core::{
    canonical_name, AttributeSet, ConstructionError, DomError, ExpandError, ParseError,
    RegistrationError, SchemaNode, SchemaParser, WongError,
};
pub use wong_dom::{Checkpoint, Dom, ElementId};
pub use wong_expander::{
    create, ClassRecord, ClassRegistry, CreateInput, ElementClass, ElementInit, Expander,
    GenericElement, DEFAULT_MAX_DEPTH,
};
pub use wong_parser::{parse_markup, MarkupParser, XmlParser};
