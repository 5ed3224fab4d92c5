use std::sync::Arc;

use wong_core::{ExpandError, ParseError, RegistrationError, SchemaNode, SchemaParser};
use wong_dom::{Dom, ElementId};
use wong_expander::{ClassRegistry, CreateInput, ElementClass, Expander};

use crate::config::{EngineConfig, ParserKind};

/// A document together with the classes that expand into it.
#[derive(Debug)]
pub struct Engine {
    dom: Dom,
    registry: ClassRegistry,
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            dom: Dom::new(),
            registry: ClassRegistry::with_parser(config.parser.build()),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Register a class under its own name.
    pub fn register<C: ElementClass + 'static>(&mut self, class: C) -> Result<(), RegistrationError> {
        self.registry.register(class)
    }

    /// Register a class under an explicit name.
    pub fn register_as<C: ElementClass + 'static>(
        &mut self,
        name: impl Into<String>,
        class: C,
    ) -> Result<(), RegistrationError> {
        self.registry.register_as(name, class)
    }

    /// Register several classes, stopping at the first failure.
    pub fn register_all<I>(&mut self, classes: I) -> Result<(), RegistrationError>
    where
        I: IntoIterator<Item = Arc<dyn ElementClass>>,
    {
        self.registry.register_all(classes)
    }

    /// Swap in a custom schema parser.
    pub fn set_parser(&mut self, parser: Arc<dyn SchemaParser>) {
        self.registry.set_parser(parser);
    }

    /// Swap in one of the built-in schema parsers.
    pub fn use_parser(&mut self, kind: ParserKind) {
        self.config.parser = kind;
        self.registry.set_parser(kind.build());
    }

    /// Parse `source` with the active parser without creating anything.
    pub fn parse(&self, source: &str) -> Result<Vec<SchemaNode>, ParseError> {
        self.registry.parser().parse(source)
    }

    /// Expand `input` into new elements of the document.
    ///
    /// On error the document is left as it was before the call.
    pub fn create(&mut self, input: impl Into<CreateInput>) -> Result<Vec<ElementId>, ExpandError> {
        Expander::new(&self.registry)
            .with_max_depth(self.config.max_depth)
            .create(&mut self.dom, input)
    }

    /// Look up a registered class.
    pub fn class(&self, name: &str) -> Option<&dyn ElementClass> {
        self.registry.get(name).map(|record| record.class())
    }

    /// Element that first claimed the given `id`.
    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.dom.get_by_id(id)
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }
}
