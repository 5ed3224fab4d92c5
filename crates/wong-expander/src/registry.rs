//! Class registry for storing and looking up element classes.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use wong_core::{RegistrationError, SchemaNode, SchemaParser};
use wong_parser::MarkupParser;

use crate::class::ElementClass;

/// A registered class together with its parsed own schema.
#[derive(Clone)]
pub struct ClassRecord {
    class: Arc<dyn ElementClass>,
    schema: Vec<SchemaNode>,
}

impl ClassRecord {
    pub fn class(&self) -> &dyn ElementClass {
        self.class.as_ref()
    }

    /// Children every instance starts with, parsed once at registration.
    pub fn schema(&self) -> &[SchemaNode] {
        &self.schema
    }
}

impl fmt::Debug for ClassRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassRecord")
            .field("class", &self.class.name())
            .field("schema", &self.schema)
            .finish()
    }
}

/// A registry of element classes keyed by component name.
///
/// The registry also carries the active schema parser, used both for own schemas at
/// registration time and for markup handed to the expander.
#[derive(Debug, Clone)]
pub struct ClassRegistry {
    classes: IndexMap<String, ClassRecord>,
    parser: Arc<dyn SchemaParser>,
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassRegistry {
    /// Create an empty registry using the markup parser.
    pub fn new() -> Self {
        Self::with_parser(Arc::new(MarkupParser))
    }

    /// Create an empty registry using `parser`.
    pub fn with_parser(parser: Arc<dyn SchemaParser>) -> Self {
        Self {
            classes: IndexMap::new(),
            parser,
        }
    }

    /// The active schema parser.
    pub fn parser(&self) -> &dyn SchemaParser {
        self.parser.as_ref()
    }

    /// Swap the active schema parser.
    ///
    /// Already registered classes keep the schema they were parsed with.
    pub fn set_parser(&mut self, parser: Arc<dyn SchemaParser>) {
        tracing::debug!(from = self.parser.name(), to = parser.name(), "Switching schema parser");
        self.parser = parser;
    }

    /// Register a class under its own [`ElementClass::name`].
    pub fn register<C: ElementClass + 'static>(&mut self, class: C) -> Result<(), RegistrationError> {
        let class: Arc<dyn ElementClass> = Arc::new(class);
        let name = class.name().to_string();
        self.insert(name, class)
    }

    /// Register a class under an explicit name.
    pub fn register_as<C: ElementClass + 'static>(
        &mut self,
        name: impl Into<String>,
        class: C,
    ) -> Result<(), RegistrationError> {
        self.insert(name.into(), Arc::new(class))
    }

    /// Register a shared class under an explicit name.
    pub fn register_shared(
        &mut self,
        name: impl Into<String>,
        class: Arc<dyn ElementClass>,
    ) -> Result<(), RegistrationError> {
        self.insert(name.into(), class)
    }

    /// Register several classes under their own names.
    ///
    /// Each class is checked on its own; registration stops at the first failure and
    /// the classes registered before it stay registered.
    pub fn register_all<I>(&mut self, classes: I) -> Result<(), RegistrationError>
    where
        I: IntoIterator<Item = Arc<dyn ElementClass>>,
    {
        for class in classes {
            let name = class.name().to_string();
            self.insert(name, class)?;
        }
        Ok(())
    }

    fn insert(&mut self, name: String, class: Arc<dyn ElementClass>) -> Result<(), RegistrationError> {
        if self.classes.contains_key(&name) {
            return Err(RegistrationError::DuplicateClass { name });
        }

        let schema = self
            .parser
            .parse(class.schema())
            .map_err(|source| RegistrationError::InvalidSchema {
                name: name.clone(),
                source,
            })?;

        tracing::debug!(class = %name, schema_nodes = schema.len(), "Registered class");
        self.classes.insert(name, ClassRecord { class, schema });
        Ok(())
    }

    /// Get a class by name.
    pub fn get(&self, name: &str) -> Option<&ClassRecord> {
        self.classes.get(name)
    }

    /// Check if a class exists.
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Get all class names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
