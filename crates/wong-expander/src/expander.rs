//! Schema expansion logic.
//!
//! Turns [`CreateInput`] into constructed elements by:
//! 1. Parsing markup with the registry's active parser
//! 2. Looking up each schema node's name in the class registry
//! 3. Expanding the class's own schema, then the caller's children
//! 4. Constructing the element and attaching its static and dynamic children

use wong_core::{DomError, ExpandError, SchemaNode};
use wong_dom::{Dom, ElementId};

use crate::class::{ElementClass, ElementInit, GenericElement};
use crate::input::CreateInput;
use crate::registry::ClassRegistry;

/// Default maximum element nesting depth.
pub const DEFAULT_MAX_DEPTH: u32 = 100;

/// Expand `input` into elements of `dom` using the classes in `registry`.
pub fn create(
    dom: &mut Dom,
    registry: &ClassRegistry,
    input: impl Into<CreateInput>,
) -> Result<Vec<ElementId>, ExpandError> {
    Expander::new(registry).create(dom, input)
}

/// Expander state for one registry.
#[derive(Debug)]
pub struct Expander<'a> {
    registry: &'a ClassRegistry,
    max_depth: u32,
    /// Current element nesting depth.
    depth: u32,
    /// Classes whose own schema is being expanded (for cycle detection).
    expansion_stack: Vec<String>,
}

impl<'a> Expander<'a> {
    pub fn new(registry: &'a ClassRegistry) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
            depth: 0,
            expansion_stack: Vec::new(),
        }
    }

    /// Limit how deeply elements may nest.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Expand `input` into elements.
    ///
    /// Either the whole input expands or nothing does: on error `dom` is rolled back to
    /// its state before the call, including changes class hooks made to older elements.
    pub fn create(
        &mut self,
        dom: &mut Dom,
        input: impl Into<CreateInput>,
    ) -> Result<Vec<ElementId>, ExpandError> {
        let checkpoint = dom.checkpoint();
        let before = dom.len();
        self.depth = 0;
        self.expansion_stack.clear();

        match self.expand_input(dom, input.into()) {
            Ok(elements) => {
                dom.commit(checkpoint);
                tracing::debug!(
                    roots = elements.len(),
                    created = dom.len() - before,
                    "Expansion complete"
                );
                Ok(elements)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Expansion failed, rolling back");
                dom.rollback(checkpoint);
                self.depth = 0;
                self.expansion_stack.clear();
                Err(err)
            }
        }
    }

    fn expand_input(&mut self, dom: &mut Dom, input: CreateInput) -> Result<Vec<ElementId>, ExpandError> {
        match input {
            CreateInput::Markup(source) => {
                let nodes = self.registry.parser().parse(&source)?;
                self.expand_nodes(dom, &nodes)
            }
            CreateInput::Element(el) => {
                if !dom.contains(el) {
                    return Err(DomError::UnknownElement { index: el.index() }.into());
                }
                if dom.is_removed(el) {
                    return Err(DomError::Removed { index: el.index() }.into());
                }
                Ok(vec![el])
            }
            CreateInput::Schema(node) => Ok(vec![self.expand_node(dom, &node)?]),
            CreateInput::List(items) => {
                let mut result = Vec::with_capacity(items.len());
                for item in items {
                    result.extend(self.expand_input(dom, item)?);
                }
                Ok(result)
            }
        }
    }

    fn expand_nodes(&mut self, dom: &mut Dom, nodes: &[SchemaNode]) -> Result<Vec<ElementId>, ExpandError> {
        let mut result = Vec::with_capacity(nodes.len());
        for node in nodes {
            result.push(self.expand_node(dom, node)?);
        }
        Ok(result)
    }

    fn expand_node(&mut self, dom: &mut Dom, node: &SchemaNode) -> Result<ElementId, ExpandError> {
        if self.depth >= self.max_depth {
            return Err(ExpandError::MaxDepthExceeded {
                depth: self.max_depth,
            });
        }
        self.depth += 1;

        let registry = self.registry;
        let element = match registry.get(&node.name) {
            Some(record) => {
                tracing::trace!(class = %node.name, "Expanding registered class");
                let mut children = self.expand_own_schema(dom, &node.name, record.schema())?;
                children.extend(self.expand_nodes(dom, &node.children)?);
                self.construct(dom, record.class(), node, children)?
            }
            None => {
                tracing::trace!(name = %node.name, "Expanding generic element");
                let children = self.expand_nodes(dom, &node.children)?;
                self.construct(dom, &GenericElement, node, children)?
            }
        };

        self.depth -= 1;
        Ok(element)
    }

    /// Expand a class's own schema with the class on the expansion stack.
    fn expand_own_schema(
        &mut self,
        dom: &mut Dom,
        class: &str,
        schema: &[SchemaNode],
    ) -> Result<Vec<ElementId>, ExpandError> {
        if let Some(pos) = self.expansion_stack.iter().position(|c| c == class) {
            let mut cycle = self.expansion_stack[pos..].to_vec();
            cycle.push(class.to_string());
            return Err(ExpandError::CircularComponent { cycle });
        }

        self.expansion_stack.push(class.to_string());
        let children = self.expand_nodes(dom, schema)?;
        self.expansion_stack.pop();

        Ok(children)
    }

    fn construct(
        &mut self,
        dom: &mut Dom,
        class: &dyn ElementClass,
        node: &SchemaNode,
        children: Vec<ElementId>,
    ) -> Result<ElementId, ExpandError> {
        let init = ElementInit {
            name: &node.name,
            attributes: node.attributes.as_ref(),
        };
        let element = class.construct(dom, init)?;

        let dynamic = class.dynamic_children(dom, element)?;
        let extra = self.expand_input(dom, dynamic)?;

        dom.append(element, &children)?;
        dom.append(element, &extra)?;
        class.on_create(dom, element)?;

        Ok(element)
    }
}
