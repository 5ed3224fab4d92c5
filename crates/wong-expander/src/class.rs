//! Element classes: the named components the expander resolves.

use wong_core::{AttributeSet, ConstructionError};
use wong_dom::{Dom, ElementId};

use crate::input::CreateInput;

/// Data handed to [`ElementClass::construct`].
#[derive(Debug, Clone, Copy)]
pub struct ElementInit<'a> {
    /// Name the element was declared with
    pub name: &'a str,
    pub attributes: Option<&'a AttributeSet>,
}

/// A component the expander can instantiate.
///
/// Construction of an instance runs, in order: [`construct`](Self::construct),
/// [`dynamic_children`](Self::dynamic_children), attaching the own-schema children,
/// caller children and dynamic children, then [`on_create`](Self::on_create). Any
/// hook returning an error aborts the whole expansion.
pub trait ElementClass: Send + Sync {
    /// Name the class registers under by default: the type name without module path.
    fn name(&self) -> &str {
        let full = std::any::type_name::<Self>();
        let path = full.split('<').next().unwrap_or(full);
        path.rsplit("::").next().unwrap_or(path)
    }

    /// Markup for the children every instance starts with.
    fn schema(&self) -> &str {
        ""
    }

    /// Native tag to create instead of the declared name.
    fn tag(&self) -> Option<&str> {
        None
    }

    /// Create the native element and apply its attributes.
    fn construct(&self, dom: &mut Dom, init: ElementInit<'_>) -> Result<ElementId, ConstructionError> {
        Ok(dom.create_element(self.tag().unwrap_or(init.name), init.attributes))
    }

    /// Extra children to expand and append after the static ones.
    fn dynamic_children(&self, _dom: &Dom, _element: ElementId) -> Result<CreateInput, ConstructionError> {
        Ok(CreateInput::empty())
    }

    /// Called once all children are attached.
    fn on_create(&self, _dom: &mut Dom, _element: ElementId) -> Result<(), ConstructionError> {
        Ok(())
    }
}

/// The class used for names with no registry entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericElement;

impl ElementClass for GenericElement {}
