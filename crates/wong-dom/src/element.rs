//! Element handles and per-element state.

use std::fmt;

use indexmap::IndexMap;

/// Handle to an element inside a [`crate::Dom`].
///
/// Handles are never reused, so a handle to a removed element stays distinct from
/// every element created later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    /// Position of the element in creation order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// State of one element: its native node plus the wrapper bookkeeping.
#[derive(Debug, Clone)]
pub(crate) struct ElementNode {
    pub tag: String,
    /// Native attributes, after `key`/`innerText` have been split out
    pub attributes: IndexMap<String, String>,
    pub text: Option<String>,
    pub key: Option<String>,
    /// Id this element holds in the document registry
    pub html_id: Option<String>,
    pub children: Vec<ElementId>,
    pub keyed: IndexMap<String, ElementId>,
    pub parents: Vec<ElementId>,
    pub removed: bool,
}

impl ElementNode {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: IndexMap::new(),
            text: None,
            key: None,
            html_id: None,
            children: Vec::new(),
            keyed: IndexMap::new(),
            parents: Vec::new(),
            removed: false,
        }
    }

    /// Drop `child` from the child list and key index.
    pub fn detach_child(&mut self, child: ElementId) -> bool {
        let before = self.children.len();
        self.children.retain(|&c| c != child);
        self.keyed.retain(|_, &mut c| c != child);
        before != self.children.len()
    }
}
