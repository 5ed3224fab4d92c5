//! The element document: instance storage, id registry and tree bookkeeping.

use std::collections::HashSet;

use indexmap::IndexMap;
use wong_core::{attrs, AttributeSet, DomError};

use crate::element::{ElementId, ElementNode};

/// A point the document can be rolled back to, see [`Dom::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    len: usize,
    journal: usize,
    depth: usize,
}

/// How to undo one change made while a checkpoint is open.
#[derive(Debug, Clone)]
enum Undo {
    /// State of an element that existed before the checkpoint
    Node { el: ElementId, node: ElementNode },
    /// Previous holder of an id registry entry
    Id { id: String, holder: Option<ElementId> },
}

/// An in-memory document of elements.
///
/// Owns every element ever created (elements are never recycled) and the registry
/// mapping `id` attribute values to elements.
#[derive(Debug, Clone, Default)]
pub struct Dom {
    nodes: Vec<ElementNode>,
    ids: IndexMap<String, ElementId>,
    journal: Vec<Undo>,
    /// Document size at each open checkpoint, innermost last
    marks: Vec<usize>,
}

impl Dom {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            ids: IndexMap::new(),
            journal: Vec::new(),
            marks: Vec::new(),
        }
    }

    /// Create a detached element and apply `attributes` to it.
    pub fn create_element(&mut self, tag: &str, attributes: Option<&AttributeSet>) -> ElementId {
        let el = ElementId(self.nodes.len());
        self.nodes.push(ElementNode::new(tag));

        if let Some(attributes) = attributes {
            for (name, value) in attributes.iter() {
                self.apply_attribute(el, name, value);
            }
        }

        el
    }

    /// Set one attribute on an element. Aliases are accepted.
    ///
    /// `key` becomes the element's key, `innerText` its text and `className` the native
    /// `class` attribute. `id` is stored natively and claimed in the id registry unless
    /// another element already holds it, in which case the claim is ignored.
    pub fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) -> Result<(), DomError> {
        self.node(el)?;
        self.apply_attribute(el, name, value);
        Ok(())
    }

    fn apply_attribute(&mut self, el: ElementId, name: &str, value: &str) {
        self.touch(el);
        match attrs::canonical_name(name) {
            attrs::KEY => self.nodes[el.0].key = Some(value.to_string()),
            attrs::INNER_TEXT => self.nodes[el.0].text = Some(value.to_string()),
            attrs::CLASS_NAME => {
                self.nodes[el.0]
                    .attributes
                    .insert("class".to_string(), value.to_string());
            }
            attrs::ID => {
                self.claim_id(el, value);
                self.nodes[el.0]
                    .attributes
                    .insert(attrs::ID.to_string(), value.to_string());
            }
            other => {
                self.nodes[el.0]
                    .attributes
                    .insert(other.to_string(), value.to_string());
            }
        }
    }

    fn claim_id(&mut self, el: ElementId, id: &str) {
        match self.ids.get(id) {
            Some(&holder) if holder == el => {}
            Some(&holder) => {
                tracing::debug!(id, holder = %holder, element = %el, "Id already claimed, ignoring");
            }
            None => {
                if let Some(previous) = self.nodes[el.0].html_id.take() {
                    self.bind_id(&previous, None);
                }
                self.nodes[el.0].html_id = Some(id.to_string());
                self.bind_id(id, Some(el));
            }
        }
    }

    /// Append `child` to `parent`, indexing it under its key if it has one.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), DomError> {
        self.link(parent, child, None)
    }

    /// Append several children in order.
    pub fn append(&mut self, parent: ElementId, children: &[ElementId]) -> Result<(), DomError> {
        for &child in children {
            self.append_child(parent, child)?;
        }
        Ok(())
    }

    /// Insert `child` into `parent` right before `reference`.
    pub fn insert_before(
        &mut self,
        parent: ElementId,
        child: ElementId,
        reference: ElementId,
    ) -> Result<(), DomError> {
        let position = self
            .node(parent)?
            .children
            .iter()
            .position(|&c| c == reference)
            .ok_or(DomError::NotAChild {
                parent: parent.0,
                child: reference.0,
            })?;
        self.link(parent, child, Some(position))
    }

    fn link(
        &mut self,
        parent: ElementId,
        child: ElementId,
        position: Option<usize>,
    ) -> Result<(), DomError> {
        if parent == child {
            return Err(DomError::SelfAppend { index: child.0 });
        }
        let key = self.node(child)?.key.clone();
        self.node(parent)?;
        self.touch(parent);
        self.touch(child);

        let parent_node = &mut self.nodes[parent.0];

        match position {
            Some(at) => parent_node.children.insert(at, child),
            None => parent_node.children.push(child),
        }
        if let Some(key) = key {
            parent_node.keyed.insert(key, child);
        }
        self.nodes[child.0].parents.push(parent);
        Ok(())
    }

    /// Remove an element from the document.
    ///
    /// The element is detached from every parent and releases its id. Its own children
    /// stay attached to it.
    pub fn remove(&mut self, el: ElementId) -> Result<(), DomError> {
        self.node(el)?;
        self.touch(el);

        let node = &mut self.nodes[el.0];
        node.removed = true;
        let parents = std::mem::take(&mut node.parents);
        let html_id = node.html_id.take();

        if let Some(id) = html_id {
            if self.ids.get(&id) == Some(&el) {
                self.bind_id(&id, None);
            }
        }
        for parent in parents {
            self.touch(parent);
            self.nodes[parent.0].detach_child(el);
        }
        Ok(())
    }

    /// Detach `child` from `parent` and remove it from the document.
    pub fn remove_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), DomError> {
        self.node(child)?;
        if !self.node(parent)?.children.contains(&child) {
            return Err(DomError::NotAChild {
                parent: parent.0,
                child: child.0,
            });
        }
        self.touch(parent);
        self.touch(child);
        self.nodes[parent.0].detach_child(child);
        self.nodes[child.0].parents.retain(|&p| p != parent);
        self.remove(child)
    }

    /// Remove every child of `parent`.
    pub fn remove_children(&mut self, parent: ElementId) -> Result<(), DomError> {
        let children = self.node(parent)?.children.clone();
        for child in children {
            // A child appended twice is already gone on its second visit.
            if self.nodes[parent.0].children.contains(&child) {
                self.remove_child(parent, child)?;
            }
        }
        Ok(())
    }

    /// Find the nearest descendant with the given key.
    ///
    /// Direct children are checked first, then each child's subtree in order.
    pub fn search_descendant(&self, el: ElementId, key: &str) -> Option<ElementId> {
        let mut visited = HashSet::new();
        self.search_from(el, key, &mut visited)
    }

    fn search_from(
        &self,
        el: ElementId,
        key: &str,
        visited: &mut HashSet<ElementId>,
    ) -> Option<ElementId> {
        if !visited.insert(el) {
            return None;
        }
        let node = self.nodes.get(el.0)?;
        if let Some(&found) = node.keyed.get(key) {
            return Some(found);
        }
        node.children
            .iter()
            .find_map(|&child| self.search_from(child, key, visited))
    }

    /// Look up several keys at once, see [`Dom::search_descendant`].
    pub fn search_descendants(&self, el: ElementId, keys: &[&str]) -> Vec<Option<ElementId>> {
        keys.iter()
            .map(|key| self.search_descendant(el, key))
            .collect()
    }

    /// Element currently holding `id` in the registry.
    pub fn get_by_id(&self, id: &str) -> Option<ElementId> {
        self.ids.get(id).copied()
    }

    /// Direct child of `parent` indexed under `key`.
    pub fn child(&self, parent: ElementId, key: &str) -> Option<ElementId> {
        self.nodes.get(parent.0)?.keyed.get(key).copied()
    }

    /// Children of an element in insertion order.
    pub fn children(&self, el: ElementId) -> &[ElementId] {
        self.nodes.get(el.0).map(|n| n.children.as_slice()).unwrap_or_default()
    }

    /// Elements this element has been appended to.
    pub fn parents(&self, el: ElementId) -> &[ElementId] {
        self.nodes.get(el.0).map(|n| n.parents.as_slice()).unwrap_or_default()
    }

    pub fn tag(&self, el: ElementId) -> Option<&str> {
        self.nodes.get(el.0).map(|n| n.tag.as_str())
    }

    /// A native attribute value.
    pub fn attribute(&self, el: ElementId, name: &str) -> Option<&str> {
        self.nodes.get(el.0)?.attributes.get(name).map(String::as_str)
    }

    /// All native attributes in the order they were set.
    pub fn attributes(&self, el: ElementId) -> impl Iterator<Item = (&str, &str)> {
        self.nodes
            .get(el.0)
            .into_iter()
            .flat_map(|n| n.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    pub fn text(&self, el: ElementId) -> Option<&str> {
        self.nodes.get(el.0)?.text.as_deref()
    }

    pub fn set_text(&mut self, el: ElementId, text: impl Into<String>) -> Result<(), DomError> {
        self.node(el)?;
        self.touch(el);
        self.nodes[el.0].text = Some(text.into());
        Ok(())
    }

    pub fn key(&self, el: ElementId) -> Option<&str> {
        self.nodes.get(el.0)?.key.as_deref()
    }

    /// The id this element holds in the registry.
    pub fn html_id(&self, el: ElementId) -> Option<&str> {
        self.nodes.get(el.0)?.html_id.as_deref()
    }

    pub fn is_removed(&self, el: ElementId) -> bool {
        self.nodes.get(el.0).map_or(false, |n| n.removed)
    }

    pub fn contains(&self, el: ElementId) -> bool {
        el.0 < self.nodes.len()
    }

    /// Number of elements ever created.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Open a checkpoint.
    ///
    /// Until it is closed with [`Dom::commit`] or [`Dom::rollback`], changes to elements
    /// that already exist are journaled. Checkpoints nest and must be closed innermost
    /// first.
    pub fn checkpoint(&mut self) -> Checkpoint {
        let checkpoint = Checkpoint {
            len: self.nodes.len(),
            journal: self.journal.len(),
            depth: self.marks.len(),
        };
        self.marks.push(self.nodes.len());
        checkpoint
    }

    /// Keep every change made since `checkpoint`.
    pub fn commit(&mut self, checkpoint: Checkpoint) {
        self.marks.truncate(checkpoint.depth);
        if self.marks.is_empty() {
            self.journal.clear();
        }
    }

    /// Undo every change made since `checkpoint`.
    ///
    /// Elements created since are dropped along with their id claims. Older elements get
    /// back their attributes, text, key, children, key index, parents and id claims.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        while self.journal.len() > checkpoint.journal {
            match self.journal.pop() {
                Some(Undo::Node { el, node }) => {
                    if let Some(slot) = self.nodes.get_mut(el.0) {
                        *slot = node;
                    }
                }
                Some(Undo::Id { id, holder: Some(holder) }) => {
                    self.ids.insert(id, holder);
                }
                Some(Undo::Id { id, holder: None }) => {
                    self.ids.shift_remove(&id);
                }
                None => break,
            }
        }

        self.nodes.truncate(checkpoint.len);
        self.marks.truncate(checkpoint.depth);
        if self.marks.is_empty() {
            self.journal.clear();
        }
    }

    /// Journal the state of `el` before it changes, if it predates the open checkpoint.
    fn touch(&mut self, el: ElementId) {
        let Some(&mark) = self.marks.last() else {
            return;
        };
        if el.0 < mark {
            if let Some(node) = self.nodes.get(el.0) {
                self.journal.push(Undo::Node {
                    el,
                    node: node.clone(),
                });
            }
        }
    }

    /// Point `id` at `holder` (or release it), journaling the previous holder.
    fn bind_id(&mut self, id: &str, holder: Option<ElementId>) {
        let previous = match holder {
            Some(el) => self.ids.insert(id.to_string(), el),
            None => self.ids.shift_remove(id),
        };
        if !self.marks.is_empty() {
            self.journal.push(Undo::Id {
                id: id.to_string(),
                holder: previous,
            });
        }
    }

    fn node(&self, el: ElementId) -> Result<&ElementNode, DomError> {
        self.nodes
            .get(el.0)
            .ok_or(DomError::UnknownElement { index: el.0 })
    }
}
