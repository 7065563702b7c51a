//! In-memory document
//!
//! A small element tree with just enough behaviour for the popup protocol:
//! classes, attributes, inline style, viewport metrics, a focused element and
//! attribute mutation observation. Handles are cheap clones of one shared
//! tree, the same way every `web_sys::Document` refers to one page.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use super::{Document, Selector};

const DEFAULT_VIEWPORT_WIDTH: f64 = 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// One attribute change on an observed node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub target: NodeId,
    pub attribute: String,
}

#[derive(Debug)]
struct Element {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    client_width: Option<f64>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            parent: None,
            children: Vec::new(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            style: BTreeMap::new(),
            client_width: None,
        }
    }

    fn matches(&self, selector: Selector<'_>) -> bool {
        match selector {
            Selector::Id(id) => self.attributes.get("id").is_some_and(|v| v == id),
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
            Selector::HasAttribute(name) => {
                (name == "class" && !self.classes.is_empty()) || self.attributes.contains_key(name)
            }
            Selector::AttributeEquals(name, value) => {
                if name == "class" {
                    self.classes.join(" ") == value
                } else {
                    self.attributes.get(name).is_some_and(|v| v == value)
                }
            }
        }
    }
}

#[derive(Debug)]
struct Observer {
    target: NodeId,
    records: Vec<MutationRecord>,
}

#[derive(Debug)]
struct Tree {
    elements: Vec<Element>,
    root: NodeId,
    body: NodeId,
    viewport_width: f64,
    focused: Option<NodeId>,
    focus_history: Vec<NodeId>,
    observers: HashMap<ObserverId, Observer>,
    next_observer: u64,
}

impl Tree {
    fn element(&self, node: NodeId) -> &Element {
        &self.elements[node.0]
    }

    fn element_mut(&mut self, node: NodeId) -> &mut Element {
        &mut self.elements[node.0]
    }

    fn record(&mut self, target: NodeId, attribute: &str) {
        for observer in self.observers.values_mut() {
            if observer.target == target {
                observer.records.push(MutationRecord {
                    target,
                    attribute: attribute.to_string(),
                });
            }
        }
    }

    /// Pre-order walk below `start`, excluding `start`.
    fn descendants(&self, start: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.element(start).children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.element(node).children.iter().rev().copied());
        }
        out
    }

    fn is_connected(&self, mut node: NodeId) -> bool {
        loop {
            if node == self.root {
                return true;
            }
            match self.element(node).parent {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }
}

/// Shared handle onto an in-memory element tree.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    tree: Rc<RefCell<Tree>>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// An `html > body` skeleton with a scrollbar-free viewport.
    pub fn new() -> Self {
        let mut html = Element::new("html");
        let mut body = Element::new("body");
        let root = NodeId(0);
        let body_id = NodeId(1);
        html.children.push(body_id);
        body.parent = Some(root);

        Self {
            tree: Rc::new(RefCell::new(Tree {
                elements: vec![html, body],
                root,
                body: body_id,
                viewport_width: DEFAULT_VIEWPORT_WIDTH,
                focused: None,
                focus_history: Vec::new(),
                observers: HashMap::new(),
                next_observer: 0,
            })),
        }
    }

    pub fn body_id(&self) -> NodeId {
        self.tree.borrow().body
    }

    pub fn root_id(&self) -> NodeId {
        self.tree.borrow().root
    }

    /// Create a detached element.
    pub fn create_element(&self, tag: &str) -> NodeId {
        let mut tree = self.tree.borrow_mut();
        tree.elements.push(Element::new(tag));
        NodeId(tree.elements.len() - 1)
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&self, parent: NodeId, child: NodeId) {
        let mut tree = self.tree.borrow_mut();
        if let Some(old) = tree.element(child).parent {
            tree.element_mut(old).children.retain(|c| *c != child);
        }
        tree.element_mut(child).parent = Some(parent);
        tree.element_mut(parent).children.push(child);
    }

    /// Create an element and append it in one step.
    pub fn append_element(&self, parent: NodeId, tag: &str) -> NodeId {
        let node = self.create_element(tag);
        self.append_child(parent, node);
        node
    }

    /// Detach `node` (and its subtree) from the document.
    pub fn remove(&self, node: NodeId) {
        let mut tree = self.tree.borrow_mut();
        if let Some(parent) = tree.element_mut(node).parent.take() {
            tree.element_mut(parent).children.retain(|c| *c != node);
        }
        if tree.focused.is_some_and(|f| f == node) {
            tree.focused = None;
        }
    }

    pub fn tag(&self, node: NodeId) -> String {
        self.tree.borrow().element(node).tag.clone()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.borrow().element(node).parent
    }

    /// Whether `node` is `ancestor` or lies below it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let tree = self.tree.borrow();
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = tree.element(n).parent;
        }
        false
    }

    /// Set `window.innerWidth` and the root's client width. The difference is
    /// the scrollbar width the scroll lock compensates for.
    pub fn set_viewport(&self, inner_width: f64, root_client_width: f64) {
        let mut tree = self.tree.borrow_mut();
        tree.viewport_width = inner_width;
        let root = tree.root;
        tree.element_mut(root).client_width = Some(root_client_width);
    }

    pub fn set_client_width(&self, node: NodeId, width: f64) {
        self.tree.borrow_mut().element_mut(node).client_width = Some(width);
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.tree.borrow().focused
    }

    /// Every focus call in order, including repeated ones.
    pub fn focus_history(&self) -> Vec<NodeId> {
        self.tree.borrow().focus_history.clone()
    }

    /// Start recording attribute mutations on `node`.
    pub fn observe(&self, node: NodeId) -> ObserverId {
        let mut tree = self.tree.borrow_mut();
        let id = ObserverId(tree.next_observer);
        tree.next_observer += 1;
        tree.observers.insert(
            id,
            Observer {
                target: node,
                records: Vec::new(),
            },
        );
        id
    }

    /// Drain the records queued for `observer`.
    pub fn take_records(&self, observer: ObserverId) -> Vec<MutationRecord> {
        self.tree
            .borrow_mut()
            .observers
            .get_mut(&observer)
            .map(|o| std::mem::take(&mut o.records))
            .unwrap_or_default()
    }

    pub fn has_pending_records(&self) -> bool {
        self.tree
            .borrow()
            .observers
            .values()
            .any(|o| !o.records.is_empty())
    }

    pub fn disconnect(&self, observer: ObserverId) {
        self.tree.borrow_mut().observers.remove(&observer);
    }
}

impl Document for MemoryDocument {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_all(Selector::Id(id)).into_iter().next()
    }

    fn query_all(&self, selector: Selector<'_>) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        let root = tree.root;
        let nodes = std::iter::once(root)
            .chain(tree.descendants(root))
            .filter(|n| tree.element(*n).matches(selector))
            .collect();
        nodes
    }

    fn query_all_within(&self, root: &NodeId, selector: Selector<'_>) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        let nodes = tree
            .descendants(*root)
            .into_iter()
            .filter(|n| tree.element(*n).matches(selector))
            .collect();
        nodes
    }

    fn closest(&self, node: &NodeId, selector: Selector<'_>) -> Option<NodeId> {
        let tree = self.tree.borrow();
        let mut current = Some(*node);
        while let Some(n) = current {
            if tree.element(n).matches(selector) {
                return Some(n);
            }
            current = tree.element(n).parent;
        }
        None
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.tree
            .borrow()
            .element(*node)
            .classes
            .iter()
            .any(|c| c == class)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        let mut tree = self.tree.borrow_mut();
        let element = tree.element_mut(*node);
        if element.classes.iter().any(|c| c == class) {
            return;
        }
        element.classes.push(class.to_string());
        tree.record(*node, "class");
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        let mut tree = self.tree.borrow_mut();
        let element = tree.element_mut(*node);
        let before = element.classes.len();
        element.classes.retain(|c| c != class);
        if element.classes.len() != before {
            tree.record(*node, "class");
        }
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        let tree = self.tree.borrow();
        let element = tree.element(*node);
        if name == "class" {
            return (!element.classes.is_empty()).then(|| element.classes.join(" "));
        }
        element.attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        let mut tree = self.tree.borrow_mut();
        let element = tree.element_mut(*node);
        if name == "class" {
            element.classes = value.split_whitespace().map(str::to_string).collect();
        } else if element.attributes.get(name).is_some_and(|v| v == value) {
            return;
        } else {
            element.attributes.insert(name.to_string(), value.to_string());
        }
        tree.record(*node, name);
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) {
        let mut tree = self.tree.borrow_mut();
        let element = tree.element_mut(*node);
        let removed = if name == "class" {
            !std::mem::take(&mut element.classes).is_empty()
        } else {
            element.attributes.remove(name).is_some()
        };
        if removed {
            tree.record(*node, name);
        }
    }

    fn style(&self, node: &NodeId, property: &str) -> String {
        self.tree
            .borrow()
            .element(*node)
            .style
            .get(property)
            .cloned()
            .unwrap_or_default()
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        let mut tree = self.tree.borrow_mut();
        tree.element_mut(*node)
            .style
            .insert(property.to_string(), value.to_string());
        tree.record(*node, "style");
    }

    fn remove_style(&self, node: &NodeId, property: &str) {
        let mut tree = self.tree.borrow_mut();
        if tree.element_mut(*node).style.remove(property).is_some() {
            tree.record(*node, "style");
        }
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.tree.borrow().body)
    }

    fn root(&self) -> Option<NodeId> {
        Some(self.tree.borrow().root)
    }

    fn viewport_width(&self) -> f64 {
        self.tree.borrow().viewport_width
    }

    fn client_width(&self, node: &NodeId) -> f64 {
        let tree = self.tree.borrow();
        tree.element(*node)
            .client_width
            .unwrap_or(tree.viewport_width)
    }

    fn focus(&self, node: &NodeId) {
        let mut tree = self.tree.borrow_mut();
        if !tree.is_connected(*node) {
            return;
        }
        tree.focused = Some(*node);
        tree.focus_history.push(*node);
    }
}
