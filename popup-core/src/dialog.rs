//! Dialog: open/closed lifecycle and its side effects
//!
//! The dialog never opens or closes itself. Triggers, the Escape/backdrop
//! handlers and controlled-state sync only touch the active class on the
//! dialog node; [`DialogController::observe`] runs when that class changes
//! and brings everything else (focus trap, scroll lock, markers, aria) in
//! line with it.

use std::fmt;
use std::rc::Rc;

use crate::dom::Document;
use crate::layer::{find_layer, join_classes, read_settings};
use crate::names::{
    ARIA_HIDDEN_ATTR, DIALOG_ACTIVE_CLASS, DIALOG_CLASS, ESCAPE_KEY, LAYER_ACTIVE_CLASS,
    TAB_INDEX_ATTR, TRIGGER_ACTIVE_CLASS, TRIGGER_OPENER_CLASS,
};
use crate::settings::PopupSettings;
use crate::trigger::triggers_for;
use crate::utils::{hide_tab_indexes, show_tab_indexes, toggle_scroll};
use crate::Selector;

/// Class list a Dialog renders.
pub fn dialog_class(extra: Option<&str>) -> String {
    join_classes(DIALOG_CLASS, extra)
}

/// How a dialog relates to state owned by its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateMode {
    /// No setter: state lives in the DOM class only.
    Internal,
    /// Setter without state: every transition is reported upward.
    Reporting,
    /// State and setter: the external value drives the class.
    Controlled,
}

/// External state passed to a Dialog.
#[derive(Clone, Default)]
pub struct StateBinding {
    pub state: Option<bool>,
    pub setter: Option<Rc<dyn Fn(bool)>>,
}

impl fmt::Debug for StateBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateBinding")
            .field("state", &self.state)
            .field("setter", &self.setter.is_some())
            .finish()
    }
}

impl StateBinding {
    pub fn reporting(setter: impl Fn(bool) + 'static) -> Self {
        Self {
            state: None,
            setter: Some(Rc::new(setter)),
        }
    }

    pub fn controlled(state: bool, setter: impl Fn(bool) + 'static) -> Self {
        Self {
            state: Some(state),
            setter: Some(Rc::new(setter)),
        }
    }

    pub fn mode(&self) -> StateMode {
        match (self.state, &self.setter) {
            (Some(_), Some(_)) => StateMode::Controlled,
            (None, Some(_)) => StateMode::Reporting,
            (_, None) => StateMode::Internal,
        }
    }
}

/// A change of the mirrored state, with the element to focus afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<N> {
    pub open: bool,
    pub focus: Option<N>,
}

/// Reacts to one dialog node's active class.
pub struct DialogController<D: Document> {
    document: D,
    id: String,
    node: Option<D::Node>,
    is_open: bool,
    binding: StateBinding,
}

impl<D: Document> DialogController<D> {
    pub fn new(document: D, id: impl Into<String>, binding: StateBinding) -> Self {
        Self {
            document,
            id: id.into(),
            node: None,
            is_open: false,
            binding,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The mirrored state, as of the last [`observe`](Self::observe).
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn node(&self) -> Option<&D::Node> {
        self.node.as_ref()
    }

    pub fn mode(&self) -> StateMode {
        self.binding.mode()
    }

    /// Bind the rendered dialog node and apply controlled state to it.
    pub fn attach(&mut self, node: D::Node) {
        self.node = Some(node);
        self.apply_external_state();
    }

    /// Unbind the node. An open dialog first undoes its page-wide effects
    /// (tab order, scroll lock, markers); nothing is reported.
    pub fn detach(&mut self) -> Option<D::Node> {
        if self.is_open {
            self.is_open = false;
            if let Some(node) = &self.node {
                tracing::debug!("Dialog {} unmounted while open", self.id);
                self.enter_closed(node);
            }
        }
        self.node.take()
    }

    /// Replace the external binding; a changed controlled value is written to
    /// the class right away.
    pub fn set_binding(&mut self, binding: StateBinding) {
        let changed = binding.state != self.binding.state || binding.mode() != self.mode();
        self.binding = binding;
        if changed {
            self.apply_external_state();
        }
    }

    /// Write the controlled value onto the active class. No-op unless
    /// controlled.
    pub fn apply_external_state(&self) {
        if self.mode() != StateMode::Controlled {
            return;
        }
        let Some(state) = self.binding.state else {
            return;
        };
        let Some(node) = self.node_or_warn() else {
            return;
        };
        if state {
            self.document.add_class(node, DIALOG_ACTIVE_CLASS);
        } else {
            self.document.remove_class(node, DIALOG_ACTIVE_CLASS);
        }
    }

    /// Sync the mirror with the class and run side effects on a change.
    ///
    /// Call after the class may have changed (mutation observer callback).
    /// Returns `None` when the class agrees with the mirror.
    pub fn observe(&mut self) -> Option<Transition<D::Node>> {
        let node = self.node_or_warn()?.clone();
        let open = self.document.has_class(&node, DIALOG_ACTIVE_CLASS);
        if open == self.is_open {
            return None;
        }
        self.is_open = open;
        tracing::debug!("Dialog {} {}", self.id, if open { "opened" } else { "closed" });

        let focus = if open {
            self.enter_open(&node)
        } else {
            self.enter_closed(&node)
        };

        if self.mode() == StateMode::Reporting {
            if let Some(setter) = &self.binding.setter {
                setter(open);
            }
        }

        Some(Transition { open, focus })
    }

    /// Global keydown handler. Returns whether the dialog was asked to close.
    pub fn handle_key(&self, key: &str) -> bool {
        if !self.is_open || key != ESCAPE_KEY {
            return false;
        }
        let Some(node) = self.node_or_warn() else {
            return false;
        };
        let Some(layer) = find_layer(&self.document, node) else {
            tracing::warn!("Layer for dialog {} is not found, ignoring Escape", self.id);
            return false;
        };
        let settings = read_settings(&self.document, &layer);
        if !settings.exit_on_escape || !settings.allows_interaction() {
            return false;
        }
        self.document.remove_class(node, DIALOG_ACTIVE_CLASS);
        true
    }

    /// Global click handler. Only a click on this dialog's backdrop itself
    /// counts, not one on any of its descendants.
    pub fn handle_click(&self, target: &D::Node) -> bool {
        if !self.is_open {
            return false;
        }
        let Some(node) = self.node_or_warn() else {
            return false;
        };
        let Some(layer) = find_layer(&self.document, node) else {
            return false;
        };
        if *target != layer {
            return false;
        }
        let settings = read_settings(&self.document, &layer);
        if !settings.exit_on_layer || !settings.allows_interaction() {
            return false;
        }
        self.document.remove_class(node, DIALOG_ACTIVE_CLASS);
        true
    }

    fn node_or_warn(&self) -> Option<&D::Node> {
        if self.node.is_none() {
            tracing::warn!("Dialog {} node is not found", self.id);
        }
        self.node.as_ref()
    }

    fn scroll_extend_element(&self, settings: &PopupSettings) -> Option<D::Node> {
        let id = settings.scroll_extend_element_id.as_deref()?;
        let node = self.document.element_by_id(id);
        if node.is_none() {
            tracing::warn!("Scroll extend element {id} is not found, using body");
        }
        node
    }

    fn enter_open(&self, node: &D::Node) -> Option<D::Node> {
        let doc = &self.document;
        let layer = find_layer(doc, node);
        let settings = self.layer_settings(layer.as_ref());

        hide_tab_indexes(doc, Some(&self.id), None);

        let focus = doc
            .query_all_within(node, Selector::HasAttribute(TAB_INDEX_ATTR))
            .into_iter()
            .next();

        if let Some(layer) = &layer {
            doc.add_class(layer, LAYER_ACTIVE_CLASS);
            doc.set_attribute(layer, ARIA_HIDDEN_ATTR, "false");
        }
        doc.set_attribute(node, ARIA_HIDDEN_ATTR, "false");

        for trigger in self.triggers_or_warn() {
            doc.add_class(&trigger, TRIGGER_ACTIVE_CLASS);
        }

        if settings.hide_scroll {
            let extend = self.scroll_extend_element(&settings);
            toggle_scroll(doc, true, extend.as_ref());
        }

        focus
    }

    fn enter_closed(&self, node: &D::Node) -> Option<D::Node> {
        let doc = &self.document;
        let layer = find_layer(doc, node);
        let settings = self.layer_settings(layer.as_ref());

        show_tab_indexes(doc);

        let triggers = self.triggers_or_warn();
        let opener = triggers
            .iter()
            .find(|t| doc.has_class(t, TRIGGER_OPENER_CLASS))
            .cloned();
        if let Some(opener) = &opener {
            doc.remove_class(opener, TRIGGER_OPENER_CLASS);
        }

        if let Some(layer) = &layer {
            doc.remove_class(layer, LAYER_ACTIVE_CLASS);
            doc.set_attribute(layer, ARIA_HIDDEN_ATTR, "true");
        }
        doc.set_attribute(node, ARIA_HIDDEN_ATTR, "true");

        for trigger in &triggers {
            doc.remove_class(trigger, TRIGGER_ACTIVE_CLASS);
        }

        if settings.hide_scroll {
            let extend = self.scroll_extend_element(&settings);
            toggle_scroll(doc, false, extend.as_ref());
        }

        opener
    }

    fn layer_settings(&self, layer: Option<&D::Node>) -> PopupSettings {
        match layer {
            Some(layer) => read_settings(&self.document, layer),
            None => {
                tracing::warn!("Layer for dialog {} is not found", self.id);
                PopupSettings::default()
            }
        }
    }

    fn triggers_or_warn(&self) -> Vec<D::Node> {
        let triggers = triggers_for(&self.document, &self.id);
        if triggers.is_empty() {
            tracing::warn!("Triggers for dialog {} are not found", self.id);
        }
        triggers
    }
}
