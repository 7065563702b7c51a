//! Headless page: popups without a browser
//!
//! Renders Layer, Dialog and Trigger nodes into a [`MemoryDocument`] and keeps
//! a registry of mounted dialogs keyed by ID. Interactions only mutate
//! classes, like they do in the browser; [`Page::flush`] then plays the part
//! of the mutation observer and delivers pending records to their dialogs.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::dialog::{dialog_class, DialogController, StateBinding, Transition};
use crate::dom::memory::{MemoryDocument, NodeId, ObserverId};
use crate::dom::Document;
use crate::error::PopupError;
use crate::layer::LayerAttributes;
use crate::names::{ARIA_HIDDEN_ATTR, SETTINGS_ATTR, TAB_INDEX_ATTR, TARGET_ATTR};
use crate::settings::PopupSettings;
use crate::trigger::{is_nested_in_target, toggle, ToggleOutcome, TriggerAttributes};

/// Upper bound on observer rounds per flush. Side effects never touch a
/// dialog's own class, so one or two rounds is the norm.
const MAX_FLUSH_ROUNDS: usize = 16;

struct MountedDialog {
    controller: DialogController<MemoryDocument>,
    observer: ObserverId,
}

pub struct Page {
    document: MemoryDocument,
    dialogs: BTreeMap<String, MountedDialog>,
    on_click: HashMap<NodeId, Rc<dyn Fn()>>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self::with_document(MemoryDocument::new())
    }

    pub fn with_document(document: MemoryDocument) -> Self {
        Self {
            document,
            dialogs: BTreeMap::new(),
            on_click: HashMap::new(),
        }
    }

    pub fn document(&self) -> &MemoryDocument {
        &self.document
    }

    pub fn body(&self) -> NodeId {
        self.document.body_id()
    }

    /// Render a Layer under `parent`.
    pub fn layer(&self, parent: NodeId, settings: &PopupSettings, class: Option<&str>) -> NodeId {
        let attrs = LayerAttributes::new(settings, class);
        let doc = &self.document;
        let node = doc.append_element(parent, "div");
        doc.set_attribute(&node, "class", &attrs.class);
        doc.set_attribute(&node, SETTINGS_ATTR, &attrs.settings);
        doc.set_attribute(&node, ARIA_HIDDEN_ATTR, "true");
        doc.set_attribute(&node, "style", attrs.style);
        doc.set_attribute(&node, TAB_INDEX_ATTR, attrs.tab_index);
        node
    }

    /// Render a Dialog under `parent` and mount it.
    pub fn dialog(&mut self, parent: NodeId, id: &str, binding: StateBinding) -> NodeId {
        let doc = &self.document;
        let node = doc.append_element(parent, "div");
        doc.set_attribute(&node, "class", &dialog_class(None));
        doc.set_attribute(&node, "id", id);
        doc.set_attribute(&node, "role", "dialog");
        doc.set_attribute(&node, "aria-modal", "true");
        doc.set_attribute(&node, ARIA_HIDDEN_ATTR, "true");

        let observer = doc.observe(node);
        let mut controller = DialogController::new(doc.clone(), id, binding);
        controller.attach(node);

        if let Some(previous) = self.dialogs.insert(
            id.to_string(),
            MountedDialog {
                controller,
                observer,
            },
        ) {
            tracing::warn!("Dialog {id} mounted twice, replacing the earlier one");
            self.document.disconnect(previous.observer);
        }
        node
    }

    /// Render a Trigger for dialog `id` under `parent`.
    pub fn trigger(&mut self, parent: NodeId, id: &str, on_click: Option<Rc<dyn Fn()>>) -> NodeId {
        let doc = &self.document;
        let node = doc.append_element(parent, "button");
        let attrs = TriggerAttributes::new(None, is_nested_in_target(doc, &node, id));
        doc.set_attribute(&node, "class", &attrs.class);
        doc.set_attribute(&node, TARGET_ATTR, id);
        doc.set_attribute(&node, TAB_INDEX_ATTR, "0");
        if let Some(value) = attrs.aria_haspopup {
            doc.set_attribute(&node, "aria-haspopup", value);
        }
        if let Some(on_click) = on_click {
            self.on_click.insert(node, on_click);
        }
        node
    }

    /// Unmount dialog `id`: stop observing it, undo its effects if it is open
    /// and remove its node.
    pub fn unmount_dialog(&mut self, id: &str) -> bool {
        let Some(mut mounted) = self.dialogs.remove(id) else {
            return false;
        };
        self.document.disconnect(mounted.observer);
        if let Some(node) = mounted.controller.detach() {
            self.document.remove(node);
        }
        true
    }

    /// Activate a trigger: toggle its dialog, then run its callback.
    pub fn click_trigger(&mut self, trigger: NodeId) -> Result<ToggleOutcome, PopupError> {
        let id = self
            .document
            .attribute(&trigger, TARGET_ATTR)
            .unwrap_or_default();
        let outcome = toggle(&self.document, &trigger, &id)?;
        if let Some(on_click) = self.on_click.get(&trigger) {
            on_click();
        }
        Ok(outcome)
    }

    /// Dispatch a global keydown. Returns whether any dialog asked to close.
    pub fn press_key(&self, key: &str) -> bool {
        self.dialogs
            .values()
            .fold(false, |closed, d| d.controller.handle_key(key) || closed)
    }

    /// Dispatch a global click on `target`.
    pub fn click(&self, target: NodeId) -> bool {
        self.dialogs
            .values()
            .fold(false, |closed, d| d.controller.handle_click(&target) || closed)
    }

    /// Re-render dialog `id` with new external state.
    pub fn set_state(&mut self, id: &str, binding: StateBinding) {
        match self.dialogs.get_mut(id) {
            Some(mounted) => mounted.controller.set_binding(binding),
            None => tracing::warn!("Dialog {id} is not mounted"),
        }
    }

    /// The mirrored state of dialog `id`.
    pub fn is_open(&self, id: &str) -> Option<bool> {
        self.dialogs.get(id).map(|d| d.controller.is_open())
    }

    /// Deliver pending mutation records and apply the resulting side
    /// effects. Focus moves immediately: headless nodes are focusable as
    /// soon as they exist.
    pub fn flush(&mut self) -> Vec<(String, Transition<NodeId>)> {
        let mut transitions = Vec::new();

        for _ in 0..MAX_FLUSH_ROUNDS {
            if !self.document.has_pending_records() {
                break;
            }
            for (id, mounted) in self.dialogs.iter_mut() {
                if self.document.take_records(mounted.observer).is_empty() {
                    continue;
                }
                if let Some(transition) = mounted.controller.observe() {
                    if let Some(focus) = &transition.focus {
                        self.document.focus(focus);
                    }
                    transitions.push((id.clone(), transition));
                }
            }
        }

        transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::DIALOG_ACTIVE_CLASS;
    use std::cell::Cell;

    #[test]
    fn test_rendered_contract() {
        let mut page = Page::new();
        let layer = page.layer(page.body(), &PopupSettings::default(), Some("fancy"));
        let dialog = page.dialog(layer, "p", StateBinding::default());
        let inner = page.trigger(dialog, "p", None);
        let outer = page.trigger(page.body(), "p", None);
        let doc = page.document();

        assert_eq!(doc.attribute(&layer, "class").as_deref(), Some("popup-layer fancy"));
        assert!(doc.attribute(&layer, SETTINGS_ATTR).is_some());
        assert_eq!(doc.attribute(&dialog, "role").as_deref(), Some("dialog"));
        assert_eq!(doc.attribute(&dialog, "aria-modal").as_deref(), Some("true"));
        assert_eq!(doc.attribute(&dialog, ARIA_HIDDEN_ATTR).as_deref(), Some("true"));
        assert_eq!(doc.attribute(&inner, "aria-haspopup"), None);
        assert_eq!(doc.attribute(&outer, "aria-haspopup").as_deref(), Some("dialog"));
        assert_eq!(doc.attribute(&outer, TARGET_ATTR).as_deref(), Some("p"));
    }

    #[test]
    fn test_state_changes_only_after_flush() {
        let mut page = Page::new();
        let layer = page.layer(page.body(), &PopupSettings::default(), None);
        page.dialog(layer, "p", StateBinding::default());
        let trigger = page.trigger(page.body(), "p", None);

        page.click_trigger(trigger).unwrap();
        assert_eq!(page.is_open("p"), Some(false));

        let transitions = page.flush();
        assert_eq!(transitions.len(), 1);
        assert_eq!(page.is_open("p"), Some(true));
    }

    #[test]
    fn test_callback_runs_even_when_prevented() {
        let mut page = Page::new();
        let settings = PopupSettings::default().with_prevent_user_interactions(true);
        let layer = page.layer(page.body(), &settings, None);
        page.dialog(layer, "p", StateBinding::default());
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let trigger = page.trigger(
            page.body(),
            "p",
            Some(Rc::new(move || counter.set(counter.get() + 1))),
        );

        assert_eq!(page.click_trigger(trigger), Ok(ToggleOutcome::Prevented));
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_unmounted_dialog_is_forgotten() {
        let mut page = Page::new();
        let layer = page.layer(page.body(), &PopupSettings::default(), None);
        let dialog = page.dialog(layer, "p", StateBinding::default());
        let trigger = page.trigger(page.body(), "p", None);

        assert!(page.unmount_dialog("p"));
        assert!(!page.unmount_dialog("p"));
        assert_eq!(page.is_open("p"), None);
        assert_eq!(
            page.click_trigger(trigger),
            Err(PopupError::DialogNotFound("p".to_string()))
        );
        assert!(!page.document().has_class(&dialog, DIALOG_ACTIVE_CLASS));
    }

    #[test]
    fn test_unmounting_open_dialog_releases_page() {
        let mut page = Page::new();
        let layer = page.layer(page.body(), &PopupSettings::default(), None);
        page.dialog(layer, "p", StateBinding::default());
        let trigger = page.trigger(page.body(), "p", None);

        page.click_trigger(trigger).unwrap();
        page.flush();
        let doc = page.document().clone();
        assert_eq!(doc.style(&doc.body_id(), "overflow-y"), "hidden");
        assert_eq!(doc.attribute(&trigger, TAB_INDEX_ATTR).as_deref(), Some("-1"));

        assert!(page.unmount_dialog("p"));

        assert_eq!(doc.style(&doc.body_id(), "overflow-y"), "");
        assert_eq!(doc.style(&doc.root_id(), "overflow-y"), "");
        assert_eq!(doc.attribute(&trigger, TAB_INDEX_ATTR).as_deref(), Some("0"));
        assert_eq!(doc.attribute(&layer, ARIA_HIDDEN_ATTR).as_deref(), Some("true"));
        assert!(page.flush().is_empty());
    }
}
