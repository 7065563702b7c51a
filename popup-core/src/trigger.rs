//! Trigger: a control that flips its target dialog's active class

use crate::dom::{Document, Selector};
use crate::error::PopupError;
use crate::layer::{find_layer, join_classes, read_settings};
use crate::names::{
    DIALOG_ACTIVE_CLASS, DIALOG_CLASS, KEEP_TAB_INDEX_CLASS, TARGET_ATTR, TRIGGER_CLASS,
    TRIGGER_OPENER_CLASS,
};

/// What a trigger activation did to its dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Opened,
    Closed,
    /// The layer forbids user interaction; nothing changed.
    Prevented,
}

/// Attribute values a Trigger renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerAttributes {
    pub class: String,
    pub aria_haspopup: Option<&'static str>,
}

impl TriggerAttributes {
    /// A trigger nested in its own dialog stays tabbable while the dialog is
    /// open and does not announce a popup.
    pub fn new(class: Option<&str>, nested_in_target: bool) -> Self {
        let base = if nested_in_target {
            format!("{TRIGGER_CLASS} {KEEP_TAB_INDEX_CLASS}")
        } else {
            TRIGGER_CLASS.to_string()
        };
        Self {
            class: join_classes(&base, class),
            aria_haspopup: (!nested_in_target).then_some("dialog"),
        }
    }
}

/// Whether `trigger` sits inside the dialog with id `id`.
pub fn is_nested_in_target<D: Document>(document: &D, trigger: &D::Node, id: &str) -> bool {
    document
        .closest(trigger, Selector::Id(id))
        .is_some_and(|node| document.has_class(&node, DIALOG_CLASS))
}

/// All triggers targeting dialog `id`.
pub fn triggers_for<D: Document>(document: &D, id: &str) -> Vec<D::Node> {
    document.query_all(Selector::AttributeEquals(TARGET_ATTR, id))
}

/// Flip dialog `id` on behalf of `trigger`.
///
/// A missing dialog or layer is a markup mistake and is returned as an error.
/// The dialog reacts to the class change through its own observer, not
/// through this call.
pub fn toggle<D: Document>(
    document: &D,
    trigger: &D::Node,
    id: &str,
) -> Result<ToggleOutcome, PopupError> {
    let dialog = document
        .element_by_id(id)
        .ok_or_else(|| PopupError::DialogNotFound(id.to_string()))?;
    let layer =
        find_layer(document, &dialog).ok_or_else(|| PopupError::LayerNotFound(id.to_string()))?;
    let settings = read_settings(document, &layer);

    let outcome = if !settings.allows_interaction() {
        ToggleOutcome::Prevented
    } else if document.toggle_class(&dialog, DIALOG_ACTIVE_CLASS) {
        ToggleOutcome::Opened
    } else {
        ToggleOutcome::Closed
    };

    if !is_nested_in_target(document, trigger, id) {
        for other in triggers_for(document, id) {
            if other != *trigger {
                document.remove_class(&other, TRIGGER_OPENER_CLASS);
            }
        }
        document.add_class(trigger, TRIGGER_OPENER_CLASS);
    }

    tracing::debug!("Trigger for {id}: {outcome:?}");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::{MemoryDocument, NodeId};
    use crate::names::{LAYER_CLASS, SETTINGS_ATTR};
    use crate::settings::PopupSettings;

    struct Fixture {
        doc: MemoryDocument,
        layer: NodeId,
        dialog: NodeId,
        outside: NodeId,
        inside: NodeId,
    }

    fn fixture() -> Fixture {
        let doc = MemoryDocument::new();
        let layer = doc.append_element(doc.body_id(), "div");
        doc.add_class(&layer, LAYER_CLASS);
        doc.set_attribute(&layer, SETTINGS_ATTR, &PopupSettings::default().to_attribute());

        let dialog = doc.append_element(layer, "div");
        doc.add_class(&dialog, DIALOG_CLASS);
        doc.set_attribute(&dialog, "id", "popup-1");

        let inside = doc.append_element(dialog, "button");
        doc.set_attribute(&inside, TARGET_ATTR, "popup-1");
        let outside = doc.append_element(doc.body_id(), "button");
        doc.set_attribute(&outside, TARGET_ATTR, "popup-1");

        Fixture {
            doc,
            layer,
            dialog,
            outside,
            inside,
        }
    }

    #[test]
    fn test_toggle_flips_active_class() {
        let f = fixture();
        assert_eq!(toggle(&f.doc, &f.outside, "popup-1"), Ok(ToggleOutcome::Opened));
        assert!(f.doc.has_class(&f.dialog, DIALOG_ACTIVE_CLASS));
        assert_eq!(toggle(&f.doc, &f.outside, "popup-1"), Ok(ToggleOutcome::Closed));
        assert!(!f.doc.has_class(&f.dialog, DIALOG_ACTIVE_CLASS));
    }

    #[test]
    fn test_prevented_by_layer_settings() {
        let f = fixture();
        let settings = PopupSettings::default().with_prevent_user_interactions(true);
        f.doc
            .set_attribute(&f.layer, SETTINGS_ATTR, &settings.to_attribute());

        assert_eq!(toggle(&f.doc, &f.outside, "popup-1"), Ok(ToggleOutcome::Prevented));
        assert!(!f.doc.has_class(&f.dialog, DIALOG_ACTIVE_CLASS));
    }

    #[test]
    fn test_missing_dialog_is_an_error() {
        let f = fixture();
        assert_eq!(
            toggle(&f.doc, &f.outside, "nope"),
            Err(PopupError::DialogNotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_missing_layer_is_an_error() {
        let doc = MemoryDocument::new();
        let dialog = doc.append_element(doc.body_id(), "div");
        doc.set_attribute(&dialog, "id", "lonely");
        let trigger = doc.append_element(doc.body_id(), "button");

        assert_eq!(
            toggle(&doc, &trigger, "lonely"),
            Err(PopupError::LayerNotFound("lonely".to_string()))
        );
    }

    #[test]
    fn test_only_outside_trigger_becomes_opener() {
        let f = fixture();
        toggle(&f.doc, &f.inside, "popup-1").unwrap();
        assert!(!f.doc.has_class(&f.inside, TRIGGER_OPENER_CLASS));

        toggle(&f.doc, &f.outside, "popup-1").unwrap();
        assert!(f.doc.has_class(&f.outside, TRIGGER_OPENER_CLASS));
    }

    #[test]
    fn test_latest_opener_wins() {
        let f = fixture();
        let second = f.doc.append_element(f.doc.body_id(), "button");
        f.doc.set_attribute(&second, TARGET_ATTR, "popup-1");

        toggle(&f.doc, &f.outside, "popup-1").unwrap();
        toggle(&f.doc, &second, "popup-1").unwrap();

        assert!(!f.doc.has_class(&f.outside, TRIGGER_OPENER_CLASS));
        assert!(f.doc.has_class(&second, TRIGGER_OPENER_CLASS));
    }

    #[test]
    fn test_nesting_detection() {
        let f = fixture();
        assert!(is_nested_in_target(&f.doc, &f.inside, "popup-1"));
        assert!(!is_nested_in_target(&f.doc, &f.outside, "popup-1"));
    }

    #[test]
    fn test_attributes() {
        let attrs = TriggerAttributes::new(Some("btn"), false);
        assert_eq!(attrs.class, "popup-trigger btn");
        assert_eq!(attrs.aria_haspopup, Some("dialog"));

        let attrs = TriggerAttributes::new(None, true);
        assert_eq!(attrs.class, "popup-trigger popup-keep-tabindex");
        assert_eq!(attrs.aria_haspopup, None);
    }
}
