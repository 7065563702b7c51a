use crate::dom::Document;
use crate::names::{PREV_OVERFLOW_Y_ATTR, PREV_PADDING_RIGHT_ATTR};

const OVERFLOW_Y: &str = "overflow-y";
const PADDING_RIGHT: &str = "padding-right";

/// Lock or unlock page scrolling.
///
/// Locking hides the vertical overflow of body and `<html>` and pads
/// `extend` (default: body) by the scrollbar width so content does not shift.
/// The inline values in place before the lock are saved on the elements and
/// put back exactly on unlock. Unlocking without a lock does nothing, and a
/// second lock keeps the values saved by the first.
pub fn toggle_scroll<D: Document>(document: &D, hide: bool, extend: Option<&D::Node>) {
    let Some(body) = document.body() else {
        tracing::warn!("Document has no body, scroll lock skipped");
        return;
    };
    let root = document.root();
    let extend = extend.cloned().unwrap_or_else(|| body.clone());

    let mut overflow_targets = vec![body];
    overflow_targets.extend(root.clone());

    if hide {
        let offset = root
            .as_ref()
            .map(|r| document.viewport_width() - document.client_width(r))
            .unwrap_or(0.0)
            .max(0.0);

        for node in &overflow_targets {
            override_style(document, node, OVERFLOW_Y, PREV_OVERFLOW_Y_ATTR, "hidden");
        }
        override_style(
            document,
            &extend,
            PADDING_RIGHT,
            PREV_PADDING_RIGHT_ATTR,
            &format!("{offset}px"),
        );
    } else {
        for node in &overflow_targets {
            restore_style(document, node, OVERFLOW_Y, PREV_OVERFLOW_Y_ATTR);
        }
        restore_style(document, &extend, PADDING_RIGHT, PREV_PADDING_RIGHT_ATTR);
    }
}

fn override_style<D: Document>(
    document: &D,
    node: &D::Node,
    property: &str,
    saved_attr: &str,
    value: &str,
) {
    if document.attribute(node, saved_attr).is_none() {
        document.set_attribute(node, saved_attr, &document.style(node, property));
    }
    document.set_style(node, property, value);
}

fn restore_style<D: Document>(document: &D, node: &D::Node, property: &str, saved_attr: &str) {
    let Some(previous) = document.attribute(node, saved_attr) else {
        return;
    };
    if previous.is_empty() {
        document.remove_style(node, property);
    } else {
        document.set_style(node, property, &previous);
    }
    document.remove_attribute(node, saved_attr);
}
