use crate::dom::{Document, Selector};
use crate::names::{DIALOG_CLASS, KEEP_TAB_INDEX_CLASS, PREV_TAB_INDEX_ATTR, TAB_INDEX_ATTR};

/// Take every tab-indexed element out of the tab order, except those inside
/// dialog `dialog_id` and those inside a subtree carrying
/// [`KEEP_TAB_INDEX_CLASS`] or the optional `except` class. A marked subtree
/// within some other dialog is not exempt.
///
/// The original value is saved on the element. An element that already has a
/// saved value is left alone so a nested call cannot overwrite it with `-1`.
pub fn hide_tab_indexes<D: Document>(document: &D, dialog_id: Option<&str>, except: Option<&str>) {
    for node in document.query_all(Selector::HasAttribute(TAB_INDEX_ATTR)) {
        if is_exempt(document, &node, dialog_id, except) {
            continue;
        }
        if document.attribute(&node, PREV_TAB_INDEX_ATTR).is_some() {
            continue;
        }
        let previous = document.attribute(&node, TAB_INDEX_ATTR).unwrap_or_default();
        document.set_attribute(&node, PREV_TAB_INDEX_ATTR, &previous);
        document.set_attribute(&node, TAB_INDEX_ATTR, "-1");
    }
}

/// Put back every tab index saved by [`hide_tab_indexes`].
pub fn show_tab_indexes<D: Document>(document: &D) {
    for node in document.query_all(Selector::HasAttribute(PREV_TAB_INDEX_ATTR)) {
        if let Some(previous) = document.attribute(&node, PREV_TAB_INDEX_ATTR) {
            document.set_attribute(&node, TAB_INDEX_ATTR, &previous);
        }
        document.remove_attribute(&node, PREV_TAB_INDEX_ATTR);
    }
}

fn is_exempt<D: Document>(
    document: &D,
    node: &D::Node,
    dialog_id: Option<&str>,
    except: Option<&str>,
) -> bool {
    if let Some(id) = dialog_id {
        if document.closest(node, Selector::Id(id)).is_some() {
            return true;
        }
    }
    let marked = std::iter::once(KEEP_TAB_INDEX_CLASS)
        .chain(except)
        .any(|class| document.closest(node, Selector::Class(class)).is_some());
    marked && document.closest(node, Selector::Class(DIALOG_CLASS)).is_none()
}
