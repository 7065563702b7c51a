//! Layer: the backdrop that groups dialogs and publishes their settings

use crate::dom::{Document, Selector};
use crate::names::{LAYER_CLASS, SETTINGS_ATTR};
use crate::settings::PopupSettings;

/// Attribute values a Layer renders for a given set of settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerAttributes {
    pub class: String,
    pub settings: String,
    pub style: &'static str,
    pub tab_index: &'static str,
}

impl LayerAttributes {
    pub fn new(settings: &PopupSettings, class: Option<&str>) -> Self {
        Self {
            class: join_classes(LAYER_CLASS, class),
            settings: settings.to_attribute(),
            style: if settings.exit_on_layer {
                "cursor: pointer"
            } else {
                "cursor: auto"
            },
            tab_index: if settings.exit_on_layer { "0" } else { "-1" },
        }
    }
}

/// The Layer enclosing `node`.
pub fn find_layer<D: Document>(document: &D, node: &D::Node) -> Option<D::Node> {
    document.closest(node, Selector::Class(LAYER_CLASS))
}

/// Settings published on `layer`.
pub fn read_settings<D: Document>(document: &D, layer: &D::Node) -> PopupSettings {
    PopupSettings::from_attribute(document.attribute(layer, SETTINGS_ATTR).as_deref())
}

pub(crate) fn join_classes(base: &str, extra: Option<&str>) -> String {
    match extra.map(str::trim).filter(|c| !c.is_empty()) {
        Some(extra) => format!("{base} {extra}"),
        None => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryDocument;

    #[test]
    fn test_attributes_follow_exit_on_layer() {
        let attrs = LayerAttributes::new(&PopupSettings::default(), Some("fancy"));
        assert_eq!(attrs.class, "popup-layer fancy");
        assert_eq!(attrs.style, "cursor: pointer");
        assert_eq!(attrs.tab_index, "0");

        let attrs = LayerAttributes::new(&PopupSettings::default().with_exit_on_layer(false), None);
        assert_eq!(attrs.class, "popup-layer");
        assert_eq!(attrs.style, "cursor: auto");
        assert_eq!(attrs.tab_index, "-1");
    }

    #[test]
    fn test_settings_are_read_back_from_ancestor() {
        let doc = MemoryDocument::new();
        let layer = doc.append_element(doc.body_id(), "div");
        let settings = PopupSettings::default().with_exit_on_escape(false);
        doc.add_class(&layer, LAYER_CLASS);
        doc.set_attribute(&layer, SETTINGS_ATTR, &settings.to_attribute());
        let child = doc.append_element(layer, "div");

        let found = find_layer(&doc, &child);
        assert_eq!(found, Some(layer));
        assert_eq!(read_settings(&doc, &layer), settings);
    }

    #[test]
    fn test_no_layer_outside() {
        let doc = MemoryDocument::new();
        let stray = doc.append_element(doc.body_id(), "div");
        assert_eq!(find_layer(&doc, &stray), None);
    }
}
