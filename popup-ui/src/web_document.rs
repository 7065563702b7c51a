//! Browser backend for [`popup_core::Document`]
//!
//! Holds no handles: `window`/`document` are looked up on every call so the
//! type can be built during render without touching web-sys (see the IPC
//! note in `wasm_utils`).

use popup_core::{Document, Selector};
use wasm_bindgen_x::JsCast;
use web_sys_x::{Element, HtmlElement, NodeList};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WebDocument;

impl WebDocument {
    fn document(&self) -> Option<web_sys_x::Document> {
        web_sys_x::window()?.document()
    }

    fn html_element(node: &Element) -> Option<&HtmlElement> {
        node.dyn_ref::<HtmlElement>()
    }
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl Document for WebDocument {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document()?.get_element_by_id(id)
    }

    fn query_all(&self, selector: Selector<'_>) -> Vec<Element> {
        self.document()
            .and_then(|d| d.query_selector_all(&selector.to_string()).ok())
            .map(elements)
            .unwrap_or_default()
    }

    fn query_all_within(&self, root: &Element, selector: Selector<'_>) -> Vec<Element> {
        root.query_selector_all(&selector.to_string())
            .map(elements)
            .unwrap_or_default()
    }

    fn closest(&self, node: &Element, selector: Selector<'_>) -> Option<Element> {
        node.closest(&selector.to_string()).ok().flatten()
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn remove_attribute(&self, node: &Element, name: &str) {
        let _ = node.remove_attribute(name);
    }

    fn style(&self, node: &Element, property: &str) -> String {
        Self::html_element(node)
            .and_then(|e| e.style().get_property_value(property).ok())
            .unwrap_or_default()
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(e) = Self::html_element(node) {
            let _ = e.style().set_property(property, value);
        }
    }

    fn remove_style(&self, node: &Element, property: &str) {
        if let Some(e) = Self::html_element(node) {
            let _ = e.style().remove_property(property);
        }
    }

    fn body(&self) -> Option<Element> {
        self.document()?.body().map(Into::into)
    }

    fn root(&self) -> Option<Element> {
        self.document()?.document_element()
    }

    fn viewport_width(&self) -> f64 {
        web_sys_x::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0)
    }

    fn client_width(&self, node: &Element) -> f64 {
        node.client_width() as f64
    }

    fn focus(&self, node: &Element) {
        if let Some(e) = Self::html_element(node) {
            let _ = e.focus();
        }
    }
}
