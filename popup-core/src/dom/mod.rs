//! The slice of the DOM the popup protocol touches
//!
//! Everything in this crate is written against [`Document`], so the same
//! protocol code drives the browser (`popup-ui`'s web-sys backend) and the
//! in-memory [`memory::MemoryDocument`].

pub mod memory;

use std::fmt;

/// Typed subset of CSS selectors used by the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    Id(&'a str),
    Class(&'a str),
    HasAttribute(&'a str),
    AttributeEquals(&'a str, &'a str),
}

impl fmt::Display for Selector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // `#id` rejects ids that are not CSS identifiers (e.g. a UUID
            // starting with a digit), the attribute form does not.
            Selector::Id(id) => write!(f, "[id=\"{}\"]", escape_value(id)),
            Selector::Class(class) => write!(f, ".{class}"),
            Selector::HasAttribute(name) => write!(f, "[{name}]"),
            Selector::AttributeEquals(name, value) => {
                write!(f, "[{name}=\"{}\"]", escape_value(value))
            }
        }
    }
}

fn escape_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// DOM operations needed by Layer, Dialog, Trigger and the utilities.
///
/// Methods take `&self`: both backends are handles onto shared, interiorly
/// mutable state, like the browser document itself.
pub trait Document {
    type Node: Clone + PartialEq + fmt::Debug;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// All matching elements in document order.
    fn query_all(&self, selector: Selector<'_>) -> Vec<Self::Node>;

    /// Matching descendants of `root` (excluding `root`) in document order.
    fn query_all_within(&self, root: &Self::Node, selector: Selector<'_>) -> Vec<Self::Node>;

    /// The node itself or its nearest ancestor matching `selector`.
    fn closest(&self, node: &Self::Node, selector: Selector<'_>) -> Option<Self::Node>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);

    /// Flip `class` and return whether it is present afterwards.
    fn toggle_class(&self, node: &Self::Node, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn remove_attribute(&self, node: &Self::Node, name: &str);

    /// Inline style value, empty when unset.
    fn style(&self, node: &Self::Node, property: &str) -> String;
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    fn remove_style(&self, node: &Self::Node, property: &str);

    fn body(&self) -> Option<Self::Node>;

    /// The `<html>` element.
    fn root(&self) -> Option<Self::Node>;

    /// `window.innerWidth`, scrollbar included.
    fn viewport_width(&self) -> f64;

    fn client_width(&self, node: &Self::Node) -> f64;

    fn focus(&self, node: &Self::Node);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_css() {
        assert_eq!(Selector::Id("popup-1").to_string(), "[id=\"popup-1\"]");
        assert_eq!(Selector::Class("popup-layer").to_string(), ".popup-layer");
        assert_eq!(Selector::HasAttribute("tabindex").to_string(), "[tabindex]");
        assert_eq!(
            Selector::AttributeEquals("data-popup-target", "a\"b").to_string(),
            "[data-popup-target=\"a\\\"b\"]"
        );
    }
}
