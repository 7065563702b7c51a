//! Popup layer (backdrop)

use dioxus::prelude::*;
use popup_core::{LayerAttributes, PopupSettings};

/// Backdrop grouping one or more dialogs.
///
/// Publishes `settings` as `data-popup-settings` for the dialogs and triggers
/// inside it.
#[component]
pub fn Layer(
    /// Settings shared by every dialog in this layer
    #[props(default)]
    settings: PopupSettings,
    /// Extra CSS classes
    #[props(default)]
    class: Option<String>,
    children: Element,
) -> Element {
    let attrs = LayerAttributes::new(&settings, class.as_deref());

    rsx! {
        div {
            class: "{attrs.class}",
            "data-popup-settings": "{attrs.settings}",
            aria_hidden: "true",
            style: attrs.style,
            tabindex: attrs.tab_index,
            {children}
        }
    }
}
