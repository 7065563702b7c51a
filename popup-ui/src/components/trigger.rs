//! Popup trigger

use dioxus::prelude::*;
use popup_core::trigger::is_nested_in_target;
use popup_core::{toggle, TriggerAttributes};

use crate::web_document::WebDocument;

/// Button that opens or closes the [`Dialog`](super::Dialog) with the same `id`.
///
/// Renders its own `<button>`; do not nest another button inside it.
#[component]
pub fn Trigger(
    /// Id of the dialog to toggle
    id: String,
    /// Called after every toggle attempt, including ones the layer prevents
    #[props(default)]
    onclick: Option<EventHandler<()>>,
    /// Extra CSS classes
    #[props(default)]
    class: Option<String>,
    children: Element,
) -> Element {
    let mut element: Signal<Option<web_sys_x::Element>> = use_signal(|| None);
    let mut nested = use_signal(|| false);

    let attrs = TriggerAttributes::new(class.as_deref(), nested());
    let mount_id = id.clone();
    let click_id = id.clone();

    rsx! {
        button {
            r#type: "button",
            class: "{attrs.class}",
            "data-popup-target": "{id}",
            tabindex: "0",
            aria_haspopup: attrs.aria_haspopup,
            onmounted: move |evt| {
                let Some(el) = evt.data().downcast::<web_sys_x::Element>().cloned() else {
                    return;
                };
                nested.set(is_nested_in_target(&WebDocument, &el, &mount_id));
                element.set(Some(el));
            },
            onclick: move |_| {
                let Some(el) = element() else {
                    tracing::warn!("Trigger for {click_id} is not mounted");
                    return;
                };
                match toggle(&WebDocument, &el, &click_id) {
                    Ok(_) => {
                        if let Some(handler) = onclick {
                            handler.call(());
                        }
                    }
                    Err(e) => tracing::error!("{e}"),
                }
            },
            {children}
        }
    }
}
