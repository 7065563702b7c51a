//! popup demo - Web page exercising Layer, Dialog and Trigger
//!
//! Two dialogs share one layer: the first reports its state to the page, the
//! second is left alone. A third, controlled dialog is driven by a plain
//! button instead of a trigger.

use dioxus::prelude::*;
use popup_ui::{generate_id, Dialog, Layer, PopupSettings, Trigger};

pub const POPUP_CSS: Asset = asset!("/assets/popup.css");

#[component]
fn App() -> Element {
    let mut first_open = use_signal(|| false);
    let mut controlled_open = use_signal(|| false);
    let controlled_state: ReadSignal<bool> = controlled_open.into();
    let controlled_id = use_hook(generate_id);
    let first_label = if first_open() { "open" } else { "closed" };

    rsx! {
        document::Link { rel: "stylesheet", href: POPUP_CSS }
        div { id: "screen", class: "screen",
            p { "First dialog is {first_label}" }

            Layer {
                class: "popup-layer--fancy",
                settings: PopupSettings::default().with_scroll_extend_element_id("screen"),
                Dialog {
                    id: "popup-1",
                    state_setter: move |open| first_open.set(open),
                    p { "DIALOG 1" }
                    Trigger { id: "popup-1", "Close" }
                }
                Dialog { id: "popup-2",
                    p { "DIALOG 2" }
                    Trigger {
                        id: "popup-2",
                        onclick: move |_| tracing::info!("Dialog 2 close clicked"),
                        "Close"
                    }
                }
            }

            Layer {
                settings: PopupSettings::default()
                    .with_exit_on_layer(false)
                    .with_exit_on_escape(false),
                Dialog {
                    id: "{controlled_id}",
                    state: controlled_state,
                    state_setter: move |open| controlled_open.set(open),
                    p { "Controlled dialog: only the button below closes it" }
                    button { onclick: move |_| controlled_open.set(false), "Close" }
                }
            }

            Trigger { id: "popup-1", "Open dialog 1" }
            Trigger { id: "popup-2", "Open dialog 2" }
            button { onclick: move |_| controlled_open.set(true), "Open controlled dialog" }
        }
    }
}

fn main() {
    dioxus::launch(App);
}
