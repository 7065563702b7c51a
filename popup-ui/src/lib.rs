//! popup-ui - Dioxus components for accessible modal popups
//!
//! `Layer`, `Dialog` and `Trigger` render the DOM contract from `popup-core`
//! and wire it to the browser: a mutation observer per dialog, window
//! listeners for Escape and backdrop clicks, and a web-sys document backend.

pub mod components;
pub mod wasm_utils;
pub mod web_document;

pub use components::*;
pub use popup_core::{generate_id, PopupSettings};
pub use web_document::WebDocument;
