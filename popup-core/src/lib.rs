//! popup-core - Framework-agnostic modal popup protocol
//!
//! Layer, Dialog and Trigger agree on open/closed state through a single DOM
//! class on the dialog node. This crate holds everything that does not depend
//! on a rendering framework: the DOM contract, settings, the dialog state
//! machine, trigger toggling, the DOM utilities (scroll lock, focus trap,
//! forced focus, ID generation) and an in-memory document with a headless
//! page for driving the protocol without a browser.

pub mod dialog;
pub mod dom;
pub mod error;
pub mod layer;
pub mod names;
pub mod page;
pub mod settings;
pub mod time;
pub mod trigger;
pub mod utils;

pub use dialog::{DialogController, StateBinding, StateMode, Transition};
pub use dom::memory::{MemoryDocument, MutationRecord, NodeId, ObserverId};
pub use dom::{Document, Selector};
pub use error::PopupError;
pub use layer::LayerAttributes;
pub use page::Page;
pub use settings::PopupSettings;
pub use trigger::{toggle, ToggleOutcome, TriggerAttributes};
pub use utils::{
    force_focus, generate_id, hide_tab_indexes, show_tab_indexes, toggle_scroll,
    FOCUS_RETRY_COUNT, FOCUS_RETRY_INTERVAL_MS,
};
