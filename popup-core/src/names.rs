//! Class and attribute names shared by the components and the DOM utilities.
//!
//! These names are the only channel between Layer, Dialog and Trigger, so the
//! browser components and the headless page must both render them verbatim.

pub const LAYER_CLASS: &str = "popup-layer";
pub const LAYER_ACTIVE_CLASS: &str = "popup-layer--active";

pub const DIALOG_CLASS: &str = "popup-dialog";
/// Presence of this class on the dialog node is the open state.
pub const DIALOG_ACTIVE_CLASS: &str = "popup-dialog--active";

pub const TRIGGER_CLASS: &str = "popup-trigger";
pub const TRIGGER_ACTIVE_CLASS: &str = "popup-trigger--active";
/// Marks the trigger that focus returns to when its dialog closes.
pub const TRIGGER_OPENER_CLASS: &str = "popup-trigger--opener";

/// Elements inside a subtree carrying this class keep their tab index while a
/// dialog is open.
pub const KEEP_TAB_INDEX_CLASS: &str = "popup-keep-tabindex";

pub const SETTINGS_ATTR: &str = "data-popup-settings";
pub const TARGET_ATTR: &str = "data-popup-target";
pub const PREV_TAB_INDEX_ATTR: &str = "data-popup-prev-tabindex";
pub const PREV_OVERFLOW_Y_ATTR: &str = "data-popup-prev-overflow-y";
pub const PREV_PADDING_RIGHT_ATTR: &str = "data-popup-prev-padding-right";

pub const TAB_INDEX_ATTR: &str = "tabindex";
pub const ARIA_HIDDEN_ATTR: &str = "aria-hidden";

pub const ESCAPE_KEY: &str = "Escape";
