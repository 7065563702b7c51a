//! Popup settings published by a Layer
//!
//! The Layer serializes its settings into `data-popup-settings` so dialogs and
//! triggers below it can read them back with a `closest` lookup instead of a
//! shared context.

use serde::{Deserialize, Serialize};

/// Behaviour shared by every dialog inside one Layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupSettings {
    /// Lock page scroll while a dialog is open
    #[serde(rename = "hideScroll")]
    pub hide_scroll: bool,
    /// Element that receives the scrollbar-width padding (default: body)
    #[serde(
        rename = "scrollExtendElementID",
        skip_serializing_if = "Option::is_none"
    )]
    pub scroll_extend_element_id: Option<String>,
    /// Close on the Escape key
    #[serde(rename = "exitOnEscape")]
    pub exit_on_escape: bool,
    /// Close when the backdrop itself is clicked
    #[serde(rename = "exitOnLayer")]
    pub exit_on_layer: bool,
    /// Ignore every user attempt to change dialog state
    #[serde(rename = "preventUserInteractions")]
    pub prevent_user_interactions: bool,
}

impl Default for PopupSettings {
    fn default() -> Self {
        Self {
            hide_scroll: true,
            scroll_extend_element_id: None,
            exit_on_escape: true,
            exit_on_layer: true,
            prevent_user_interactions: false,
        }
    }
}

impl PopupSettings {
    pub fn with_hide_scroll(mut self, hide_scroll: bool) -> Self {
        self.hide_scroll = hide_scroll;
        self
    }

    pub fn with_scroll_extend_element_id(mut self, id: impl Into<String>) -> Self {
        self.scroll_extend_element_id = Some(id.into());
        self
    }

    pub fn with_exit_on_escape(mut self, exit_on_escape: bool) -> Self {
        self.exit_on_escape = exit_on_escape;
        self
    }

    pub fn with_exit_on_layer(mut self, exit_on_layer: bool) -> Self {
        self.exit_on_layer = exit_on_layer;
        self
    }

    pub fn with_prevent_user_interactions(mut self, prevent: bool) -> Self {
        self.prevent_user_interactions = prevent;
        self
    }

    /// Encode for the `data-popup-settings` attribute.
    pub fn to_attribute(&self) -> String {
        // A struct of bools and an optional string always serializes.
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Decode the `data-popup-settings` attribute.
    ///
    /// A missing attribute yields the defaults. Malformed JSON is logged and
    /// also yields the defaults, since a broken attribute should not take the
    /// page down.
    pub fn from_attribute(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };

        match serde_json::from_str(value) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Invalid popup settings attribute {value:?}: {e}");
                Self::default()
            }
        }
    }

    /// Whether a user-initiated state change may go through.
    ///
    /// Logs the blocked attempt, mirroring how every gate in this crate
    /// reports a prevented action.
    pub fn allows_interaction(&self) -> bool {
        if self.prevent_user_interactions {
            tracing::warn!("Popup action prevented by layer settings");
            false
        } else {
            true
        }
    }
}
