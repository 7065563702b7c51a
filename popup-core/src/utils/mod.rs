//! DOM helpers used by the dialog side effects.
//!
//! Each helper is usable on its own against any [`Document`](crate::Document).

mod focus;
mod id;
mod scroll;
mod tab_index;

pub use focus::{force_focus, FOCUS_RETRY_COUNT, FOCUS_RETRY_INTERVAL_MS};
pub use id::generate_id;
pub use scroll::toggle_scroll;
pub use tab_index::{hide_tab_indexes, show_tab_indexes};
