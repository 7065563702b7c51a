use thiserror::Error;

/// Wiring mistakes surfaced to the caller.
///
/// Timing issues (a node not mounted yet, no triggers rendered) are only
/// logged; these variants mean the markup itself is wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PopupError {
    #[error("Dialog {0} is not found")]
    DialogNotFound(String),
    #[error("Layer for dialog {0} is not found")]
    LayerNotFound(String),
}
