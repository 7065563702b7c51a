//! Popup components

pub mod dialog;
pub mod layer;
pub mod trigger;

pub use dialog::Dialog;
pub use layer::Layer;
pub use trigger::Trigger;
