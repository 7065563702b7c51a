//! WASM utilities for browser interop
//!
//! # Cleanup Pattern
//!
//! A JavaScript callback backed by a Rust `Closure` has to outlive the
//! registration that uses it. `closure.forget()` leaks the closure and leaves
//! the callback attached forever, so every registration here is owned by a
//! struct whose `Drop` undoes it:
//!
//! ```ignore
//! // Listener is attached when WindowEventListener is created
//! let listener = WindowEventListener::new(window, "keydown", callback);
//!
//! // Listener is removed when `listener` is dropped
//! drop(listener);
//! ```
//!
//! Store these in a `Signal<Option<_>>` and take them out on unmount.
//!
//! WORKAROUND: on desktop every web-sys call is IPC to the webview. Dropping
//! these during scope teardown runs that IPC inside the diff cycle and panics
//! (wry-bindgen U8BufferEmpty), so components move them into a spawned task
//! and drop them there.

use wasm_bindgen_x::prelude::*;

/// A window event listener that removes itself when dropped.
pub struct WindowEventListener {
    window: web_sys_x::Window,
    event_name: &'static str,
    callback: Closure<dyn FnMut(JsValue)>,
}

impl WindowEventListener {
    pub fn new(
        window: web_sys_x::Window,
        event_name: &'static str,
        callback: impl FnMut(JsValue) + 'static,
    ) -> Self {
        let callback: Closure<dyn FnMut(JsValue)> = Closure::wrap(Box::new(callback));

        window
            .add_event_listener_with_callback(event_name, callback.as_ref().unchecked_ref())
            .ok();

        Self {
            window,
            event_name,
            callback,
        }
    }
}

impl Drop for WindowEventListener {
    fn drop(&mut self) {
        let _ = self.window.remove_event_listener_with_callback(
            self.event_name,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// Attribute mutation observer on one element, disconnected when dropped.
pub struct AttributeObserver {
    observer: web_sys_x::MutationObserver,
    _callback: Closure<dyn FnMut(js_sys_x::Array, web_sys_x::MutationObserver)>,
}

impl AttributeObserver {
    /// Call `on_change` after each batch of attribute mutations on `target`.
    ///
    /// Returns `None` if the browser refuses the observer.
    pub fn new(target: &web_sys_x::Element, mut on_change: impl FnMut() + 'static) -> Option<Self> {
        let callback: Closure<dyn FnMut(js_sys_x::Array, web_sys_x::MutationObserver)> =
            Closure::wrap(Box::new(
                move |_records: js_sys_x::Array, _observer: web_sys_x::MutationObserver| {
                    on_change()
                },
            )
                as Box<dyn FnMut(js_sys_x::Array, web_sys_x::MutationObserver)>);

        let observer = web_sys_x::MutationObserver::new(callback.as_ref().unchecked_ref()).ok()?;
        let options = web_sys_x::MutationObserverInit::new();
        options.set_attributes(true);
        observer.observe_with_options(target, &options).ok()?;

        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for AttributeObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
