//! Popup dialog
//!
//! The dialog's open state is the `popup-dialog--active` class on its node.
//! Triggers flip that class; a mutation observer on the node hands every
//! change to a [`DialogController`], which runs the focus trap, scroll lock
//! and marker updates and reports the new state if asked to.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_core::{spawn_forever, Runtime, RuntimeGuard};
use popup_core::dialog::dialog_class;
use popup_core::{force_focus, DialogController, StateBinding};
use wasm_bindgen_x::JsCast;

use crate::wasm_utils::{AttributeObserver, WindowEventListener};
use crate::web_document::WebDocument;

type SharedController = Rc<RefCell<DialogController<WebDocument>>>;

/// Browser registrations owned by one mounted dialog.
struct Bindings {
    _observer: Option<AttributeObserver>,
    _keydown: WindowEventListener,
    _click: WindowEventListener,
}

/// Modal dialog, opened and closed by [`Trigger`](super::Trigger)s with the
/// same `id`.
///
/// With `state_setter` alone the dialog reports every open/close upward.
/// With `state` and `state_setter` it is controlled: `state` decides whether
/// it is open and the setter is never called.
#[component]
pub fn Dialog(
    /// DOM id, shared with the triggers for this dialog
    id: String,
    /// Externally owned open state (controlled mode, needs `state_setter`)
    #[props(default)]
    state: Option<ReadSignal<bool>>,
    /// Receives state changes (reporting mode when `state` is unset)
    #[props(default)]
    state_setter: Option<EventHandler<bool>>,
    /// Extra CSS classes
    #[props(default)]
    class: Option<String>,
    children: Element,
) -> Element {
    let controller: SharedController = use_hook(|| {
        Rc::new(RefCell::new(DialogController::new(
            WebDocument,
            id.clone(),
            StateBinding::default(),
        )))
    });
    let mut bindings: Signal<Option<Bindings>> = use_signal(|| None);

    let binding_controller = controller.clone();
    use_effect(move || {
        let state = state.map(|open| open());
        let setter = state_setter.map(|handler| {
            Rc::new(move |open: bool| handler.call(open)) as Rc<dyn Fn(bool)>
        });
        binding_controller
            .borrow_mut()
            .set_binding(StateBinding { state, setter });
    });

    let mount_controller = controller.clone();
    let drop_controller = controller.clone();
    use_drop(move || {
        // WORKAROUND: see wasm_utils; detaching an open dialog restores the
        // page through web-sys, so it runs outside the diff cycle with the
        // registrations.
        let bindings = bindings.write().take();
        spawn(async move {
            drop(bindings);
            drop_controller.borrow_mut().detach();
        });
    });

    let class_list = dialog_class(class.as_deref());

    rsx! {
        div {
            id: "{id}",
            class: "{class_list}",
            role: "dialog",
            aria_modal: "true",
            aria_hidden: "true",
            onmounted: move |evt| {
                let Some(element) = evt.data().downcast::<web_sys_x::Element>().cloned() else {
                    tracing::warn!("Dialog node is not a web element");
                    return;
                };
                let Some(window) = web_sys_x::window() else {
                    return;
                };
                bindings.set(Some(bind(&mount_controller, element, window)));
            },
            {children}
        }
    }
}

/// Attach the controller to its node and register the observer and the
/// window listeners.
fn bind(
    controller: &SharedController,
    element: web_sys_x::Element,
    window: web_sys_x::Window,
) -> Bindings {
    // The observer fires from wasm-bindgen outside the Dioxus runtime;
    // restore it so the setter and the focus task work.
    let runtime = Runtime::current();
    let observed = controller.clone();
    let observer = AttributeObserver::new(&element, move || {
        let _guard = RuntimeGuard::new(runtime.clone());
        let transition = observed.borrow_mut().observe();
        if let Some(focus) = transition.and_then(|t| t.focus) {
            // No scope is current here, so spawn on the root scope.
            spawn_forever(async move {
                force_focus(&WebDocument, &focus).await;
            });
        }
    });
    if observer.is_none() {
        tracing::warn!("Dialog {} cannot be observed", controller.borrow().id());
    }

    // Attach after observing so a controlled initial state is picked up.
    controller.borrow_mut().attach(element);

    let on_key = controller.clone();
    let keydown = WindowEventListener::new(window.clone(), "keydown", move |event| {
        if let Some(event) = event.dyn_ref::<web_sys_x::KeyboardEvent>() {
            on_key.borrow().handle_key(&event.key());
        }
    });

    let on_click = controller.clone();
    let click = WindowEventListener::new(window, "click", move |event| {
        let target = event
            .dyn_ref::<web_sys_x::Event>()
            .and_then(|e| e.target())
            .and_then(|t| t.dyn_into::<web_sys_x::Element>().ok());
        if let Some(target) = target {
            on_click.borrow().handle_click(&target);
        }
    });

    Bindings {
        _observer: observer,
        _keydown: keydown,
        _click: click,
    }
}
