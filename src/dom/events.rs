// ============================================================================
// EVENT HANDLING
// ============================================================================
// Listeners on rendered elements live in `RENDER_LISTENERS` until the next
// full render calls `release_render_listeners`. Removing an element does not
// free its Rust closure, so each render must hand its listeners back.
// Window-level listeners are registered once by `App::new` and kept for the
// page lifetime.
// ============================================================================

use std::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, KeyboardEvent, MouseEvent};

/// Keeps one render's listeners alive until the render is replaced
pub struct ListenerBag<T> {
    held: RefCell<Vec<T>>,
}

impl<T> ListenerBag<T> {
    pub const fn new() -> Self {
        Self {
            held: RefCell::new(Vec::new()),
        }
    }

    pub fn hold(&self, listener: T) {
        self.held.borrow_mut().push(listener);
    }

    /// Drops everything held and returns how many went
    pub fn release(&self) -> usize {
        let released = std::mem::take(&mut *self.held.borrow_mut());
        released.len()
    }
}

thread_local! {
    static RENDER_LISTENERS: ListenerBag<Closure<dyn FnMut(Event)>> = const { ListenerBag::new() };
}

fn wrap<E, F>(handler: F) -> Closure<dyn FnMut(Event)>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let mut handler = handler;
    Closure::wrap(Box::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    }) as Box<dyn FnMut(Event)>)
}

fn listen<E, F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let closure = wrap(handler);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    RENDER_LISTENERS.with(|listeners| listeners.hold(closure));
    Ok(())
}

/// Drop every listener of the previous render; its elements must already be
/// detached (or about to be) since a dropped closure throws when invoked
pub fn release_render_listeners() -> usize {
    RENDER_LISTENERS.with(ListenerBag::release)
}

pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    listen(element, "click", handler)
}

/// Fires on every keystroke; `handler` receives the control's value
pub fn on_input<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(String) + 'static,
{
    listen(element, "input", move |event: Event| {
        if let Some(value) = crate::dom::event_value(&event) {
            handler(value);
        }
    })
}

/// `change` on selects, checkboxes and file inputs
pub fn on_change<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    listen(element, "change", handler)
}

/// Form submit with the page reload suppressed
pub fn on_submit<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    listen(element, "submit", move |event: Event| {
        event.prevent_default();
        handler();
    })
}

pub fn on_enter<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    listen(element, "keydown", move |event: KeyboardEvent| {
        if event.key() == "Enter" {
            event.prevent_default();
            handler();
        }
    })
}

/// Window-level listener; call once per page load
pub fn on_window<F>(event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let window = crate::dom::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let closure = wrap(handler);
    window.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
