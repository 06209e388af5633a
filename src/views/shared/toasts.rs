// ============================================================================
// TOASTS - Stacked notifications, newest last
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, text_element, ElementBuilder};
use crate::state::notifications::Notifier;

pub fn render_toasts(notifier: &Notifier) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .class("toast-stack")
        .attr("aria-live", "polite")?
        .build();

    for notification in notifier.items() {
        let close = ElementBuilder::new("button")?
            .class("toast-close")
            .attr("type", "button")?
            .attr("aria-label", "닫기")?
            .text("×")
            .build();
        let id = notification.id;
        let handle = notifier.clone();
        on_click(&close, move |_| handle.dismiss(id))?;

        let toast = ElementBuilder::new("div")?
            .class(notification.kind.css_class())
            .child(text_element("span", "toast-icon", notification.kind.icon())?)?
            .child(text_element("span", "toast-message", &notification.message)?)?
            .child(close)?
            .build();
        container.append_child(&toast)?;
    }

    Ok(container)
}
