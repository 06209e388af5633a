// ============================================================================
// STATUS - Spinners, empty and error states shared by every page
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{text_element, ElementBuilder};
use crate::services::error::ErrorInfo;

pub fn render_spinner(message: &str) -> Result<Element, JsValue> {
    ElementBuilder::new("div")?
        .class("status status--loading")
        .child(ElementBuilder::new("span")?.class("spinner").build())?
        .child(text_element("span", "status-text", message)?)
        .map(ElementBuilder::build)
}

pub fn render_error(error: &ErrorInfo) -> Result<Element, JsValue> {
    ElementBuilder::new("div")?
        .class("status status--error")
        .attr("role", "alert")?
        .child(text_element("span", "status-icon", "❌")?)?
        .child(text_element("span", "status-text", &error.message)?)
        .map(ElementBuilder::build)
}

pub fn render_empty(message: &str) -> Result<Element, JsValue> {
    text_element("div", "status status--empty", message)
}

pub fn render_badge(text: &str, modifier: &str) -> Result<Element, JsValue> {
    text_element("span", &format!("badge badge--{}", modifier), text)
}

/// Button whose label switches while its request is in flight
pub fn render_button(
    label: &str,
    busy_label: &str,
    class: &str,
    busy: bool,
) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .class(class)
        .attr("type", "button")?
        .flag("disabled", busy)?
        .text(if busy { busy_label } else { label })
        .build())
}
