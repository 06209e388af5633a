// ============================================================================
// FORM - Labelled inputs wired to a view model setter
// ============================================================================
// Inputs carry stable ids so the app can put focus back after a re-render.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_change, on_input, text_element, ElementBuilder};

pub struct Field<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub input_type: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    pub disabled: bool,
}

impl<'a> Field<'a> {
    pub fn text(id: &'a str, label: &'a str, value: &'a str) -> Self {
        Self {
            id,
            label,
            input_type: "text",
            value,
            placeholder: "",
            disabled: false,
        }
    }

    pub fn kind(mut self, input_type: &'a str) -> Self {
        self.input_type = input_type;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

fn label(id: &str, text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("label")?
        .class("form-label")
        .attr("for", id)?
        .text(text)
        .build())
}

pub fn render_input<F>(field: Field<'_>, on_value: F) -> Result<Element, JsValue>
where
    F: FnMut(String) + 'static,
{
    let input = ElementBuilder::new("input")?
        .class("form-input")
        .id(field.id)
        .attr("type", field.input_type)?
        .attr("value", field.value)?
        .attr("placeholder", field.placeholder)?
        .flag("disabled", field.disabled)?
        .build();
    on_input(&input, on_value)?;

    ElementBuilder::new("div")?
        .class("form-group")
        .child(label(field.id, field.label)?)?
        .child(input)
        .map(ElementBuilder::build)
}

pub fn render_textarea<F>(field: Field<'_>, on_value: F) -> Result<Element, JsValue>
where
    F: FnMut(String) + 'static,
{
    let area = ElementBuilder::new("textarea")?
        .class("form-input form-textarea")
        .id(field.id)
        .attr("rows", "4")?
        .attr("placeholder", field.placeholder)?
        .flag("disabled", field.disabled)?
        .text(field.value)
        .build();
    on_input(&area, on_value)?;

    ElementBuilder::new("div")?
        .class("form-group")
        .child(label(field.id, field.label)?)?
        .child(area)
        .map(ElementBuilder::build)
}

/// `<select>` over `(value, label)` pairs
pub fn render_select<F>(
    id: &str,
    label_text: &str,
    options: &[(String, String)],
    selected: &str,
    on_value: F,
) -> Result<Element, JsValue>
where
    F: FnMut(String) + 'static,
{
    let mut on_value = on_value;
    let select = ElementBuilder::new("select")?
        .class("form-input form-select")
        .id(id)
        .build();
    for (value, text) in options {
        let option = ElementBuilder::new("option")?
            .attr("value", value)?
            .flag("selected", value == selected)?
            .text(text)
            .build();
        select.append_child(&option)?;
    }
    on_change(&select, move |event| {
        if let Some(value) = crate::dom::event_value(&event) {
            on_value(value);
        }
    })?;

    ElementBuilder::new("div")?
        .class("form-group")
        .child(label(id, label_text)?)?
        .child(select)
        .map(ElementBuilder::build)
}

pub fn render_checkbox<F>(id: &str, label_text: &str, checked: bool, on_toggle: F) -> Result<Element, JsValue>
where
    F: FnMut(bool) + 'static,
{
    let mut on_toggle = on_toggle;
    let input = ElementBuilder::new("input")?
        .id(id)
        .attr("type", "checkbox")?
        .flag("checked", checked)?
        .build();
    on_change(&input, move |event| on_toggle(crate::dom::event_checked(&event)))?;

    ElementBuilder::new("label")?
        .class("form-checkbox")
        .attr("for", id)?
        .child(input)?
        .child(text_element("span", "", label_text)?)
        .map(ElementBuilder::build)
}
