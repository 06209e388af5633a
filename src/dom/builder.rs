// ============================================================================
// ELEMENT BUILDER - Builder pattern for creating elements
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, create_element};

pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Result<Self, JsValue> {
        Ok(Self {
            element: create_element(tag)?,
        })
    }

    /// Replaces every class
    pub fn class(self, class: &str) -> Self {
        self.element.set_class_name(class);
        self
    }

    /// Adds `class` only when `condition` holds
    pub fn class_if(self, condition: bool, class: &str) -> Result<Self, JsValue> {
        if condition {
            self.element.class_list().add_1(class)?;
        }
        Ok(self)
    }

    pub fn id(self, id: &str) -> Self {
        self.element.set_id(id);
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.element.set_text_content(Some(text));
        self
    }

    pub fn child(self, child: Element) -> Result<Self, JsValue> {
        append_child(&self.element, &child)?;
        Ok(self)
    }

    pub fn children(self, children: impl IntoIterator<Item = Element>) -> Result<Self, JsValue> {
        for child in children {
            append_child(&self.element, &child)?;
        }
        Ok(self)
    }

    pub fn attr(self, name: &str, value: &str) -> Result<Self, JsValue> {
        self.element.set_attribute(name, value)?;
        Ok(self)
    }

    /// Boolean attribute such as `disabled` or `selected`
    pub fn flag(self, name: &str, on: bool) -> Result<Self, JsValue> {
        if on {
            self.element.set_attribute(name, "")?;
        }
        Ok(self)
    }

    pub fn build(self) -> Element {
        self.element
    }
}

/// `<tag class=..>text</tag>` in one call
pub fn text_element(tag: &str, class: &str, text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new(tag)?.class(class).text(text).build())
}
