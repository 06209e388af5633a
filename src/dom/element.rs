// ============================================================================
// ELEMENT HELPERS - Thin wrappers over web-sys
// ============================================================================

use js_sys::{Array, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobPropertyBag, Document, Element, File, HtmlAnchorElement, HtmlElement,
    HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, Url, Window,
};

use crate::models::document::{DownloadArtifact, SelectedFile};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

pub fn append_child(parent: &Element, child: &Element) -> Result<(), JsValue> {
    parent.append_child(child).map(|_| ())
}

/// Current `location.hash`, empty when unavailable
pub fn location_hash() -> String {
    window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

pub fn set_location_hash(hash: &str) -> Result<(), JsValue> {
    let location = window()
        .ok_or_else(|| JsValue::from_str("No window"))?
        .location();
    if location.hash()? != hash {
        location.set_hash(hash)?;
    }
    Ok(())
}

pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Value of whatever form control fired the event
pub fn event_value(event: &web_sys::Event) -> Option<String> {
    let target = event.target()?;
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
        return Some(select.value());
    }
    target
        .dyn_ref::<HtmlTextAreaElement>()
        .map(|area| area.value())
}

pub fn event_checked(event: &web_sys::Event) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.checked())
        .unwrap_or(false)
}

/// Id of the focused element, so a full re-render can restore focus
pub fn focused_element_id() -> Option<String> {
    let active = document()?.active_element()?;
    let id = active.id();
    (!id.is_empty()).then_some(id)
}

/// Focus `id` again and put the caret at the end of its text
pub fn restore_focus(id: &str) {
    let Some(element) = get_element_by_id(id) else {
        return;
    };
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        let _ = input.focus();
        let end = input.value().encode_utf16().count() as u32;
        let _ = input.set_selection_range(end, end);
    } else if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.focus();
    }
}

/// First file of an `<input type=file>` change event, not yet read
pub fn selected_file(event: &web_sys::Event) -> Option<File> {
    event
        .target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
}

/// Read a picked file into memory; call only once its name and size passed
pub async fn read_file(file: &File) -> Result<SelectedFile, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    Ok(SelectedFile {
        size: file.size() as u64,
        ..SelectedFile::new(file.name(), file.type_(), bytes)
    })
}

/// Turn downloaded bytes into a Blob and click a temporary anchor
pub fn trigger_download(artifact: &DownloadArtifact) -> Result<(), JsValue> {
    let document = document().ok_or_else(|| JsValue::from_str("No document"))?;

    let parts = Array::new();
    parts.push(&Uint8Array::from(artifact.bytes.as_slice()));
    let options = BlobPropertyBag::new();
    options.set_type(artifact.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(&artifact.file_name);
    anchor.set_attribute("style", "display: none")?;

    let body = document.body().ok_or_else(|| JsValue::from_str("No body"))?;
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    Url::revoke_object_url(&url)?;
    Ok(())
}
