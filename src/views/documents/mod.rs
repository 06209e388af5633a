// ============================================================================
// DOCUMENTS PAGE - Searchable list with a detail panel
// ============================================================================

pub mod document_detail;
pub mod document_list;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{text_element, ElementBuilder};
use crate::state::app_state::AppState;

pub use document_detail::render_document_detail;
pub use document_list::{render_document_list, render_filters, render_sort_bar};

pub fn render_documents(state: &AppState) -> Result<Element, JsValue> {
    let vm = &state.documents;

    let list_column = ElementBuilder::new("div")?
        .class("documents-column")
        .child(render_filters(vm)?)?
        .child(render_sort_bar(vm)?)?
        .child(render_document_list(vm)?)?
        .build();

    let layout = ElementBuilder::new("div")?
        .class("documents-layout")
        .child(list_column)?
        .child(render_document_detail(vm)?)?
        .build();

    ElementBuilder::new("section")?
        .class("page page-documents")
        .child(text_element("h2", "page-title", "문서 관리")?)?
        .child(layout)
        .map(ElementBuilder::build)
}
