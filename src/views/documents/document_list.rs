// ============================================================================
// DOCUMENT LIST - Search bar, sort controls and rows
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, on_enter, on_input, text_element, ElementBuilder};
use crate::models::document::DocumentSummary;
use crate::state::request_state::RequestState;
use crate::utils::constants::DOCUMENT_TYPES;
use crate::utils::format::{format_date, format_file_size};
use crate::viewmodels::{DocumentListViewModel, SortKey};
use crate::views::shared::{
    render_badge, render_button, render_empty, render_error, render_select, render_spinner,
};

pub fn render_filters(vm: &DocumentListViewModel) -> Result<Element, JsValue> {
    let query = vm.query();

    let search = ElementBuilder::new("input")?
        .id("documents-search")
        .class("form-input search-input")
        .attr("type", "search")?
        .attr("placeholder", "제목이나 내용으로 검색")?
        .attr("value", &query.keyword)?
        .build();
    {
        let vm = vm.clone();
        on_input(&search, move |value| vm.set_keyword(value))?;
    }
    {
        let vm = vm.clone();
        on_enter(&search, move || vm.search_now())?;
    }

    let mut options = vec![(String::new(), "전체 유형".to_string())];
    options.extend(DOCUMENT_TYPES.iter().map(|t| (t.to_string(), t.to_string())));
    let type_filter = {
        let vm = vm.clone();
        render_select(
            "documents-type",
            "유형",
            &options,
            query.document_type.as_deref().unwrap_or(""),
            move |value| vm.set_document_type((!value.is_empty()).then_some(value)),
        )?
    };

    let refresh = render_button(
        "새로고침",
        "불러오는 중...",
        "btn btn-secondary btn-small",
        vm.documents_state().is_loading(),
    )?;
    {
        let vm = vm.clone();
        on_click(&refresh, move |_| vm.search_now())?;
    }

    let bar = ElementBuilder::new("div")?
        .class("filter-bar")
        .child(search)?
        .child(type_filter)?
        .child(refresh)?
        .build();

    if vm.has_filters() {
        let reset = ElementBuilder::new("button")?
            .class("btn btn-ghost btn-small")
            .attr("type", "button")?
            .text("필터 초기화")
            .build();
        let vm = vm.clone();
        on_click(&reset, move |_| vm.reset_filters())?;
        bar.append_child(&reset)?;
    }
    Ok(bar)
}

pub fn render_sort_bar(vm: &DocumentListViewModel) -> Result<Element, JsValue> {
    let bar = ElementBuilder::new("div")?.class("sort-bar").build();
    let current = vm.sort();
    for key in SortKey::ALL {
        let label = match current {
            Some((active, direction)) if active == key => {
                format!("{} {}", key.label(), direction.arrow())
            }
            _ => key.label().to_string(),
        };
        let button = ElementBuilder::new("button")?
            .class("sort-button")
            .class_if(matches!(current, Some((active, _)) if active == key), "sort-button--active")?
            .attr("type", "button")?
            .text(&label)
            .build();
        let vm = vm.clone();
        on_click(&button, move |_| vm.sort_by(key))?;
        bar.append_child(&button)?;
    }
    Ok(bar)
}

pub fn render_document_list(vm: &DocumentListViewModel) -> Result<Element, JsValue> {
    let state = vm.documents_state();
    let documents = match &state {
        RequestState::Idle => return render_empty(""),
        RequestState::Loading => return render_spinner("문서 목록을 불러오는 중..."),
        RequestState::Failure(error) => return render_error(error),
        RequestState::Success(_) => vm.visible_documents(),
    };
    if documents.is_empty() {
        let message = if vm.has_filters() {
            "검색 결과가 없습니다."
        } else {
            "업로드한 문서가 없습니다."
        };
        return render_empty(message);
    }

    let selected = vm.selected_id();
    let list = ElementBuilder::new("ul")?.class("document-list").build();
    for doc in documents {
        let row = render_row(vm, &doc, selected == Some(doc.document_id))?;
        list.append_child(&row)?;
    }
    Ok(list)
}

fn render_row(
    vm: &DocumentListViewModel,
    doc: &DocumentSummary,
    selected: bool,
) -> Result<Element, JsValue> {
    let meta = ElementBuilder::new("div")?
        .class("document-meta")
        .child(text_element("span", "document-date", &format_date(doc.upload_date.as_deref()))?)?
        .build();
    if let Some(kind) = doc.document_type.as_deref() {
        let badge = render_badge(kind, "type")?;
        meta.append_child(&badge)?;
    }
    if let Some(size) = doc.file_size {
        let size_label = text_element("span", "document-size", &format_file_size(size))?;
        meta.append_child(&size_label)?;
    }

    let row = ElementBuilder::new("li")?
        .class("document-row")
        .class_if(selected, "document-row--selected")?
        .child(text_element("span", "document-title", &doc.title)?)?
        .child(meta)?
        .build();
    let vm = vm.clone();
    let doc = doc.clone();
    on_click(&row, move |_| vm.select(doc.clone()))?;
    Ok(row)
}
