// ============================================================================
// DOCUMENT DETAIL - Content, summary and tags of the selected document
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{confirm, on_click, text_element, ElementBuilder};
use crate::models::document::{DocumentDetail, DocumentSummary, DownloadFormat};
use crate::state::request_state::RequestState;
use crate::viewmodels::DocumentListViewModel;
use crate::views::shared::{render_badge, render_button, render_empty, render_error, render_spinner};

pub fn render_document_detail(vm: &DocumentListViewModel) -> Result<Element, JsValue> {
    let Some(doc) = vm.selected_document() else {
        return render_empty("문서를 선택하면 내용을 볼 수 있습니다.");
    };

    let close = ElementBuilder::new("button")?
        .class("btn btn-ghost btn-small")
        .attr("type", "button")?
        .attr("aria-label", "닫기")?
        .text("×")
        .build();
    {
        let vm = vm.clone();
        on_click(&close, move |_| vm.clear_selection())?;
    }

    let header = ElementBuilder::new("div")?
        .class("detail-header")
        .child(text_element("h3", "detail-title", &doc.title)?)?
        .child(close)?
        .build();

    let body = match vm.detail_state() {
        RequestState::Idle | RequestState::Loading => render_spinner("문서를 불러오는 중...")?,
        RequestState::Failure(error) => render_error(&error)?,
        RequestState::Success(detail) => render_body(&detail)?,
    };

    ElementBuilder::new("aside")?
        .class("card document-detail")
        .child(header)?
        .child(render_actions(vm, &doc)?)?
        .child(body)
        .map(ElementBuilder::build)
}

fn render_actions(vm: &DocumentListViewModel, doc: &DocumentSummary) -> Result<Element, JsValue> {
    let actions = ElementBuilder::new("div")?.class("detail-actions").build();
    let downloading = vm.is_downloading();

    for format in [DownloadFormat::Txt, DownloadFormat::Docx] {
        let button = render_button(
            &format!("{} 다운로드", format.label()),
            "다운로드 중...",
            "btn btn-secondary btn-small",
            downloading,
        )?;
        let vm = vm.clone();
        on_click(&button, move |_| vm.download_selected(format))?;
        actions.append_child(&button)?;
    }

    let delete = render_button(
        "삭제",
        "삭제 중...",
        "btn btn-danger btn-small",
        vm.is_deleting(doc.document_id),
    )?;
    {
        let vm = vm.clone();
        let id = doc.document_id;
        let title = doc.title.clone();
        on_click(&delete, move |_| {
            if confirm(&format!("'{}' 문서를 삭제하시겠습니까?", title)) {
                vm.delete(id);
            }
        })?;
    }
    actions.append_child(&delete)?;
    Ok(actions)
}

fn render_body(detail: &DocumentDetail) -> Result<Element, JsValue> {
    let body = ElementBuilder::new("div")?.class("detail-body").build();

    if let Some(summary) = &detail.summary {
        let block = ElementBuilder::new("div")?
            .class("detail-summary")
            .child(text_element("h4", "detail-subtitle", "요약")?)?
            .build();
        if let Some(text) = summary.summary_text.as_deref() {
            let summary = text_element("p", "summary-text", text)?;
            block.append_child(&summary)?;
        }
        let tags = summary.tag_list();
        if !tags.is_empty() {
            let list = ElementBuilder::new("div")?.class("tag-list").build();
            for tag in &tags {
                let badge = render_badge(&format!("#{}", tag), "tag")?;
                list.append_child(&badge)?;
            }
            block.append_child(&list)?;
        }
        body.append_child(&block)?;
    }

    let content = detail.content.as_deref().unwrap_or("");
    let content_el = if content.is_empty() {
        render_empty(detail.error.as_deref().unwrap_or("내용이 없습니다."))?
    } else {
        text_element("pre", "detail-content", content)?
    };
    body.append_child(&content_el)?;
    Ok(body)
}
