// ============================================================================
// GENERATION VIEW - Request form and the generated document
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, on_submit, text_element, ElementBuilder};
use crate::models::generation::{DocumentLength, GeneratedDocument};
use crate::state::app_state::AppState;
use crate::state::request_state::RequestState;
use crate::utils::constants::DOCUMENT_TYPES;
use crate::viewmodels::GenerationViewModel;
use crate::views::shared::{
    render_button, render_error, render_input, render_select, render_spinner, render_textarea,
    Field,
};

pub fn render_generation(state: &AppState) -> Result<Element, JsValue> {
    let vm = &state.generation;

    let result = match vm.generation_state() {
        RequestState::Idle => None,
        RequestState::Loading => Some(render_spinner("문서를 생성하는 중입니다. 잠시만 기다려주세요...")?),
        RequestState::Failure(error) => Some(render_error(&error)?),
        RequestState::Success(document) => Some(render_result(vm, &document)?),
    };

    let page = ElementBuilder::new("section")?
        .class("page page-generate")
        .child(text_element("h2", "page-title", "문서 생성")?)?
        .child(render_form(vm)?)?
        .build();
    if let Some(result) = result {
        page.append_child(&result)?;
    }
    Ok(page)
}

fn render_form(vm: &GenerationViewModel) -> Result<Element, JsValue> {
    let form = vm.form();
    let busy = vm.generation_state().is_loading();

    let topic = {
        let vm = vm.clone();
        render_input(
            Field::text("generate-topic", "주제", &form.topic)
                .placeholder("예: 3분기 매출 분석 보고서")
                .disabled(busy),
            move |value| vm.edit(|f| f.topic = value),
        )?
    };

    let types: Vec<(String, String)> = DOCUMENT_TYPES
        .iter()
        .map(|t| (t.to_string(), t.to_string()))
        .collect();
    let document_type = {
        let vm = vm.clone();
        render_select(
            "generate-type",
            "문서 유형",
            &types,
            &form.document_type,
            move |value| vm.edit(|f| f.document_type = value),
        )?
    };

    let lengths: Vec<(String, String)> = DocumentLength::ALL
        .iter()
        .map(|l| (l.label().to_string(), l.label().to_string()))
        .collect();
    let length = {
        let vm = vm.clone();
        render_select(
            "generate-length",
            "분량",
            &lengths,
            form.length.label(),
            move |value| {
                if let Some(length) = DocumentLength::ALL.into_iter().find(|l| l.label() == value) {
                    vm.edit(|f| f.length = length);
                }
            },
        )?
    };

    let keywords = {
        let vm = vm.clone();
        render_input(
            Field::text("generate-keywords", "키워드", &form.keywords)
                .placeholder("쉼표로 구분: 매출, 성장, 전략")
                .disabled(busy),
            move |value| vm.edit(|f| f.keywords = value),
        )?
    };

    let reference = render_reference_select(vm, form.reference_document_id)?;

    let instructions = {
        let vm = vm.clone();
        render_textarea(
            Field::text("generate-instructions", "추가 요청사항", &form.additional_instructions)
                .placeholder("선택 사항")
                .disabled(busy),
            move |value| vm.edit(|f| f.additional_instructions = value),
        )?
    };

    let submit = ElementBuilder::new("button")?
        .class("btn btn-primary")
        .attr("type", "submit")?
        .flag("disabled", busy)?
        .text(if busy { "생성 중..." } else { "문서 생성" })
        .build();

    let form_el = ElementBuilder::new("form")?
        .class("card generate-form")
        .children([topic, document_type, length, keywords, reference, instructions, submit])?
        .build();
    let vm = vm.clone();
    on_submit(&form_el, move || vm.submit())?;
    Ok(form_el)
}

/// The backend needs one of the user's documents as a style reference
fn render_reference_select(
    vm: &GenerationViewModel,
    selected: Option<i64>,
) -> Result<Element, JsValue> {
    match vm.references_state() {
        RequestState::Idle | RequestState::Loading => render_spinner("참고 문서를 불러오는 중..."),
        RequestState::Failure(error) => render_error(&error),
        RequestState::Success(documents) => {
            let mut options = vec![(String::new(), "참고할 문서를 선택하세요".to_string())];
            options.extend(
                documents
                    .iter()
                    .map(|doc| (doc.document_id.to_string(), doc.title.clone())),
            );
            let current = selected.map(|id| id.to_string()).unwrap_or_default();
            let vm = vm.clone();
            render_select(
                "generate-reference",
                "참고 문서",
                &options,
                &current,
                move |value| vm.edit(|f| f.reference_document_id = value.parse().ok()),
            )
        }
    }
}

fn render_result(vm: &GenerationViewModel, document: &GeneratedDocument) -> Result<Element, JsValue> {
    let meta = ElementBuilder::new("div")?.class("result-meta").build();
    if let Some(kind) = document.document_type.as_deref() {
        let kind = text_element("span", "result-type", kind)?;
        meta.append_child(&kind)?;
    }
    if let Some(ms) = document.processing_time {
        let time = text_element(
            "span",
            "result-time",
            &format!("생성 시간 {:.1}초", ms as f64 / 1000.0),
        )?;
        meta.append_child(&time)?;
    }

    let actions = ElementBuilder::new("div")?.class("result-actions").build();
    let downloading = vm.is_downloading();
    for action in vm.download_actions() {
        let button = render_button(
            &format!("{} 다운로드", action.format.label()),
            "다운로드 중...",
            "btn btn-secondary btn-small",
            downloading,
        )?;
        let vm = vm.clone();
        on_click(&button, move |_| vm.download(action))?;
        actions.append_child(&button)?;
    }
    let again = ElementBuilder::new("button")?
        .class("btn btn-ghost btn-small")
        .attr("type", "button")?
        .text("새로 만들기")
        .build();
    {
        let vm = vm.clone();
        on_click(&again, move |_| vm.reset())?;
    }
    actions.append_child(&again)?;

    ElementBuilder::new("div")?
        .class("card generate-result")
        .child(text_element("h3", "card-title", "생성된 문서")?)?
        .child(meta)?
        .child(text_element("pre", "result-content", &document.content)?)?
        .child(actions)
        .map(ElementBuilder::build)
}
