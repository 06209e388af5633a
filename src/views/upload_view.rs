// ============================================================================
// UPLOAD VIEW - File picker, summary option and the recent uploads
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{on_change, on_click, read_file, selected_file, text_element, ElementBuilder};
use crate::models::document::DocumentSummary;
use crate::state::app_state::AppState;
use crate::state::request_state::RequestState;
use crate::utils::constants::ALLOWED_UPLOAD_EXTENSIONS;
use crate::utils::format::{format_date, format_file_size};
use crate::views::shared::{
    render_button, render_checkbox, render_empty, render_error, render_spinner,
};

const RECENT_LIMIT: usize = 5;

pub fn render_upload(state: &AppState) -> Result<Element, JsValue> {
    let vm = &state.upload;
    let uploading = vm.upload_state().is_loading();
    let accept: Vec<String> = ALLOWED_UPLOAD_EXTENSIONS
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect();

    let input = ElementBuilder::new("input")?
        .id("upload-file")
        .class("file-input")
        .attr("type", "file")?
        .attr("accept", &accept.join(","))?
        .flag("disabled", uploading)?
        .build();
    {
        let vm = vm.clone();
        on_change(&input, move |event| {
            let Some(file) = selected_file(&event) else {
                return;
            };
            if !vm.accepts(&file.name(), file.size() as u64) {
                return;
            }
            let vm = vm.clone();
            spawn_local(async move {
                match read_file(&file).await {
                    Ok(file) => vm.select_file(file),
                    Err(e) => log::error!("❌ [UPLOAD] Could not read file: {:?}", e),
                }
            });
        })?;
    }

    let hint = format!(
        "{} 파일, 최대 {}MB",
        accept.join(", "),
        state.ctx.config.max_upload_bytes / (1024 * 1024)
    );
    let drop_zone = ElementBuilder::new("label")?
        .class("drop-zone")
        .attr("for", "upload-file")?
        .child(text_element("span", "drop-zone-icon", "📄")?)?
        .child(text_element("span", "drop-zone-text", "업로드할 문서를 선택하세요")?)?
        .child(text_element("span", "drop-zone-hint", &hint)?)?
        .child(input)?
        .build();

    let panel = ElementBuilder::new("div")?
        .class("card upload-card")
        .child(drop_zone)?
        .build();

    if let Some(file) = vm.selected() {
        let clear = ElementBuilder::new("button")?
            .class("btn btn-ghost btn-small")
            .attr("type", "button")?
            .flag("disabled", uploading)?
            .text("선택 취소")
            .build();
        {
            let vm = vm.clone();
            on_click(&clear, move |_| vm.clear_selection())?;
        }
        let selected = ElementBuilder::new("div")?
            .class("selected-file")
            .child(text_element("span", "selected-file-name", &file.name)?)?
            .child(text_element("span", "selected-file-size", &format_file_size(file.size))?)?
            .child(clear)?
            .build();
        panel.append_child(&selected)?;
    }

    let summarize = {
        let vm = vm.clone();
        render_checkbox(
            "upload-summarize",
            "업로드 후 요약과 태그 생성",
            vm.summarize(),
            move |checked| vm.set_summarize(checked),
        )?
    };
    panel.append_child(&summarize)?;

    let submit = render_button("업로드", "업로드 중...", "btn btn-primary", uploading)?;
    if vm.selected().is_none() {
        submit.set_attribute("disabled", "")?;
    }
    {
        let vm = vm.clone();
        on_click(&submit, move |_| vm.upload())?;
    }
    panel.append_child(&submit)?;

    ElementBuilder::new("section")?
        .class("page page-upload")
        .child(text_element("h2", "page-title", "문서 업로드")?)?
        .child(panel)?
        .child(render_recent(&vm.documents_state())?)
        .map(ElementBuilder::build)
}

fn render_recent(documents: &RequestState<Vec<DocumentSummary>>) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("div")?
        .class("card recent-documents")
        .child(text_element("h3", "card-title", "최근 업로드")?)?
        .build();

    let body = match documents {
        RequestState::Idle => return Ok(section),
        RequestState::Loading => render_spinner("문서 목록을 불러오는 중...")?,
        RequestState::Failure(error) => render_error(error)?,
        RequestState::Success(list) if list.is_empty() => {
            render_empty("아직 업로드한 문서가 없습니다.")?
        }
        RequestState::Success(list) => {
            let ul = ElementBuilder::new("ul")?.class("recent-list").build();
            for doc in list.iter().take(RECENT_LIMIT) {
                let item = ElementBuilder::new("li")?
                    .class("recent-item")
                    .child(text_element("span", "recent-title", &doc.title)?)?
                    .child(text_element(
                        "span",
                        "recent-date",
                        &format_date(doc.upload_date.as_deref()),
                    )?)?
                    .build();
                ul.append_child(&item)?;
            }
            ul
        }
    };
    section.append_child(&body)?;
    Ok(section)
}
