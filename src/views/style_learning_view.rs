// ============================================================================
// STYLE LEARNING VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, text_element, ElementBuilder};
use crate::state::app_state::AppState;
use crate::state::request_state::RequestState;
use crate::state::route::Route;
use crate::utils::constants::MIN_DOCUMENTS_FOR_STYLE_LEARNING;
use crate::views::shared::{render_button, render_error, render_spinner};

pub fn render_style_learning(state: &AppState) -> Result<Element, JsValue> {
    let vm = &state.style;
    let count = vm.document_count();
    let learning = vm.learning_state();

    let corpus = match vm.documents_state() {
        RequestState::Idle | RequestState::Loading => render_spinner("문서를 확인하는 중...")?,
        RequestState::Failure(error) => render_error(&error)?,
        RequestState::Success(_) if count < MIN_DOCUMENTS_FOR_STYLE_LEARNING => {
            let link = ElementBuilder::new("a")?
                .class("btn btn-secondary btn-small")
                .attr("href", Route::Upload.to_hash())?
                .text("문서 업로드하러 가기")
                .build();
            let app = state.clone();
            on_click(&link, move |event| {
                event.prevent_default();
                app.navigate(Route::Upload);
            })?;
            ElementBuilder::new("div")?
                .class("status status--warning")
                .child(text_element(
                    "p",
                    "status-text",
                    &format!(
                        "문체 학습에는 최소 {}개의 문서가 필요합니다. (현재 {}개)",
                        MIN_DOCUMENTS_FOR_STYLE_LEARNING, count
                    ),
                )?)?
                .child(link)?
                .build()
        }
        RequestState::Success(_) => text_element(
            "p",
            "corpus-count",
            &format!("업로드한 문서 {}개로 문체를 학습합니다.", count),
        )?,
    };

    let button = render_button(
        "문체 학습 시작",
        "학습 중...",
        "btn btn-primary",
        learning.is_loading(),
    )?;
    if count < MIN_DOCUMENTS_FOR_STYLE_LEARNING {
        button.set_attribute("disabled", "")?;
    }
    {
        let vm = vm.clone();
        on_click(&button, move |_| vm.learn())?;
    }

    let card = ElementBuilder::new("div")?
        .class("card style-card")
        .child(text_element(
            "p",
            "card-description",
            "업로드한 문서에서 문장 길이, 어휘, 어조를 분석해 나만의 문체 프로필을 만듭니다.",
        )?)?
        .child(corpus)?
        .child(button)?
        .build();

    match &learning {
        RequestState::Success(result) => {
            let mut message = result
                .message
                .clone()
                .unwrap_or_else(|| "문체 학습이 완료되었습니다.".to_string());
            if let Some(n) = result.document_count {
                message.push_str(&format!(" ({}개 문서)", n));
            }
            let status = text_element("div", "status status--success", &message)?;
            card.append_child(&status)?;
        }
        RequestState::Failure(error) => {
            let error = render_error(error)?;
            card.append_child(&error)?;
        }
        _ => {}
    }

    ElementBuilder::new("section")?
        .class("page page-style")
        .child(text_element("h2", "page-title", "문체 학습")?)?
        .child(card)
        .map(ElementBuilder::build)
}
