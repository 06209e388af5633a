// ============================================================================
// APP VIEW - Shell around the current page
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::state::app_state::AppState;
use crate::state::route::Route;
use crate::views::auth::{render_login, render_register};
use crate::views::documents::render_documents;
use crate::views::generation_view::render_generation;
use crate::views::shared::{render_header, render_toasts};
use crate::views::style_learning_view::render_style_learning;
use crate::views::token_usage_view::render_token_usage;
use crate::views::upload_view::render_upload;

pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    let route = state.current_route();
    let shell = ElementBuilder::new("div")?.class("app-shell").build();

    if let (Some(session), true) = (state.session(), route.requires_session()) {
        let header = render_header(state, &session)?;
        shell.append_child(&header)?;
    }

    let page = match route {
        Route::Login => render_login(state)?,
        Route::Register => render_register(state)?,
        Route::Upload => render_upload(state)?,
        Route::Documents => render_documents(state)?,
        Route::StyleLearning => render_style_learning(state)?,
        Route::Generate => render_generation(state)?,
        Route::TokenUsage => render_token_usage(state)?,
    };
    let main = ElementBuilder::new("main")?
        .class("app-main")
        .child(page)?
        .build();
    shell.append_child(&main)?;
    let toasts = render_toasts(&state.ctx.notifier)?;
    shell.append_child(&toasts)?;
    Ok(shell)
}
