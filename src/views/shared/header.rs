// ============================================================================
// HEADER - Brand, page navigation and the signed-in user
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, text_element, ElementBuilder};
use crate::models::session::Session;
use crate::state::app_state::AppState;
use crate::state::route::Route;

pub fn render_header(state: &AppState, session: &Session) -> Result<Element, JsValue> {
    let current = state.current_route();

    let nav = ElementBuilder::new("nav")?.class("nav").build();
    for route in Route::NAVIGATION {
        let link = ElementBuilder::new("a")?
            .class("nav-link")
            .class_if(route == current, "nav-link--active")?
            .attr("href", route.to_hash())?
            .text(route.label())
            .build();
        let app = state.clone();
        on_click(&link, move |event| {
            event.prevent_default();
            app.navigate(route);
        })?;
        nav.append_child(&link)?;
    }

    let logout = ElementBuilder::new("button")?
        .class("btn btn-ghost")
        .attr("type", "button")?
        .text("로그아웃")
        .build();
    {
        let app = state.clone();
        on_click(&logout, move |_| app.logout())?;
    }

    let user = ElementBuilder::new("div")?
        .class("header-user")
        .child(text_element(
            "span",
            "header-username",
            &format!("{}님", session.username),
        )?)?
        .child(logout)?
        .build();

    ElementBuilder::new("header")?
        .class("app-header")
        .child(text_element("div", "brand", "Persona Twin")?)?
        .child(nav)?
        .child(user)
        .map(ElementBuilder::build)
}
