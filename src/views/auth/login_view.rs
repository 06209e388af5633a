// ============================================================================
// LOGIN VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, on_submit, text_element, ElementBuilder};
use crate::state::app_state::AppState;
use crate::state::route::Route;
use crate::views::shared::{render_input, Field};

pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    let vm = &state.auth;
    let form = vm.login_form();
    let busy = vm.login_state().is_loading();

    let email = {
        let vm = vm.clone();
        render_input(
            Field::text("login-email", "이메일", &form.email)
                .kind("email")
                .placeholder("you@example.com")
                .disabled(busy),
            move |value| vm.edit_login(|f| f.email = value),
        )?
    };
    let password = {
        let vm = vm.clone();
        render_input(
            Field::text("login-password", "비밀번호", &form.password)
                .kind("password")
                .disabled(busy),
            move |value| vm.edit_login(|f| f.password = value),
        )?
    };

    let submit = ElementBuilder::new("button")?
        .class("btn btn-primary btn-block")
        .attr("type", "submit")?
        .flag("disabled", busy)?
        .text(if busy { "로그인 중..." } else { "로그인" })
        .build();

    let form_el = ElementBuilder::new("form")?
        .class("auth-form")
        .child(email)?
        .child(password)?
        .child(submit)?
        .build();
    {
        let vm = vm.clone();
        on_submit(&form_el, move || vm.login())?;
    }

    let register_link = ElementBuilder::new("a")?
        .class("auth-switch")
        .attr("href", Route::Register.to_hash())?
        .text("계정이 없으신가요? 회원가입")
        .build();
    {
        let app = state.clone();
        on_click(&register_link, move |event| {
            event.prevent_default();
            app.navigate(Route::Register);
        })?;
    }

    ElementBuilder::new("section")?
        .class("auth-card")
        .child(text_element("h1", "auth-title", "Persona Twin")?)?
        .child(text_element("p", "auth-subtitle", "나만의 문체로 문서를 만들어 보세요")?)?
        .child(form_el)?
        .child(register_link)
        .map(ElementBuilder::build)
}
