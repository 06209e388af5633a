// ============================================================================
// REGISTER VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, on_submit, text_element, ElementBuilder};
use crate::state::app_state::AppState;
use crate::state::route::Route;
use crate::utils::constants::MIN_PASSWORD_LENGTH;
use crate::viewmodels::RegisterForm;
use crate::views::shared::{render_input, Field};

pub fn render_register(state: &AppState) -> Result<Element, JsValue> {
    let vm = &state.auth;
    let form = vm.register_form();
    let busy = vm.register_state().is_loading();
    let password_hint = format!("{}자 이상", MIN_PASSWORD_LENGTH);

    let fields: [(&str, &str, &str, &str, &str, fn(&mut RegisterForm, String)); 4] = [
        ("register-username", "사용자 이름", "text", form.username.as_str(), "", |f, v| f.username = v),
        ("register-email", "이메일", "email", form.email.as_str(), "you@example.com", |f, v| f.email = v),
        ("register-password", "비밀번호", "password", form.password.as_str(), password_hint.as_str(), |f, v| {
            f.password = v
        }),
        ("register-confirm", "비밀번호 확인", "password", form.confirm.as_str(), "", |f, v| f.confirm = v),
    ];

    let form_el = ElementBuilder::new("form")?.class("auth-form").build();
    for (id, label, kind, value, placeholder, apply) in fields {
        let vm = vm.clone();
        let input = render_input(
            Field::text(id, label, value)
                .kind(kind)
                .placeholder(placeholder)
                .disabled(busy),
            move |value| vm.edit_register(|f| apply(f, value)),
        )?;
        form_el.append_child(&input)?;
    }

    let submit = ElementBuilder::new("button")?
        .class("btn btn-primary btn-block")
        .attr("type", "submit")?
        .flag("disabled", busy)?
        .text(if busy { "가입 중..." } else { "회원가입" })
        .build();
    form_el.append_child(&submit)?;
    {
        let vm = vm.clone();
        on_submit(&form_el, move || vm.register())?;
    }

    let login_link = ElementBuilder::new("a")?
        .class("auth-switch")
        .attr("href", Route::Login.to_hash())?
        .text("이미 계정이 있으신가요? 로그인")
        .build();
    {
        let app = state.clone();
        on_click(&login_link, move |event| {
            event.prevent_default();
            app.navigate(Route::Login);
        })?;
    }

    ElementBuilder::new("section")?
        .class("auth-card")
        .child(text_element("h1", "auth-title", "회원가입")?)?
        .child(form_el)?
        .child(login_link)
        .map(ElementBuilder::build)
}
