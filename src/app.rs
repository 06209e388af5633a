// ============================================================================
// APP - Mount point, hash routing and re-render scheduling
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{
    focused_element_id, get_element_by_id, location_hash, on_window, release_render_listeners,
    restore_focus, set_location_hash,
};
use crate::state::app_state::AppState;
use crate::state::context::AppContext;
use crate::state::route::Route;
use crate::views::render_app;

pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new(AppContext::browser(CONFIG.clone()));
        if let Some(session) = state.session() {
            log::info!("💾 [APP] Restored session for {}", session.username);
        }

        // Several transitions in one tick collapse into a single render
        let scheduled = Rc::new(Cell::new(false));
        state.ctx.changes.subscribe(move || {
            if scheduled.replace(true) {
                return;
            }
            let scheduled = scheduled.clone();
            Timeout::new(0, move || {
                scheduled.set(false);
                crate::rerender_app();
            })
            .forget();
        });

        {
            let state = state.clone();
            on_window("hashchange", move |_| {
                let requested = Route::from_hash(&location_hash());
                if requested != state.current_route() {
                    state.navigate(requested);
                }
            })?;
        }

        Ok(Self { state, root })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn render(&self) -> Result<(), JsValue> {
        log::debug!("🎬 [APP] Render {:?}", self.state.current_route());

        set_location_hash(self.state.current_route().to_hash())?;
        let focused = focused_element_id();

        self.root.set_inner_html("");
        let released = release_render_listeners();
        log::trace!("🧹 [APP] Released {} listeners", released);
        let view = render_app(&self.state)?;
        self.root.append_child(&view)?;

        if let Some(id) = focused {
            restore_focus(&id);
        }
        Ok(())
    }
}
