// ============================================================================
// PERSONA TWIN - FRONTEND MVVM (RUST + WASM)
// ============================================================================
// - Views: functions that render DOM (no logic)
// - ViewModels: page state + UI logic
// - Services: backend communication only
// - State: Rc<RefCell> state, request lifecycles, routing
// - Models: structures shared with the backend
// ============================================================================

mod config;
mod models;
mod services;
mod viewmodels;
mod state;
mod dom;
mod views;
mod utils;
mod app;

#[cfg(test)]
mod test_support;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::app::App;
use crate::config::CONFIG;
use crate::dom::location_hash;
use crate::state::route::Route;

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(Config::new(CONFIG.log_level()));
    log::info!("🚀 Persona Twin ({}) -> {}", CONFIG.environment, CONFIG.backend_url);

    let app = App::new()?;
    let state = app.state().clone();
    APP.with(|cell| *cell.borrow_mut() = Some(app));

    // Navigating announces a change, which schedules the first render
    state.navigate(Route::from_hash(&location_hash()));
    Ok(())
}

/// Full re-render of the mounted app
pub fn rerender_app() {
    APP.with(|cell| {
        if let Some(app) = cell.borrow().as_ref() {
            if let Err(e) = app.render() {
                log::error!("❌ [RERENDER] {:?}", e);
            }
        } else {
            log::warn!("⚠️ [RERENDER] App is not initialized");
        }
    });
}
