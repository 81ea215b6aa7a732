pub mod api;
#[cfg(feature = "hydrate")]
mod browser;
pub mod cancel;
pub mod catalog;
pub mod config;
pub mod detail;
pub mod embed;
pub mod error;
pub mod events;
pub mod i18n;
pub mod models;
pub mod player;
pub mod quiz;
pub mod routes;

pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("Failed to init logger: {e}").into());
    }
    leptos::mount::hydrate_body(ui::App);
}
