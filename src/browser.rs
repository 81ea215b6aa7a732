//! Small accessors for page state the client needs outside of Leptos.

use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

pub fn hostname() -> Option<String> {
    web_sys::window()?.location().hostname().ok()
}

pub fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    document
        .query_selector(&format!("meta[name=\"{name}\"]"))
        .ok()
        .flatten()?
        .get_attribute("content")
}

pub fn cookies() -> Option<String> {
    let document = web_sys::window()?.document()?;
    document.dyn_into::<HtmlDocument>().ok()?.cookie().ok()
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
