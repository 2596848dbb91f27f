// Most of the crate only runs in the browser; native builds compile the
// helpers for their unit tests
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

use wasm_bindgen::prelude::*;
use web_sys::Window;

mod markdown;
mod storage;
mod utils;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod chat_ui;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod symptom_ui;
#[cfg(target_arch = "wasm32")]
mod transport;

pub use storage::LocalStorageStore;
#[cfg(target_arch = "wasm32")]
pub use transport::FetchTransport;

/// Initialize the WASM application
/// This sets up panic hooks and logging
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    wasm_logger::init(wasm_logger::Config::default());

    log::info!("Health assistant WASM initialized");
}

/// Wire up the tabs, the chat view and the symptom checker
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_health_app() -> Result<(), JsValue> {
    log::info!("Initializing health assistant, backend at {}", utils::api_base_url());
    app::HealthApp::new()?.start()
}

/// Get the window object
fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))
}

/// Get the document object
#[cfg(target_arch = "wasm32")]
fn document() -> Result<web_sys::Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("No document object"))
}
