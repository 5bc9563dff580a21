/// Traffic Lens - Chrome Extension showing website traffic analytics
/// Built with Rust + WASM + Yew

mod background;
pub mod config;
mod domain;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod metrics;
pub mod numeric;
pub mod relay;
mod storage;
mod tab_data;
pub mod ui;
pub mod view_model;

use wasm_bindgen::prelude::*;

pub use background::handle_message;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export domain extraction for JavaScript access
#[wasm_bindgen]
pub fn extract_domain(url: &str) -> String {
    domain::extract_domain(url).unwrap_or_else(|| "invalid".to_string())
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
