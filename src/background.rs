/// Background relay entry point
///
/// The service worker glue forwards every `chrome.runtime.onMessage`
/// request here and hands the resolved value to `sendResponse`.
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::relay::{RelayResponse, handle_with_config};
use crate::storage::load_config;

/// Answer one relay message; never rejects
#[wasm_bindgen]
pub async fn handle_message(request: JsValue) -> JsValue {
    let response = respond(request).await;
    to_js(&response)
}

async fn respond(request: JsValue) -> RelayResponse {
    let raw: Value = match serde_wasm_bindgen::from_value(request) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("Undecodable relay message: {:?}", e);
            return RelayResponse::failure("Invalid request");
        }
    };

    let config = load_config().await;
    handle_with_config(&raw, &config).await
}

/// Plain JS objects (not `Map`s) so the response survives message passing
fn to_js(response: &RelayResponse) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    match response.serialize(&serializer) {
        Ok(js) => js,
        Err(e) => {
            log::error!("Failed to serialize relay response: {:?}", e);
            RelayResponse::failure("Failed to serialize response")
                .serialize(&serializer)
                .unwrap_or(JsValue::NULL)
        }
    }
}
