/// chrome.storage.local access for extension settings

use wasm_bindgen::prelude::*;

use crate::config::{CONFIG_STORAGE_KEY, Config};

#[wasm_bindgen(module = "/bridge/storage.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;
}

/// Load the user's config, falling back to defaults on any failure
pub async fn load_config() -> Config {
    match read_key(CONFIG_STORAGE_KEY).await {
        Ok(stored) => Config::from_stored(stored),
        Err(e) => {
            log::warn!("Using default config: {}", e);
            Config::default()
        }
    }
}

async fn read_key(key: &str) -> Result<Option<serde_json::Value>, String> {
    let stored_js = getStorage(key)
        .await
        .map_err(|e| format!("Failed to get storage: {:?}", e))?;

    if stored_js.is_null() || stored_js.is_undefined() {
        return Ok(None);
    }

    serde_wasm_bindgen::from_value(stored_js)
        .map(Some)
        .map_err(|e| format!("Failed to parse storage: {:?}", e))
}
