//! Browser-side persistence using Web APIs

use wasm_bindgen::prelude::*;
use web_sys::{Blob, HtmlAnchorElement, Storage, Url};

use mention_core::ExportMessage;

/// localStorage key holding the sent message history
pub const SENT_KEY: &str = "mention.sent";

/// Download JSON as a file
pub fn download_json(filename: &str, json: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    let blob_parts = js_sys::Array::new();
    blob_parts.push(&JsValue::from_str(json));

    let blob_options = web_sys::BlobPropertyBag::new();
    blob_options.set_type("application/json");

    let blob = Blob::new_with_str_sequence_and_options(&blob_parts, &blob_options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    // Temporary anchor triggers the download
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    Url::revoke_object_url(&url)?;

    Ok(())
}

fn storage() -> Result<Storage, JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    Ok(window.local_storage()?.ok_or("No localStorage")?)
}

/// Save sent messages to localStorage
pub fn save_sent(messages: &[ExportMessage]) -> Result<(), JsValue> {
    let json = mention_core::to_json(messages).map_err(|e| JsValue::from_str(&e.to_string()))?;
    storage()?.set_item(SENT_KEY, &json)
}

/// Load sent messages from localStorage. Missing history is empty.
pub fn load_sent() -> Result<Vec<ExportMessage>, JsValue> {
    match storage()?.get_item(SENT_KEY)? {
        Some(json) => serde_json::from_str(&json).map_err(|e| JsValue::from_str(&e.to_string())),
        None => Ok(Vec::new()),
    }
}
