//! Static JSON documents
//!
//! Fetched once, no retry. A failure is logged and the consumer keeps its
//! empty collection.

use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::js_reason;
use crate::error::FetchError;

pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let network = |e: wasm_bindgen::JsValue| FetchError::Network {
        url: url.to_string(),
        reason: js_reason(&e),
    };

    let window = web_sys::window().ok_or_else(|| FetchError::Network {
        url: url.to_string(),
        reason: "no window".into(),
    })?;

    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(network)?
        .dyn_into()
        .map_err(network)?;

    if !response.ok() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let text = JsFuture::from(response.text().map_err(network)?)
        .await
        .map_err(network)?
        .as_string()
        .unwrap_or_default();

    serde_json::from_str(&text).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Fetch in the background and hand the document to `on_loaded`
pub fn load<T, F>(url: String, on_loaded: F)
where
    T: DeserializeOwned + 'static,
    F: FnOnce(T) + 'static,
{
    wasm_bindgen_futures::spawn_local(async move {
        match fetch_json::<T>(&url).await {
            Ok(doc) => on_loaded(doc),
            Err(e) => log::warn!("{}", e),
        }
    });
}
