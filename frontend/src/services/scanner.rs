//! Wrapper around the html5-qrcode camera widget.
//!
//! The widget owns the camera while running. It reports each scan as a
//! list of decoded strings; callers pick the value they need.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::types::{AppError, AppResult};

/// A running camera scanner. Call [`QrScanner::stop`] to release the camera.
pub struct QrScanner {
    // Kept alive for as long as the widget may call back.
    _on_scan: Closure<dyn FnMut(JsValue)>,
}

impl QrScanner {
    /// Starts the camera inside the element with id `element_id`.
    pub async fn start(
        element_id: &str,
        mut on_scan: impl FnMut(Vec<String>) + 'static,
    ) -> AppResult<Self> {
        let callback = Closure::wrap(Box::new(move |value: JsValue| {
            match decode_scan(value) {
                Ok(decoded) => on_scan(decoded),
                Err(e) => log::warn!("Ignoring unreadable scan result: {}", e),
            }
        }) as Box<dyn FnMut(JsValue)>);

        JsFuture::from(start_scanner_js(element_id, &callback))
            .await
            .map_err(|e| AppError::Scanner(js_error_message(&e)))?;

        log::info!("📷 Camera scanner started");
        Ok(Self { _on_scan: callback })
    }

    /// Stops the widget and releases the camera.
    pub async fn stop(self) -> AppResult<()> {
        JsFuture::from(stop_scanner_js())
            .await
            .map_err(|e| AppError::Scanner(js_error_message(&e)))?;

        log::info!("📷 Camera scanner stopped");
        Ok(())
    }
}

/// Accepts either an array of strings or a single string.
fn decode_scan(value: JsValue) -> Result<Vec<String>, serde_wasm_bindgen::Error> {
    if let Some(single) = value.as_string() {
        return Ok(vec![single]);
    }
    serde_wasm_bindgen::from_value(value)
}

fn js_error_message(e: &JsValue) -> String {
    js_sys::Reflect::get(e, &"message".into())
        .ok()
        .and_then(|v| v.as_string())
        .or_else(|| e.as_string())
        .unwrap_or_else(|| "Unknown JS error".to_string())
}

/// JavaScript functions from scanner.js
#[wasm_bindgen(module = "/src/js/scanner.js")]
extern "C" {
    #[wasm_bindgen(js_name = "startScanner")]
    fn start_scanner_js(element_id: &str, on_scan: &Closure<dyn FnMut(JsValue)>) -> js_sys::Promise;

    #[wasm_bindgen(js_name = "stopScanner")]
    fn stop_scanner_js() -> js_sys::Promise;
}
