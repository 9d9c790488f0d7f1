//! html5-qrcode Camera Backend
//!
//! Owns the running `Html5Qrcode` instance and the JS callbacks feeding
//! raw decodes into the controller's sink.

use async_trait::async_trait;
use chrono::Utc;
use scan_core::{CameraBackend, DecodeSink, RawDecode, ScannerConfig, ScannerError};
use serde::Serialize;
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::bindings::Html5Qrcode;
use super::slot::{InstanceSlot, Shutdown};
use crate::js_error;

// ========================
// Config objects
// ========================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConstructorConfig {
    formats_to_support: Vec<u8>,
    verbose: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CameraConfig<'a> {
    facing_mode: &'a str,
}

#[derive(Serialize)]
struct QrBox {
    width: u32,
    height: u32,
}

#[derive(Serialize)]
struct ScanConfig {
    fps: u32,
    qrbox: QrBox,
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, ScannerError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| ScannerError::Backend(e.to_string()))
}

// ========================
// Backend
// ========================

struct Running {
    scanner: Html5Qrcode,
    // Kept alive for as long as the library may call them
    _on_success: Closure<dyn FnMut(String, JsValue)>,
    _on_error: Closure<dyn FnMut(JsValue)>,
}

#[async_trait(?Send)]
impl Shutdown for Running {
    async fn shutdown(&self) -> Result<(), ScannerError> {
        let promise = self
            .scanner
            .stop()
            .map_err(|e| ScannerError::Backend(js_error::message(&e)))?;
        JsFuture::from(promise)
            .await
            .map_err(|e| ScannerError::Backend(js_error::message(&e)))?;
        self.scanner
            .clear()
            .map_err(|e| ScannerError::Backend(js_error::message(&e)))
    }
}

pub struct Html5QrcodeBackend {
    element_id: String,
    running: InstanceSlot<Running>,
}

impl Html5QrcodeBackend {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            running: InstanceSlot::new(),
        }
    }
}

/// `decodedResult.result.format.formatName`, or empty when absent
fn format_name(decoded_result: &JsValue) -> String {
    ["result", "format", "formatName"]
        .iter()
        .try_fold(decoded_result.clone(), |value, key| {
            js_sys::Reflect::get(&value, &JsValue::from_str(key))
                .ok()
                .filter(|v| !v.is_undefined() && !v.is_null())
        })
        .and_then(|v| v.as_string())
        .unwrap_or_default()
}

#[async_trait(?Send)]
impl CameraBackend for Html5QrcodeBackend {
    async fn start(&self, config: &ScannerConfig, sink: DecodeSink) -> Result<(), ScannerError> {
        // An instance left over from a failed stop still holds the camera
        if self.running.is_occupied() {
            self.running.release().await?;
        }

        let scanner = Html5Qrcode::new(
            &self.element_id,
            &to_js(&ConstructorConfig {
                formats_to_support: config.format_ids(),
                verbose: false,
            })?,
        )
        .map_err(|e| ScannerError::Backend(js_error::message(&e)))?;

        let on_success = Closure::<dyn FnMut(String, JsValue)>::new(move |text: String, result: JsValue| {
            sink(RawDecode {
                text,
                format_name: format_name(&result),
                at: Utc::now(),
            });
        });
        // Fires for every frame without a readable code
        let on_error = Closure::<dyn FnMut(JsValue)>::new(|_: JsValue| {});

        let camera = to_js(&CameraConfig {
            facing_mode: &config.facing_mode,
        })?;
        let scan_config = to_js(&ScanConfig {
            fps: config.fps,
            qrbox: QrBox {
                width: config.qrbox_width,
                height: config.qrbox_height,
            },
        })?;

        let promise = scanner
            .start(
                &camera,
                &scan_config,
                on_success.as_ref().unchecked_ref(),
                on_error.as_ref().unchecked_ref(),
            )
            .map_err(|e| ScannerError::from_message(js_error::message(&e)))?;

        self.running.set(Running {
            scanner,
            _on_success: on_success,
            _on_error: on_error,
        });

        if let Err(e) = JsFuture::from(promise).await {
            if let Some(running) = self.running.take() {
                let _ = running.scanner.clear();
            }
            return Err(ScannerError::from_message(js_error::message(&e)));
        }
        debug!(element = %self.element_id, "camera stream running");
        Ok(())
    }

    async fn stop(&self) -> Result<(), ScannerError> {
        self.running.release().await
    }
}
