//! html5-qrcode Bindings
//!
//! The library is loaded by a script tag in `index.html` and exposes the
//! `Html5Qrcode` class on `window`.

use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    pub type Html5Qrcode;

    /// `new Html5Qrcode(elementId, { formatsToSupport, verbose })`
    #[wasm_bindgen(constructor, catch)]
    pub fn new(element_id: &str, config: &JsValue) -> Result<Html5Qrcode, JsValue>;

    /// Resolves once the camera is streaming
    #[wasm_bindgen(method, catch)]
    pub fn start(
        this: &Html5Qrcode,
        camera: &JsValue,
        config: &JsValue,
        on_success: &Function,
        on_error: &Function,
    ) -> Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch)]
    pub fn stop(this: &Html5Qrcode) -> Result<Promise, JsValue>;

    /// Removes the rendered video element
    #[wasm_bindgen(method, catch)]
    pub fn clear(this: &Html5Qrcode) -> Result<(), JsValue>;
}
