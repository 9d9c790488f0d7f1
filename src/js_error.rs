//! JS Error Helpers
//!
//! Turns thrown `JsValue`s into readable messages.

use wasm_bindgen::{JsCast, JsValue};

/// Best-effort message for a thrown value: `Error` objects give
/// `name: message`, strings pass through, anything else is debug-printed.
pub fn message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        let name: String = error.name().into();
        let message: String = error.message().into();
        return if name.is_empty() {
            message
        } else {
            format!("{}: {}", name, message)
        };
    }
    format!("{:?}", value)
}
