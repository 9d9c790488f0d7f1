//! Camera Scanner
//!
//! html5-qrcode bindings and the `CameraBackend` built on them.

mod backend;
mod bindings;
mod slot;

pub use backend::Html5QrcodeBackend;

/// Element html5-qrcode renders the video feed into
pub const SCANNER_ELEMENT_ID: &str = "scanner-view";
