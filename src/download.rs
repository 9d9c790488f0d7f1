//! File Download
//!
//! Hands a generated CSV to the browser as a file download.

use gloo_timers::callback::Timeout;
use scan_core::{CsvExport, CSV_MIME};
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Object URLs outlive the click by this long so the download can begin
const REVOKE_DELAY_MS: u32 = 10_000;

pub fn download_csv(export: &CsvExport) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(&export.content));
    let options = BlobPropertyBag::new();
    options.set_type(CSV_MIME);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document unavailable"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(&export.filename);
    anchor.click();

    Timeout::new(REVOKE_DELAY_MS, move || {
        if let Err(e) = Url::revoke_object_url(&url) {
            debug!(error = %crate::js_error::message(&e), "object URL revoke failed");
        }
    })
    .forget();
    Ok(())
}
