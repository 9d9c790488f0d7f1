//! Barcode Scanner Frontend Entry Point

mod app;
mod components;
mod context;
mod download;
mod feedback;
mod js_error;
mod logging;
mod scanner;
mod storage;
mod store;

use app::App;
use leptos::prelude::*;
use scan_core::AppConfig;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::default();
    let log_buffer = logging::init(config.log_capacity);
    tracing::info!("barcode scanner starting");

    mount_to_body(move || view! { <App config=config.clone() log_buffer=log_buffer.clone() /> });
}
