//! Console Logging
//!
//! Routes `tracing` output to the browser console through the rolling logger.

use rolling_logger::LogBuffer;
use tracing::Level;

fn console_sink(level: &Level, text: &str) {
    let text = text.into();
    match *level {
        Level::ERROR => web_sys::console::error_1(&text),
        Level::WARN => web_sys::console::warn_1(&text),
        Level::INFO => web_sys::console::info_1(&text),
        _ => web_sys::console::debug_1(&text),
    }
}

/// Install the global subscriber. Returns `None` if one is already set.
pub fn init(capacity: usize) -> Option<LogBuffer> {
    let max_level = if cfg!(debug_assertions) { Level::DEBUG } else { Level::INFO };
    match rolling_logger::init(max_level, capacity, Box::new(console_sink)) {
        Ok(buffer) => Some(buffer),
        Err(e) => {
            web_sys::console::warn_1(&format!("[logging] subscriber not installed: {}", e).into());
            None
        }
    }
}
