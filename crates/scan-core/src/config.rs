//! Configuration
//!
//! Compiled-in defaults for the scanner and the session store.

use serde::{Deserialize, Serialize};

use crate::symbology::Symbology;

/// Storage key holding the JSON session list
pub const DEFAULT_STORAGE_KEY: &str = "barcode_scanner_session";

/// Scanner sampling and filtering parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Frames decoded per second
    pub fps: u32,
    /// Repeat-suppression window for the same code
    pub debounce_ms: u64,
    /// Scan region drawn over the video feed
    pub qrbox_width: u32,
    pub qrbox_height: u32,
    /// `getUserMedia` facing mode; "environment" is the rear camera
    pub facing_mode: String,
    pub formats: Vec<Symbology>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            fps: 10,
            debounce_ms: 2000,
            qrbox_width: 250,
            qrbox_height: 150,
            facing_mode: "environment".to_string(),
            formats: Symbology::RETAIL.to_vec(),
        }
    }
}

impl ScannerConfig {
    /// html5-qrcode numeric ids for `formatsToSupport`
    pub fn format_ids(&self) -> Vec<u8> {
        self.formats.iter().filter_map(|f| f.html5_qrcode_id()).collect()
    }
}

/// Application-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scanner: ScannerConfig,
    pub storage_key: String,
    /// Pre-recorded acknowledgment sound served next to the app.
    /// Unset plays the synthesized tone directly.
    pub beep_asset: Option<String>,
    /// How long a toast notice stays on screen
    pub notice_ms: u32,
    /// Recent log lines kept in memory
    pub log_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scanner: ScannerConfig::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            beep_asset: None,
            notice_ms: 3000,
            log_capacity: 500,
        }
    }
}
