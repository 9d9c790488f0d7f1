//! Symbology
//!
//! Barcode standards the scanner is restricted to, with their
//! html5-qrcode identifiers and display labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Barcode format under which a code was decoded (display-only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Symbology {
    #[serde(rename = "EAN-13")]
    Ean13,
    #[serde(rename = "EAN-8")]
    Ean8,
    #[serde(rename = "UPC-A")]
    UpcA,
    #[serde(rename = "UPC-E")]
    UpcE,
    #[serde(rename = "Code-128")]
    Code128,
    #[serde(rename = "Code-39")]
    Code39,
    #[serde(rename = "ITF")]
    Itf,
    /// Typed in by hand
    #[serde(rename = "Manual")]
    Manual,
    /// Anything the decoder reports outside the retail subset
    #[default]
    #[serde(rename = "Unknown")]
    #[serde(other)]
    Unknown,
}

impl Symbology {
    /// The retail subset handed to the decoder
    pub const RETAIL: [Symbology; 7] = [
        Symbology::Ean13,
        Symbology::Ean8,
        Symbology::UpcA,
        Symbology::UpcE,
        Symbology::Code128,
        Symbology::Code39,
        Symbology::Itf,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Symbology::Ean13 => "EAN-13",
            Symbology::Ean8 => "EAN-8",
            Symbology::UpcA => "UPC-A",
            Symbology::UpcE => "UPC-E",
            Symbology::Code128 => "Code-128",
            Symbology::Code39 => "Code-39",
            Symbology::Itf => "ITF",
            Symbology::Manual => "Manual",
            Symbology::Unknown => "Unknown",
        }
    }

    /// Value of `Html5QrcodeSupportedFormats` for this format.
    pub fn html5_qrcode_id(&self) -> Option<u8> {
        match self {
            Symbology::Code39 => Some(3),
            Symbology::Code128 => Some(5),
            Symbology::Itf => Some(8),
            Symbology::Ean13 => Some(9),
            Symbology::Ean8 => Some(10),
            Symbology::UpcA => Some(14),
            Symbology::UpcE => Some(15),
            Symbology::Manual | Symbology::Unknown => None,
        }
    }

    /// Parse the `formatName` html5-qrcode attaches to a decode result
    /// (`EAN_13`, `CODE_128`, ...). Display labels are accepted as well.
    pub fn from_format_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "EAN_13" => Symbology::Ean13,
            "EAN_8" => Symbology::Ean8,
            "UPC_A" => Symbology::UpcA,
            "UPC_E" => Symbology::UpcE,
            "CODE_128" => Symbology::Code128,
            "CODE_39" => Symbology::Code39,
            "ITF" => Symbology::Itf,
            "MANUAL" => Symbology::Manual,
            _ => Symbology::Unknown,
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
