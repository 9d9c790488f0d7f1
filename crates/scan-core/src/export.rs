//! CSV Export
//!
//! Renders the session as a CSV document plus a filesystem-safe
//! download name derived from the export moment.

use std::borrow::Cow;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::ExportError;
use crate::item::ScannedItem;

pub const CSV_HEADER: &str = "No,Barcode,Format,Quantity,First Scanned,Last Scanned";
pub const CSV_MIME: &str = "text/csv;charset=utf-8";

/// A ready-to-download CSV file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
    /// Data rows, header excluded
    pub row_count: usize,
}

/// Build the CSV for `items` in their current order, numbered from 1
pub fn export_csv(items: &[ScannedItem], now: DateTime<Utc>) -> Result<CsvExport, ExportError> {
    if items.is_empty() {
        return Err(ExportError::EmptySession);
    }

    let mut content = String::with_capacity(64 * (items.len() + 1));
    content.push_str(CSV_HEADER);
    content.push('\n');

    for (index, item) in items.iter().enumerate() {
        let fields = [
            Cow::Owned((index + 1).to_string()),
            escape_field(&item.code),
            escape_field(item.symbology.label()),
            Cow::Owned(item.quantity().to_string()),
            Cow::Owned(iso_timestamp(item.first_seen_at)),
            Cow::Owned(iso_timestamp(item.last_seen_at)),
        ];
        content.push_str(&fields.join(","));
        content.push('\n');
    }

    Ok(CsvExport {
        filename: export_filename(now),
        content,
        row_count: items.len(),
    })
}

/// `barcode_scan_2026-10-16T09-30-00-000Z.csv`
pub fn export_filename(now: DateTime<Utc>) -> String {
    let stamp = iso_timestamp(now).replace([':', '.'], "-");
    format!("barcode_scan_{}.csv", stamp)
}

/// ISO-8601 in UTC with millisecond precision
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
