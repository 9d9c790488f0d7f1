//! UI Components
//!
//! Reusable Leptos components.

mod confirm_button;
mod diagnostics_panel;
mod manual_entry_form;
mod notice_toast;
mod scan_list;
mod scan_row;
mod scanner_panel;
mod session_summary;
mod toolbar;

pub use confirm_button::ConfirmButton;
pub use diagnostics_panel::DiagnosticsPanel;
pub use manual_entry_form::ManualEntryForm;
pub use notice_toast::NoticeToast;
pub use scan_list::ScanList;
pub use scan_row::ScanRow;
pub use scanner_panel::ScannerPanel;
pub use session_summary::SessionSummary;
pub use toolbar::Toolbar;
