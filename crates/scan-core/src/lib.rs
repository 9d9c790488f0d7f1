//! Scan Core
//!
//! Everything the barcode scanner decides, with no browser I/O:
//! debounce, the session tally, its storage mirror, CSV export and the
//! scanner start/stop lifecycle. The front end plugs in the camera,
//! storage and feedback through the traits re-exported here.

pub mod config;
pub mod debounce;
pub mod error;
pub mod export;
pub mod item;
pub mod scanner;
pub mod session;
pub mod storage;
pub mod store;
pub mod symbology;

pub use config::{AppConfig, ScannerConfig, DEFAULT_STORAGE_KEY};
pub use debounce::Debouncer;
pub use error::{ExportError, ScannerError, StorageError};
pub use export::{CsvExport, CSV_HEADER, CSV_MIME};
pub use item::{ItemId, ScanEvent, ScannedItem};
pub use scanner::{
    CameraBackend, DecodeSink, NoFeedback, RawDecode, ScanFeedback, ScannerController,
    ScannerState,
};
pub use session::{ItemRow, QuantityChange, ScanOutcome, Session, SessionTotals};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use store::SessionStore;
pub use symbology::Symbology;
