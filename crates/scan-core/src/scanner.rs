//! Scanner Controller
//!
//! Drives a camera/decoder backend and turns its raw decodes into
//! debounced scan events for a single registered callback.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::ScannerConfig;
use crate::debounce::Debouncer;
use crate::error::ScannerError;
use crate::item::ScanEvent;
use crate::symbology::Symbology;

/// A decode exactly as the library reported it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDecode {
    pub text: String,
    pub format_name: String,
    pub at: DateTime<Utc>,
}

/// Where a backend delivers raw decodes while running
pub type DecodeSink = Rc<dyn Fn(RawDecode)>;

/// Camera acquisition plus continuous decoding
#[async_trait(?Send)]
pub trait CameraBackend {
    /// Acquire the camera and start decoding into `sink`
    async fn start(&self, config: &ScannerConfig, sink: DecodeSink) -> Result<(), ScannerError>;

    /// Stop decoding and release the camera
    async fn stop(&self) -> Result<(), ScannerError>;
}

/// Acknowledgment for a forwarded scan (beep, flash, vibration)
pub trait ScanFeedback {
    fn acknowledge(&self, event: &ScanEvent);
}

/// Silent feedback
pub struct NoFeedback;

impl ScanFeedback for NoFeedback {
    fn acknowledge(&self, _event: &ScanEvent) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerState {
    Idle,
    Starting,
    Scanning,
    Stopping,
}

type ScanCallback = Box<dyn FnMut(ScanEvent)>;

pub struct ScannerController<B> {
    backend: B,
    config: ScannerConfig,
    state: Cell<ScannerState>,
    debouncer: RefCell<Debouncer>,
    feedback: Box<dyn ScanFeedback>,
    on_scan: RefCell<Option<ScanCallback>>,
}

impl<B: CameraBackend + 'static> ScannerController<B> {
    pub fn new(backend: B, config: ScannerConfig, feedback: Box<dyn ScanFeedback>) -> Rc<Self> {
        Rc::new(Self {
            backend,
            debouncer: RefCell::new(Debouncer::new(config.debounce_ms)),
            config,
            state: Cell::new(ScannerState::Idle),
            feedback,
            on_scan: RefCell::new(None),
        })
    }

    pub fn state(&self) -> ScannerState {
        self.state.get()
    }

    pub fn is_scanning(&self) -> bool {
        self.state.get() == ScannerState::Scanning
    }

    /// Register the scan callback, replacing any previous one
    pub fn on_scan(&self, callback: impl FnMut(ScanEvent) + 'static) {
        *self.on_scan.borrow_mut() = Some(Box::new(callback));
    }

    /// Start the camera. A no-op while already starting or scanning.
    pub async fn start(self: &Rc<Self>) -> Result<(), ScannerError> {
        if self.state.get() != ScannerState::Idle {
            debug!(state = ?self.state.get(), "start ignored");
            return Ok(());
        }
        self.state.set(ScannerState::Starting);

        let weak: Weak<Self> = Rc::downgrade(self);
        let sink: DecodeSink = Rc::new(move |raw| {
            if let Some(controller) = weak.upgrade() {
                controller.handle_decode(raw);
            }
        });

        match self.backend.start(&self.config, sink).await {
            Ok(()) => {
                self.state.set(ScannerState::Scanning);
                info!(fps = self.config.fps, "scanner started");
                Ok(())
            }
            Err(e) => {
                self.state.set(ScannerState::Idle);
                warn!(error = %e, "scanner failed to start");
                Err(e)
            }
        }
    }

    /// Stop the camera. A no-op unless scanning.
    ///
    /// The controller returns to idle even when the backend reports an
    /// error, so the user can always try starting again.
    pub async fn stop(&self) -> Result<(), ScannerError> {
        if self.state.get() != ScannerState::Scanning {
            return Ok(());
        }
        self.state.set(ScannerState::Stopping);
        let result = self.backend.stop().await;
        self.state.set(ScannerState::Idle);
        match &result {
            Ok(()) => info!("scanner stopped"),
            Err(e) => warn!(error = %e, "scanner stop reported an error"),
        }
        result
    }

    /// Debounce a raw decode and forward it when accepted
    pub fn handle_decode(&self, raw: RawDecode) -> Option<ScanEvent> {
        if !matches!(self.state.get(), ScannerState::Starting | ScannerState::Scanning) {
            return None;
        }
        let code = raw.text.trim();
        if code.is_empty() {
            return None;
        }
        if !self.debouncer.borrow_mut().accept(code, raw.at) {
            return None;
        }

        let event = ScanEvent::new(code, Symbology::from_format_name(&raw.format_name), raw.at);
        debug!(code = %event.code, symbology = %event.symbology, "decode forwarded");
        self.feedback.acknowledge(&event);

        match self.on_scan.try_borrow_mut() {
            Ok(mut slot) => {
                if let Some(callback) = slot.as_mut() {
                    callback(event.clone());
                }
            }
            Err(_) => warn!(code = %event.code, "scan callback busy, event dropped"),
        }
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    #[derive(Default)]
    struct FakeBackend {
        sink: RefCell<Option<DecodeSink>>,
        start_calls: Cell<u32>,
        stop_calls: Cell<u32>,
        fail_start: Cell<bool>,
    }

    #[async_trait(?Send)]
    impl CameraBackend for Rc<FakeBackend> {
        async fn start(&self, _config: &ScannerConfig, sink: DecodeSink) -> Result<(), ScannerError> {
            self.start_calls.set(self.start_calls.get() + 1);
            tokio::task::yield_now().await;
            if self.fail_start.get() {
                return Err(ScannerError::PermissionDenied("NotAllowedError".to_string()));
            }
            *self.sink.borrow_mut() = Some(sink);
            Ok(())
        }

        async fn stop(&self) -> Result<(), ScannerError> {
            self.stop_calls.set(self.stop_calls.get() + 1);
            self.sink.borrow_mut().take();
            Ok(())
        }
    }

    impl FakeBackend {
        fn emit(&self, text: &str, ms: i64) {
            let at = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap() + TimeDelta::milliseconds(ms);
            let sink = self.sink.borrow().clone();
            if let Some(sink) = sink {
                sink(RawDecode {
                    text: text.to_string(),
                    format_name: "EAN_13".to_string(),
                    at,
                });
            }
        }
    }

    struct CountingFeedback(Rc<Cell<u32>>);

    impl ScanFeedback for CountingFeedback {
        fn acknowledge(&self, _event: &ScanEvent) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn setup() -> (Rc<FakeBackend>, Rc<ScannerController<Rc<FakeBackend>>>, Rc<RefCell<Vec<ScanEvent>>>) {
        let backend = Rc::new(FakeBackend::default());
        let controller =
            ScannerController::new(Rc::clone(&backend), ScannerConfig::default(), Box::new(NoFeedback));
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        controller.on_scan(move |event| sink.borrow_mut().push(event));
        (backend, controller, received)
    }

    #[tokio::test]
    async fn test_start_and_forward() {
        let (backend, controller, received) = setup();
        controller.start().await.unwrap();
        assert!(controller.is_scanning());

        backend.emit("4006381333931", 0);
        let events = received.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].code, "4006381333931");
        assert_eq!(events[0].symbology, Symbology::Ean13);
    }

    #[tokio::test]
    async fn test_debounce_window() {
        let (backend, controller, received) = setup();
        controller.start().await.unwrap();

        backend.emit("111", 0);
        backend.emit("111", 1200);
        assert_eq!(received.borrow().len(), 1);

        backend.emit("111", 2000);
        assert_eq!(received.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_second_start_is_noop() {
        let (backend, controller, _) = setup();
        let (first, second) = tokio::join!(controller.start(), controller.start());
        assert!(first.is_ok() && second.is_ok());
        assert_eq!(backend.start_calls.get(), 1);

        controller.start().await.unwrap();
        assert_eq!(backend.start_calls.get(), 1);
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let (backend, controller, _) = setup();
        controller.stop().await.unwrap();
        assert_eq!(backend.stop_calls.get(), 0);

        controller.start().await.unwrap();
        controller.stop().await.unwrap();
        controller.stop().await.unwrap();
        assert_eq!(backend.stop_calls.get(), 1);
        assert_eq!(controller.state(), ScannerState::Idle);
    }

    #[tokio::test]
    async fn test_failed_start_reports_and_allows_retry() {
        let (backend, controller, _) = setup();
        backend.fail_start.set(true);

        let err = controller.start().await.unwrap_err();
        assert!(matches!(err, ScannerError::PermissionDenied(_)));
        assert_eq!(controller.state(), ScannerState::Idle);

        backend.fail_start.set(false);
        controller.start().await.unwrap();
        assert!(controller.is_scanning());
        assert_eq!(backend.start_calls.get(), 2);
    }

    #[tokio::test]
    async fn test_decodes_after_stop_are_dropped() {
        let (backend, controller, received) = setup();
        controller.start().await.unwrap();
        let sink = backend.sink.borrow().clone().unwrap();
        controller.stop().await.unwrap();

        sink(RawDecode {
            text: "111".to_string(),
            format_name: "CODE_128".to_string(),
            at: Utc::now(),
        });
        assert!(received.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_feedback_only_for_forwarded() {
        let backend = Rc::new(FakeBackend::default());
        let beeps = Rc::new(Cell::new(0));
        let controller = ScannerController::new(
            Rc::clone(&backend),
            ScannerConfig::default(),
            Box::new(CountingFeedback(Rc::clone(&beeps))),
        );
        controller.start().await.unwrap();

        backend.emit("111", 0);
        backend.emit("111", 100);
        backend.emit("  ", 200);
        backend.emit("222", 300);
        assert_eq!(beeps.get(), 2);
    }
}
