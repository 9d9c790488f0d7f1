//! Rolling Logger
//!
//! A `tracing` layer that formats each event into one line, hands it to a
//! sink (the browser console in the app) and keeps the most recent lines
//! in a bounded circular buffer.

use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex};

use chrono::{SecondsFormat, Utc};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// One formatted log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: Level,
    pub text: String,
}

/// Shared circular buffer of recent lines
#[derive(Debug, Clone)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<LogLine>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity.min(1024)))),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&self, line: LogLine) {
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() == self.capacity {
                lines.pop_front();
            }
            lines.push_back(line);
        }
    }

    /// Oldest first
    pub fn recent(&self) -> Vec<LogLine> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|lines| lines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Receives every formatted line
pub type LogSink = Box<dyn Fn(&Level, &str) + Send + Sync>;

pub struct RollingLayer {
    buffer: LogBuffer,
    sink: Option<LogSink>,
    max_level: Level,
}

impl RollingLayer {
    pub fn new(buffer: LogBuffer, max_level: Level) -> Self {
        Self {
            buffer,
            sink: None,
            max_level,
        }
    }

    pub fn with_sink(mut self, sink: LogSink) -> Self {
        self.sink = Some(sink);
        self
    }
}

impl<S: Subscriber> Layer<S> for RollingLayer {
    fn enabled(&self, metadata: &tracing::Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        *metadata.level() <= self.max_level
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let meta = event.metadata();
        let text = format!(
            "{} {:>5} {}: {}{}",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            meta.level(),
            meta.target(),
            visitor.message,
            visitor.fields,
        );

        if let Some(sink) = &self.sink {
            sink(meta.level(), &text);
        }
        self.buffer.push(LogLine {
            level: *meta.level(),
            text,
        });
    }
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// Install the rolling layer as the global subscriber.
/// Returns the buffer so callers can read recent lines back.
pub fn init(
    max_level: Level,
    capacity: usize,
    sink: LogSink,
) -> Result<LogBuffer, tracing::subscriber::SetGlobalDefaultError> {
    let buffer = LogBuffer::new(capacity);
    let layer = RollingLayer::new(buffer.clone(), max_level).with_sink(sink);
    tracing::subscriber::set_global_default(tracing_subscriber::registry().with(layer))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, info, warn};

    fn with_layer(layer: RollingLayer, f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, f);
    }

    #[test]
    fn test_buffer_drops_oldest() {
        let buffer = LogBuffer::new(2);
        for i in 0..3 {
            buffer.push(LogLine {
                level: Level::INFO,
                text: format!("line {}", i),
            });
        }
        let texts: Vec<_> = buffer.recent().into_iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["line 1", "line 2"]);
    }

    #[test]
    fn test_event_is_formatted_with_fields() {
        let buffer = LogBuffer::new(10);
        with_layer(RollingLayer::new(buffer.clone(), Level::DEBUG), || {
            info!(items = 3, "restored scan session");
        });

        let lines = buffer.recent();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].level, Level::INFO);
        assert!(lines[0].text.contains("restored scan session items=3"));
        assert!(lines[0].text.contains("INFO"));
    }

    #[test]
    fn test_level_filter() {
        let buffer = LogBuffer::new(10);
        with_layer(RollingLayer::new(buffer.clone(), Level::INFO), || {
            debug!("hidden");
            warn!("shown");
        });
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.recent()[0].level, Level::WARN);
    }

    #[test]
    fn test_sink_receives_lines() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        let layer = RollingLayer::new(LogBuffer::new(4), Level::DEBUG).with_sink(Box::new(
            move |level, text| {
                sink_seen.lock().unwrap().push((*level, text.to_string()));
            },
        ));
        with_layer(layer, || warn!(key = "k", "write failed"));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, Level::WARN);
        assert!(seen[0].1.ends_with("write failed key=k"));
    }
}
