//! Debounce Filter
//!
//! Suppresses a decode when it repeats the last forwarded code within a
//! fixed window. Only forwarded decodes move the reference point, so a code
//! held in front of the camera is forwarded once per window, not once ever.

use chrono::{DateTime, TimeDelta, Utc};

#[derive(Debug, Clone)]
pub struct Debouncer {
    window: TimeDelta,
    last_forwarded: Option<(String, DateTime<Utc>)>,
}

impl Debouncer {
    pub fn new(window_ms: u64) -> Self {
        let window_ms = i64::try_from(window_ms).unwrap_or(i64::MAX);
        Self {
            window: TimeDelta::try_milliseconds(window_ms).unwrap_or(TimeDelta::MAX),
            last_forwarded: None,
        }
    }

    /// Decide whether a decode of `code` at `at` is forwarded.
    /// A forwarded decode becomes the new reference.
    pub fn accept(&mut self, code: &str, at: DateTime<Utc>) -> bool {
        if let Some((last_code, last_at)) = &self.last_forwarded {
            if last_code == code && at - *last_at < self.window {
                return false;
            }
        }
        self.last_forwarded = Some((code.to_string(), at));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_ms(ms: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap() + TimeDelta::milliseconds(ms)
    }

    #[test]
    fn test_repeat_within_window_is_suppressed() {
        let mut debouncer = Debouncer::new(2000);
        assert!(debouncer.accept("111", at_ms(0)));
        assert!(!debouncer.accept("111", at_ms(500)));
        assert!(!debouncer.accept("111", at_ms(1999)));
    }

    #[test]
    fn test_repeat_after_window_is_forwarded() {
        let mut debouncer = Debouncer::new(2000);
        assert!(debouncer.accept("111", at_ms(0)));
        assert!(debouncer.accept("111", at_ms(2000)));
        assert!(!debouncer.accept("111", at_ms(3000)));
        assert!(debouncer.accept("111", at_ms(4100)));
    }

    #[test]
    fn test_suppressed_decode_does_not_extend_window() {
        let mut debouncer = Debouncer::new(2000);
        assert!(debouncer.accept("111", at_ms(0)));
        assert!(!debouncer.accept("111", at_ms(1500)));
        // Measured from the forwarded decode at 0, not the suppressed one
        assert!(debouncer.accept("111", at_ms(2100)));
    }

    #[test]
    fn test_different_code_is_always_forwarded() {
        let mut debouncer = Debouncer::new(2000);
        assert!(debouncer.accept("111", at_ms(0)));
        assert!(debouncer.accept("222", at_ms(100)));
        // 111 is no longer the immediately preceding forwarded code
        assert!(debouncer.accept("111", at_ms(200)));
    }
}
