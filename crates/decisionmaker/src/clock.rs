//! Wall-clock access for timestamping decisions.

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset, Local};
use tracing::warn;

use crate::config::DEFAULT_TIMESTAMP_FORMAT;

/// Provides the current local time.
pub trait Clock {
    /// The current instant, carrying the local UTC offset.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Reads the system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: DateTime<FixedOffset>,
}

impl FixedClock {
    /// Create a clock frozen at `instant`.
    #[must_use]
    pub fn new(instant: DateTime<FixedOffset>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.instant
    }
}

/// Render `instant` with a strftime-style `format`.
///
/// Falls back to [`DEFAULT_TIMESTAMP_FORMAT`] when `format` cannot be rendered,
/// so recording a decision never fails on a bad format string.
#[must_use]
pub fn render_timestamp(instant: &DateTime<FixedOffset>, format: &str) -> String {
    let mut rendered = String::new();
    if write!(rendered, "{}", instant.format(format)).is_ok() {
        return rendered;
    }

    warn!(format, "Timestamp format could not be rendered, using default");
    rendered.clear();
    let _ = write!(rendered, "{}", instant.format(DEFAULT_TIMESTAMP_FORMAT));
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn afternoon() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 16, 15, 4, 5)
            .unwrap()
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::new(afternoon());
        assert_eq!(clock.now(), afternoon());
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let first = SystemClock.now();
        let second = SystemClock.now();
        assert!(second >= first);
    }

    #[test]
    fn test_render_default_format() {
        assert_eq!(
            render_timestamp(&afternoon(), DEFAULT_TIMESTAMP_FORMAT),
            "10/16/2026, 3:04:05 PM"
        );
    }

    #[test]
    fn test_render_custom_format() {
        assert_eq!(
            render_timestamp(&afternoon(), "%Y-%m-%d %H:%M %:z"),
            "2026-10-16 15:04 +02:00"
        );
    }

    #[test]
    fn test_render_bad_format_falls_back() {
        crate::logging::init_test_logging();
        assert_eq!(
            render_timestamp(&afternoon(), "%Y %"),
            "10/16/2026, 3:04:05 PM"
        );
    }
}
