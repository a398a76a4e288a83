//! Clock abstraction and timestamp formatting
//!
//! Everything that compares against "now" (the past-show rule, note
//! posted dates) goes through an injected [`Clock`] so tests can pin time.

use chrono::{DateTime, SecondsFormat, Utc};

/// Source of the current time
#[derive(Debug, Clone)]
pub enum Clock {
    /// Real wall-clock time
    System,
    /// Fixed instant, for deterministic tests
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Current UTC timestamp
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }
}

/// Format a timestamp for storage.
///
/// Fixed-width RFC 3339 with microseconds, always UTC, so stored values
/// sort chronologically under SQLite's default BINARY collation.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn system_clock_returns_recent_timestamp() {
        let now = Clock::System.now();
        // After 2000-01-01, before 2100-01-01
        assert!(now.timestamp() > 946_684_800);
        assert!(now.timestamp() < 4_102_444_800);
    }

    #[test]
    fn fixed_clock_returns_pinned_instant() {
        let pinned = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let clock = Clock::Fixed(pinned);
        assert_eq!(clock.now(), pinned);
        assert_eq!(clock.now(), pinned);
    }

    #[test]
    fn formatted_timestamps_sort_chronologically() {
        let earlier = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let later = earlier + chrono::Duration::milliseconds(1);
        assert!(format_timestamp(earlier) < format_timestamp(later));
    }

    #[test]
    fn formatted_timestamp_round_trips() {
        let ts = Utc.with_ymd_and_hms(2023, 11, 30, 20, 30, 0).unwrap();
        let text = format_timestamp(ts);
        let parsed: DateTime<Utc> = text.parse().unwrap();
        assert_eq!(parsed, ts);
    }
}
