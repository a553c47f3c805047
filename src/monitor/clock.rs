use std::time::Duration;

use time::{OffsetDateTime, format_description::FormatItem, macros::format_description};

const DISPLAY_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second]");

/// Wall-clock anchor for alert timestamps.
///
/// Timestamps are the anchor plus elapsed virtual time, so a seeded run with a
/// fixed anchor produces identical logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClock {
    anchor: OffsetDateTime,
}

impl WallClock {
    /// Anchor at the current local time, falling back to UTC when the local
    /// offset cannot be determined.
    pub fn local_now() -> Self {
        Self::anchored_at(OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()))
    }

    pub fn anchored_at(anchor: OffsetDateTime) -> Self {
        Self { anchor }
    }

    pub fn anchor(&self) -> OffsetDateTime {
        self.anchor
    }

    pub fn at(&self, elapsed: Duration) -> OffsetDateTime {
        self.anchor + elapsed
    }

    /// 24-hour `HH:MM:SS` in the anchor's offset.
    pub fn display_time(&self, elapsed: Duration) -> String {
        self.at(elapsed)
            .format(DISPLAY_FORMAT)
            .unwrap_or_else(|_| String::from("--:--:--"))
    }

    /// Milliseconds since the Unix epoch, saturating at zero before 1970.
    pub fn unix_millis(&self, elapsed: Duration) -> u64 {
        let millis = self.at(elapsed).unix_timestamp_nanos() / 1_000_000;
        u64::try_from(millis).unwrap_or(0)
    }
}
