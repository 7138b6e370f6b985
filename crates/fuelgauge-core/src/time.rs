// ABOUTME: Local calendar day boundaries used to anchor simulations to an athlete's timezone
// ABOUTME: Defines LocalDay, the LocalDayResolver collaborator trait, and a fixed-offset resolver
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Local calendar day boundaries.
//!
//! Timezone handling is owned by a collaborator. The engine only needs to know
//! where a local calendar day starts in UTC and how to read a local wall-clock
//! time back out of an instant; `LocalDayResolver` captures exactly that.

use chrono::{
    DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Timelike, Utc,
};

/// Length of a simulated local day
pub const DAY_MINUTES: i64 = 24 * 60;

/// One local calendar day expressed in UTC instants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalDay {
    /// Local calendar date
    pub date: NaiveDate,
    /// Local midnight as a UTC instant
    pub start_utc: DateTime<Utc>,
    /// Next local midnight as a UTC instant
    pub end_utc: DateTime<Utc>,
    /// Offset from UTC in effect for this day
    pub utc_offset: FixedOffset,
}

impl LocalDay {
    /// Build a day from its date and fixed offset
    #[must_use]
    pub fn new(date: NaiveDate, utc_offset: FixedOffset) -> Self {
        let local_midnight = date.and_time(NaiveTime::MIN);
        let start_utc = Utc.from_utc_datetime(
            &(local_midnight - Duration::seconds(i64::from(utc_offset.local_minus_utc()))),
        );
        Self {
            date,
            start_utc,
            end_utc: start_utc + Duration::minutes(DAY_MINUTES),
            utc_offset,
        }
    }

    /// UTC day, mostly useful in tests
    #[must_use]
    pub fn utc(date: NaiveDate) -> Self {
        Self::new(date, Utc.fix())
    }

    /// Convert a local wall-clock time on this day to a UTC instant
    #[must_use]
    pub fn at_local_time(&self, time: NaiveTime) -> DateTime<Utc> {
        self.start_utc + Duration::seconds(i64::from(time.num_seconds_from_midnight()))
    }

    /// Anchor a bare `"HH:mm"` (or `"HH:mm:ss"`) string to this day
    #[must_use]
    pub fn parse_clock(&self, clock: &str) -> Option<DateTime<Utc>> {
        let trimmed = clock.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .ok()
            .map(|time| self.at_local_time(time))
    }

    /// Local wall-clock time of an instant
    #[must_use]
    pub fn local_time(&self, instant: DateTime<Utc>) -> NaiveTime {
        instant.with_timezone(&self.utc_offset).time()
    }

    /// Local hour (0-23) of an instant
    #[must_use]
    pub fn local_hour(&self, instant: DateTime<Utc>) -> u32 {
        self.local_time(instant).hour()
    }

    /// Minutes elapsed since local midnight (may be negative or exceed a day)
    #[must_use]
    pub fn minutes_since_start(&self, instant: DateTime<Utc>) -> f64 {
        (instant - self.start_utc).num_seconds() as f64 / 60.0
    }

    /// Whether the instant falls within `[start, end)`
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start_utc && instant < self.end_utc
    }

    /// Whether the whole day lies after `now`
    #[must_use]
    pub fn is_future(&self, now: DateTime<Utc>) -> bool {
        self.start_utc > now
    }
}

/// Collaborator that maps calendar dates to local-day boundaries
pub trait LocalDayResolver: Send + Sync {
    /// Resolve the local day for a calendar date
    fn resolve(&self, date: NaiveDate) -> LocalDay;
}

/// Resolver for athletes whose offset does not change across days
#[derive(Debug, Clone, Copy)]
pub struct FixedOffsetResolver {
    offset: FixedOffset,
}

impl FixedOffsetResolver {
    /// Resolver for an offset east of UTC in minutes; out-of-range offsets fall back to UTC
    #[must_use]
    pub fn from_minutes(offset_minutes: i32) -> Self {
        let offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        Self { offset }
    }

    /// Resolver pinned to UTC
    #[must_use]
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }
}

impl Default for FixedOffsetResolver {
    fn default() -> Self {
        Self::utc()
    }
}

impl LocalDayResolver for FixedOffsetResolver {
    fn resolve(&self, date: NaiveDate) -> LocalDay {
        LocalDay::new(date, self.offset)
    }
}
