//! Pairing session titles with generated dates.

use chrono::{NaiveDate, NaiveTime};
use tracing::warn;

use crate::weekday::WeekdaySet;

/// One session placed on its calendar date.
///
/// Built once by [`assemble`] and immutable afterwards. The time-of-day is
/// only present when a slot policy was applied; the delimited formatter
/// ignores it, the iCalendar formatter needs it for start/end instants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub title: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
}

/// Uniform time-of-day selection for a scheduling run.
///
/// A run held on fewer distinct weekdays than the threshold is assumed to be
/// an after-work evening class; a denser weekly cadence gets the morning
/// slot. Whichever applies is attached to every entry uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPolicy {
    pub evening_start: NaiveTime,
    pub morning_start: NaiveTime,
    pub evening_weekday_threshold: u32,
}

impl SlotPolicy {
    pub fn resolve(&self, days: WeekdaySet) -> NaiveTime {
        if days.len() < self.evening_weekday_threshold {
            self.evening_start
        } else {
            self.morning_start
        }
    }
}

/// Pair titles with dates positionally.
///
/// Consumes exactly `sessions.len()` elements from the date stream; the
/// stream is infinite, so this bound is what terminates the schedule. An
/// empty title list produces an empty schedule rather than an error, with a
/// warning for the caller.
pub fn assemble(
    sessions: Vec<String>,
    dates: impl Iterator<Item = NaiveDate>,
    time: Option<NaiveTime>,
) -> Vec<ScheduleEntry> {
    if sessions.is_empty() {
        warn!("session list is empty; producing an empty schedule");
        return Vec::new();
    }
    sessions
        .into_iter()
        .zip(dates)
        .map(|(title, date)| ScheduleEntry { title, date, time })
        .collect()
}
