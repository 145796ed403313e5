//! The eligible-date generator at the heart of the scheduler.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::ScheduleError;
use crate::weekday::WeekdaySet;

/// Dates explicitly forbidden from scheduling, regardless of weekday.
pub type ExclusionSet = HashSet<NaiveDate>;

/// An infinite, lazily-evaluated, strictly-increasing stream of class dates.
///
/// The very first date yielded is the caller's anchor, exempt from both the
/// weekday and the exclusion check; callers wanting "first eligible day on or
/// after X" must pre-advance the anchor themselves. Every later date has a
/// weekday in the class-day set and is absent from the exclusion set. The
/// iterator is single-pass and stateful; rebuild it to restart.
#[derive(Debug, Clone)]
pub struct ScheduleDates {
    cursor: NaiveDate,
    days: WeekdaySet,
    excluded: ExclusionSet,
    anchor_pending: bool,
}

impl ScheduleDates {
    /// Build a date stream, rejecting the one input combination that would
    /// never terminate: an empty class-day set.
    pub fn new(
        start: NaiveDate,
        days: WeekdaySet,
        excluded: ExclusionSet,
    ) -> Result<Self, ScheduleError> {
        if days.is_empty() {
            return Err(ScheduleError::EmptyWeekdaySet);
        }
        debug!(start = %start, days = %days, excluded = excluded.len(), "date stream opened");
        Ok(Self {
            cursor: start,
            days,
            excluded,
            anchor_pending: true,
        })
    }
}

impl Iterator for ScheduleDates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.anchor_pending {
            self.anchor_pending = false;
            return Some(self.cursor);
        }

        loop {
            // succ_opt only fails at NaiveDate::MAX, ~262k years out.
            self.cursor = self.cursor.succ_opt()?;
            // Weekday membership and exclusion gate independently; an
            // excluded day is skipped even when its weekday qualifies.
            if !self.days.contains(self.cursor.weekday()) {
                continue;
            }
            if self.excluded.contains(&self.cursor) {
                debug!(date = %self.cursor, "skipping excluded date");
                continue;
            }
            return Some(self.cursor);
        }
    }
}
