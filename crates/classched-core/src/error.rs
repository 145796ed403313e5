use std::io;

use thiserror::Error;

/// Errors surfaced while turning raw inputs into a schedule.
///
/// Everything here is detected eagerly, before date generation starts; none
/// of these conditions is transient, so there is nothing to retry.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error(
        "invalid date format '{input}'; acceptable forms are yyyy/mm/dd, mm/dd/yyyy and mm/dd \
         (any non-digit separator)"
    )]
    InvalidFormat { input: String },

    #[error("'{input}' is not a real calendar date")]
    InvalidDate { input: String },

    #[error("unknown weekday {tokens}; valid days are mon, tue, wed, thu, fri, sat, sun")]
    UnknownWeekday { tokens: String },

    #[error("session list file '{path}' could not be read: {source}")]
    SourceNotFound {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("session list '{path}' contains no usable titles")]
    EmptySessionList { path: String },

    #[error("class-day set is empty; at least one weekday is required to schedule anything")]
    EmptyWeekdaySet,
}
