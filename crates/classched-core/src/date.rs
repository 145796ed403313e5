//! Flexible and strict date-string parsing.
//!
//! The flexible style accepts `yyyy/mm/dd`, `mm/dd/yyyy` and `mm/dd`, where
//! the separator is any single non-digit character (independently matched at
//! each position). A 2-part date borrows the current calendar year, resolved
//! once at parse time. The strict style accepts `yyyy-mm-dd` only.

use std::sync::OnceLock;

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Which date shapes the parser accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateParseStyle {
    /// `yyyy/mm/dd`, `mm/dd/yyyy` or `mm/dd` with any non-digit separator.
    #[default]
    Flexible,
    /// ISO `yyyy-mm-dd` only.
    Strict,
}

/// Parse a date string into a validated calendar date.
pub fn parse_date(input: &str, style: DateParseStyle) -> Result<NaiveDate, ScheduleError> {
    let (year, month, day) = parse_date_parts(input, style)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| ScheduleError::InvalidDate {
        input: input.to_string(),
    })
}

/// Parse a date string into a raw (year, month, day) triple.
///
/// Shape matching only; whether the triple is a real calendar date (month 13,
/// Feb 30) is decided by [`parse_date`] via `NaiveDate` construction.
pub fn parse_date_parts(
    input: &str,
    style: DateParseStyle,
) -> Result<(i32, u32, u32), ScheduleError> {
    match style {
        DateParseStyle::Flexible => flexible_parts(input, Local::now().year()),
        DateParseStyle::Strict => strict_parts(input),
    }
}

fn flexible_parts(input: &str, current_year: i32) -> Result<(i32, u32, u32), ScheduleError> {
    let invalid = || ScheduleError::InvalidFormat {
        input: input.to_string(),
    };
    if input.len() < 3 {
        return Err(invalid());
    }

    // Year-first shape binds digit groups as year/month/day.
    static YMD: OnceLock<Regex> = OnceLock::new();
    let ymd = YMD.get_or_init(|| Regex::new(r"^(\d{4})\D(\d{1,2})\D(\d{1,2})").unwrap());
    if let Some(caps) = ymd.captures(input) {
        return Ok((group_i32(&caps, 1), group_u32(&caps, 2), group_u32(&caps, 3)));
    }

    // Otherwise synthesize a trailing current year so that both `mm/dd/yyyy`
    // and `mm/dd` fall through the same month/day/year pattern. For a 3-part
    // input the pattern stops at its own year, ignoring the appended one.
    static MDY: OnceLock<Regex> = OnceLock::new();
    let mdy = MDY.get_or_init(|| Regex::new(r"^(\d{1,2})\D(\d{1,2})\D(\d{4})").unwrap());
    let padded = format!("{input}/{current_year}");
    if let Some(caps) = mdy.captures(&padded) {
        return Ok((group_i32(&caps, 3), group_u32(&caps, 1), group_u32(&caps, 2)));
    }

    Err(invalid())
}

fn strict_parts(input: &str) -> Result<(i32, u32, u32), ScheduleError> {
    static ISO: OnceLock<Regex> = OnceLock::new();
    let iso = ISO.get_or_init(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap());
    let caps = iso.captures(input).ok_or_else(|| ScheduleError::InvalidFormat {
        input: input.to_string(),
    })?;
    Ok((group_i32(&caps, 1), group_u32(&caps, 2), group_u32(&caps, 3)))
}

// Captured groups are all-digit and bounded at 4 characters, so these cannot
// fail to parse.
fn group_i32(caps: &regex::Captures<'_>, index: usize) -> i32 {
    caps[index].parse().unwrap_or_default()
}

fn group_u32(caps: &regex::Captures<'_>, index: usize) -> u32 {
    caps[index].parse().unwrap_or_default()
}
