//! End-to-end pipeline: validated inputs in, rendered schedule out.

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use tracing::info;

use crate::assemble::{self, SlotPolicy};
use crate::config::{DEFAULT_TIMEZONE, FileConfig, SlotPreferences};
use crate::error::ScheduleError;
use crate::format::{self, IcalOptions};
use crate::generate::{ExclusionSet, ScheduleDates};
use crate::weekday::WeekdaySet;

/// Which renderings the caller wants.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputSelection {
    pub text: bool,
    pub ical: bool,
}

/// Everything needed for one scheduling run, already validated.
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    pub start: NaiveDate,
    pub days: WeekdaySet,
    pub excluded: ExclusionSet,
    pub sessions: Vec<String>,
    pub outputs: OutputSelection,
    /// Overrides the configured iCalendar summary prefix when set.
    pub summary_prefix: Option<String>,
}

/// Rendered outputs for a run, in the order they should be emitted.
#[derive(Debug, Clone, Default)]
pub struct ScheduleOutput {
    pub text: Option<String>,
    pub ical: Option<String>,
}

/// Generate, assemble and render a schedule.
pub fn run(request: ScheduleRequest, config: &FileConfig) -> Result<ScheduleOutput, ScheduleError> {
    let policy = slot_policy(&config.slots);
    let slot = policy.resolve(request.days);

    let dates = ScheduleDates::new(request.start, request.days, request.excluded)?;
    let entries = assemble::assemble(request.sessions, dates, Some(slot));
    info!(entries = entries.len(), "schedule assembled");

    let mut output = ScheduleOutput::default();
    if request.outputs.text {
        output.text = Some(format::format_delimited(&entries));
    }
    if request.outputs.ical {
        let options = IcalOptions {
            timezone: configured_timezone(config),
            location: config.ical.location.clone(),
            summary_prefix: request
                .summary_prefix
                .clone()
                .or_else(|| config.ical.summary_prefix.clone()),
            duration_minutes: i64::from(config.ical.duration_minutes),
            fallback_start: policy.evening_start,
        };
        output.ical = Some(format::format_ical(&entries, &options));
    }
    Ok(output)
}

fn slot_policy(prefs: &SlotPreferences) -> SlotPolicy {
    let defaults = SlotPreferences::default();
    // Config sanitization already validated these; the fallback only covers
    // a hand-built FileConfig that skipped load_config.
    let parse = |value: &str, fallback: &str| {
        NaiveTime::parse_from_str(value, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(fallback, "%H:%M"))
            .unwrap_or_default()
    };
    SlotPolicy {
        evening_start: parse(&prefs.evening_start, &defaults.evening_start),
        morning_start: parse(&prefs.morning_start, &defaults.morning_start),
        evening_weekday_threshold: prefs.evening_weekday_threshold,
    }
}

fn configured_timezone(config: &FileConfig) -> Tz {
    config
        .ical
        .timezone
        .parse()
        .unwrap_or_else(|_| DEFAULT_TIMEZONE.parse().unwrap_or(chrono_tz::UTC))
}
