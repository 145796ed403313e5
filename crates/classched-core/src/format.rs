//! Schedule rendering: tab-delimited text and iCalendar.

use std::fmt::Write as _;

use chrono::{Datelike, Duration, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::assemble::ScheduleEntry;

/// Settings for the iCalendar rendering.
#[derive(Debug, Clone)]
pub struct IcalOptions {
    /// The single target zone all events are expressed in.
    ///
    /// The embedded VTIMEZONE carries the zone's real offsets but fixed US
    /// transition rules (second Sunday of March / first Sunday of November),
    /// so DST zones outside the US get approximate transition dates.
    pub timezone: Tz,
    /// Fixed LOCATION string stamped on every event.
    pub location: String,
    /// Optional prefix prepended to every SUMMARY, e.g. a cohort name.
    pub summary_prefix: Option<String>,
    /// Event length; DTEND = DTSTART + this.
    pub duration_minutes: i64,
    /// Start time used for entries that carry no time-of-day.
    pub fallback_start: NaiveTime,
}

/// Render the schedule as a single tab-delimited line.
///
/// Each entry is `yyyy/mm/dd<TAB>Title`; entries are joined with a double
/// tab, which makes pasting into a spreadsheet grid painless. No trailing
/// newline.
pub fn format_delimited(entries: &[ScheduleEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("{}\t{}", entry.date.format("%Y/%m/%d"), entry.title))
        .collect::<Vec<_>>()
        .join("\t\t")
}

/// Render the schedule as an iCalendar document.
///
/// CRLF-terminated, one VTIMEZONE block for the configured zone, one VEVENT
/// per entry with deterministic UIDs so re-importing the same schedule
/// replaces rather than duplicates events.
pub fn format_ical(entries: &[ScheduleEntry], options: &IcalOptions) -> String {
    let mut out = String::new();
    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, "VERSION:2.0");
    push_line(&mut out, "PRODID:-//classched//schedule//EN");
    push_line(&mut out, "CALSCALE:GREGORIAN");

    if let Some(first) = entries.first() {
        write_vtimezone(&mut out, options.timezone, first.date.year());
    }

    for (ordinal, entry) in entries.iter().enumerate() {
        write_vevent(&mut out, entry, ordinal + 1, options);
    }

    push_line(&mut out, "END:VCALENDAR");
    out
}

fn write_vtimezone(out: &mut String, tz: Tz, year: i32) {
    // Probe mid-January and mid-July to learn the zone's standard and (if
    // observed) daylight offsets for the schedule's year.
    let winter = offset_seconds(tz, year, 1, 15);
    let summer = offset_seconds(tz, year, 7, 15);
    let standard = winter.min(summer);
    let daylight = winter.max(summer);

    push_line(out, "BEGIN:VTIMEZONE");
    push_line(out, &format!("TZID:{}", tz.name()));
    if standard == daylight {
        push_line(out, "BEGIN:STANDARD");
        push_line(out, "DTSTART:19700101T000000");
        push_line(out, &format!("TZOFFSETFROM:{}", format_offset(standard)));
        push_line(out, &format!("TZOFFSETTO:{}", format_offset(standard)));
        push_line(out, &format!("TZNAME:{}", zone_abbrev(tz, year, 1, 15)));
        push_line(out, "END:STANDARD");
    } else {
        let (std_name, dst_name) = if winter < summer {
            // Northern hemisphere: winter is standard time.
            (zone_abbrev(tz, year, 1, 15), zone_abbrev(tz, year, 7, 15))
        } else {
            (zone_abbrev(tz, year, 7, 15), zone_abbrev(tz, year, 1, 15))
        };
        push_line(out, "BEGIN:STANDARD");
        push_line(out, "DTSTART:19701101T020000");
        push_line(out, "RRULE:FREQ=YEARLY;BYMONTH=11;BYDAY=1SU");
        push_line(out, &format!("TZOFFSETFROM:{}", format_offset(daylight)));
        push_line(out, &format!("TZOFFSETTO:{}", format_offset(standard)));
        push_line(out, &format!("TZNAME:{std_name}"));
        push_line(out, "END:STANDARD");
        push_line(out, "BEGIN:DAYLIGHT");
        push_line(out, "DTSTART:19700308T020000");
        push_line(out, "RRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=2SU");
        push_line(out, &format!("TZOFFSETFROM:{}", format_offset(standard)));
        push_line(out, &format!("TZOFFSETTO:{}", format_offset(daylight)));
        push_line(out, &format!("TZNAME:{dst_name}"));
        push_line(out, "END:DAYLIGHT");
    }
    push_line(out, "END:VTIMEZONE");
}

fn write_vevent(out: &mut String, entry: &ScheduleEntry, ordinal: usize, options: &IcalOptions) {
    let start_time = entry.time.unwrap_or(options.fallback_start);
    let start = entry.date.and_time(start_time);
    let end = start + Duration::minutes(options.duration_minutes);

    let summary = match &options.summary_prefix {
        Some(prefix) => format!("{prefix}: {}", entry.title),
        None => entry.title.clone(),
    };

    push_line(out, "BEGIN:VEVENT");
    push_line(
        out,
        &format!("UID:{}-{ordinal}@classched", entry.date.format("%Y%m%d")),
    );
    push_line(
        out,
        &format!(
            "DTSTART;TZID={}:{}",
            options.timezone.name(),
            start.format("%Y%m%dT%H%M%S")
        ),
    );
    push_line(
        out,
        &format!(
            "DTEND;TZID={}:{}",
            options.timezone.name(),
            end.format("%Y%m%dT%H%M%S")
        ),
    );
    push_line(out, &format!("SUMMARY:{}", escape_text(&summary)));
    push_line(out, &format!("LOCATION:{}", escape_text(&options.location)));
    push_line(out, "END:VEVENT");
}

// RFC 5545 lines are CRLF-terminated.
fn push_line(out: &mut String, line: &str) {
    let _ = write!(out, "{line}\r\n");
}

fn offset_seconds(tz: Tz, year: i32, month: u32, day: u32) -> i32 {
    use chrono::Offset;
    tz.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .map(|dt| dt.offset().fix().local_minus_utc())
        .unwrap_or(0)
}

fn zone_abbrev(tz: Tz, year: i32, month: u32, day: u32) -> String {
    tz.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .map(|dt| dt.format("%Z").to_string())
        .unwrap_or_default()
}

fn format_offset(seconds: i32) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let total_minutes = seconds.abs() / 60;
    format!("{sign}{:02}{:02}", total_minutes / 60, total_minutes % 60)
}

// TEXT values escape backslash, semicolon, comma and literal newlines.
fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(y: i32, m: u32, d: u32, title: &str) -> ScheduleEntry {
        ScheduleEntry {
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            time: NaiveTime::from_hms_opt(18, 30, 0),
        }
    }

    fn options() -> IcalOptions {
        IcalOptions {
            timezone: chrono_tz::America::New_York,
            location: "Web Dev Lab".to_string(),
            summary_prefix: None,
            duration_minutes: 210,
            fallback_start: NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
        }
    }

    #[test]
    fn delimited_output_is_one_padded_line() {
        let entries = vec![entry(2024, 1, 1, "A"), entry(2024, 1, 3, "B")];
        assert_eq!(format_delimited(&entries), "2024/01/01\tA\t\t2024/01/03\tB");
    }

    #[test]
    fn delimited_output_round_trips() {
        let entries = vec![
            entry(2024, 1, 1, "Primer 1"),
            entry(2024, 1, 3, "Primer 2"),
            entry(2024, 1, 8, "Graphics 1"),
        ];
        let line = format_delimited(&entries);
        let recovered: Vec<(&str, &str)> = line
            .split("\t\t")
            .map(|pair| pair.split_once('\t').unwrap())
            .collect();
        assert_eq!(recovered.len(), entries.len());
        for (original, (date, title)) in entries.iter().zip(&recovered) {
            assert_eq!(*date, original.date.format("%Y/%m/%d").to_string());
            assert_eq!(*title, original.title);
        }
    }

    #[test]
    fn empty_schedule_renders_empty_line() {
        assert_eq!(format_delimited(&[]), "");
    }

    #[test]
    fn ical_lines_are_crlf_terminated() {
        let ics = format_ical(&[entry(2024, 1, 1, "A")], &options());
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        for line in ics.split("\r\n").filter(|l| !l.is_empty()) {
            assert!(!line.contains('\n'), "bare newline in {line:?}");
        }
    }

    #[test]
    fn ical_contains_structural_blocks() {
        let ics = format_ical(&[entry(2024, 1, 1, "A")], &options());
        assert!(ics.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
        assert!(ics.contains("BEGIN:VTIMEZONE\r\nTZID:America/New_York\r\n"));
        assert!(ics.contains("BEGIN:STANDARD\r\n"));
        assert!(ics.contains("BEGIN:DAYLIGHT\r\n"));
        assert!(ics.contains("BEGIN:VEVENT\r\n"));
        assert!(ics.contains("END:VCALENDAR\r\n"));
    }

    #[test]
    fn new_york_offsets_are_est_and_edt() {
        let ics = format_ical(&[entry(2024, 1, 1, "A")], &options());
        assert!(ics.contains("TZOFFSETTO:-0500\r\n"));
        assert!(ics.contains("TZOFFSETTO:-0400\r\n"));
        assert!(ics.contains("TZNAME:EST\r\n"));
        assert!(ics.contains("TZNAME:EDT\r\n"));
    }

    #[test]
    fn event_end_is_start_plus_duration() {
        let ics = format_ical(&[entry(2024, 1, 1, "A")], &options());
        assert!(ics.contains("DTSTART;TZID=America/New_York:20240101T183000\r\n"));
        // 18:30 + 3h30m = 22:00.
        assert!(ics.contains("DTEND;TZID=America/New_York:20240101T220000\r\n"));
    }

    #[test]
    fn summary_prefix_is_applied() {
        let mut opts = options();
        opts.summary_prefix = Some("Cohort 7".to_string());
        let ics = format_ical(&[entry(2024, 1, 1, "HTML 1")], &opts);
        assert!(ics.contains("SUMMARY:Cohort 7: HTML 1\r\n"));
    }

    #[test]
    fn text_values_are_escaped() {
        let ics = format_ical(&[entry(2024, 1, 1, "CSS; floats, grids")], &options());
        assert!(ics.contains("SUMMARY:CSS\\; floats\\, grids\r\n"));
    }

    #[test]
    fn uids_are_deterministic_and_distinct() {
        let entries = vec![entry(2024, 1, 1, "A"), entry(2024, 1, 3, "B")];
        let first = format_ical(&entries, &options());
        let second = format_ical(&entries, &options());
        assert_eq!(first, second);
        assert!(first.contains("UID:20240101-1@classched\r\n"));
        assert!(first.contains("UID:20240103-2@classched\r\n"));
    }

    #[test]
    fn empty_schedule_still_has_header_and_footer() {
        let ics = format_ical(&[], &options());
        assert_eq!(
            ics,
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//classched//schedule//EN\r\n\
             CALSCALE:GREGORIAN\r\nEND:VCALENDAR\r\n"
        );
    }

    #[test]
    fn fixed_offset_zone_gets_single_standard_block() {
        let mut opts = options();
        opts.timezone = chrono_tz::Asia::Tokyo;
        let ics = format_ical(&[entry(2024, 1, 1, "A")], &opts);
        assert!(ics.contains("BEGIN:STANDARD\r\n"));
        assert!(!ics.contains("BEGIN:DAYLIGHT\r\n"));
        assert!(ics.contains("TZOFFSETTO:+0900\r\n"));
    }
}
