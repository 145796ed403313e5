//! Weekday abbreviation parsing and the class-day set.

use std::fmt;

use chrono::Weekday;

use crate::error::ScheduleError;

/// The recognized abbreviations, in canonical Monday-first order.
pub const WEEKDAY_ABBREVS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// The set of weekdays on which sessions may be held.
///
/// Stored as a 7-bit mask indexed Monday=0..Sunday=6, so membership tests in
/// the generator's inner loop are a single bit probe. Duplicates collapse and
/// insertion order carries no meaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.num_days_from_monday();
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }

    /// Number of distinct weekdays in the set.
    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::default();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (index, abbrev) in WEEKDAY_ABBREVS.iter().enumerate() {
            if self.0 & (1 << index) != 0 {
                if !first {
                    f.write_str(",")?;
                }
                f.write_str(abbrev)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Parse a comma-delimited, case-insensitive list of weekday abbreviations.
///
/// Whitespace around tokens is tolerated. Unknown tokens fail with
/// [`ScheduleError::UnknownWeekday`] naming every offender. An empty input
/// yields an empty set, which the generator rejects downstream.
pub fn parse_weekday_set(input: &str) -> Result<WeekdaySet, ScheduleError> {
    let mut set = WeekdaySet::default();
    let mut unknown: Vec<String> = Vec::new();

    for token in input.split(',') {
        let token = token.trim().to_ascii_lowercase();
        if token.is_empty() {
            continue;
        }
        match token.as_str() {
            "mon" => set.insert(Weekday::Mon),
            "tue" => set.insert(Weekday::Tue),
            "wed" => set.insert(Weekday::Wed),
            "thu" => set.insert(Weekday::Thu),
            "fri" => set.insert(Weekday::Fri),
            "sat" => set.insert(Weekday::Sat),
            "sun" => set.insert(Weekday::Sun),
            _ => unknown.push(format!("'{token}'")),
        }
    }

    if !unknown.is_empty() {
        return Err(ScheduleError::UnknownWeekday {
            tokens: unknown.join(", "),
        });
    }

    Ok(set)
}
