use clap::{ArgAction, Parser, ValueHint};
use classched_core::{
    DateParseStyle, ExclusionSet, FileConfig, OutputSelection, ScheduleError, ScheduleRequest,
    parse_date, parse_weekday_set, sessions,
};

/// Top-level CLI entrypoint.
#[derive(Parser, Debug, Clone)]
#[command(name = "classched", version, about, long_about = None)]
pub struct Cli {
    /// Date of the first session, used verbatim as the schedule anchor.
    /// Accepted forms: yyyy/mm/dd, mm/dd/yyyy or mm/dd (any non-digit
    /// separator; 2-part dates assume the current year).
    #[arg(value_name = "START_DATE")]
    pub start_date: String,

    /// Comma-delimited weekdays on which class is held, e.g. mon,wed,fri.
    /// Case-insensitive; duplicates and order are ignored.
    #[arg(value_name = "CLASS_DAYS")]
    pub class_days: String,

    /// Dates that must never be scheduled (holidays and the like), in the
    /// same formats as the start date.
    #[arg(value_name = "UNAVAILABLE_DATES")]
    pub unavailable_dates: Vec<String>,

    /// Session list file, one title per line; lines starting with ';' or '['
    /// and blank lines are ignored. Defaults to the configured list.
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub file: Option<String>,

    /// Emit the tab-delimited schedule line (the default when no output flag
    /// is given).
    #[arg(long, action = ArgAction::SetTrue)]
    pub text: bool,

    /// Emit an iCalendar document.
    #[arg(long, action = ArgAction::SetTrue)]
    pub ical: bool,

    /// Accept only strict yyyy-mm-dd dates, regardless of configuration.
    #[arg(long = "strict-dates", action = ArgAction::SetTrue)]
    pub strict_dates: bool,

    /// Prefix for iCalendar event summaries, e.g. a cohort name.
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,
}

impl Cli {
    /// Validate every argument eagerly and build the pipeline request.
    pub fn to_request(&self, config: &FileConfig) -> Result<ScheduleRequest, ScheduleError> {
        let style = if self.strict_dates {
            DateParseStyle::Strict
        } else {
            config.date_parse
        };

        let start = parse_date(&self.start_date, style)?;
        let days = parse_weekday_set(&self.class_days)?;
        if days.is_empty() {
            return Err(ScheduleError::EmptyWeekdaySet);
        }

        let mut excluded = ExclusionSet::new();
        for raw in &self.unavailable_dates {
            excluded.insert(parse_date(raw, style)?);
        }

        let sessions = match &self.file {
            Some(path) => sessions::load_sessions(std::path::Path::new(path))?,
            None => config.sessions.clone(),
        };

        Ok(ScheduleRequest {
            start,
            days,
            excluded,
            sessions,
            outputs: self.output_selection(),
            summary_prefix: self.prefix.clone(),
        })
    }

    fn output_selection(&self) -> OutputSelection {
        if !self.text && !self.ical {
            return OutputSelection {
                text: true,
                ical: false,
            };
        }
        OutputSelection {
            text: self.text,
            ical: self.ical,
        }
    }
}
