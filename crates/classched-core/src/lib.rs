//! Core library crate exposing shared classched scheduling logic.

pub mod assemble;
pub mod config;
pub mod date;
pub mod error;
pub mod format;
pub mod generate;
pub mod logging;
pub mod runtime;
pub mod sessions;
pub mod weekday;

pub use assemble::{ScheduleEntry, SlotPolicy, assemble};
pub use config::{
    ConfigLoadResult, ConfigSource, FileConfig, IcalPreferences, SlotPreferences, config_directory,
    config_path, load_config,
};
pub use date::{DateParseStyle, parse_date, parse_date_parts};
pub use error::ScheduleError;
pub use format::{IcalOptions, format_delimited, format_ical};
pub use generate::{ExclusionSet, ScheduleDates};
pub use logging::{LoggingError, init_logging};
pub use runtime::{OutputSelection, ScheduleOutput, ScheduleRequest, run};
pub use weekday::{WEEKDAY_ABBREVS, WeekdaySet, parse_weekday_set};
