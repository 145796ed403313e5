//! Disk-backed configuration.
//!
//! `config.toml` under the platform config directory is entirely optional; a
//! missing or unreadable file degrades to compiled defaults with a warning,
//! never a hard failure.

use std::fs;
use std::path::PathBuf;

use chrono_tz::Tz;
use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::date::DateParseStyle;

const CONFIG_DIR_NAME: &str = "classched";
const CONFIG_FILE_NAME: &str = "config.toml";
const CURRENT_SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_TIMEZONE: &str = "America/New_York";
pub const DEFAULT_LOCATION: &str = "Web Dev Lab";

/// Result returned by [`load_config`], capturing the source and any
/// non-fatal issues.
#[derive(Debug, Clone)]
pub struct ConfigLoadResult {
    pub config: FileConfig,
    pub warnings: Vec<String>,
    pub source: ConfigSource,
}

/// Indicates where the configuration was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// No persisted configuration was found or usable; defaults were
    /// synthesized.
    Default,
    /// Configuration was read from `config.toml`.
    File,
}

/// Disk-backed configuration schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default = "FileConfig::schema_version")]
    pub schema_version: u32,
    /// Date-string strictness for all date arguments.
    #[serde(default)]
    pub date_parse: DateParseStyle,
    /// Default ordered session list, used when no `--file` is given.
    #[serde(default = "default_sessions")]
    pub sessions: Vec<String>,
    #[serde(default)]
    pub slots: SlotPreferences,
    #[serde(default)]
    pub ical: IcalPreferences,
}

impl FileConfig {
    const fn schema_version() -> u32 {
        CURRENT_SCHEMA_VERSION
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            date_parse: DateParseStyle::default(),
            sessions: default_sessions(),
            slots: SlotPreferences::default(),
            ical: IcalPreferences::default(),
        }
    }
}

/// Time-of-day slot selection preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotPreferences {
    /// Start time (HH:MM) when the class meets on few distinct weekdays.
    pub evening_start: String,
    /// Start time (HH:MM) for denser weekly cadences.
    pub morning_start: String,
    /// Weekday-count threshold below which the evening slot applies.
    pub evening_weekday_threshold: u32,
}

impl Default for SlotPreferences {
    fn default() -> Self {
        Self {
            evening_start: "18:30".to_string(),
            morning_start: "09:00".to_string(),
            evening_weekday_threshold: 3,
        }
    }
}

/// iCalendar export preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcalPreferences {
    /// IANA zone name all events are expressed in.
    pub timezone: String,
    pub location: String,
    /// Optional prefix prepended to every event summary.
    pub summary_prefix: Option<String>,
    pub duration_minutes: u32,
}

impl Default for IcalPreferences {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            summary_prefix: None,
            duration_minutes: 210,
        }
    }
}

/// The course curriculum shipped as the default session list. Overridable in
/// `config.toml` or per run with `--file`.
pub(crate) fn default_sessions() -> Vec<String> {
    [
        "Primer 1",
        "Primer 2",
        "Primer 3",
        "Primer 4",
        "Graphics 1",
        "Graphics 2",
        "HTML 1",
        "HTML 2",
        "CSS 1",
        "CSS 2",
        "CSS 3",
        "CSS 4",
        "Bootstrap 1",
        "Bootstrap 2",
        "JavaScript 1",
        "JavaScript 2",
        "JavaScript 3",
        "JavaScript 4",
        "JavaScript 5",
        "JavaScript 6",
        "JavaScript 7",
        "JavaScript 8",
        "MySQL 1",
        "MySQL 2",
        "PHP 1",
        "PHP 2",
        "PHP 3",
        "PHP 4",
        "Capstone 1",
        "PHP 5",
        "PHP 6",
        "Linux/Unix 1",
        "Linux/Unix 2",
        "Capstone 2",
        "Capstone 3",
        "Graduation",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Path to the configuration directory.
pub fn config_directory() -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Path to `config.toml`.
pub fn config_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

/// Load the configuration, falling back to defaults on any failure.
pub fn load_config() -> ConfigLoadResult {
    let mut warnings = Vec::new();
    let path = config_path();

    if path.exists() {
        match fs::read_to_string(&path) {
            Ok(raw) => match toml::from_str::<FileConfig>(&raw) {
                Ok(config) => {
                    let (config, mut sanitize_warnings) = sanitize_config(config);
                    warnings.append(&mut sanitize_warnings);
                    return ConfigLoadResult {
                        config,
                        warnings,
                        source: ConfigSource::File,
                    };
                }
                Err(err) => {
                    warnings.push(format!(
                        "Failed to parse {}: {err}; using defaults.",
                        path.display()
                    ));
                }
            },
            Err(err) => {
                warnings.push(format!(
                    "Failed to read {}: {err}; using defaults.",
                    path.display()
                ));
            }
        }
    }

    ConfigLoadResult {
        config: FileConfig::default(),
        warnings,
        source: ConfigSource::Default,
    }
}

fn sanitize_config(mut config: FileConfig) -> (FileConfig, Vec<String>) {
    let mut warnings = Vec::new();

    if config.ical.timezone.parse::<Tz>().is_err() {
        warnings.push(format!(
            "Unknown timezone '{}' in config; falling back to {DEFAULT_TIMEZONE}.",
            config.ical.timezone
        ));
        config.ical.timezone = DEFAULT_TIMEZONE.to_string();
    }

    for (field, value) in [
        ("slots.evening_start", config.slots.evening_start.clone()),
        ("slots.morning_start", config.slots.morning_start.clone()),
    ] {
        if chrono::NaiveTime::parse_from_str(&value, "%H:%M").is_err() {
            warnings.push(format!(
                "Invalid time '{value}' for {field} in config; expected HH:MM. Using defaults."
            ));
            config.slots = SlotPreferences::default();
            break;
        }
    }

    if config.ical.duration_minutes == 0 {
        warnings.push("ical.duration_minutes must be positive; using 210.".to_string());
        config.ical.duration_minutes = IcalPreferences::default().duration_minutes;
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_the_full_curriculum() {
        let config = FileConfig::default();
        assert_eq!(config.sessions.len(), 36);
        assert_eq!(config.sessions.first().map(String::as_str), Some("Primer 1"));
        assert_eq!(config.sessions.last().map(String::as_str), Some("Graduation"));
    }

    #[test]
    fn empty_toml_deserializes_to_defaults() {
        let config: FileConfig = toml::from_str("").expect("empty config");
        assert_eq!(config.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(config.ical.timezone, DEFAULT_TIMEZONE);
        assert_eq!(config.slots.evening_weekday_threshold, 3);
    }

    #[test]
    fn partial_toml_keeps_unspecified_defaults() {
        let raw = "[ical]\ntimezone = \"America/Chicago\"\nlocation = \"Room 12\"\nduration_minutes = 90\n";
        let config: FileConfig = toml::from_str(raw).expect("partial config");
        assert_eq!(config.ical.timezone, "America/Chicago");
        assert_eq!(config.ical.duration_minutes, 90);
        assert_eq!(config.slots.evening_start, "18:30");
        assert!(!config.sessions.is_empty());
    }

    #[test]
    fn unknown_timezone_is_sanitized_with_warning() {
        let mut config = FileConfig::default();
        config.ical.timezone = "Mars/Olympus_Mons".to_string();
        let (config, warnings) = sanitize_config(config);
        assert_eq!(config.ical.timezone, DEFAULT_TIMEZONE);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Mars/Olympus_Mons"));
    }

    #[test]
    fn bad_slot_time_resets_slot_preferences() {
        let mut config = FileConfig::default();
        config.slots.evening_start = "half past six".to_string();
        let (config, warnings) = sanitize_config(config);
        assert_eq!(config.slots.evening_start, "18:30");
        assert!(!warnings.is_empty());
    }

    #[test]
    fn bad_morning_start_also_resets_slot_preferences() {
        let mut config = FileConfig::default();
        config.slots.morning_start = "9 o'clock".to_string();
        let (config, warnings) = sanitize_config(config);
        assert_eq!(config.slots.morning_start, "09:00");
        assert_eq!(config.slots.evening_start, "18:30");
        assert!(warnings.iter().any(|w| w.contains("slots.morning_start")));
    }

    #[test]
    fn zero_duration_is_sanitized() {
        let mut config = FileConfig::default();
        config.ical.duration_minutes = 0;
        let (config, warnings) = sanitize_config(config);
        assert_eq!(config.ical.duration_minutes, 210);
        assert!(!warnings.is_empty());
    }

    #[test]
    fn date_parse_style_round_trips_through_toml() {
        let raw = "date_parse = \"strict\"\n";
        let config: FileConfig = toml::from_str(raw).expect("style config");
        assert_eq!(config.date_parse, crate::date::DateParseStyle::Strict);
    }
}
