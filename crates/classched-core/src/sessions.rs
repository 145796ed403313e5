//! Session-title list loading.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::ScheduleError;

/// Read an ordered list of session titles from a line-oriented file.
///
/// Lines are trimmed; blank lines and lines whose first character is `;` or
/// `[` (comment and section markers, so an INI file can be fed in directly)
/// are dropped. Surviving lines are used verbatim, in file order.
pub fn load_sessions(path: &Path) -> Result<Vec<String>, ScheduleError> {
    let raw = fs::read_to_string(path).map_err(|source| ScheduleError::SourceNotFound {
        path: path.display().to_string(),
        source,
    })?;

    let titles = filter_titles(&raw);
    if titles.is_empty() {
        return Err(ScheduleError::EmptySessionList {
            path: path.display().to_string(),
        });
    }
    debug!(path = %path.display(), count = titles.len(), "loaded session list");
    Ok(titles)
}

/// The filtering rule shared by file loading and any other line source.
pub fn filter_titles(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(';') && !line.starts_with('['))
        .map(str::to_string)
        .collect()
}
