//! Discovery of TinyCal month files.
//!
//! TinyCal stores one property list per month, named
//! `<year>.<month>.<index> (<locale>)`, e.g. `2025.1.0 (zh_CN)`.

use std::path::{Path, PathBuf};

use crate::error::{HolidayError, HolidayResult};

/// A month file that belongs to the target year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarFile {
    pub path: PathBuf,
    pub year: i32,
    pub month: u32,
    pub index: u32,
    pub locale: String,
}

impl CalendarFile {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// The pieces of a month file name.
#[derive(Debug, PartialEq, Eq)]
struct ParsedName<'a> {
    year: i32,
    month: u32,
    index: u32,
    locale: &'a str,
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse `<year>.<month>.<index> (<locale>)`. Returns None for anything else.
fn parse_file_name(name: &str) -> Option<ParsedName<'_>> {
    let (stem, rest) = name.split_once(" (")?;
    let locale = rest.strip_suffix(')')?;
    if locale.is_empty() || locale.contains(['(', ')', ' ']) {
        return None;
    }

    let mut parts = stem.split('.');
    let (year, month, index) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    if year.len() != 4 || !is_digits(year) {
        return None;
    }
    if month.len() > 2 || !is_digits(month) || !is_digits(index) {
        return None;
    }

    let month: u32 = month.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }

    Some(ParsedName {
        year: year.parse().ok()?,
        month,
        index: index.parse().ok()?,
        locale,
    })
}

/// List the month files for `year` in `dir` whose locale is one of `locales`.
///
/// Finding nothing is not an error; a missing or unreadable directory is.
pub fn locate(dir: &Path, year: i32, locales: &[String]) -> HolidayResult<Vec<CalendarFile>> {
    let entries = std::fs::read_dir(dir).map_err(|source| HolidayError::Locate {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<CalendarFile> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?;
            let parsed = parse_file_name(name)?;

            if parsed.year != year || !locales.iter().any(|l| l == parsed.locale) {
                return None;
            }

            Some(CalendarFile {
                year: parsed.year,
                month: parsed.month,
                index: parsed.index,
                locale: parsed.locale.to_string(),
                path: path.clone(),
            })
        })
        .collect();

    files.sort_by(|a, b| {
        (a.month, a.index, &a.locale).cmp(&(b.month, b.index, &b.locale))
    });

    tracing::debug!(dir = %dir.display(), year, found = files.len(), "Located calendar files");
    Ok(files)
}
