//! Rewrites the `worktime` flag of TinyCal's day records.
//!
//! A month file is a property list whose root dictionary holds a
//! `monthData` array with one dictionary per displayed day:
//!
//! ```text
//! { monthData: [ { year: 2025, month: 1, day: 1, worktime: 0, ... }, ... ], ... }
//! ```
//!
//! Only `worktime` is ever touched. Every other key, the record order and the
//! file's encoding (XML or binary) are kept as they were.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use plist::{Dictionary, Value};

use crate::error::{HolidayError, HolidayResult};
use crate::holiday::{DayKind, HolidayMap};
use crate::locator::CalendarFile;

const MONTH_DATA_KEY: &str = "monthData";
const WORKTIME_KEY: &str = "worktime";
const BINARY_MAGIC: &[u8] = b"bplist00";

/// TinyCal's `worktime` code for a classified day. Ordinary days are `0`
/// and are never written.
fn worktime_code(kind: DayKind) -> i64 {
    match kind {
        DayKind::MakeupWork => 1,
        DayKind::Rest => 2,
    }
}

/// A day record read from `monthData`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEntry {
    pub date: NaiveDate,
    /// Raw code as stored; None when the key is absent or not a number.
    pub worktime: Option<i64>,
}

impl DayEntry {
    /// Build from a record, falling back to the file's year and month when
    /// the record does not carry its own. None if no valid date results.
    fn from_dict(dict: &Dictionary, year: i32, month: u32) -> Option<Self> {
        let year = match int_field(dict, "year") {
            Some(y) => i32::try_from(y).ok()?,
            None => year,
        };
        let month = match int_field(dict, "month") {
            Some(m) => u32::try_from(m).ok()?,
            None => month,
        };
        let day = u32::try_from(int_field(dict, "day")?).ok()?;

        Some(DayEntry {
            date: NaiveDate::from_ymd_opt(year, month, day)?,
            worktime: int_field(dict, WORKTIME_KEY),
        })
    }
}

/// Integer stored either as a number or as a decimal string.
fn int_field(dict: &Dictionary, key: &str) -> Option<i64> {
    match dict.get(key)? {
        Value::Integer(i) => i.as_signed(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Whether changes are saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatchMode {
    #[default]
    Write,
    DryRun,
}

/// Outcome of patching one month file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatchResult {
    /// Day records with a usable date.
    pub examined: usize,
    /// Day records whose `worktime` changed.
    pub updated: usize,
    /// The file was rewritten (in dry-run: would have been).
    pub modified: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Xml,
    Binary,
}

/// Apply `map` to one month file.
///
/// The file is written back only when at least one record changed, so
/// running twice with the same map is a no-op the second time.
pub fn patch(file: &CalendarFile, map: &HolidayMap, mode: PatchMode) -> HolidayResult<PatchResult> {
    let path = file.path.as_path();
    let (mut document, encoding) = read_plist(path)?;

    let corrupt = |reason: &str| HolidayError::CorruptFile {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let days = document
        .as_dictionary_mut()
        .ok_or_else(|| corrupt("root is not a dictionary"))?
        .get_mut(MONTH_DATA_KEY)
        .and_then(Value::as_array_mut)
        .ok_or_else(|| corrupt("missing 'monthData' array"))?;

    let mut result = PatchResult::default();

    for item in days.iter_mut() {
        let Some(dict) = item.as_dictionary_mut() else {
            continue;
        };
        let Some(entry) = DayEntry::from_dict(dict, file.year, file.month) else {
            tracing::debug!(file = %path.display(), "Skipping day record without a valid date");
            continue;
        };
        result.examined += 1;

        let Some(kind) = map.get(&entry.date) else {
            continue;
        };
        let target = worktime_code(kind);
        if entry.worktime == Some(target) {
            continue;
        }

        tracing::debug!(
            date = %entry.date,
            from = ?entry.worktime,
            to = target,
            "Updating worktime"
        );
        dict.insert(WORKTIME_KEY.to_string(), Value::Integer(target.into()));
        result.updated += 1;
    }

    result.modified = result.updated > 0;

    if result.modified && mode == PatchMode::Write {
        write_plist(path, &document, encoding)?;
        tracing::info!(file = %path.display(), updated = result.updated, "Saved calendar file");
    }

    Ok(result)
}

fn read_plist(path: &Path) -> HolidayResult<(Value, Encoding)> {
    let corrupt = |reason: String| HolidayError::CorruptFile {
        path: path.to_path_buf(),
        reason,
    };

    let bytes = std::fs::read(path).map_err(|e| corrupt(e.to_string()))?;
    let encoding = if bytes.starts_with(BINARY_MAGIC) {
        Encoding::Binary
    } else {
        Encoding::Xml
    };

    let value = Value::from_reader(Cursor::new(bytes)).map_err(|e| corrupt(e.to_string()))?;
    Ok((value, encoding))
}

/// Write to a sibling `.tmp` file, then rename it over `path`.
fn write_plist(path: &Path, document: &Value, encoding: Encoding) -> HolidayResult<()> {
    let temp = temp_path(path);

    write_then_rename(path, &temp, document, encoding).map_err(|source| {
        let _ = std::fs::remove_file(&temp);
        HolidayError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn write_then_rename(
    path: &Path,
    temp: &Path,
    document: &Value,
    encoding: Encoding,
) -> std::io::Result<()> {
    let mut file = std::fs::File::create(temp)?;

    match encoding {
        Encoding::Xml => document.to_writer_xml(&mut file),
        Encoding::Binary => document.to_writer_binary(&mut file),
    }
    .map_err(std::io::Error::other)?;

    file.flush()?;
    file.sync_all()?;
    drop(file);

    let permissions = std::fs::metadata(path)?.permissions();
    std::fs::set_permissions(temp, permissions)?;

    std::fs::rename(temp, path)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
