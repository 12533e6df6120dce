//! Holiday schedule model.
//!
//! The published schedule lists only the days that deviate from the normal
//! week: rest days (public holidays and the weekdays bridged into them) and
//! makeup workdays (weekend days worked to pay for the bridge). Days absent
//! from the schedule are ordinary and must never be touched.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{HolidayError, HolidayResult};

/// How the schedule classifies a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayKind {
    /// Day off.
    Rest,
    /// Weekend day that is worked.
    MakeupWork,
}

impl DayKind {
    /// Classification from the source's `isOffDay` flag.
    ///
    /// A missing or unusable flag is treated as a rest day.
    pub fn from_off_day(is_off_day: Option<bool>) -> Self {
        match is_off_day {
            Some(false) => DayKind::MakeupWork,
            Some(true) | None => DayKind::Rest,
        }
    }
}

/// One day taken from the published schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayRecord {
    pub date: NaiveDate,
    pub kind: DayKind,
    pub name: Option<String>,
}

/// The remote document is normally `{"year": .., "days": [..]}`, but a bare
/// list of days is accepted too. Days stay untyped here so one malformed
/// entry cannot reject the whole year.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Wrapped { days: Vec<Value> },
    Bare(Vec<Value>),
}

/// Classify one day object from the remote JSON.
///
/// Entries without a `YYYY-MM-DD` string date are skipped. An `isOffDay`
/// that is missing or not a boolean counts as a rest day.
fn record_from_value(day: &Value) -> Option<HolidayRecord> {
    let name = day.get("name").and_then(Value::as_str).map(String::from);

    let date = match day.get("date") {
        Some(Value::String(date_str)) => match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                tracing::warn!(date = %date_str, error = %e, "Skipping holiday entry with an invalid date");
                return None;
            }
        },
        Some(other) => {
            tracing::warn!(date = %other, "Skipping holiday entry whose date is not a string");
            return None;
        }
        None => {
            tracing::warn!(entry = %day, "Skipping holiday entry without a date");
            return None;
        }
    };

    let is_off_day = match day.get("isOffDay") {
        Some(Value::Bool(flag)) => Some(*flag),
        Some(other) => {
            tracing::warn!(%date, flag = %other, "isOffDay is not a boolean, treating the day as a rest day");
            None
        }
        None => {
            tracing::warn!(%date, "Holiday entry has no isOffDay flag, treating it as a rest day");
            None
        }
    };

    Some(HolidayRecord {
        date,
        kind: DayKind::from_off_day(is_off_day),
        name,
    })
}

/// Lookup from date to classification for one target year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayMap {
    days: BTreeMap<NaiveDate, HolidayRecord>,
}

impl HolidayMap {
    /// Parse the remote JSON body into a map.
    ///
    /// Malformed individual entries are skipped. A document with no usable
    /// entry at all is rejected with `NoHolidayData`.
    pub fn from_json(year: i32, body: &str) -> HolidayResult<Self> {
        let document: RawDocument =
            serde_json::from_str(body).map_err(|e| HolidayError::Parse(e.to_string()))?;

        let raw_days = match document {
            RawDocument::Wrapped { days } => days,
            RawDocument::Bare(days) => days,
        };

        let map: HolidayMap = raw_days.iter().filter_map(record_from_value).collect();

        if map.is_empty() {
            return Err(HolidayError::NoHolidayData(year));
        }

        Ok(map)
    }

    pub fn get(&self, date: &NaiveDate) -> Option<DayKind> {
        self.days.get(date).map(|record| record.kind)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Records in date order.
    pub fn iter(&self) -> impl Iterator<Item = &HolidayRecord> {
        self.days.values()
    }

    /// Number of rest days and makeup workdays.
    pub fn counts(&self) -> (usize, usize) {
        let rest = self.iter().filter(|r| r.kind == DayKind::Rest).count();
        (rest, self.len() - rest)
    }
}

impl FromIterator<HolidayRecord> for HolidayMap {
    /// Later records for the same date replace earlier ones.
    fn from_iter<I: IntoIterator<Item = HolidayRecord>>(iter: I) -> Self {
        let days = iter.into_iter().map(|record| (record.date, record)).collect();
        HolidayMap { days }
    }
}
