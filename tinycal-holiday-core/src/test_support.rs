//! Fixtures shared by the unit tests.

use std::path::Path;

use chrono::NaiveDate;
use plist::{Dictionary, Value};

use crate::holiday::{DayKind, HolidayMap, HolidayRecord};
use crate::locator::CalendarFile;

/// A `monthData` day record as TinyCal writes it.
pub fn day(year: i64, month: i64, day: i64, worktime: Option<i64>) -> Value {
    let mut dict = Dictionary::new();
    dict.insert("year".into(), Value::Integer(year.into()));
    dict.insert("month".into(), Value::Integer(month.into()));
    dict.insert("day".into(), Value::Integer(day.into()));
    dict.insert("lunar".into(), Value::String(format!("lunar-{month}-{day}")));
    if let Some(worktime) = worktime {
        dict.insert("worktime".into(), Value::Integer(worktime.into()));
    }
    Value::Dictionary(dict)
}

pub fn month_document(days: Vec<Value>) -> Value {
    let mut root = Dictionary::new();
    root.insert("version".into(), Value::Integer(3i64.into()));
    root.insert("monthData".into(), Value::Array(days));
    Value::Dictionary(root)
}

/// Write an XML month file into `dir` and describe it the way `locate` would.
pub fn write_month_file(dir: &Path, year: i32, month: u32, days: Vec<Value>) -> CalendarFile {
    let path = dir.join(format!("{year}.{month}.0 (zh_CN)"));
    month_document(days).to_file_xml(&path).unwrap();

    CalendarFile {
        path,
        year,
        month,
        index: 0,
        locale: "zh_CN".into(),
    }
}

/// `worktime` of every day record, in file order.
pub fn worktimes(path: &Path) -> Vec<Option<i64>> {
    let value = Value::from_file(path).unwrap();
    value
        .as_dictionary()
        .and_then(|root| root.get("monthData"))
        .and_then(Value::as_array)
        .unwrap()
        .iter()
        .map(|item| {
            item.as_dictionary()
                .and_then(|d| d.get("worktime"))
                .and_then(Value::as_signed_integer)
        })
        .collect()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// `{2025-01-01: rest, 2025-01-26: makeup workday}`
pub fn new_year_map() -> HolidayMap {
    [
        HolidayRecord {
            date: date(2025, 1, 1),
            kind: DayKind::Rest,
            name: Some("元旦".into()),
        },
        HolidayRecord {
            date: date(2025, 1, 26),
            kind: DayKind::MakeupWork,
            name: Some("春节".into()),
        },
    ]
    .into_iter()
    .collect()
}
