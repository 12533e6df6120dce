//! Core types for tinycal-holiday.
//!
//! This crate holds everything the CLI needs to bring TinyCal's month files in
//! line with the official Chinese holiday schedule:
//! - `holiday`: the date → day kind lookup built from the published schedule
//! - `source`: where that schedule comes from (HTTP in practice)
//! - `locator` / `patcher`: finding and rewriting the calendar files
//! - `sync`: one full run tying the three together

pub mod config;
pub mod error;
pub mod holiday;
pub mod locator;
pub mod patcher;
pub mod source;
pub mod sync;

#[cfg(test)]
mod test_support;

pub use error::{HolidayError, HolidayResult};
pub use holiday::{DayKind, HolidayMap, HolidayRecord};
