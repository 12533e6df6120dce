//! One holiday sync run: fetch, locate, patch.

use std::path::PathBuf;

use crate::error::{HolidayError, HolidayResult};
use crate::holiday::HolidayMap;
use crate::locator::{self, CalendarFile};
use crate::patcher::{self, PatchMode, PatchResult};
use crate::source::HolidaySource;

/// What to sync and where.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub year: i32,
    pub calendar_dir: PathBuf,
    pub locales: Vec<String>,
    pub mode: PatchMode,
}

/// Result of patching a single located file.
#[derive(Debug)]
pub enum FileOutcome {
    Patched(PatchResult),
    Failed(HolidayError),
}

#[derive(Debug)]
pub struct FileReport {
    pub file: CalendarFile,
    pub outcome: FileOutcome,
}

/// Everything a run did, file by file.
#[derive(Debug)]
pub struct SyncReport {
    pub year: i32,
    pub holidays: HolidayMap,
    pub files: Vec<FileReport>,
    pub mode: PatchMode,
}

impl SyncReport {
    /// Files read successfully.
    pub fn examined(&self) -> usize {
        self.patched().count()
    }

    /// Files rewritten (or that would be, in a dry run).
    pub fn modified(&self) -> usize {
        self.patched().filter(|r| r.modified).count()
    }

    /// Files skipped because of an error.
    pub fn failed(&self) -> usize {
        self.files.len() - self.examined()
    }

    pub fn up_to_date(&self) -> usize {
        self.examined() - self.modified()
    }

    /// Day records changed across all files.
    pub fn days_updated(&self) -> usize {
        self.patched().map(|r| r.updated).sum()
    }

    fn patched(&self) -> impl Iterator<Item = &PatchResult> {
        self.files.iter().filter_map(|report| match &report.outcome {
            FileOutcome::Patched(result) => Some(result),
            FileOutcome::Failed(_) => None,
        })
    }
}

/// Fetch the schedule for `options.year` and apply it to every month file.
///
/// Fetch and locate failures abort before any file is opened. Per-file
/// failures are recorded in the report and the run carries on.
pub async fn run<S: HolidaySource>(source: &S, options: &SyncOptions) -> HolidayResult<SyncReport> {
    let holidays = source.fetch(options.year).await?;
    let files = locator::locate(&options.calendar_dir, options.year, &options.locales)?;

    apply(options.year, holidays, files, options.mode)
}

/// Patch each file independently with an already fetched schedule.
///
/// Per-file errors are recorded as `Failed`; a fatal error ends the run.
pub fn apply(
    year: i32,
    holidays: HolidayMap,
    files: Vec<CalendarFile>,
    mode: PatchMode,
) -> HolidayResult<SyncReport> {
    let mut reports = Vec::with_capacity(files.len());

    for file in files {
        let outcome = match patcher::patch(&file, &holidays, mode) {
            Ok(result) => FileOutcome::Patched(result),
            Err(e) if !e.is_fatal() => {
                tracing::debug!(file = %file.path.display(), error = %e, "Skipping calendar file");
                FileOutcome::Failed(e)
            }
            Err(e) => return Err(e),
        };
        reports.push(FileReport { file, outcome });
    }

    Ok(SyncReport {
        year,
        holidays,
        files: reports,
        mode,
    })
}
