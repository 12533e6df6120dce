//! Terminal rendering for sync results.
//!
//! Extension traits that add colored output to tinycal-holiday-core types
//! using owo_colors.

use owo_colors::OwoColorize;
use tinycal_holiday_core::patcher::PatchMode;
use tinycal_holiday_core::sync::{FileOutcome, FileReport, SyncReport};

pub trait Render {
    fn render(&self) -> String;
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

fn render_file(report: &FileReport, mode: PatchMode) -> String {
    let name = report.file.file_name();

    match &report.outcome {
        FileOutcome::Patched(result) if result.modified => {
            let verb = match mode {
                PatchMode::Write => "updated",
                PatchMode::DryRun => "would update",
            };
            let detail = format!("{} {} {}", verb, result.updated, pluralize("day", result.updated));
            format!("   {} {} {}", "~".yellow(), name, detail.yellow())
        }
        FileOutcome::Patched(_) => {
            format!("   {} {} {}", "=".dimmed(), name, "up to date".dimmed())
        }
        FileOutcome::Failed(e) => format!("   {} {}", "!".red(), e.to_string().red()),
    }
}

impl Render for SyncReport {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        let (rest, makeup) = self.holidays.counts();
        lines.push(format!(
            "📅 {}: {} {}, {} {}",
            self.year.bold(),
            rest,
            pluralize("rest day", rest),
            makeup,
            pluralize("makeup workday", makeup)
        ));

        if self.files.is_empty() {
            lines.push(format!(
                "   {}",
                format!("No calendar files found for {}. Checked 0 files.", self.year).dimmed()
            ));
            return lines.join("\n");
        }

        lines.extend(self.files.iter().map(|f| render_file(f, self.mode)));

        let modified_label = match self.mode {
            PatchMode::Write => "updated",
            PatchMode::DryRun => "would be updated",
        };

        lines.push(String::new());
        lines.push(format!(
            "Checked {} {}: {} {} ({} {}), {} up to date",
            self.examined(),
            pluralize("file", self.examined()),
            self.modified(),
            modified_label,
            self.days_updated(),
            pluralize("day", self.days_updated()),
            self.up_to_date()
        ));

        if self.failed() > 0 {
            lines.push(
                format!(
                    "{} {} could not be processed, see the errors above.",
                    self.failed(),
                    pluralize("file", self.failed())
                )
                .red()
                .to_string(),
            );
        }

        if self.mode == PatchMode::DryRun && self.modified() > 0 {
            lines.push("Dry run: no files were written.".dimmed().to_string());
        }

        lines.join("\n")
    }
}
