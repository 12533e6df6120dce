use std::path::PathBuf;

use anyhow::{Result, bail};
use chrono::{Datelike, Local};
use clap::Args;
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;
use tinycal_holiday_core::HolidayError;
use tinycal_holiday_core::config::SyncConfig;
use tinycal_holiday_core::patcher::PatchMode;
use tinycal_holiday_core::source::{HolidaySource, HttpSource};
use tinycal_holiday_core::sync::{self, SyncOptions};

use crate::render::Render;
use crate::utils::tui;

/// Years outside this range are almost certainly typos.
const MIN_YEAR: i32 = 1801;
const MAX_YEAR: i32 = 2199;

#[derive(Args, Default)]
pub struct SyncArgs {
    /// Year to update (skips the menu)
    #[arg(short, long, value_parser = clap::value_parser!(i32).range(MIN_YEAR as i64..=MAX_YEAR as i64))]
    pub year: Option<i32>,

    /// TinyCal calendar directory (overrides calendar_dir from config)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Show what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(args: SyncArgs) -> Result<()> {
    let config = SyncConfig::load()?;
    let calendar_dir = args.dir.unwrap_or_else(|| config.calendar_path());

    println!("Calendar directory: {}", calendar_dir.display().dimmed());
    println!();

    let year = match args.year {
        Some(year) => year,
        None => prompt_year()?,
    };

    let source = HttpSource::new(&config)?;
    let options = SyncOptions {
        year,
        calendar_dir,
        locales: config.locales.clone(),
        mode: if args.dry_run {
            PatchMode::DryRun
        } else {
            PatchMode::Write
        },
    };

    let spinner = tui::fetch_spinner(year, &source.describe(year));
    let result = sync::run(&source, &options).await;
    spinner.finish_and_clear();

    let report = match result {
        Ok(report) => report,
        Err(e @ HolidayError::Locate { .. }) => bail!(
            "{}\n\
            Make sure TinyCal is installed and has been opened for {}.",
            e,
            year
        ),
        Err(e) => bail!("{}\nNothing was changed.", e),
    };

    println!("{}", report.render());

    Ok(())
}

/// Ask whether to update the current year or a specific one.
fn prompt_year() -> Result<i32> {
    let current = Local::now().year();
    let items = vec![
        format!("Update this year ({})", current),
        "Enter a specific year".to_string(),
    ];

    let selection = Select::new()
        .with_prompt("What would you like to update?")
        .items(&items)
        .default(0)
        .interact()?;

    if selection == 0 {
        return Ok(current);
    }

    loop {
        let input: String = Input::new()
            .with_prompt("  Year (e.g. 2025)")
            .interact_text()?;
        match parse_year(&input) {
            Ok(year) => return Ok(year),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

fn parse_year(input: &str) -> Result<i32> {
    let year: i32 = input
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("'{}' is not a number. Enter a year like 2025", input.trim()))?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        bail!("{} is out of range. Enter a year between {} and {}", year, MIN_YEAR, MAX_YEAR);
    }

    Ok(year)
}
