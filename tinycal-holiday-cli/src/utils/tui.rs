use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Spinner shown while the holiday schedule downloads.
pub fn fetch_spinner(year: i32, origin: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} {elapsed:.dim}") {
        spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
    }
    spinner.set_message(format!("Fetching {year} holidays from {origin}"));
    spinner.enable_steady_tick(TICK_INTERVAL);
    spinner
}
