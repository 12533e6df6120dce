use anyhow::Result;
use owo_colors::OwoColorize;
use tinycal_holiday_core::config::SyncConfig;

pub fn run() -> Result<()> {
    let config_path = SyncConfig::config_path()?;
    let config = SyncConfig::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Calendars:  {}", config.calendar_path().display());

    println!("{}", "Holiday data".bold());
    println!("  Source:     {}", config.source_url);
    println!("  Locales:    {}", config.locales.join(", "));
    println!("  Timeout:    {}s", config.timeout_secs);

    Ok(())
}
