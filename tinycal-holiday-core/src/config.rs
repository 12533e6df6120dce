//! Global tinycal-holiday configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, File};
use serde::Deserialize;

use crate::error::{HolidayError, HolidayResult};

static DEFAULT_CALENDAR_DIR: &str = "~/Library/Containers/app.cyan.tinycalx/Data/Documents/calendars";
static DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/NateScarlet/holiday-cn/master/{year}.json";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

const YEAR_PLACEHOLDER: &str = "{year}";

fn default_calendar_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CALENDAR_DIR)
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_locales() -> Vec<String> {
    vec!["zh_CN".to_string()]
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Fill the `{year}` placeholder of a source URL template.
pub(crate) fn expand_year(template: &str, year: i32) -> String {
    template.replace(YEAR_PLACEHOLDER, &year.to_string())
}

/// Configuration at ~/.config/tinycal-holiday/config.toml
///
/// Every key is optional; a missing file means all defaults.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// TinyCal's per-month calendar files.
    #[serde(default = "default_calendar_dir")]
    pub calendar_dir: PathBuf,

    /// URL of the yearly schedule, with a `{year}` placeholder.
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// Locale tags accepted in calendar file names.
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            calendar_dir: default_calendar_dir(),
            source_url: default_source_url(),
            locales: default_locales(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SyncConfig {
    /// Load the config file, writing a commented-out template on first run.
    pub fn load() -> HolidayResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> HolidayResult<Self> {
        let config: SyncConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| HolidayError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| HolidayError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn config_path() -> HolidayResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HolidayError::Config("Could not determine config directory".into()))?
            .join("tinycal-holiday");

        Ok(config_dir.join("config.toml"))
    }

    fn validate(&self) -> HolidayResult<()> {
        if !self.source_url.contains(YEAR_PLACEHOLDER) {
            return Err(HolidayError::Config(format!(
                "source_url must contain a {YEAR_PLACEHOLDER} placeholder, got '{}'",
                self.source_url
            )));
        }

        if self.locales.is_empty() {
            return Err(HolidayError::Config("locales must not be empty".into()));
        }

        Ok(())
    }

    /// Calendar directory with `~` expanded.
    pub fn calendar_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.calendar_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> HolidayResult<()> {
        let contents = format!(
            "\
# tinycal-holiday configuration

# Where TinyCal keeps its month files:
# calendar_dir = \"{DEFAULT_CALENDAR_DIR}\"

# Yearly holiday schedule ({{year}} is replaced with the target year):
# source_url = \"{DEFAULT_SOURCE_URL}\"

# Locale tags accepted in calendar file names:
# locales = [\"zh_CN\"]

# HTTP timeout in seconds:
# timeout_secs = {DEFAULT_TIMEOUT_SECS}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                HolidayError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| HolidayError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
