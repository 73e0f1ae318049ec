#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use chrono::NaiveTime;
use std::time::Duration;

pub const DEFAULT_URL: &str = "https://vacancymail.co.zw/jobs/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_OUTPUT_PATH: &str = ".";
pub const DEFAULT_OUTPUT_FILE: &str = "scraped_jobs.csv";
pub const DEFAULT_DAILY_AT: &str = "10:30";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_LOG_FILE: &str = "scraping.log";

/// Fully resolved settings: built-in defaults, then the TOML file, then
/// command-line overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    pub url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub output_path: String,
    pub output_file: String,
    pub daily_at: String,
    pub poll_interval_secs: u64,
    pub run_on_start: bool,
    pub log_file: String,
    pub monitor: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            daily_at: DEFAULT_DAILY_AT.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            run_on_start: true,
            log_file: DEFAULT_LOG_FILE.to_string(),
            monitor: false,
        }
    }
}

impl ScraperConfig {
    pub fn daily_time(&self) -> Result<NaiveTime> {
        validation::parse_daily_time("schedule.daily_at", &self.daily_at)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl ConfigProvider for ScraperConfig {
    fn target_url(&self) -> &str {
        &self.url
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }
}

impl Validate for ScraperConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.url", &self.url)?;
        validation::validate_non_empty_string("source.user_agent", &self.user_agent)?;
        validation::validate_positive_number("source.timeout_seconds", self.timeout_secs, 1)?;
        validation::validate_path("load.output_path", &self.output_path)?;
        validation::validate_path("load.file_name", &self.output_file)?;
        self.daily_time()?;
        validation::validate_positive_number(
            "schedule.poll_interval_seconds",
            self.poll_interval_secs,
            1,
        )?;
        validation::validate_path("logging.file", &self.log_file)?;
        Ok(())
    }
}
