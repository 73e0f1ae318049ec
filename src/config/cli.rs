use crate::config::toml_config::TomlConfig;
use crate::config::ScraperConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "job-scraper")]
#[command(about = "Scrapes job listings into a CSV file once at startup and then daily")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Listings page to scrape
    #[arg(long)]
    pub url: Option<String>,

    /// Directory the CSV file is written to
    #[arg(long)]
    pub output_path: Option<String>,

    /// Name of the CSV file
    #[arg(long)]
    pub file_name: Option<String>,

    /// Daily run time, HH:MM (24-hour, local time)
    #[arg(long)]
    pub at: Option<String>,

    /// Seconds between checks of the daily schedule
    #[arg(long)]
    pub poll_interval_secs: Option<u64>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with the page request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// File that log lines are appended to
    #[arg(long)]
    pub log_file: Option<String>,

    /// Run once and exit instead of staying on the daily schedule
    #[arg(long)]
    pub once: bool,

    /// Log CPU and memory usage after each run phase
    #[arg(long)]
    pub monitor: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Defaults, then the TOML file if given, then these flags.
    pub fn resolve(&self) -> Result<ScraperConfig> {
        let base = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.into_config(),
            None => ScraperConfig::default(),
        };
        Ok(self.apply_to(base))
    }

    fn apply_to(&self, base: ScraperConfig) -> ScraperConfig {
        ScraperConfig {
            url: self.url.clone().unwrap_or(base.url),
            user_agent: self.user_agent.clone().unwrap_or(base.user_agent),
            timeout_secs: self.timeout_secs.unwrap_or(base.timeout_secs),
            output_path: self.output_path.clone().unwrap_or(base.output_path),
            output_file: self.file_name.clone().unwrap_or(base.output_file),
            daily_at: self.at.clone().unwrap_or(base.daily_at),
            poll_interval_secs: self.poll_interval_secs.unwrap_or(base.poll_interval_secs),
            run_on_start: base.run_on_start || self.once,
            log_file: self.log_file.clone().unwrap_or(base.log_file),
            monitor: base.monitor || self.monitor,
        }
    }
}
