use crate::config::ScraperConfig;
use crate::utils::error::{Result, ScraperError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk configuration. Every section and key is optional; anything left
/// out keeps its built-in default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub load: LoadConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub url: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadConfig {
    pub output_path: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleConfig {
    pub daily_at: Option<String>,
    pub poll_interval_seconds: Option<u64>,
    pub run_on_start: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub monitor: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ScraperError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScraperError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScraperError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Layers the values present in this file over `base`.
    pub fn apply_to(&self, base: ScraperConfig) -> ScraperConfig {
        ScraperConfig {
            url: self.source.url.clone().unwrap_or(base.url),
            user_agent: self.source.user_agent.clone().unwrap_or(base.user_agent),
            timeout_secs: self.source.timeout_seconds.unwrap_or(base.timeout_secs),
            output_path: self.load.output_path.clone().unwrap_or(base.output_path),
            output_file: self.load.file_name.clone().unwrap_or(base.output_file),
            daily_at: self.schedule.daily_at.clone().unwrap_or(base.daily_at),
            poll_interval_secs: self
                .schedule
                .poll_interval_seconds
                .unwrap_or(base.poll_interval_secs),
            run_on_start: self.schedule.run_on_start.unwrap_or(base.run_on_start),
            log_file: self.logging.file.clone().unwrap_or(base.log_file),
            monitor: self.logging.monitor.unwrap_or(base.monitor),
        }
    }

    pub fn into_config(self) -> ScraperConfig {
        self.apply_to(ScraperConfig::default())
    }
}
