use crate::utils::error::{Result, ScraperError};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("job_scraper=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("job_scraper=info"))
    }
}

/// Installs the process-wide subscriber: a compact console layer plus an
/// append-only log file. Call once at startup.
pub fn init_logger<P: AsRef<Path>>(log_file: P, verbose: bool) -> Result<()> {
    let log_file = log_file.as_ref();

    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| ScraperError::LoggingError {
            message: format!("cannot open {}: {}", log_file.display(), e),
        })?;

    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| ScraperError::LoggingError {
            message: e.to_string(),
        })?;

    tracing::info!("📝 Logging system initialized successfully");
    Ok(())
}

