pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::storage::LocalStorage;
pub use config::ScraperConfig;
pub use core::{etl::ScrapeEngine, pipeline::ScrapePipeline};
pub use domain::model::{ListingRecord, RunReport, RunStatus};
pub use utils::error::{Result, ScraperError};
