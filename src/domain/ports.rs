use crate::domain::model::{RunReport, ScrapeBatch};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::io::Write;
use std::time::Duration;

/// Never more than this many listings are processed per run.
pub const MAX_LISTINGS: usize = 10;

pub trait Storage: Send + Sync {
    type Writer: Write + Send;

    /// Creates or truncates `name`, returning a handle scoped to the caller.
    fn create(&self, name: &str) -> Result<Self::Writer>;
    fn remove(&self, name: &str) -> Result<()>;
    /// Human-readable location of `name`, used in logs and run reports.
    fn location(&self, name: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn target_url(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn output_file(&self) -> &str;

    fn max_listings(&self) -> usize {
        MAX_LISTINGS
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Fetches the listings page and returns its body.
    async fn extract(&self) -> Result<String>;
    /// Parses the page, enumerates listings and extracts one record per listing.
    async fn transform(&self, page: String) -> Result<ScrapeBatch>;
    /// Writes the header and every successfully extracted row.
    async fn load(&self, batch: ScrapeBatch) -> Result<RunReport>;
}
