use crate::adapters::http::{build_client, fetch_page};
use crate::core::extract::{listing_selector, scrape_document, FieldExtractor, ListingExtractor};
use crate::core::writer::write_listings;
use crate::core::{ConfigProvider, Pipeline, RunReport, ScrapeBatch, Storage};
use crate::utils::error::{ErrorCategory, Result, ScraperError};
use reqwest::Client;
use scraper::Selector;

fn log_parse_failure(e: ScraperError) -> ScraperError {
    if e.category() == ErrorCategory::Parse {
        tracing::error!("❌ {}", e);
    }
    e
}

pub struct ScrapePipeline<S: Storage, C: ConfigProvider, E: ListingExtractor = FieldExtractor> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) client: Client,
    listing_selector: Selector,
    extractor: E,
}

impl<S: Storage, C: ConfigProvider> ScrapePipeline<S, C, FieldExtractor> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        Self::with_extractor(storage, config, FieldExtractor::new()?)
    }
}

impl<S: Storage, C: ConfigProvider, E: ListingExtractor> ScrapePipeline<S, C, E> {
    pub fn with_extractor(storage: S, config: C, extractor: E) -> Result<Self> {
        let client = build_client(config.user_agent(), config.request_timeout())?;
        Ok(Self {
            storage,
            config,
            client,
            listing_selector: listing_selector()?,
            extractor,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, E: ListingExtractor> Pipeline for ScrapePipeline<S, C, E> {
    async fn extract(&self) -> Result<String> {
        let page = fetch_page(
            &self.client,
            self.config.target_url(),
            self.config.request_timeout(),
        )
        .await?;

        tracing::info!("✅ Successfully fetched the webpage");
        Ok(page)
    }

    async fn transform(&self, page: String) -> Result<ScrapeBatch> {
        tracing::info!("🔍 Parsing job listings...");

        let batch = scrape_document(
            &page,
            &self.listing_selector,
            &self.extractor,
            self.config.max_listings(),
        )
        .map_err(log_parse_failure)?;

        tracing::info!(
            "Found {} job listings, processing {}",
            batch.total_found,
            batch.outcomes.len()
        );
        Ok(batch)
    }

    async fn load(&self, batch: ScrapeBatch) -> Result<RunReport> {
        let file_name = self.config.output_file();
        let output_path = self.storage.location(file_name);

        tracing::info!("📁 Creating CSV file: {}", output_path);
        let file = self.storage.create(file_name)?;

        // The handle is moved into the writer and closed when it returns.
        match write_listings(file, &batch) {
            Ok(tally) => Ok(RunReport {
                output_path,
                rows_written: tally.written,
                rows_skipped: tally.skipped,
            }),
            Err(source) => {
                if let Err(e) = self.storage.remove(file_name) {
                    tracing::warn!("Could not remove partial file {}: {}", output_path, e);
                }
                Err(ScraperError::OutputWrite {
                    path: output_path,
                    source,
                })
            }
        }
    }
}
