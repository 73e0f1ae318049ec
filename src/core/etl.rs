use crate::core::{Pipeline, RunReport, RunStatus};
use crate::utils::error::{ErrorCategory, Result};
use crate::utils::monitor::SystemMonitor;

pub struct ScrapeEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ScrapeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        let monitor = SystemMonitor::new(monitor_enabled);
        if monitor.is_enabled() {
            tracing::info!("🔍 System monitoring enabled");
        }
        Self { pipeline, monitor }
    }

    /// One fetch → parse → write cycle. Errors are returned to the caller.
    pub async fn run(&self) -> Result<RunReport> {
        self.monitor.reset();
        tracing::info!(
            "⏰ Starting job scraping at {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );

        let page = self.pipeline.extract().await?;
        self.monitor.log_stats("Fetch");

        let batch = self.pipeline.transform(page).await?;
        self.monitor.log_stats("Parse");

        let report = self.pipeline.load(batch).await?;
        self.monitor.log_final_stats();

        tracing::info!(
            "🎉 Finished scraping! {} jobs written to {} ({} skipped)",
            report.rows_written,
            report.output_path,
            report.rows_skipped
        );
        Ok(report)
    }

    /// Runs once and absorbs every failure after logging it, so a bad run
    /// never reaches the scheduler.
    pub async fn run_guarded(&self) -> RunStatus {
        match self.run().await {
            Ok(report) => RunStatus::Completed(report),
            Err(e) => match e.category() {
                ErrorCategory::Empty => {
                    tracing::warn!("⚠️ {}", e);
                    RunStatus::NoListings
                }
                ErrorCategory::Transport => {
                    tracing::error!("❌ {}", e);
                    RunStatus::Aborted(ErrorCategory::Transport)
                }
                category => {
                    tracing::error!("❌ Scraper exception: {}", e);
                    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                    RunStatus::Aborted(category)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScrapeBatch;
    use crate::utils::error::ScraperError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct ScriptedPipeline {
        fail_with: Option<fn() -> ScraperError>,
        loads: AtomicUsize,
    }

    #[async_trait]
    impl Pipeline for ScriptedPipeline {
        async fn extract(&self) -> Result<String> {
            match self.fail_with {
                Some(make_error) => Err(make_error()),
                None => Ok("<html></html>".to_string()),
            }
        }

        async fn transform(&self, _page: String) -> Result<ScrapeBatch> {
            Ok(ScrapeBatch {
                total_found: 0,
                outcomes: vec![],
            })
        }

        async fn load(&self, _batch: ScrapeBatch) -> Result<RunReport> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(RunReport {
                output_path: "out.csv".to_string(),
                rows_written: 0,
                rows_skipped: 0,
            })
        }
    }

    #[tokio::test]
    async fn test_successful_run_is_completed() {
        let engine = ScrapeEngine::new(ScriptedPipeline::default());

        let status = engine.run_guarded().await;

        assert!(matches!(status, RunStatus::Completed(ref r) if r.output_path == "out.csv"));
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_skips_load() {
        let engine = ScrapeEngine::new(ScriptedPipeline {
            fail_with: Some(|| ScraperError::Timeout {
                url: "https://example.com".to_string(),
                timeout_secs: 15,
            }),
            ..ScriptedPipeline::default()
        });

        let status = engine.run_guarded().await;

        assert_eq!(status, RunStatus::Aborted(ErrorCategory::Transport));
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_parse_failure_is_absorbed() {
        let engine = ScrapeEngine::new(ScriptedPipeline {
            fail_with: Some(|| ScraperError::Parse {
                message: "unexpected markup".to_string(),
            }),
            ..ScriptedPipeline::default()
        });

        assert_eq!(
            engine.run_guarded().await,
            RunStatus::Aborted(ErrorCategory::Parse)
        );
    }
}
