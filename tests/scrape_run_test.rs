use httpmock::prelude::*;
use job_scraper::core::extract::{FieldExtractor, ListingExtractor};
use job_scraper::utils::error::ErrorCategory;
use job_scraper::{
    ListingRecord, LocalStorage, RunStatus, ScrapeEngine, ScrapePipeline, ScraperConfig,
    ScraperError,
};
use scraper::ElementRef;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const HEADER: &str = "Job Title,Company,Location,Expiry Date,Job Description";

fn listing(title: &str) -> String {
    format!(
        r#"
        <a class="job-listing" href="/jobs/{0}">
            <h3 class="job-listing-title">{0}</h3>
            <h4 class="job-listing-company">Company {0}</h4>
            <p class="job-listing-text">About {0}</p>
            <div class="job-listing-footer">
                <ul>
                    <li>Harare</li>
                    <li>Expires 2025-01-01</li>
                </ul>
            </div>
        </a>"#,
        title
    )
}

fn page(listings: &[String]) -> String {
    format!(
        "<html><body><div class=\"listings-container\">{}</div></body></html>",
        listings.concat()
    )
}

fn numbered_jobs(count: usize) -> Vec<String> {
    (1..=count).map(|i| listing(&format!("Job {}", i))).collect()
}

fn config_for(server: &MockServer, temp_dir: &TempDir) -> ScraperConfig {
    ScraperConfig {
        url: server.url("/jobs/"),
        output_path: temp_dir.path().to_str().unwrap().to_string(),
        ..ScraperConfig::default()
    }
}

async fn serve(server: &MockServer, body: String) {
    server
        .mock_async(move |when, then| {
            when.method(GET).path("/jobs/");
            then.status(200)
                .header("Content-Type", "text/html; charset=utf-8")
                .body(body);
        })
        .await;
}

fn read_output(temp_dir: &TempDir) -> String {
    std::fs::read_to_string(temp_dir.path().join("scraped_jobs.csv")).unwrap()
}

#[tokio::test]
async fn test_end_to_end_run_writes_csv() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;

    let sparse = r#"<a class="job-listing"><h3 class="job-listing-title">Driver</h3>
        <div class="job-listing-footer"><ul><li>Mutare</li></ul></div></a>"#;
    serve(&server, page(&[listing("Accountant"), sparse.to_string()])).await;

    let config = config_for(&server, &temp_dir);
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = ScrapePipeline::new(storage, config).unwrap();
    let engine = ScrapeEngine::new(pipeline);

    let report = engine.run().await.unwrap();
    assert_eq!(report.rows_written, 2);
    assert_eq!(report.rows_skipped, 0);
    assert!(report.output_path.ends_with("scraped_jobs.csv"));

    let content = read_output(&temp_dir);
    let lines: Vec<&str> = content.split("\r\n").collect();
    assert_eq!(lines[0], HEADER);
    assert_eq!(
        lines[1],
        "Accountant,Company Accountant,Harare,2025-01-01,About Accountant"
    );
    assert_eq!(
        lines[2],
        "Driver,Unknown Company,Unknown Location,No expiry date,No description available"
    );
    assert_eq!(lines[3], "");
}

#[tokio::test]
async fn test_only_first_ten_listings_are_written() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;
    serve(&server, page(&numbered_jobs(15))).await;

    let config = config_for(&server, &temp_dir);
    let storage = LocalStorage::new(config.output_path.clone());
    let engine = ScrapeEngine::new(ScrapePipeline::new(storage, config).unwrap());

    let status = engine.run_guarded().await;
    assert!(matches!(status, RunStatus::Completed(ref r) if r.rows_written == 10));

    let content = read_output(&temp_dir);
    let titles: Vec<&str> = content
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap())
        .collect();
    let expected: Vec<String> = (1..=10).map(|i| format!("Job {}", i)).collect();
    assert_eq!(titles, expected);
}

/// Fails on one title, delegates everything else.
struct FailOnTitle {
    inner: FieldExtractor,
    title: &'static str,
    position: usize,
}

impl ListingExtractor for FailOnTitle {
    fn extract(&self, listing: ElementRef<'_>) -> job_scraper::Result<ListingRecord> {
        let record = self.inner.extract(listing)?;
        if record.title == self.title {
            return Err(ScraperError::Extraction {
                position: self.position,
                message: format!("cannot handle {}", record.title),
            });
        }
        Ok(record)
    }
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn lines_at(&self, level: &str) -> Vec<String> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| line.contains(level))
            .map(str::to_string)
            .collect()
    }

    fn count_level(&self, level: &str) -> usize {
        self.lines_at(level).len()
    }
}

#[tokio::test]
async fn test_failing_listing_is_skipped_and_others_kept_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;
    serve(&server, page(&numbered_jobs(5))).await;

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let config = config_for(&server, &temp_dir);
    let storage = LocalStorage::new(config.output_path.clone());
    let extractor = FailOnTitle {
        inner: FieldExtractor::new().unwrap(),
        title: "Job 3",
        position: 3,
    };
    let pipeline = ScrapePipeline::with_extractor(storage, config, extractor).unwrap();
    let engine = ScrapeEngine::new(pipeline);

    let report = engine.run().await.unwrap();
    assert_eq!(report.rows_written, 4);
    assert_eq!(report.rows_skipped, 1);

    let content = read_output(&temp_dir);
    let titles: Vec<&str> = content
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap())
        .collect();
    assert_eq!(titles, ["Job 1", "Job 2", "Job 4", "Job 5"]);

    let errors = logs.lines_at("ERROR");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Error processing job #3"));
    assert!(errors[0].contains("cannot handle Job 3"));
}


#[tokio::test]
async fn test_no_listings_writes_nothing_and_warns_once() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;
    serve(
        &server,
        "<html><body><p>No vacancies today</p></body></html>".to_string(),
    )
    .await;

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let config = config_for(&server, &temp_dir);
    let storage = LocalStorage::new(config.output_path.clone());
    let engine = ScrapeEngine::new(ScrapePipeline::new(storage, config).unwrap());

    let status = engine.run_guarded().await;

    assert_eq!(status, RunStatus::NoListings);
    assert!(!temp_dir.path().join("scraped_jobs.csv").exists());
    assert_eq!(logs.count_level("WARN"), 1);
    assert_eq!(logs.count_level("ERROR"), 0);
}

#[tokio::test]
async fn test_repeated_runs_produce_identical_files() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;
    serve(&server, page(&numbered_jobs(4))).await;

    let config = config_for(&server, &temp_dir);
    let storage = LocalStorage::new(config.output_path.clone());
    let engine = ScrapeEngine::new(ScrapePipeline::new(storage, config).unwrap());

    let path = temp_dir.path().join("scraped_jobs.csv");
    engine.run().await.unwrap();
    let first = std::fs::read(&path).unwrap();
    engine.run().await.unwrap();
    let second = std::fs::read(&path).unwrap();

    assert_eq!(first, second);
    assert!(first.starts_with(HEADER.as_bytes()));
}

#[tokio::test]
async fn test_transport_failure_leaves_previous_output_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;
    let failing = server
        .mock_async(|when, then| {
            when.method(GET).path("/jobs/");
            then.status(503);
        })
        .await;

    let previous = format!("{}\r\nOld,Row,From,Yesterday,Run\r\n", HEADER);
    let path = temp_dir.path().join("scraped_jobs.csv");
    std::fs::write(&path, &previous).unwrap();

    let config = config_for(&server, &temp_dir);
    let storage = LocalStorage::new(config.output_path.clone());
    let engine = ScrapeEngine::new(ScrapePipeline::new(storage, config).unwrap());

    let status = engine.run_guarded().await;

    failing.assert_async().await;
    assert_eq!(status, RunStatus::Aborted(ErrorCategory::Transport));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), previous);
}

#[tokio::test]
async fn test_unwritable_output_is_reported_as_output_error() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;
    serve(&server, page(&numbered_jobs(1))).await;

    // A regular file where the output directory should be.
    let blocker = temp_dir.path().join("not-a-directory");
    std::fs::write(&blocker, "x").unwrap();

    let config = ScraperConfig {
        output_path: blocker.to_str().unwrap().to_string(),
        ..config_for(&server, &temp_dir)
    };
    let storage = LocalStorage::new(config.output_path.clone());
    let engine = ScrapeEngine::new(ScrapePipeline::new(storage, config).unwrap());

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, ScraperError::OutputOpen { .. }));
    assert!(!Path::new(&blocker).join("scraped_jobs.csv").exists());
}
