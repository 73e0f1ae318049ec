use clap::Parser;
use job_scraper::core::schedule::{listen_for_ctrl_c, DailyTrigger, Scheduler};
use job_scraper::utils::{logger, validation::Validate};
use job_scraper::{CliConfig, LocalStorage, RunStatus, ScrapeEngine, ScrapePipeline};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if let Err(e) = logger::init_logger(&config.log_file, cli.verbose) {
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("Starting job-scraper");
    tracing::debug!("Resolved config: {:?}", config);

    let daily_at = config.daily_time()?;
    let poll_interval = config.poll_interval();
    let run_on_start = config.run_on_start;

    let storage = LocalStorage::new(config.output_path.clone());
    let monitor_enabled = config.monitor;
    let pipeline = match ScrapePipeline::new(storage, config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("❌ Failed to build scraper: {}", e);
            std::process::exit(1);
        }
    };
    let engine = ScrapeEngine::new_with_monitoring(pipeline, monitor_enabled);

    let mut ctrl_c = listen_for_ctrl_c().await;

    if cli.once {
        let status = engine.run_guarded().await;
        if ctrl_c.try_recv().is_ok() {
            tracing::info!("👋 Stopping after the current run");
        }
        if let RunStatus::Aborted(category) = status {
            let code = category.severity().exit_code();
            if code != 0 {
                std::process::exit(code);
            }
        }
        return Ok(());
    }

    tracing::info!("📅 Scheduled daily scraping at {}", daily_at.format("%H:%M"));

    if run_on_start {
        tracing::info!("🚀 Running initial scrape...");
        engine.run_guarded().await;
    }

    let trigger = DailyTrigger::new(daily_at, chrono::Local::now().naive_local());
    let mut scheduler = Scheduler::new(trigger, poll_interval);

    tracing::info!("🕒 Job scheduler is running. Press Ctrl+C to stop.");
    scheduler
        .run_until(&engine, async move {
            let _ = ctrl_c.await;
        })
        .await;

    Ok(())
}
