use crate::core::{Pipeline, RunStatus, ScrapeEngine};
use chrono::{Days, NaiveDateTime, NaiveTime};
use std::future::Future;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::MissedTickBehavior;

/// A once-a-day trigger at a fixed local time of day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyTrigger {
    at: NaiveTime,
    next_run: NaiveDateTime,
}

impl DailyTrigger {
    pub fn new(at: NaiveTime, now: NaiveDateTime) -> Self {
        Self {
            at,
            next_run: next_occurrence(at, now),
        }
    }

    pub fn next_run(&self) -> NaiveDateTime {
        self.next_run
    }

    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        now >= self.next_run
    }

    /// Returns true at most once per due occurrence, moving the trigger to
    /// the next day.
    pub fn take_due(&mut self, now: NaiveDateTime) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.next_run = next_occurrence(self.at, now);
        true
    }
}

fn next_occurrence(at: NaiveTime, now: NaiveDateTime) -> NaiveDateTime {
    let today = now.date().and_time(at);
    if today > now {
        return today;
    }
    now.date()
        .checked_add_days(Days::new(1))
        .map(|tomorrow| tomorrow.and_time(at))
        .unwrap_or(NaiveDateTime::MAX)
}

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Installs the Ctrl-C handler right away and hands back a receiver that
/// resolves once the signal has arrived.
///
/// Call this before the first run: a signal received while a run is going
/// is held in the channel instead of killing the process, and the run
/// finishes first.
pub async fn listen_for_ctrl_c() -> oneshot::Receiver<()> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("🛑 Ctrl+C received, finishing the current run first");
                let _ = tx.send(());
            }
            Err(e) => {
                tracing::error!("❌ Could not listen for Ctrl+C: {}", e);
                // Keep the sender alive so the receiver never resolves.
                std::future::pending::<()>().await;
                drop(tx);
            }
        }
    });
    // Give the listener a chance to register before any run starts.
    tokio::task::yield_now().await;
    rx
}

pub struct Scheduler {
    trigger: DailyTrigger,
    poll_interval: Duration,
    clock: Box<dyn Fn() -> NaiveDateTime + Send + Sync>,
}

impl Scheduler {
    pub fn new(trigger: DailyTrigger, poll_interval: Duration) -> Self {
        Self {
            trigger,
            poll_interval,
            clock: Box::new(local_now),
        }
    }

    /// Replaces the local wall clock the trigger is checked against.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> NaiveDateTime + Send + Sync + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    /// Polls the trigger every `poll_interval` and runs the engine when due.
    /// Returns once `shutdown` resolves; a run in progress finishes first.
    pub async fn run_until<P, F>(&mut self, engine: &ScrapeEngine<P>, shutdown: F)
    where
        P: Pipeline,
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::info!("🕒 Next scheduled run at {}", self.trigger.next_run());

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    tracing::info!("👋 Stopping the scheduler...");
                    break;
                }
                _ = ticker.tick() => {
                    let now = (self.clock)();
                    if self.trigger.take_due(now) {
                        if let RunStatus::Completed(report) = engine.run_guarded().await {
                            tracing::debug!("Scheduled run wrote {} rows", report.rows_written);
                        }
                        tracing::info!("🕒 Next scheduled run at {}", self.trigger.next_run());
                    }
                }
            }
        }
    }
}
