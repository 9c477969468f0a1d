//! NewsForge Scheduler Worker
//!
//! Periodically sweeps for active producers whose next-run time has
//! elapsed and runs them:
//! 1. Fetch the producer's feed
//! 2. Filter articles by category keywords
//! 3. Enqueue matches for rewriting
//! 4. Record the run summary and reschedule

use newsforge_common::{config::AppConfig, db::DbPool, db::Repository, metrics, VERSION};
use newsforge_feed::FeedFetcher;
use newsforge_pipeline::{scheduler, ProducerRunner};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    if config.observability.json_logging {
        builder.json().init();
    } else {
        builder.init();
    }

    info!("Starting NewsForge Worker v{}", VERSION);

    // Initialize metrics
    metrics::register_metrics();
    if config.observability.metrics_port > 0 {
        let metrics_addr = metrics::install_exporter(config.observability.metrics_port)?;
        info!("Metrics exporter listening on {}", metrics_addr);
    }

    // Initialize database connection
    info!("Connecting to database...");
    let db = DbPool::new(&config.database).await?;
    let repo = Repository::new(db);

    // Initialize feed fetcher
    let fetcher = FeedFetcher::new(
        config.fetch.timeout_secs,
        &config.fetch.user_agent,
        config.fetch.max_articles,
    )?;

    let runner = ProducerRunner::new(repo.clone(), fetcher);

    // One-shot mode for external schedulers: run a single sweep and exit
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "sweep" {
        info!("Running single sweep...");
        let outcome = scheduler::run_sweep(&repo, &runner).await?;
        info!(
            due = outcome.due,
            succeeded = outcome.succeeded,
            failed = outcome.failed,
            "Sweep complete"
        );
        return Ok(());
    }

    // Service mode: sweep on an interval until shutdown
    let mut interval = tokio::time::interval(config.sweep_interval());
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    info!(
        interval_secs = config.scheduler.sweep_interval_secs,
        "Worker ready, starting sweep loop..."
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
            _ = interval.tick() => {
                // A failed sweep query is logged and retried next tick,
                // never fatal to the worker
                if let Err(e) = scheduler::run_sweep(&repo, &runner).await {
                    error!(error = %e, "Sweep failed");
                }
            }
        }
    }

    info!("Worker shutting down");
    Ok(())
}
