//! Scheduler sweep
//!
//! Finds active producers whose next-run time has elapsed and runs
//! them concurrently. One producer's failure never blocks another's
//! run or the sweep itself.

use crate::producer_runner::ProducerRunner;
use chrono::Utc;
use newsforge_common::db::Repository;
use newsforge_common::errors::Result;
use tracing::{error, info, instrument};

/// Outcome counts for one sweep
#[derive(Debug, Clone, Copy)]
pub struct SweepOutcome {
    pub due: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Run all due producers once.
///
/// Returns Err only if the due-producer query itself fails; individual
/// run failures are logged and counted.
#[instrument(skip(repo, runner))]
pub async fn run_sweep(repo: &Repository, runner: &ProducerRunner) -> Result<SweepOutcome> {
    let due = repo.find_due_producers(Utc::now()).await?;

    if due.is_empty() {
        return Ok(SweepOutcome {
            due: 0,
            succeeded: 0,
            failed: 0,
        });
    }

    info!(count = due.len(), "Running due producers");

    let runs = due.iter().map(|producer| {
        let runner = runner.clone();
        let id = producer.id;
        let name = producer.name.clone();
        async move {
            match runner.run(id).await {
                Ok(summary) => summary.success,
                Err(e) => {
                    error!(producer = %name, error = %e, "Producer run failed");
                    false
                }
            }
        }
    });

    let results = futures::future::join_all(runs).await;
    let succeeded = results.iter().filter(|ok| **ok).count();

    let outcome = SweepOutcome {
        due: results.len(),
        succeeded,
        failed: results.len() - succeeded,
    };

    info!(
        due = outcome.due,
        succeeded = outcome.succeeded,
        failed = outcome.failed,
        "Sweep finished"
    );

    Ok(outcome)
}
