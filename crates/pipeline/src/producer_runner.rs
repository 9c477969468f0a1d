//! Producer feed runs
//!
//! A run is internally sequential: fetch → filter → enqueue → record.
//! Every outcome, including a dead feed or missing category, is written
//! back onto the producer as a run summary; only a missing producer is
//! an error to the caller.

use chrono::{Duration, Utc};
use newsforge_common::db::models::Producer;
use newsforge_common::db::{NewQueueItem, Repository, RunResultUpdate};
use newsforge_common::errors::{AppError, Result};
use newsforge_common::metrics;
use newsforge_feed::{CategoryFilter, FeedFetcher, FeedOutcome};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Result summary of a single producer run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub producer_id: Uuid,
    pub success: bool,
    pub feed_status: String,
    pub category_status: Option<String>,
    pub articles_found: usize,
    pub articles_queued: usize,
    pub error: Option<String>,
}

/// Executes producer feed runs
#[derive(Clone)]
pub struct ProducerRunner {
    repo: Repository,
    fetcher: FeedFetcher,
}

impl ProducerRunner {
    pub fn new(repo: Repository, fetcher: FeedFetcher) -> Self {
        Self { repo, fetcher }
    }

    /// Run a producer now: fetch its feed, filter by category keywords,
    /// enqueue matches, and persist the run summary.
    #[instrument(skip(self), fields(producer_id = %producer_id))]
    pub async fn run(&self, producer_id: Uuid) -> Result<RunSummary> {
        let started = Instant::now();

        let producer = self
            .repo
            .find_producer_by_id(producer_id)
            .await?
            .ok_or_else(|| AppError::ProducerNotFound {
                id: producer_id.to_string(),
            })?;

        let now = Utc::now();
        self.repo.mark_producer_polled(producer_id, now).await?;

        let outcome = self
            .fetcher
            .analyze(&producer.url, Some(producer.number_of_articles.max(0) as usize))
            .await;

        let summary = self.settle_run(&producer, outcome).await?;

        // Guarded on is_active inside the UPDATE: a disable racing this
        // run must not resurrect the schedule
        let next_run = now + Duration::minutes(producer.poll_frequency_minutes as i64);
        let rescheduled = self
            .repo
            .schedule_next_run_if_active(producer_id, next_run)
            .await?;
        if !rescheduled {
            info!(producer_id = %producer_id, "Producer inactive, next run not scheduled");
        }

        metrics::record_producer_run(
            started.elapsed().as_secs_f64(),
            summary.success,
            summary.articles_queued,
        );

        info!(
            producer = %producer.name,
            success = summary.success,
            found = summary.articles_found,
            queued = summary.articles_queued,
            "Producer run finished"
        );

        Ok(summary)
    }

    /// Turn a fetch outcome into queue items and a persisted run record
    async fn settle_run(&self, producer: &Producer, outcome: FeedOutcome) -> Result<RunSummary> {
        let category = self.repo.find_category_by_id(producer.category_id).await?;
        let category_status = if category.is_some() {
            "found".to_string()
        } else {
            "not_found".to_string()
        };

        let mut run_articles = serde_json::json!([]);

        let summary = match outcome {
            FeedOutcome::Error { message } => {
                warn!(producer = %producer.name, error = %message, "Feed not live");
                RunSummary {
                    producer_id: producer.id,
                    success: false,
                    feed_status: "not_live".to_string(),
                    category_status: Some(category_status),
                    articles_found: 0,
                    articles_queued: 0,
                    error: Some(message),
                }
            }

            FeedOutcome::Success(report) => {
                let articles_found = report.articles.len();

                match category {
                    None => RunSummary {
                        producer_id: producer.id,
                        success: false,
                        feed_status: "live".to_string(),
                        category_status: Some(category_status),
                        articles_found,
                        articles_queued: 0,
                        error: Some(format!(
                            "Category {} not found",
                            producer.category_id
                        )),
                    },

                    Some(category) => {
                        let filter = CategoryFilter::from_keywords(&category.keyword_list());
                        let matched = filter.apply(report.articles);

                        let items: Vec<NewQueueItem> = matched
                            .iter()
                            .map(|a| NewQueueItem {
                                title: a.title.clone(),
                                description: a.excerpt.clone(),
                                url: a.url.clone(),
                                published_at: a.published_at,
                                rss_categories: a.categories.clone(),
                            })
                            .collect();

                        let queued = self.repo.enqueue_items(producer.id, items).await?;

                        run_articles = serde_json::json!(matched
                            .iter()
                            .map(|a| serde_json::json!({
                                "title": a.title,
                                "url": a.url,
                                "categories": a.categories,
                            }))
                            .collect::<Vec<_>>());

                        RunSummary {
                            producer_id: producer.id,
                            success: true,
                            feed_status: "live".to_string(),
                            category_status: Some(category_status),
                            articles_found,
                            articles_queued: queued.len(),
                            error: None,
                        }
                    }
                }
            }
        };

        self.repo
            .record_run_result(
                producer.id,
                RunResultUpdate {
                    success: summary.success,
                    feed_status: summary.feed_status.clone(),
                    category_status: summary.category_status.clone(),
                    articles_found: summary.articles_found as i32,
                    articles_queued: summary.articles_queued as i32,
                    articles: run_articles,
                    error: summary.error.clone(),
                },
            )
            .await?;

        Ok(summary)
    }
}
