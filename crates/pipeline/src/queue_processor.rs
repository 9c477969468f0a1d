//! Queue item processing
//!
//! Claiming is an atomic status compare-and-swap, so a manual "process
//! now" racing an automatic trigger resolves to exactly one winner.
//! Generated articles always land in `pending`; publication is a human
//! decision.

use newsforge_common::db::models::{Article, QueueItem};
use newsforge_common::db::Repository;
use newsforge_common::errors::{AppError, Result};
use newsforge_common::llm::Rewriter;
use newsforge_common::metrics;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, instrument};
use uuid::Uuid;

const SYSTEM_PROMPT: &str = "You are a news editor. Rewrite the provided article as an \
original, fact-focused news piece. Respond with a single JSON object containing: \
title, body (markdown), excerpt, category, source_urls (array), \
image_gen_prompts (array of 3), topics (array of 5 to 10 single-word keywords). \
Respond with the JSON object only.";

/// Processes queue items through the LLM rewriter
#[derive(Clone)]
pub struct QueueProcessor {
    repo: Repository,
    rewriter: Arc<dyn Rewriter>,
}

impl QueueProcessor {
    pub fn new(repo: Repository, rewriter: Arc<dyn Rewriter>) -> Self {
        Self { repo, rewriter }
    }

    /// Process a single queue item: claim, rewrite, post-process, and
    /// create a pending article.
    ///
    /// On any failure after the claim, the item is marked `failed` with
    /// the error persisted, and the error is re-raised.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn process(&self, item_id: Uuid) -> Result<Article> {
        let item = self.repo.claim_queue_item(item_id).await?;

        match self.rewrite_item(&item).await {
            Ok(article) => {
                self.repo.complete_queue_item(item.id, article.id).await?;
                metrics::record_queue_item(true);

                info!(
                    item_id = %item.id,
                    article_id = %article.id,
                    "Queue item completed"
                );
                Ok(article)
            }
            Err(e) => {
                metrics::record_queue_item(false);

                if let Err(mark_err) = self.repo.fail_queue_item(item.id, &e.to_string()).await {
                    error!(
                        item_id = %item.id,
                        error = %mark_err,
                        "Failed to record queue item failure"
                    );
                }
                Err(e)
            }
        }
    }

    async fn rewrite_item(&self, item: &QueueItem) -> Result<Article> {
        let producer = self
            .repo
            .find_producer_by_id(item.producer_id)
            .await?
            .ok_or_else(|| AppError::ProducerNotFound {
                id: item.producer_id.to_string(),
            })?;

        let user_prompt = build_user_prompt(item);

        let started = Instant::now();
        let completion = self.rewriter.rewrite(SYSTEM_PROMPT, &user_prompt).await;
        metrics::record_llm_request(
            started.elapsed().as_secs_f64(),
            self.rewriter.model_name(),
            completion.is_ok(),
        );
        let completion = completion?;

        let generated = crate::postprocess::parse_generated(&completion)?;
        let topics = crate::postprocess::sanitize_topics(&generated.topics);
        let body = crate::postprocess::bold_topics(&generated.body, &topics);

        // The source item is always cited, whatever the model returned
        let mut source_urls = generated.source_urls;
        if !source_urls.iter().any(|u| u == &item.url) {
            source_urls.insert(0, item.url.clone());
        }

        self.repo
            .create_article(
                generated.title,
                body,
                generated.excerpt,
                producer.category_id,
                topics,
                source_urls,
                true,
            )
            .await
    }
}

fn build_user_prompt(item: &QueueItem) -> String {
    let categories = item.category_list().join(", ");
    format!(
        "Title: {}\nURL: {}\nFeed categories: {}\nSummary: {}",
        item.title, item.url, categories, item.description
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_item() -> QueueItem {
        QueueItem {
            id: Uuid::new_v4(),
            producer_id: Uuid::new_v4(),
            title: "AI lab ships new model".to_string(),
            description: "A short summary".to_string(),
            url: "https://example.com/story".to_string(),
            published_at: Utc::now().into(),
            rss_categories: serde_json::json!(["AI", "Technology"]),
            status: "waiting".to_string(),
            retry_count: 0,
            error_message: None,
            generated_article_id: None,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_user_prompt_carries_item_context() {
        let item = sample_item();
        let prompt = build_user_prompt(&item);

        assert!(prompt.contains("AI lab ships new model"));
        assert!(prompt.contains("https://example.com/story"));
        assert!(prompt.contains("AI, Technology"));
    }
}
