//! Queue management handlers
//!
//! Dedup is two explicit steps: `POST /queue/dedup` returns a pure
//! plan, and deletion goes through the same best-effort bulk-delete
//! endpoint after operator confirmation.

use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use newsforge_common::{
    db::models::{QueueItem, QueueStatus},
    db::{BulkDeleteOutcome, QueueStats, Repository},
    errors::{AppError, Result},
};
use newsforge_pipeline::{dedup, DedupPlan, QueueProcessor};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEFAULT_LIST_LIMIT: u64 = 100;
const DEFAULT_SEARCH_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct ListQueueParams {
    pub status: Option<String>,
    pub producer_id: Option<Uuid>,
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQueueParams {
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct IdListRequest {
    pub ids: Vec<Uuid>,
}

#[derive(Serialize)]
pub struct QueueItemResponse {
    pub id: Uuid,
    pub producer_id: Uuid,
    pub title: String,
    pub description: String,
    pub url: String,
    pub published_at: String,
    pub rss_categories: Vec<String>,
    pub status: String,
    pub retry_count: i32,
    pub error_message: Option<String>,
    pub generated_article_id: Option<Uuid>,
    pub created_at: String,
}

impl From<QueueItem> for QueueItemResponse {
    fn from(item: QueueItem) -> Self {
        let rss_categories = item.category_list();
        Self {
            id: item.id,
            producer_id: item.producer_id,
            title: item.title,
            description: item.description,
            url: item.url,
            published_at: item.published_at.to_rfc3339(),
            rss_categories,
            status: item.status,
            retry_count: item.retry_count,
            error_message: item.error_message,
            generated_article_id: item.generated_article_id,
            created_at: item.created_at.to_rfc3339(),
        }
    }
}

fn parse_status(raw: &str) -> Result<QueueStatus> {
    match raw {
        "waiting" => Ok(QueueStatus::Waiting),
        "processing" => Ok(QueueStatus::Processing),
        "completed" => Ok(QueueStatus::Completed),
        "failed" => Ok(QueueStatus::Failed),
        other => Err(AppError::InvalidFormat {
            message: format!("Unknown queue status: {}", other),
        }),
    }
}

/// List queue items, optionally filtered by status and producer
pub async fn list_queue(
    State(state): State<AppState>,
    Query(params): Query<ListQueueParams>,
) -> Result<Json<Vec<QueueItemResponse>>> {
    let status = params.status.as_deref().map(parse_status).transpose()?;
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);

    let repo = Repository::new(state.db.clone());
    let items = repo
        .list_queue_items(status, params.producer_id, limit)
        .await?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Search waiting queue items by title/description substring
pub async fn search_queue(
    State(state): State<AppState>,
    Query(params): Query<SearchQueueParams>,
) -> Result<Json<Vec<QueueItemResponse>>> {
    let term = params.q.trim();
    if term.is_empty() {
        return Err(AppError::MissingField {
            field: "q".to_string(),
        });
    }

    let repo = Repository::new(state.db.clone());
    let items = repo
        .search_queue_items(term, params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT))
        .await?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Queue counts by status
pub async fn queue_stats(State(state): State<AppState>) -> Result<Json<QueueStats>> {
    let repo = Repository::new(state.db.clone());
    let stats = repo.queue_stats().await?;

    newsforge_common::metrics::record_queue_depth(stats.waiting);

    Ok(Json(stats))
}

/// Delete a single queue item
pub async fn delete_queue_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> Result<StatusCode> {
    let repo = Repository::new(state.db.clone());

    if !repo.delete_queue_item(item_id).await? {
        return Err(AppError::QueueItemNotFound {
            id: item_id.to_string(),
        });
    }

    tracing::info!(item_id = %item_id, "Queue item deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Best-effort bulk delete with per-id reporting
pub async fn bulk_delete(
    State(state): State<AppState>,
    Json(request): Json<IdListRequest>,
) -> Result<Json<BulkDeleteOutcome>> {
    if request.ids.is_empty() {
        return Err(AppError::MissingField {
            field: "ids".to_string(),
        });
    }

    let repo = Repository::new(state.db.clone());
    let outcome = repo.bulk_delete_queue_items(&request.ids).await?;

    tracing::info!(
        requested = outcome.total_requested,
        deleted = outcome.success_count,
        failed = outcome.failed_count,
        "Bulk delete finished"
    );

    Ok(Json(outcome))
}

/// Propose duplicates among the selected queue items.
///
/// A pure read: nothing is deleted until the plan's ids are sent to
/// the bulk-delete endpoint.
pub async fn plan_dedup(
    State(state): State<AppState>,
    Json(request): Json<IdListRequest>,
) -> Result<Json<DedupPlan>> {
    if request.ids.is_empty() {
        return Err(AppError::MissingField {
            field: "ids".to_string(),
        });
    }

    let repo = Repository::new(state.db.clone());

    let mut items = Vec::with_capacity(request.ids.len());
    for id in &request.ids {
        if let Some(item) = repo.find_queue_item(*id).await? {
            // Completed and failed items carry processing history; only
            // unprocessed items are candidates for pruning
            if !item.is_terminal() {
                items.push(item);
            }
        }
    }

    Ok(Json(dedup::plan_dedup(&items)))
}

/// Process a queue item through the rewriter now
pub async fn process_queue_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> Result<Json<super::articles::ArticleResponse>> {
    let repo = Repository::new(state.db.clone());
    let processor = QueueProcessor::new(repo, state.rewriter.clone());

    let article = processor.process(item_id).await?;

    Ok(Json(article.into()))
}
