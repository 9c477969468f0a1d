//! Producer management handlers

use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use newsforge_common::{
    db::models::Producer,
    db::Repository,
    errors::{AppError, Result},
};
use newsforge_pipeline::{ProducerRunner, RunSummary};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProducerRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(url)]
    pub url: String,

    pub category_id: Uuid,

    #[serde(default)]
    pub is_active: bool,

    #[validate(range(min = 1))]
    pub poll_frequency_minutes: i32,

    #[validate(range(min = 1, max = 100))]
    pub number_of_articles: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProducerRequest {
    pub name: Option<String>,
    pub url: Option<String>,
    pub category_id: Option<Uuid>,
    pub poll_frequency_minutes: Option<i32>,
    pub number_of_articles: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleProducerRequest {
    pub is_active: bool,
}

#[derive(Serialize)]
pub struct ProducerResponse {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub category_id: Uuid,
    pub is_active: bool,
    pub poll_frequency_minutes: i32,
    pub number_of_articles: i32,
    pub last_polled_at: Option<String>,
    pub next_run_at: Option<String>,
    pub last_run: LastRunResponse,
    pub created_at: String,
}

#[derive(Serialize)]
pub struct LastRunResponse {
    pub success: Option<bool>,
    pub feed_status: Option<String>,
    pub category_status: Option<String>,
    pub articles_found: i32,
    pub articles_queued: i32,
    pub articles: serde_json::Value,
    pub error: Option<String>,
}

impl From<Producer> for ProducerResponse {
    fn from(p: Producer) -> Self {
        Self {
            id: p.id,
            name: p.name,
            url: p.url,
            category_id: p.category_id,
            is_active: p.is_active,
            poll_frequency_minutes: p.poll_frequency_minutes,
            number_of_articles: p.number_of_articles,
            last_polled_at: p.last_polled_at.map(|dt| dt.to_rfc3339()),
            next_run_at: p.next_run_at.map(|dt| dt.to_rfc3339()),
            last_run: LastRunResponse {
                success: p.last_run_success,
                feed_status: p.last_run_feed_status,
                category_status: p.last_run_category_status,
                articles_found: p.last_run_articles_found,
                articles_queued: p.last_run_articles_queued,
                articles: p.last_run_articles,
                error: p.last_run_error,
            },
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// Create a new producer
pub async fn create_producer(
    State(state): State<AppState>,
    Json(request): Json<CreateProducerRequest>,
) -> Result<(StatusCode, Json<ProducerResponse>)> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());

    // The category must exist before anything can point at it
    repo.find_category_by_id(request.category_id)
        .await?
        .ok_or_else(|| AppError::CategoryNotFound {
            id: request.category_id.to_string(),
        })?;

    let producer = repo
        .create_producer(
            request.name,
            request.url,
            request.category_id,
            request.is_active,
            request.poll_frequency_minutes,
            request.number_of_articles,
        )
        .await?;

    tracing::info!(producer_id = %producer.id, name = %producer.name, "Producer created");

    Ok((StatusCode::CREATED, Json(producer.into())))
}

/// List all producers
pub async fn list_producers(State(state): State<AppState>) -> Result<Json<Vec<ProducerResponse>>> {
    let repo = Repository::new(state.db.clone());
    let producers = repo.list_producers().await?;

    Ok(Json(producers.into_iter().map(Into::into).collect()))
}

/// Get a producer by ID
pub async fn get_producer(
    State(state): State<AppState>,
    Path(producer_id): Path<Uuid>,
) -> Result<Json<ProducerResponse>> {
    let repo = Repository::new(state.db.clone());

    let producer = repo
        .find_producer_by_id(producer_id)
        .await?
        .ok_or_else(|| AppError::ProducerNotFound {
            id: producer_id.to_string(),
        })?;

    Ok(Json(producer.into()))
}

/// Update producer settings
pub async fn update_producer(
    State(state): State<AppState>,
    Path(producer_id): Path<Uuid>,
    Json(request): Json<UpdateProducerRequest>,
) -> Result<Json<ProducerResponse>> {
    let repo = Repository::new(state.db.clone());

    if let Some(category_id) = request.category_id {
        repo.find_category_by_id(category_id)
            .await?
            .ok_or_else(|| AppError::CategoryNotFound {
                id: category_id.to_string(),
            })?;
    }

    let producer = repo
        .update_producer(
            producer_id,
            request.name,
            request.url,
            request.category_id,
            request.poll_frequency_minutes,
            request.number_of_articles,
        )
        .await?;

    tracing::info!(producer_id = %producer.id, "Producer updated");

    Ok(Json(producer.into()))
}

/// Delete a producer and its queue items
pub async fn delete_producer(
    State(state): State<AppState>,
    Path(producer_id): Path<Uuid>,
) -> Result<StatusCode> {
    let repo = Repository::new(state.db.clone());
    repo.delete_producer(producer_id).await?;

    tracing::info!(producer_id = %producer_id, "Producer deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Toggle a producer's active status.
///
/// Enabling schedules the next run; disabling clears it.
pub async fn toggle_producer(
    State(state): State<AppState>,
    Path(producer_id): Path<Uuid>,
    Json(request): Json<ToggleProducerRequest>,
) -> Result<Json<ProducerResponse>> {
    let repo = Repository::new(state.db.clone());
    let producer = repo.toggle_producer(producer_id, request.is_active).await?;

    tracing::info!(
        producer_id = %producer.id,
        is_active = producer.is_active,
        "Producer toggled"
    );

    Ok(Json(producer.into()))
}

/// Run a producer now, regardless of its schedule
pub async fn run_producer(
    State(state): State<AppState>,
    Path(producer_id): Path<Uuid>,
) -> Result<Json<RunSummary>> {
    let repo = Repository::new(state.db.clone());
    let runner = ProducerRunner::new(repo, state.fetcher.clone());

    let summary = runner.run(producer_id).await?;

    Ok(Json(summary))
}
