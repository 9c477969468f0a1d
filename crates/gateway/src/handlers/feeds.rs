//! Feed analysis handler
//!
//! Lets an operator point at a feed URL before creating a producer and
//! see what would come back: liveness, article count, categories.

use crate::AppState;
use axum::{extract::State, Json};
use newsforge_common::errors::{AppError, Result};
use newsforge_feed::{FeedArticle, FeedOutcome};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeFeedRequest {
    #[validate(url)]
    pub url: String,

    /// Cap on articles returned; defaults to the service-wide setting
    pub max_articles: Option<usize>,
}

#[derive(Serialize)]
pub struct AnalyzeFeedResponse {
    pub status: String,
    pub feed_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_title: Option<String>,
    pub articles: Vec<FeedArticle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Fetch and parse a feed without creating anything.
///
/// Upstream failures come back as `status: "error"` in a 200 response;
/// the feed being down is the answer, not a fault.
pub async fn analyze_feed(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeFeedRequest>,
) -> Result<Json<AnalyzeFeedResponse>> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let outcome = state.fetcher.analyze(&request.url, request.max_articles).await;

    let response = match outcome {
        FeedOutcome::Success(report) => AnalyzeFeedResponse {
            status: "success".to_string(),
            feed_url: report.feed_url,
            feed_title: Some(report.feed_title),
            articles: report.articles,
            error: None,
        },
        FeedOutcome::Error { message } => AnalyzeFeedResponse {
            status: "error".to_string(),
            feed_url: request.url,
            feed_title: None,
            articles: Vec::new(),
            error: Some(message),
        },
    };

    Ok(Json(response))
}
