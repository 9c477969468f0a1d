//! Article management handlers
//!
//! Generated articles arrive in `pending` and stay there until a human
//! approves, rejects, or edits them.

use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use newsforge_common::{
    db::models::{Article, ArticleStatus},
    db::Repository,
    errors::{AppError, Result},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEFAULT_LIST_LIMIT: u64 = 100;

#[derive(Debug, Deserialize)]
pub struct ListArticlesParams {
    pub status: Option<String>,
    pub category_id: Option<Uuid>,
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub excerpt: Option<String>,
    pub topics: Option<Vec<String>>,
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct ArticleResponse {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub excerpt: String,
    pub category_id: Uuid,
    pub topics: Vec<String>,
    pub source_urls: Vec<String>,
    pub is_auto_generated: bool,
    pub status: String,
    pub view_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Article> for ArticleResponse {
    fn from(a: Article) -> Self {
        let topics = a.topic_list();
        let source_urls = a.source_url_list();
        Self {
            id: a.id,
            title: a.title,
            body: a.body,
            excerpt: a.excerpt,
            category_id: a.category_id,
            topics,
            source_urls,
            is_auto_generated: a.is_auto_generated,
            status: a.status,
            view_count: a.view_count,
            created_at: a.created_at.to_rfc3339(),
            updated_at: a.updated_at.to_rfc3339(),
        }
    }
}

fn parse_status(raw: &str) -> Result<ArticleStatus> {
    match raw {
        "pending" => Ok(ArticleStatus::Pending),
        "approved" => Ok(ArticleStatus::Approved),
        "rejected" => Ok(ArticleStatus::Rejected),
        other => Err(AppError::InvalidFormat {
            message: format!("Unknown article status: {}", other),
        }),
    }
}

/// List articles, optionally filtered by status and category
pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<ListArticlesParams>,
) -> Result<Json<Vec<ArticleResponse>>> {
    let status = params.status.as_deref().map(parse_status).transpose()?;
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);

    let repo = Repository::new(state.db.clone());
    let articles = repo.list_articles(status, params.category_id, limit).await?;

    Ok(Json(articles.into_iter().map(Into::into).collect()))
}

/// Get an article by ID
pub async fn get_article(
    State(state): State<AppState>,
    Path(article_id): Path<Uuid>,
) -> Result<Json<ArticleResponse>> {
    let repo = Repository::new(state.db.clone());

    let article = repo
        .find_article_by_id(article_id)
        .await?
        .ok_or_else(|| AppError::ArticleNotFound {
            id: article_id.to_string(),
        })?;

    Ok(Json(article.into()))
}

/// Edit an article's content or review status
pub async fn update_article(
    State(state): State<AppState>,
    Path(article_id): Path<Uuid>,
    Json(request): Json<UpdateArticleRequest>,
) -> Result<Json<ArticleResponse>> {
    let status = request.status.as_deref().map(parse_status).transpose()?;

    let repo = Repository::new(state.db.clone());
    let article = repo
        .update_article(
            article_id,
            request.title,
            request.body,
            request.excerpt,
            request.topics,
            status,
        )
        .await?;

    tracing::info!(article_id = %article.id, status = %article.status, "Article updated");

    Ok(Json(article.into()))
}

/// Count a reader view of an article
pub async fn record_view(
    State(state): State<AppState>,
    Path(article_id): Path<Uuid>,
) -> Result<StatusCode> {
    let repo = Repository::new(state.db.clone());

    repo.find_article_by_id(article_id)
        .await?
        .ok_or_else(|| AppError::ArticleNotFound {
            id: article_id.to_string(),
        })?;

    repo.increment_view_count(article_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete an article
pub async fn delete_article(
    State(state): State<AppState>,
    Path(article_id): Path<Uuid>,
) -> Result<StatusCode> {
    let repo = Repository::new(state.db.clone());

    if !repo.delete_article(article_id).await? {
        return Err(AppError::ArticleNotFound {
            id: article_id.to_string(),
        });
    }

    tracing::info!(article_id = %article_id, "Article deleted");

    Ok(StatusCode::NO_CONTENT)
}
