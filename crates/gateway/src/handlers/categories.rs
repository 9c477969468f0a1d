//! Category management handlers

use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use newsforge_common::{
    db::models::Category,
    db::Repository,
    errors::{AppError, Result},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1, max = 200))]
    pub slug: String,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

#[derive(Serialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub keywords: Vec<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        let keywords = c.keyword_list();
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            keywords,
            is_active: c.is_active,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

/// Create a new category
pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>)> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());

    let slug = request.slug.trim().to_lowercase();
    if repo.find_category_by_slug(&slug).await?.is_some() {
        return Err(AppError::Duplicate {
            message: format!("Category slug already exists: {}", slug),
        });
    }

    let category = repo
        .create_category(request.name, slug, request.keywords, request.is_active)
        .await?;

    tracing::info!(category_id = %category.id, slug = %category.slug, "Category created");

    Ok((StatusCode::CREATED, Json(category.into())))
}

/// List all categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>> {
    let repo = Repository::new(state.db.clone());
    let categories = repo.list_categories().await?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// Get a category by ID
pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<Json<CategoryResponse>> {
    let repo = Repository::new(state.db.clone());

    let category = repo
        .find_category_by_id(category_id)
        .await?
        .ok_or_else(|| AppError::CategoryNotFound {
            id: category_id.to_string(),
        })?;

    Ok(Json(category.into()))
}

/// Update a category's name, keywords, or active flag
pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>> {
    let repo = Repository::new(state.db.clone());

    let category = repo
        .update_category(
            category_id,
            request.name,
            request.keywords,
            request.is_active,
        )
        .await?;

    tracing::info!(category_id = %category.id, "Category updated");

    Ok(Json(category.into()))
}
