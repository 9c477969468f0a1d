//! Repository pattern for database operations
//!
//! Provides a clean interface for all data access operations
//! with proper error handling and transaction support. Queue item
//! claiming is implemented as a conditional UPDATE so the
//! waiting/failed -> processing transition is atomic at the storage
//! layer rather than read-then-write.

use crate::db::models::*;
use crate::db::DbPool;
use crate::errors::{AppError, Result};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A new queue item produced by a feed run
#[derive(Debug, Clone)]
pub struct NewQueueItem {
    pub title: String,
    pub description: String,
    pub url: String,
    pub published_at: chrono::DateTime<chrono::Utc>,
    pub rss_categories: Vec<String>,
}

/// Run summary persisted on the producer after each poll
#[derive(Debug, Clone)]
pub struct RunResultUpdate {
    pub success: bool,
    pub feed_status: String,
    pub category_status: Option<String>,
    pub articles_found: i32,
    pub articles_queued: i32,
    pub articles: serde_json::Value,
    pub error: Option<String>,
}

/// Queue counts by status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueStats {
    pub total: u64,
    pub waiting: u64,
    pub processing: u64,
    pub completed: u64,
    pub failed: u64,
}

/// Outcome of a best-effort bulk delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteOutcome {
    pub success: bool,
    pub success_count: usize,
    pub failed_count: usize,
    pub total_requested: usize,
    pub failed_ids: Vec<Uuid>,
    pub errors: Vec<String>,
}

impl BulkDeleteOutcome {
    fn new(total_requested: usize) -> Self {
        Self {
            success: true,
            success_count: 0,
            failed_count: 0,
            total_requested,
            failed_ids: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn record_success(&mut self) {
        self.success_count += 1;
    }

    fn record_failure(&mut self, id: Uuid, error: String) {
        self.success = false;
        self.failed_count += 1;
        self.failed_ids.push(id);
        self.errors.push(error);
    }
}

/// Escape LIKE wildcards so a search term matches literally
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get the read connection
    fn read_conn(&self) -> &DatabaseConnection {
        self.pool.read()
    }

    /// Get the write connection
    fn write_conn(&self) -> &DatabaseConnection {
        self.pool.write()
    }

    // ========================================================================
    // Health Check
    // ========================================================================

    /// Ping the database
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    // ========================================================================
    // Category Operations
    // ========================================================================

    /// Create a new category
    pub async fn create_category(
        &self,
        name: String,
        slug: String,
        keywords: Vec<String>,
        is_active: bool,
    ) -> Result<Category> {
        let now = chrono::Utc::now();

        let category = CategoryActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            slug: Set(slug),
            keywords: Set(serde_json::json!(keywords)),
            is_active: Set(is_active),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        category.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Find category by ID
    pub async fn find_category_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        CategoryEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find category by slug
    pub async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        CategoryEntity::find()
            .filter(CategoryColumn::Slug.eq(slug))
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// List all categories ordered by name
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        CategoryEntity::find()
            .order_by_asc(CategoryColumn::Name)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Update a category's name, keywords, or active flag
    pub async fn update_category(
        &self,
        id: Uuid,
        name: Option<String>,
        keywords: Option<Vec<String>>,
        is_active: Option<bool>,
    ) -> Result<Category> {
        let mut category: CategoryActiveModel = CategoryEntity::find_by_id(id)
            .one(self.write_conn())
            .await?
            .ok_or_else(|| AppError::CategoryNotFound { id: id.to_string() })?
            .into();

        if let Some(name) = name {
            category.name = Set(name);
        }
        if let Some(keywords) = keywords {
            category.keywords = Set(serde_json::json!(keywords));
        }
        if let Some(active) = is_active {
            category.is_active = Set(active);
        }
        category.updated_at = Set(chrono::Utc::now().into());

        category.update(self.write_conn()).await.map_err(Into::into)
    }

    // ========================================================================
    // Producer Operations
    // ========================================================================

    /// Create a new producer; active producers get an initial next-run time
    pub async fn create_producer(
        &self,
        name: String,
        url: String,
        category_id: Uuid,
        is_active: bool,
        poll_frequency_minutes: i32,
        number_of_articles: i32,
    ) -> Result<Producer> {
        let now = chrono::Utc::now();
        let next_run_at = next_run_after(now, poll_frequency_minutes, is_active);

        let producer = ProducerActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            url: Set(url),
            category_id: Set(category_id),
            is_active: Set(is_active),
            poll_frequency_minutes: Set(poll_frequency_minutes),
            number_of_articles: Set(number_of_articles),
            last_polled_at: Set(None),
            next_run_at: Set(next_run_at.map(Into::into)),
            last_run_success: Set(None),
            last_run_feed_status: Set(None),
            last_run_category_status: Set(None),
            last_run_articles_found: Set(0),
            last_run_articles_queued: Set(0),
            last_run_articles: Set(serde_json::json!([])),
            last_run_error: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        producer.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Find producer by ID
    pub async fn find_producer_by_id(&self, id: Uuid) -> Result<Option<Producer>> {
        ProducerEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// List all producers, newest first
    pub async fn list_producers(&self) -> Result<Vec<Producer>> {
        ProducerEntity::find()
            .order_by_desc(ProducerColumn::CreatedAt)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Update producer settings
    pub async fn update_producer(
        &self,
        id: Uuid,
        name: Option<String>,
        url: Option<String>,
        category_id: Option<Uuid>,
        poll_frequency_minutes: Option<i32>,
        number_of_articles: Option<i32>,
    ) -> Result<Producer> {
        let mut producer: ProducerActiveModel = ProducerEntity::find_by_id(id)
            .one(self.write_conn())
            .await?
            .ok_or_else(|| AppError::ProducerNotFound { id: id.to_string() })?
            .into();

        if let Some(name) = name {
            producer.name = Set(name);
        }
        if let Some(url) = url {
            producer.url = Set(url);
        }
        if let Some(category_id) = category_id {
            producer.category_id = Set(category_id);
        }
        if let Some(freq) = poll_frequency_minutes {
            producer.poll_frequency_minutes = Set(freq);
        }
        if let Some(count) = number_of_articles {
            producer.number_of_articles = Set(count);
        }
        producer.updated_at = Set(chrono::Utc::now().into());

        producer.update(self.write_conn()).await.map_err(Into::into)
    }

    /// Toggle producer active status.
    ///
    /// Enabling sets next_run_at = now + poll frequency; disabling clears it.
    pub async fn toggle_producer(&self, id: Uuid, is_active: bool) -> Result<Producer> {
        let model = ProducerEntity::find_by_id(id)
            .one(self.write_conn())
            .await?
            .ok_or_else(|| AppError::ProducerNotFound { id: id.to_string() })?;

        let now = chrono::Utc::now();
        let next_run_at = next_run_after(now, model.poll_frequency_minutes, is_active);

        let mut producer: ProducerActiveModel = model.into();
        producer.is_active = Set(is_active);
        producer.next_run_at = Set(next_run_at.map(Into::into));
        producer.updated_at = Set(now.into());

        producer.update(self.write_conn()).await.map_err(Into::into)
    }

    /// Delete a producer and cascade-delete its queue items in one transaction
    pub async fn delete_producer(&self, id: Uuid) -> Result<()> {
        let txn = self.write_conn().begin().await?;

        QueueItemEntity::delete_many()
            .filter(QueueItemColumn::ProducerId.eq(id))
            .exec(&txn)
            .await?;

        let result = ProducerEntity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(AppError::ProducerNotFound { id: id.to_string() });
        }

        txn.commit().await?;
        Ok(())
    }

    /// Find active producers whose next-run time has elapsed
    pub async fn find_due_producers(
        &self,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<Producer>> {
        ProducerEntity::find()
            .filter(ProducerColumn::IsActive.eq(true))
            .filter(ProducerColumn::NextRunAt.is_not_null())
            .filter(ProducerColumn::NextRunAt.lt(now))
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Record the last-polled timestamp on a producer
    pub async fn mark_producer_polled(
        &self,
        id: Uuid,
        polled_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<()> {
        ProducerEntity::update_many()
            .col_expr(ProducerColumn::LastPolledAt, Expr::value(Some(polled_at)))
            .col_expr(ProducerColumn::UpdatedAt, Expr::value(chrono::Utc::now()))
            .filter(ProducerColumn::Id.eq(id))
            .exec(self.write_conn())
            .await?;
        Ok(())
    }

    /// Persist the run summary on a producer
    pub async fn record_run_result(&self, id: Uuid, update: RunResultUpdate) -> Result<()> {
        let mut producer: ProducerActiveModel = ProducerEntity::find_by_id(id)
            .one(self.write_conn())
            .await?
            .ok_or_else(|| AppError::ProducerNotFound { id: id.to_string() })?
            .into();

        producer.last_run_success = Set(Some(update.success));
        producer.last_run_feed_status = Set(Some(update.feed_status));
        producer.last_run_category_status = Set(update.category_status);
        producer.last_run_articles_found = Set(update.articles_found);
        producer.last_run_articles_queued = Set(update.articles_queued);
        producer.last_run_articles = Set(update.articles);
        producer.last_run_error = Set(update.error);
        producer.updated_at = Set(chrono::Utc::now().into());

        producer.update(self.write_conn()).await?;
        Ok(())
    }

    /// Schedule the next run, but only if the producer is still active.
    ///
    /// The is_active guard lives in the UPDATE itself so a disable racing an
    /// in-flight run cannot resurrect the schedule.
    pub async fn schedule_next_run_if_active(
        &self,
        id: Uuid,
        next_run_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<bool> {
        let result = ProducerEntity::update_many()
            .col_expr(ProducerColumn::NextRunAt, Expr::value(Some(next_run_at)))
            .col_expr(ProducerColumn::UpdatedAt, Expr::value(chrono::Utc::now()))
            .filter(ProducerColumn::Id.eq(id))
            .filter(ProducerColumn::IsActive.eq(true))
            .exec(self.write_conn())
            .await?;

        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Queue Operations
    // ========================================================================

    /// Insert filtered articles into the queue in `waiting` status
    pub async fn enqueue_items(
        &self,
        producer_id: Uuid,
        items: Vec<NewQueueItem>,
    ) -> Result<Vec<Uuid>> {
        let now = chrono::Utc::now();
        let mut inserted = Vec::with_capacity(items.len());

        for item in items {
            let id = Uuid::new_v4();

            let queue_item = QueueItemActiveModel {
                id: Set(id),
                producer_id: Set(producer_id),
                title: Set(item.title),
                description: Set(item.description),
                url: Set(item.url),
                published_at: Set(item.published_at.into()),
                rss_categories: Set(serde_json::json!(item.rss_categories)),
                status: Set(String::from(QueueStatus::Waiting)),
                retry_count: Set(0),
                error_message: Set(None),
                generated_article_id: Set(None),
                created_at: Set(now.into()),
            };

            queue_item.insert(self.write_conn()).await?;
            inserted.push(id);
        }

        Ok(inserted)
    }

    /// Find queue item by ID
    pub async fn find_queue_item(&self, id: Uuid) -> Result<Option<QueueItem>> {
        QueueItemEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// List queue items, newest first, optionally filtered by status/producer
    pub async fn list_queue_items(
        &self,
        status: Option<QueueStatus>,
        producer_id: Option<Uuid>,
        limit: u64,
    ) -> Result<Vec<QueueItem>> {
        let mut query = QueueItemEntity::find();

        if let Some(status) = status {
            query = query.filter(QueueItemColumn::Status.eq(String::from(status)));
        }
        if let Some(producer_id) = producer_id {
            query = query.filter(QueueItemColumn::ProducerId.eq(producer_id));
        }

        query
            .order_by_desc(QueueItemColumn::CreatedAt)
            .limit(limit)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Case-insensitive substring search over waiting items' title/description.
    ///
    /// Matching and the limit both run in the query, so a deep queue never
    /// gets paged through memory.
    pub async fn search_queue_items(&self, term: &str, limit: usize) -> Result<Vec<QueueItem>> {
        let pattern = format!("%{}%", escape_like(term));

        QueueItemEntity::find()
            .filter(QueueItemColumn::Status.eq(String::from(QueueStatus::Waiting)))
            .filter(
                Condition::any()
                    .add(Expr::col(QueueItemColumn::Title).ilike(pattern.as_str()))
                    .add(Expr::col(QueueItemColumn::Description).ilike(pattern.as_str())),
            )
            .order_by_desc(QueueItemColumn::CreatedAt)
            .limit(limit as u64)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Queue counts by status
    pub async fn queue_stats(&self) -> Result<QueueStats> {
        let count_status = |status: QueueStatus| {
            QueueItemEntity::find()
                .filter(QueueItemColumn::Status.eq(String::from(status)))
                .count(self.read_conn())
        };

        let total = QueueItemEntity::find().count(self.read_conn()).await?;
        let waiting = count_status(QueueStatus::Waiting).await?;
        let processing = count_status(QueueStatus::Processing).await?;
        let completed = count_status(QueueStatus::Completed).await?;
        let failed = count_status(QueueStatus::Failed).await?;

        Ok(QueueStats {
            total,
            waiting,
            processing,
            completed,
            failed,
        })
    }

    /// Delete a queue item; returns false if it did not exist
    pub async fn delete_queue_item(&self, id: Uuid) -> Result<bool> {
        let result = QueueItemEntity::delete_by_id(id)
            .exec(self.write_conn())
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Best-effort bulk delete with per-id outcome reporting.
    ///
    /// One failed id never aborts the remaining deletions.
    pub async fn bulk_delete_queue_items(&self, ids: &[Uuid]) -> Result<BulkDeleteOutcome> {
        let mut outcome = BulkDeleteOutcome::new(ids.len());

        for &id in ids {
            match self.delete_queue_item(id).await {
                Ok(true) => outcome.record_success(),
                Ok(false) => outcome.record_failure(id, format!("Item {} not found", id)),
                Err(e) => outcome.record_failure(id, format!("Failed to delete {}: {}", id, e)),
            }
        }

        Ok(outcome)
    }

    /// Read a queue item from the primary.
    ///
    /// Reads that must observe a write this repository just made go here;
    /// a lagging replica could still serve the pre-write row.
    async fn find_queue_item_on_primary(&self, id: Uuid) -> Result<Option<QueueItem>> {
        QueueItemEntity::find_by_id(id)
            .one(self.write_conn())
            .await
            .map_err(Into::into)
    }

    /// Claim a queue item for processing.
    ///
    /// Atomic compare-and-swap: only waiting or failed items transition to
    /// processing. A zero-row update is resolved into the precise rejection
    /// so callers can tell "already processing" from "already completed".
    pub async fn claim_queue_item(&self, id: Uuid) -> Result<QueueItem> {
        let claimable = QueueStatus::claimable().map(String::from);

        let result = QueueItemEntity::update_many()
            .col_expr(
                QueueItemColumn::Status,
                Expr::value(String::from(QueueStatus::Processing)),
            )
            .filter(QueueItemColumn::Id.eq(id))
            .filter(QueueItemColumn::Status.is_in(claimable))
            .exec(self.write_conn())
            .await?;

        if result.rows_affected == 0 {
            let item = self
                .find_queue_item_on_primary(id)
                .await?
                .ok_or_else(|| AppError::QueueItemNotFound { id: id.to_string() })?;

            return Err(match item.queue_status() {
                QueueStatus::Processing => AppError::InvalidState {
                    message: format!("Queue item {} is already being processed", id),
                },
                QueueStatus::Completed => AppError::InvalidState {
                    message: format!("Queue item {} is already completed", id),
                },
                _ => AppError::InvalidState {
                    message: format!("Queue item {} could not be claimed", id),
                },
            });
        }

        self.find_queue_item_on_primary(id)
            .await?
            .ok_or_else(|| AppError::QueueItemNotFound { id: id.to_string() })
    }

    /// Mark a claimed item completed with a back-reference to its article
    pub async fn complete_queue_item(&self, id: Uuid, article_id: Uuid) -> Result<()> {
        let mut item: QueueItemActiveModel = QueueItemEntity::find_by_id(id)
            .one(self.write_conn())
            .await?
            .ok_or_else(|| AppError::QueueItemNotFound { id: id.to_string() })?
            .into();

        item.status = Set(String::from(QueueStatus::Completed));
        item.generated_article_id = Set(Some(article_id));
        item.error_message = Set(None);

        item.update(self.write_conn()).await?;
        Ok(())
    }

    /// Mark a claimed item failed, bumping retry_count and persisting the error
    pub async fn fail_queue_item(&self, id: Uuid, error_message: &str) -> Result<()> {
        let result = QueueItemEntity::update_many()
            .col_expr(
                QueueItemColumn::Status,
                Expr::value(String::from(QueueStatus::Failed)),
            )
            .col_expr(
                QueueItemColumn::ErrorMessage,
                Expr::value(Some(error_message.to_string())),
            )
            .col_expr(
                QueueItemColumn::RetryCount,
                Expr::col(QueueItemColumn::RetryCount).add(1),
            )
            .filter(QueueItemColumn::Id.eq(id))
            .exec(self.write_conn())
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::QueueItemNotFound { id: id.to_string() });
        }
        Ok(())
    }

    // ========================================================================
    // Article Operations
    // ========================================================================

    /// Create an article in `pending` status (generated content is never
    /// auto-published)
    pub async fn create_article(
        &self,
        title: String,
        body: String,
        excerpt: String,
        category_id: Uuid,
        topics: Vec<String>,
        source_urls: Vec<String>,
        is_auto_generated: bool,
    ) -> Result<Article> {
        let now = chrono::Utc::now();

        let article = ArticleActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title),
            body: Set(body),
            excerpt: Set(excerpt),
            category_id: Set(category_id),
            topics: Set(serde_json::json!(topics)),
            source_urls: Set(serde_json::json!(source_urls)),
            is_auto_generated: Set(is_auto_generated),
            status: Set(String::from(ArticleStatus::Pending)),
            view_count: Set(0),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        article.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Find article by ID
    pub async fn find_article_by_id(&self, id: Uuid) -> Result<Option<Article>> {
        ArticleEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// List articles, newest first, optionally filtered by status/category
    pub async fn list_articles(
        &self,
        status: Option<ArticleStatus>,
        category_id: Option<Uuid>,
        limit: u64,
    ) -> Result<Vec<Article>> {
        let mut query = ArticleEntity::find();

        if let Some(status) = status {
            query = query.filter(ArticleColumn::Status.eq(String::from(status)));
        }
        if let Some(category_id) = category_id {
            query = query.filter(ArticleColumn::CategoryId.eq(category_id));
        }

        query
            .order_by_desc(ArticleColumn::CreatedAt)
            .limit(limit)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Update an article's content and/or review status
    pub async fn update_article(
        &self,
        id: Uuid,
        title: Option<String>,
        body: Option<String>,
        excerpt: Option<String>,
        topics: Option<Vec<String>>,
        status: Option<ArticleStatus>,
    ) -> Result<Article> {
        let mut article: ArticleActiveModel = ArticleEntity::find_by_id(id)
            .one(self.write_conn())
            .await?
            .ok_or_else(|| AppError::ArticleNotFound { id: id.to_string() })?
            .into();

        if let Some(title) = title {
            article.title = Set(title);
        }
        if let Some(body) = body {
            article.body = Set(body);
        }
        if let Some(excerpt) = excerpt {
            article.excerpt = Set(excerpt);
        }
        if let Some(topics) = topics {
            article.topics = Set(serde_json::json!(topics));
        }
        if let Some(status) = status {
            article.status = Set(String::from(status));
        }
        article.updated_at = Set(chrono::Utc::now().into());

        article.update(self.write_conn()).await.map_err(Into::into)
    }

    /// Delete an article; returns false if it did not exist
    pub async fn delete_article(&self, id: Uuid) -> Result<bool> {
        let result = ArticleEntity::delete_by_id(id)
            .exec(self.write_conn())
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Increment the view counter
    pub async fn increment_view_count(&self, id: Uuid) -> Result<()> {
        ArticleEntity::update_many()
            .col_expr(
                ArticleColumn::ViewCount,
                Expr::col(ArticleColumn::ViewCount).add(1),
            )
            .filter(ArticleColumn::Id.eq(id))
            .exec(self.write_conn())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_delete_outcome_counts_partial_failure() {
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();

        let mut outcome = BulkDeleteOutcome::new(ids.len());
        outcome.record_success();
        outcome.record_failure(ids[1], format!("Item {} not found", ids[1]));
        outcome.record_success();

        assert!(!outcome.success);
        assert_eq!(outcome.total_requested, 3);
        assert_eq!(outcome.success_count, 2);
        assert_eq!(outcome.failed_count, 1);
        assert_eq!(outcome.failed_ids, vec![ids[1]]);
        assert_eq!(outcome.errors.len(), 1);
    }

    #[test]
    fn test_escape_like_wildcards_match_literally() {
        assert_eq!(escape_like("50% off_sale"), "50\\% off\\_sale");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_bulk_delete_outcome_all_deleted() {
        let mut outcome = BulkDeleteOutcome::new(2);
        outcome.record_success();
        outcome.record_success();

        assert!(outcome.success);
        assert_eq!(outcome.failed_count, 0);
        assert!(outcome.failed_ids.is_empty());
    }
}
