//! Producer entity - a configured RSS/Atom feed source with its poll schedule

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "producers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub url: String,

    pub category_id: Uuid,

    pub is_active: bool,

    pub poll_frequency_minutes: i32,

    /// Cap on articles taken per poll
    pub number_of_articles: i32,

    pub last_polled_at: Option<DateTimeWithTimeZone>,

    /// Null while inactive; next scheduled run while active
    pub next_run_at: Option<DateTimeWithTimeZone>,

    pub last_run_success: Option<bool>,

    /// "live" or "not_live"
    #[sea_orm(column_type = "Text", nullable)]
    pub last_run_feed_status: Option<String>,

    /// "found" or "not_found"
    #[sea_orm(column_type = "Text", nullable)]
    pub last_run_category_status: Option<String>,

    pub last_run_articles_found: i32,

    pub last_run_articles_queued: i32,

    /// Article summaries from the last run, stored as JSON
    pub last_run_articles: Json,

    #[sea_orm(column_type = "Text", nullable)]
    pub last_run_error: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

/// Next scheduled run for a producer (de)activated at `now`.
///
/// Inactive producers never carry a schedule; active ones wait a full
/// poll interval before their first run.
pub fn next_run_after(
    now: chrono::DateTime<chrono::Utc>,
    poll_frequency_minutes: i32,
    is_active: bool,
) -> Option<chrono::DateTime<chrono::Utc>> {
    is_active.then(|| now + chrono::Duration::minutes(poll_frequency_minutes as i64))
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,

    #[sea_orm(has_many = "super::queue_item::Entity")]
    QueueItem,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::queue_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QueueItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_run_after_active_waits_a_full_interval() {
        let now = chrono::Utc::now();
        let next = next_run_after(now, 30, true);
        assert_eq!(next, Some(now + chrono::Duration::minutes(30)));
    }

    #[test]
    fn test_next_run_after_inactive_clears_schedule() {
        assert_eq!(next_run_after(chrono::Utc::now(), 30, false), None);
    }
}
