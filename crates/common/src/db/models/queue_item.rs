//! Queue item entity - an article fetched from a producer, pending AI rewrite

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Queue item status enum
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    Waiting,
    Processing,
    Completed,
    Failed,
}

impl QueueStatus {
    /// Statuses a processor may claim from.
    ///
    /// Processing is excluded so two processors can never claim the same
    /// item; completed is excluded so finished work is never redone.
    /// Failed stays claimable for operator-triggered retries.
    pub fn claimable() -> [QueueStatus; 2] {
        [QueueStatus::Waiting, QueueStatus::Failed]
    }

    pub fn is_claimable(&self) -> bool {
        matches!(self, QueueStatus::Waiting | QueueStatus::Failed)
    }
}

impl From<String> for QueueStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "waiting" => QueueStatus::Waiting,
            "processing" => QueueStatus::Processing,
            "completed" => QueueStatus::Completed,
            "failed" => QueueStatus::Failed,
            _ => QueueStatus::Waiting,
        }
    }
}

impl From<QueueStatus> for String {
    fn from(status: QueueStatus) -> Self {
        match status {
            QueueStatus::Waiting => "waiting".to_string(),
            QueueStatus::Processing => "processing".to_string(),
            QueueStatus::Completed => "completed".to_string(),
            QueueStatus::Failed => "failed".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "queue_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub producer_id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    #[sea_orm(column_type = "Text")]
    pub url: String,

    pub published_at: DateTimeWithTimeZone,

    /// RSS-supplied categories, stored as a JSON string array
    pub rss_categories: Json,

    #[sea_orm(column_type = "Text")]
    pub status: String,

    pub retry_count: i32,

    #[sea_orm(column_type = "Text", nullable)]
    pub error_message: Option<String>,

    /// Set when the item completes; points at the generated article
    pub generated_article_id: Option<Uuid>,

    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// Get the item status as an enum
    pub fn queue_status(&self) -> QueueStatus {
        QueueStatus::from(self.status.clone())
    }

    /// Check if the item is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.queue_status(),
            QueueStatus::Completed | QueueStatus::Failed
        )
    }

    /// Get the RSS categories carried over from the feed
    pub fn category_list(&self) -> Vec<String> {
        super::string_list(&self.rss_categories)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::producer::Entity",
        from = "Column::ProducerId",
        to = "super::producer::Column::Id"
    )]
    Producer,
}

impl Related<super::producer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Producer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claimable_excludes_in_flight_and_finished() {
        assert!(QueueStatus::Waiting.is_claimable());
        assert!(QueueStatus::Failed.is_claimable());
        assert!(!QueueStatus::Processing.is_claimable());
        assert!(!QueueStatus::Completed.is_claimable());

        for status in QueueStatus::claimable() {
            assert!(status.is_claimable());
        }
    }

    #[test]
    fn test_status_round_trip() {
        for raw in ["waiting", "processing", "completed", "failed"] {
            let status = QueueStatus::from(raw.to_string());
            assert_eq!(String::from(status), raw);
        }
    }

    #[test]
    fn test_unknown_status_defaults_to_waiting() {
        assert_eq!(QueueStatus::from("bogus".to_string()), QueueStatus::Waiting);
    }
}
