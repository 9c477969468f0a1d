//! Article entity - generated or edited content pending human approval

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Article review status enum
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    Pending,
    Approved,
    Rejected,
}

impl From<String> for ArticleStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => ArticleStatus::Pending,
            "approved" => ArticleStatus::Approved,
            "rejected" => ArticleStatus::Rejected,
            _ => ArticleStatus::Pending,
        }
    }
}

impl From<ArticleStatus> for String {
    fn from(status: ArticleStatus) -> Self {
        match status {
            ArticleStatus::Pending => "pending".to_string(),
            ArticleStatus::Approved => "approved".to_string(),
            ArticleStatus::Rejected => "rejected".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    /// Markdown body
    #[sea_orm(column_type = "Text")]
    pub body: String,

    #[sea_orm(column_type = "Text")]
    pub excerpt: String,

    pub category_id: Uuid,

    /// Single-token topics, stored as a JSON string array
    pub topics: Json,

    /// Source URLs cited by the rewrite, stored as a JSON string array
    pub source_urls: Json,

    pub is_auto_generated: bool,

    #[sea_orm(column_type = "Text")]
    pub status: String,

    pub view_count: i64,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Get the review status as an enum
    pub fn article_status(&self) -> ArticleStatus {
        ArticleStatus::from(self.status.clone())
    }

    /// Get the topic list
    pub fn topic_list(&self) -> Vec<String> {
        super::string_list(&self.topics)
    }

    /// Get the source URL list
    pub fn source_url_list(&self) -> Vec<String> {
        super::string_list(&self.source_urls)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
