//! SeaORM entity models
//!
//! Database entities for the NewsForge pipeline

mod article;
mod category;
mod producer;
mod queue_item;

pub use category::{
    Entity as CategoryEntity,
    Model as Category,
    ActiveModel as CategoryActiveModel,
    Column as CategoryColumn,
};

pub use producer::{
    next_run_after,
    Entity as ProducerEntity,
    Model as Producer,
    ActiveModel as ProducerActiveModel,
    Column as ProducerColumn,
};

pub use queue_item::{
    Entity as QueueItemEntity,
    Model as QueueItem,
    ActiveModel as QueueItemActiveModel,
    Column as QueueItemColumn,
    QueueStatus,
};

pub use article::{
    Entity as ArticleEntity,
    Model as Article,
    ActiveModel as ArticleActiveModel,
    Column as ArticleColumn,
    ArticleStatus,
};

/// Decode a JSON column expected to hold a string array.
///
/// Columns written by this codebase always hold arrays; anything else
/// decodes to empty rather than failing a whole row read.
pub fn string_list(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_list_decodes_array() {
        let v = serde_json::json!(["ai", "technology"]);
        assert_eq!(string_list(&v), vec!["ai", "technology"]);
    }

    #[test]
    fn test_string_list_tolerates_non_array() {
        assert!(string_list(&serde_json::json!(null)).is_empty());
        assert!(string_list(&serde_json::json!("oops")).is_empty());
    }
}
