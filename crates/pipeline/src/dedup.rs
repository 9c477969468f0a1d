//! Near-duplicate detection over queue item titles
//!
//! Planning is a pure read: it groups items by normalized title and
//! proposes deletions, but mutates nothing. The actual delete is a
//! separate, operator-confirmed bulk operation.

use newsforge_common::db::models::QueueItem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Words carrying no identity, ignored when normalizing titles
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "have", "has", "had", "will", "would", "could", "should",
    "this", "that", "these", "those", "from", "up", "out", "down", "off", "over", "under", "new",
    "says", "just", "now", "get", "gets", "got", "how", "why", "what",
];

/// One item inside a dedup group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupEntry {
    pub id: Uuid,
    pub title: String,
}

/// A group of items sharing a normalized title
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupGroup {
    pub normalized_title: String,
    pub keep: DedupEntry,
    pub delete: Vec<DedupEntry>,
}

/// The full dedup proposal over a set of items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupPlan {
    pub groups: Vec<DedupGroup>,
    pub duplicates_found: usize,
}

impl DedupPlan {
    /// All ids proposed for deletion across groups
    pub fn delete_ids(&self) -> Vec<Uuid> {
        self.groups
            .iter()
            .flat_map(|g| g.delete.iter().map(|e| e.id))
            .collect()
    }
}

/// Normalize a title into an order-independent token key.
///
/// Lowercase, strip punctuation, drop stopwords and tokens of one or
/// two characters, sort, rejoin with `-`.
pub fn generate_title_hash(title: &str) -> String {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .filter(|&c| c.is_alphanumeric() || c == '_' || c.is_whitespace())
        .collect();

    let mut tokens: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|w| w.chars().count() > 2)
        .filter(|w| !STOPWORDS.contains(w))
        .collect();

    tokens.sort_unstable();
    tokens.join("-")
}

/// Group items by normalized title, keeping the newest in each group.
///
/// Items whose normalized title is empty (all stopwords/punctuation)
/// never group with one another; there is no signal to match on.
pub fn plan_dedup(items: &[QueueItem]) -> DedupPlan {
    let mut buckets: HashMap<String, Vec<&QueueItem>> = HashMap::new();

    for item in items {
        let key = generate_title_hash(&item.title);
        if key.is_empty() {
            continue;
        }
        buckets.entry(key).or_default().push(item);
    }

    let mut groups = Vec::new();
    let mut duplicates_found = 0;

    for (key, mut members) in buckets {
        if members.len() < 2 {
            continue;
        }

        // Newest first; ties broken by id for a stable plan
        members.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let keep = DedupEntry {
            id: members[0].id,
            title: members[0].title.clone(),
        };
        let delete: Vec<DedupEntry> = members[1..]
            .iter()
            .map(|m| DedupEntry {
                id: m.id,
                title: m.title.clone(),
            })
            .collect();

        duplicates_found += delete.len();
        groups.push(DedupGroup {
            normalized_title: key,
            keep,
            delete,
        });
    }

    // Deterministic output order for API consumers
    groups.sort_by(|a, b| a.normalized_title.cmp(&b.normalized_title));

    DedupPlan {
        groups,
        duplicates_found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn item(title: &str, age_minutes: i64) -> QueueItem {
        QueueItem {
            id: Uuid::new_v4(),
            producer_id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            url: "https://example.com".to_string(),
            published_at: Utc::now().into(),
            rss_categories: serde_json::json!([]),
            status: "waiting".to_string(),
            retry_count: 0,
            error_message: None,
            generated_article_id: None,
            created_at: (Utc::now() - Duration::minutes(age_minutes)).into(),
        }
    }

    #[test]
    fn test_hash_is_order_and_case_independent() {
        assert_eq!(
            generate_title_hash("Apple Unveils iPhone Pro"),
            generate_title_hash("iphone PRO unveils apple!"),
        );
    }

    #[test]
    fn test_hash_strips_stopwords_and_short_tokens() {
        // "the", "of", "new" are stopwords; "ai" is too short
        assert_eq!(
            generate_title_hash("The Rise of New AI Systems"),
            "rise-systems"
        );
    }

    #[test]
    fn test_hash_strips_punctuation() {
        assert_eq!(
            generate_title_hash("Breaking: markets, rally!"),
            generate_title_hash("Breaking markets rally"),
        );
    }

    #[test]
    fn test_plan_keeps_newest_of_three() {
        let newest = item("Apple Unveils iPhone Pro", 1);
        let mid = item("iPhone Pro unveils Apple", 10);
        let oldest = item("apple iphone pro unveils", 60);
        let keep_id = newest.id;

        let plan = plan_dedup(&[oldest.clone(), newest.clone(), mid.clone()]);

        assert_eq!(plan.groups.len(), 1);
        assert_eq!(plan.duplicates_found, 2);
        assert_eq!(plan.groups[0].keep.id, keep_id);
        assert_eq!(plan.groups[0].delete.len(), 2);
        assert!(!plan.delete_ids().contains(&keep_id));
    }

    #[test]
    fn test_plan_ignores_unique_titles() {
        let a = item("Quantum computing milestone", 1);
        let b = item("Football season opens", 2);

        let plan = plan_dedup(&[a, b]);
        assert!(plan.groups.is_empty());
        assert_eq!(plan.duplicates_found, 0);
    }

    #[test]
    fn test_plan_skips_empty_keys() {
        // Both normalize to "" but must not be grouped together
        let a = item("The And Of", 1);
        let b = item("!!!", 2);

        let plan = plan_dedup(&[a, b]);
        assert!(plan.groups.is_empty());
    }

    #[test]
    fn test_plan_is_pure() {
        let items = vec![item("Same Story Here", 1), item("same story here", 5)];
        let before: Vec<String> = items.iter().map(|i| i.status.clone()).collect();

        let _ = plan_dedup(&items);

        let after: Vec<String> = items.iter().map(|i| i.status.clone()).collect();
        assert_eq!(before, after);
    }
}
