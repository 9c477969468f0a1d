//! Category keyword filtering
//!
//! Producers attached to a keyword-bearing category only enqueue
//! articles whose feed-supplied categories match at least one keyword.
//! Matching is whole-word and case-insensitive, so "ai" matches
//! "AI News" but never "brain".

use crate::parser::FeedArticle;
use regex_lite::Regex;
use tracing::warn;

/// Filter derived from a category's keyword list
#[derive(Debug)]
pub enum CategoryFilter {
    /// No keywords configured: every article passes
    PassThrough,

    /// Whole-word matchers, one per keyword
    Keywords(Vec<Regex>),
}

impl CategoryFilter {
    /// Build a filter from category keywords.
    ///
    /// Empty or whitespace-only keyword lists yield a pass-through
    /// filter, matching the behavior of an unfiltered producer.
    pub fn from_keywords(keywords: &[String]) -> Self {
        let matchers: Vec<Regex> = keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .filter_map(|keyword| {
                let pattern = format!(r"(?i)\b{}\b", escape_keyword(keyword));
                match Regex::new(&pattern) {
                    Ok(re) => Some(re),
                    Err(e) => {
                        warn!(keyword = %keyword, error = %e, "Skipping unusable filter keyword");
                        None
                    }
                }
            })
            .collect();

        if matchers.is_empty() {
            CategoryFilter::PassThrough
        } else {
            CategoryFilter::Keywords(matchers)
        }
    }

    /// Whether an article with the given feed categories passes.
    ///
    /// With keywords configured, an article carrying no categories at
    /// all is rejected: there is nothing to match against.
    pub fn matches(&self, article_categories: &[String]) -> bool {
        match self {
            CategoryFilter::PassThrough => true,
            CategoryFilter::Keywords(matchers) => article_categories
                .iter()
                .any(|cat| matchers.iter().any(|re| re.is_match(cat))),
        }
    }

    /// Keep only the articles that pass this filter
    pub fn apply(&self, articles: Vec<FeedArticle>) -> Vec<FeedArticle> {
        articles
            .into_iter()
            .filter(|a| self.matches(&a.categories))
            .collect()
    }
}

/// Escape regex metacharacters so keywords match literally
fn escape_keyword(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for ch in keyword.chars() {
        if matches!(
            ch,
            '.' | '*' | '+' | '?' | '^' | '$' | '{' | '}' | '(' | ')' | '|' | '[' | ']' | '\\'
        ) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn article(categories: &[&str]) -> FeedArticle {
        FeedArticle {
            title: "t".to_string(),
            url: "https://example.com".to_string(),
            published_at: Utc::now(),
            excerpt: "e".to_string(),
            categories: categories.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_whole_word_matching() {
        let filter = CategoryFilter::from_keywords(&["ai".to_string()]);

        assert!(filter.matches(&["AI News".to_string()]));
        assert!(filter.matches(&["ai".to_string()]));
        assert!(!filter.matches(&["brain science".to_string()]));
    }

    #[test]
    fn test_case_insensitive_matching() {
        let filter = CategoryFilter::from_keywords(&["Technology".to_string()]);
        assert!(filter.matches(&["TECHNOLOGY".to_string()]));
        assert!(filter.matches(&["consumer technology".to_string()]));
    }

    #[test]
    fn test_no_categories_rejected_when_keywords_set() {
        let filter = CategoryFilter::from_keywords(&["ai".to_string()]);
        assert!(!filter.matches(&[]));
    }

    #[test]
    fn test_empty_keywords_pass_through() {
        let filter = CategoryFilter::from_keywords(&[]);
        assert!(matches!(filter, CategoryFilter::PassThrough));
        assert!(filter.matches(&[]));
        assert!(filter.matches(&["anything".to_string()]));
    }

    #[test]
    fn test_metacharacters_match_literally() {
        let filter = CategoryFilter::from_keywords(&["c.o".to_string()]);
        assert!(filter.matches(&["c.o".to_string()]));
        // without escaping, `c.o` would match "cho"
        assert!(!filter.matches(&["cho".to_string()]));
    }

    #[test]
    fn test_apply_filters_articles() {
        let filter = CategoryFilter::from_keywords(&["science".to_string()]);
        let articles = vec![
            article(&["Science"]),
            article(&["Sports"]),
            article(&[]),
        ];

        let kept = filter.apply(articles);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].categories, vec!["Science"]);
    }
}
