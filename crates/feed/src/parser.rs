//! Feed normalization
//!
//! Wraps feed-rs and flattens RSS/Atom differences into a single
//! [`FeedArticle`] shape the rest of the pipeline consumes.

use crate::error::FeedError;
use crate::text;
use chrono::{DateTime, Utc};
use feed_rs::parser;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A normalized article extracted from a feed entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedArticle {
    pub title: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub excerpt: String,
    pub categories: Vec<String>,
}

/// A parsed feed with its normalized articles
#[derive(Debug, Clone)]
pub struct ParsedFeed {
    pub title: String,
    pub articles: Vec<FeedArticle>,
}

/// Parse feed bytes into normalized articles.
///
/// Entries without any resolvable link are skipped. Missing publish
/// dates fall back to `now` so queue ordering stays total.
pub fn parse_feed(
    bytes: &[u8],
    max_articles: usize,
    now: DateTime<Utc>,
) -> Result<ParsedFeed, FeedError> {
    let parsed = parser::parse(bytes)?;

    let feed_title = parsed
        .title
        .map(|t| t.content)
        .unwrap_or_else(|| "Unknown Feed".to_string());

    let mut articles = Vec::new();

    for entry in parsed.entries.into_iter().take(max_articles) {
        let title = entry
            .title
            .as_ref()
            .map(|t| text::decode_entities(t.content.trim()))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Untitled".to_string());

        // Prefer the alternate/html link; fall back to the first link,
        // then the entry id when it is itself a permalink
        let url = entry
            .links
            .iter()
            .find(|l| {
                l.rel.as_deref() == Some("alternate")
                    || l.media_type.as_deref() == Some("text/html")
            })
            .or_else(|| entry.links.first())
            .map(|l| l.href.trim().to_string())
            .filter(|href| !href.is_empty())
            .or_else(|| permalink_id(&entry.id));

        let Some(url) = url else {
            warn!(title = %title, "Skipping feed entry with no link");
            continue;
        };

        let published_at = entry.published.or(entry.updated).unwrap_or(now);

        let excerpt = entry
            .summary
            .as_ref()
            .map(|s| s.content.as_str())
            .or_else(|| {
                entry
                    .content
                    .as_ref()
                    .and_then(|c| c.body.as_deref())
            })
            .map(text::clean_excerpt)
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| "No description available".to_string());

        let categories: Vec<String> = entry
            .categories
            .iter()
            .map(|c| {
                c.label
                    .as_deref()
                    .unwrap_or(c.term.as_str())
                    .trim()
                    .to_string()
            })
            .filter(|c| !c.is_empty())
            .collect();

        articles.push(FeedArticle {
            title,
            url,
            published_at,
            excerpt,
            categories,
        });
    }

    Ok(ParsedFeed {
        title: feed_title,
        articles,
    })
}

/// An entry id usable as a link.
///
/// RSS guids are often permalinks, but feed-rs synthesizes an opaque id
/// for guid-less items, so only http(s) ids count.
fn permalink_id(id: &str) -> Option<String> {
    let id = id.trim();
    (id.starts_with("http://") || id.starts_with("https://")).then(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS_SAMPLE: &str = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Tech Wire</title>
    <item>
      <title>AI Breakthrough &amp; More</title>
      <link>https://example.com/ai</link>
      <description>&lt;p&gt;Big &lt;b&gt;news&lt;/b&gt; today&lt;/p&gt;</description>
      <pubDate>Mon, 06 Jan 2025 10:00:00 GMT</pubDate>
      <category>Artificial Intelligence</category>
      <category>Technology</category>
    </item>
    <item>
      <title>No Link Entry</title>
      <description>orphan</description>
    </item>
  </channel>
</rss>"#;

    const ATOM_SAMPLE: &str = r#"<?xml version="1.0"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Wire</title>
  <id>urn:feed:atom-wire</id>
  <updated>2025-01-06T10:00:00Z</updated>
  <entry>
    <title>Quantum Leap</title>
    <id>urn:entry:1</id>
    <link rel="alternate" href="https://example.com/quantum"/>
    <summary>Qubits everywhere</summary>
    <updated>2025-01-06T09:00:00Z</updated>
    <category term="science" label="Science"/>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss_feed() {
        let now = Utc::now();
        let parsed = parse_feed(RSS_SAMPLE.as_bytes(), 10, now).unwrap();

        assert_eq!(parsed.title, "Tech Wire");
        assert_eq!(parsed.articles.len(), 1, "linkless entry must be skipped");

        let article = &parsed.articles[0];
        assert_eq!(article.title, "AI Breakthrough & More");
        assert_eq!(article.url, "https://example.com/ai");
        assert_eq!(article.excerpt, "Big news today");
        assert_eq!(
            article.categories,
            vec!["Artificial Intelligence", "Technology"]
        );
    }

    #[test]
    fn test_parse_atom_feed() {
        let now = Utc::now();
        let parsed = parse_feed(ATOM_SAMPLE.as_bytes(), 10, now).unwrap();

        assert_eq!(parsed.title, "Atom Wire");
        let article = &parsed.articles[0];
        assert_eq!(article.url, "https://example.com/quantum");
        assert_eq!(article.categories, vec!["Science"]);
        assert!(article.published_at < now);
    }

    #[test]
    fn test_parse_caps_article_count() {
        let mut items = String::new();
        for i in 0..20 {
            items.push_str(&format!(
                "<item><title>t{i}</title><link>https://example.com/{i}</link></item>"
            ));
        }
        let xml = format!(
            "<?xml version=\"1.0\"?><rss version=\"2.0\"><channel><title>Big</title>{items}</channel></rss>"
        );

        let parsed = parse_feed(xml.as_bytes(), 5, Utc::now()).unwrap();
        assert_eq!(parsed.articles.len(), 5);
    }

    #[test]
    fn test_guid_permalink_used_when_link_missing() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>G</title>
<item><title>Guid Only</title><guid>https://example.com/guid-only</guid></item>
<item><title>Opaque Guid</title><guid isPermaLink="false">tag:example.com,2025:42</guid></item>
</channel></rss>"#;

        let parsed = parse_feed(xml.as_bytes(), 10, Utc::now()).unwrap();
        assert_eq!(parsed.articles.len(), 1);
        assert_eq!(parsed.articles[0].url, "https://example.com/guid-only");
    }

    #[test]
    fn test_parse_invalid_xml_is_error() {
        assert!(parse_feed(b"this is not xml", 10, Utc::now()).is_err());
    }

    #[test]
    fn test_missing_date_falls_back_to_now() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>F</title>
<item><title>t</title><link>https://example.com/x</link></item>
</channel></rss>"#;

        let now = Utc::now();
        let parsed = parse_feed(xml.as_bytes(), 10, now).unwrap();
        assert_eq!(parsed.articles[0].published_at, now);
    }
}
