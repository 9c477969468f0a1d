//! Feed fetching
//!
//! HTTP retrieval of feed documents. [`FeedFetcher::analyze`] never
//! returns `Err`: upstream failures become a [`FeedOutcome::Error`]
//! carrying the message, so a broken feed is an observation to record,
//! not a fault to propagate.

use crate::error::FeedError;
use crate::parser::{self, FeedArticle};
use chrono::Utc;
use std::time::Duration;
use tracing::{info, warn};

const ACCEPT_HEADER: &str = "application/rss+xml, application/xml, text/xml, */*";

/// A successfully fetched and parsed feed
#[derive(Debug, Clone)]
pub struct FeedReport {
    pub feed_title: String,
    pub feed_url: String,
    pub articles: Vec<FeedArticle>,
}

/// Outcome of fetching a feed: liveness as data
#[derive(Debug, Clone)]
pub enum FeedOutcome {
    Success(FeedReport),
    Error { message: String },
}

impl FeedOutcome {
    /// "live" / "not_live" status string recorded on producer runs
    pub fn feed_status(&self) -> &'static str {
        match self {
            FeedOutcome::Success(_) => "live",
            FeedOutcome::Error { .. } => "not_live",
        }
    }
}

/// HTTP fetcher for RSS/Atom feeds
#[derive(Clone)]
pub struct FeedFetcher {
    client: reqwest::Client,
    max_articles: usize,
}

impl FeedFetcher {
    /// Create a fetcher with the given timeout, User-Agent, and default
    /// per-poll article cap
    pub fn new(timeout_secs: u64, user_agent: &str, max_articles: usize) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(|e| FeedError::Client {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            max_articles,
        })
    }

    /// Fetch and parse a feed, failing on any HTTP or XML problem
    pub async fn fetch(&self, url: &str, max_articles: usize) -> Result<FeedReport, FeedError> {
        let response = self
            .client
            .get(url)
            .header("Accept", ACCEPT_HEADER)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let parsed = parser::parse_feed(&bytes, max_articles, Utc::now())?;

        info!(
            url = %url,
            feed_title = %parsed.title,
            articles = parsed.articles.len(),
            "Fetched feed"
        );

        Ok(FeedReport {
            feed_title: parsed.title,
            feed_url: url.to_string(),
            articles: parsed.articles,
        })
    }

    /// Fetch a feed, reporting failure as data rather than an error.
    ///
    /// `max_articles` overrides the fetcher default when given; a
    /// producer's configured article count takes that slot.
    pub async fn analyze(&self, url: &str, max_articles: Option<usize>) -> FeedOutcome {
        let cap = max_articles.unwrap_or(self.max_articles);

        match self.fetch(url, cap).await {
            Ok(report) => FeedOutcome::Success(report),
            Err(e) => {
                warn!(url = %url, error = %e, "Feed fetch failed");
                FeedOutcome::Error {
                    message: e.to_string(),
                }
            }
        }
    }
}
