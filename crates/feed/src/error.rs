//! Feed-layer error types

use thiserror::Error;

/// Errors raised while fetching or parsing a feed
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status} from feed server")]
    Status { status: u16 },

    #[error("Invalid XML format: {0}")]
    Parse(#[from] feed_rs::parser::ParseFeedError),

    #[error("HTTP client error: {message}")]
    Client { message: String },
}
