//! RSS/Atom feed fetching, parsing, and category filtering
//!
//! This crate turns a feed URL into a normalized list of candidate
//! articles. Fetch failures are data, not panics: callers receive a
//! [`FeedOutcome`] so a dead feed can be recorded on its producer
//! instead of aborting a scheduler sweep.

pub mod error;
pub mod fetcher;
pub mod filter;
pub mod parser;
pub mod text;

pub use error::FeedError;
pub use fetcher::{FeedFetcher, FeedOutcome, FeedReport};
pub use filter::CategoryFilter;
pub use parser::{FeedArticle, ParsedFeed};
